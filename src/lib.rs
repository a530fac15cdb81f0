//! Speech DSP: framing, DFT/STFT, dB spectrograms, harmonic resynthesis and
//! source-filter vowel synthesis over in-memory sample buffers.

pub mod args;
pub mod audio;
pub mod commands;
pub mod config;
pub mod dsp;
pub mod error;
pub mod matrix;
pub mod util;

pub use error::{DspError, DspResult};
pub use matrix::Matrix;
pub use rustfft::num_complex::Complex64;
