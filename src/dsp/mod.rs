pub mod dft;
pub mod excitation;
pub mod frames;
pub mod harmonic;
pub mod resonator;
pub mod spectrogram;
pub mod vowel;

pub use dft::{bin_frequency, dft_matrix, spectrum, transform};
pub use excitation::voiced_excitation;
pub use frames::{frame, num_frames};
pub use harmonic::resynthesize;
pub use resonator::{resonator, Resonator};
pub use spectrogram::{peak_bin, to_spectrogram};
pub use vowel::{synthesize_formants, synthesize_vowel, Formant, Vowel};
