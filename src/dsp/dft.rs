//! Forward discrete Fourier transform.
//!
//! Both paths use the same convention: unnormalized, negative exponent,
//! `X[k] = sum_n x[n] * (cos(2*pi*k*n/N) - i*sin(2*pi*k*n/N))`.

use std::f64::consts::PI;

use log::debug;
use rustfft::{num_complex::Complex64, FftPlanner};

use crate::error::{DspError, DspResult};
use crate::matrix::Matrix;

/// Builds the `n x n` DFT matrix `W[k, m] = cos(2*pi*k*m/n) - i*sin(2*pi*k*m/n)`.
///
/// `W.apply(x)` is the DFT of a length-`n` signal `x`.
pub fn dft_matrix(n: usize) -> DspResult<Matrix<Complex64>> {
    if n == 0 {
        return Err(DspError::invalid_param("n", "must be greater than zero"));
    }
    let mut w = Matrix::filled(n, n, Complex64::new(0.0, 0.0));
    for (m, column) in w.columns_mut().enumerate() {
        for (k, value) in column.iter_mut().enumerate() {
            // k*m mod n keeps the angle in [0, 2*pi) for large n
            let angle = 2.0 * PI * ((k * m) % n) as f64 / n as f64;
            *value = Complex64::new(angle.cos(), -angle.sin());
        }
    }
    Ok(w)
}

/// FFT of every column of a frame matrix, each frame on its own.
pub fn transform(frames: &Matrix<f64>) -> DspResult<Matrix<Complex64>> {
    let (rows, cols) = frames.shape();
    if rows == 0 || cols == 0 {
        return Err(DspError::invalid_param(
            "frames",
            format!("cannot transform an empty {}x{} matrix", rows, cols),
        ));
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(rows);
    let mut scratch = vec![Complex64::new(0.0, 0.0); fft.get_inplace_scratch_len()];

    let mut stft = frames.map(|&x| Complex64::new(x, 0.0));
    for column in stft.columns_mut() {
        fft.process_with_scratch(column, &mut scratch);
    }

    debug!("Transformed {} frames of {} samples", cols, rows);
    Ok(stft)
}

/// FFT of a whole waveform.
pub fn spectrum(waveform: &[f64]) -> DspResult<Vec<Complex64>> {
    if waveform.is_empty() {
        return Err(DspError::invalid_param("waveform", "must not be empty"));
    }
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(waveform.len());
    let mut buffer: Vec<Complex64> = waveform.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    fft.process(&mut buffer);
    Ok(buffer)
}

/// Center frequency in Hz of `bin` for an `n`-point transform.
pub fn bin_frequency(bin: usize, n: usize, sample_rate: f64) -> f64 {
    bin as f64 * sample_rate / n as f64
}
