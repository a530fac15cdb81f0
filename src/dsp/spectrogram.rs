//! Decibel spectrogram conversion.
//!
//! Magnitudes are taken to dB, normalized so the loudest bin of the whole
//! input sits at exactly 0 dB, then floored at -60 dB.

use log::debug;
use rustfft::num_complex::Complex64;

use crate::error::{DspError, DspResult};
use crate::matrix::Matrix;

/// Added to every magnitude before the log so exact zeros stay finite.
pub const EPSILON: f64 = 1e-10;

/// Lowest value a normalized spectrogram may take, in dB.
pub const FLOOR_DB: f64 = -60.0;

/// Converts a spectrum or STFT into a normalized, clipped dB spectrogram.
///
/// Every bin that ties for the global maximum maps to exactly 0 dB. An all-zero
/// input ties everywhere and therefore comes out as 0 dB throughout.
pub fn to_spectrogram(stft: &Matrix<Complex64>) -> DspResult<Matrix<f64>> {
    if stft.is_empty() {
        return Err(DspError::invalid_param("stft", "must not be empty"));
    }

    let mut db = stft.map(|c| 20.0 * (c.norm() + EPSILON).log10());
    if db.as_slice().iter().any(|v| !v.is_finite()) {
        return Err(DspError::invalid_param("stft", "contains non-finite values"));
    }
    let max = db.as_slice().iter().copied().fold(f64::NEG_INFINITY, f64::max);

    for column in db.columns_mut() {
        for value in column.iter_mut() {
            *value = (*value - max).max(FLOOR_DB);
        }
    }

    debug!("Spectrogram {:?}, reference level {:.2} dB", db.shape(), max);
    Ok(db)
}

/// Index of the loudest bin among `column[..max_bin]`; the first index wins ties.
pub fn peak_bin(column: &[f64], max_bin: usize) -> Option<usize> {
    column
        .iter()
        .take(max_bin)
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, bv)) if bv >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum(values: &[(f64, f64)]) -> Matrix<Complex64> {
        Matrix::from_column(values.iter().map(|&(re, im)| Complex64::new(re, im)).collect())
    }

    #[test]
    fn test_max_is_zero_and_floor_applies() {
        let s = spectrum(&[(10.0, 0.0), (0.0, 1.0), (0.1, 0.0), (0.0, 0.0)]);
        let db = to_spectrogram(&s).unwrap();
        let values = db.as_slice();
        assert_eq!(values[0], 0.0);
        assert!((values[1] + 20.0).abs() < 1e-6);
        assert!((values[2] + 40.0).abs() < 1e-6);
        assert_eq!(values[3], FLOOR_DB);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(max, 0.0);
        assert!(min >= FLOOR_DB);
    }

    #[test]
    fn test_global_normalization_across_frames() {
        let m = Matrix::from_columns(
            2,
            2,
            vec![
                Complex64::new(1.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(100.0, 0.0),
                Complex64::new(1.0, 0.0),
            ],
        )
        .unwrap();
        let db = to_spectrogram(&m).unwrap();
        assert_eq!(db.column(1)[0], 0.0);
        assert!((db.column(0)[0] + 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_all_zero_input_ties_at_zero() {
        let m = Matrix::filled(16, 3, Complex64::new(0.0, 0.0));
        let db = to_spectrogram(&m).unwrap();
        assert!(db.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_and_non_finite_rejected() {
        assert!(to_spectrogram(&Matrix::from_column(Vec::new())).is_err());
        let s = spectrum(&[(f64::INFINITY, 0.0)]);
        assert!(to_spectrogram(&s).is_err());
        let s = spectrum(&[(1.0, 0.0), (f64::NAN, 0.0)]);
        assert!(to_spectrogram(&s).is_err());
        let s = spectrum(&[(1.0, 0.0), (0.0, f64::NAN)]);
        assert!(to_spectrogram(&s).is_err());
    }

    #[test]
    fn test_peak_bin() {
        let column = [-10.0, 0.0, -3.0, 0.0, 5.0];
        assert_eq!(peak_bin(&column, 4), Some(1));
        assert_eq!(peak_bin(&column, 5), Some(4));
        assert_eq!(peak_bin(&column, 0), None);
    }
}
