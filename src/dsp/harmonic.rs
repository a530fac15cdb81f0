//! Fourier-harmonic resynthesis.
//!
//! ```text
//! x[n] = (2/N) * sum_{l=1}^{L} |X[idx_l]| * cos(2*pi*l*n/T0 + arg X[idx_l]),  idx_l = floor(l*N/T0)
//! ```

use std::f64::consts::PI;

use log::debug;
use rustfft::num_complex::Complex64;

use crate::error::{ensure_positive, DspError, DspResult};

/// Resynthesizes a length-`N` waveform from the first `num_harmonics` harmonics
/// of the pitch period `t0` (in samples) found in the spectrum `x`.
///
/// Summation stops at the first harmonic whose bin reaches `N`. A harmonic whose
/// bin rounds down to DC carries no pitch information and is skipped.
pub fn resynthesize(num_harmonics: usize, x: &[Complex64], t0: f64) -> DspResult<Vec<f64>> {
    if num_harmonics < 1 {
        return Err(DspError::invalid_param("num_harmonics", "must be at least 1"));
    }
    ensure_positive("t0", t0)?;
    let n = x.len();
    if n == 0 {
        return Err(DspError::invalid_param("x", "spectrum must not be empty"));
    }

    let mut output = vec![0.0; n];
    let mut used = 0;
    for l in 1..=num_harmonics {
        let idx = (l as f64 * n as f64 / t0).floor() as usize;
        if idx >= n {
            debug!("Harmonic {} maps past bin {}, stopping", l, n - 1);
            break;
        }
        if idx == 0 {
            continue;
        }

        let magnitude = x[idx].norm();
        let phase = x[idx].arg();
        let omega = 2.0 * PI * l as f64 / t0;
        for (i, sample) in output.iter_mut().enumerate() {
            *sample += magnitude * (omega * i as f64 + phase).cos();
        }
        used += 1;
    }

    let scale = 2.0 / n as f64;
    output.iter_mut().for_each(|v| *v *= scale);

    debug!("Resynthesized {} samples from {}/{} harmonics", n, used, num_harmonics);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::dft::spectrum;

    #[test]
    fn test_reconstructs_periodic_signal() {
        // period 20 over 200 samples: harmonics land exactly on bins 10, 20, 30
        let n = 200;
        let t0 = 20.0;
        let x: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64;
                (2.0 * PI * t / t0).cos() + 0.5 * (2.0 * PI * 3.0 * t / t0 + 0.3).cos()
            })
            .collect();
        let spec = spectrum(&x).unwrap();
        let y = resynthesize(5, &spec, t0).unwrap();
        for (a, b) in x.iter().zip(&y) {
            assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let spec = vec![Complex64::new(1.0, 0.0); 8];
        assert!(resynthesize(0, &spec, 4.0).is_err());
        assert!(resynthesize(1, &spec, 0.0).is_err());
        assert!(resynthesize(1, &spec, -2.0).is_err());
        assert!(resynthesize(1, &[], 4.0).is_err());
    }

    #[test]
    fn test_period_longer_than_spectrum_is_silent() {
        let n = 16;
        let num_harmonics = 3;
        let spec = vec![Complex64::new(1.0, 1.0); n];
        let t0 = (n * (num_harmonics + 1)) as f64 + 1.0;
        let y = resynthesize(num_harmonics, &spec, t0).unwrap();
        assert_eq!(y.len(), n);
        assert!(y.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_dc_harmonics_skipped_others_kept() {
        // N = 16, T0 = 20: harmonic 1 maps to bin 0 and is skipped,
        // harmonics 2 and 3 map to bins 1 and 2
        let n = 16;
        let t0 = 20.0;
        let mut spec = vec![Complex64::new(0.0, 0.0); n];
        spec[0] = Complex64::new(5.0, 0.0);
        spec[1] = Complex64::new(2.0, 0.0);
        let y = resynthesize(3, &spec, t0).unwrap();
        for (i, v) in y.iter().enumerate() {
            let expected = (2.0 / 16.0) * 2.0 * (2.0 * PI * 2.0 * i as f64 / t0).cos();
            assert!((v - expected).abs() < 1e-12, "sample {}: {} vs {}", i, v, expected);
        }
    }

    #[test]
    fn test_truncates_past_nyquist_bins() {
        // T0 = 1 sends the first harmonic to bin N, so nothing is summed
        let spec = vec![Complex64::new(1.0, 0.0); 8];
        let y = resynthesize(4, &spec, 1.0).unwrap();
        assert!(y.iter().all(|&v| v == 0.0));

        // T0 = 4 over N = 8: bins 2, 4, 6 are used, harmonic 4 hits bin 8 and stops
        let mut spec = vec![Complex64::new(0.0, 0.0); 8];
        spec[6] = Complex64::new(4.0, 0.0);
        let y = resynthesize(10, &spec, 4.0).unwrap();
        for (i, v) in y.iter().enumerate() {
            let expected = (2.0 / 8.0) * 4.0 * (2.0 * PI * 3.0 * i as f64 / 4.0).cos();
            assert!((v - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_deterministic() {
        let spec: Vec<Complex64> = (0..64).map(|i| Complex64::new(i as f64, -(i as f64) * 0.5)).collect();
        let a = resynthesize(6, &spec, 12.5).unwrap();
        let b = resynthesize(6, &spec, 12.5).unwrap();
        assert_eq!(a, b);
    }
}
