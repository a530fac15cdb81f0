use log::debug;

use crate::error::{ensure_positive, DspError, DspResult};

/// Voiced glottal source: a train of unit impulses, one every `fs / f0` samples.
///
/// Pulse `k` lands on sample `round(k * fs / f0)`; everything else is zero.
pub fn voiced_excitation(num_samples: usize, f0: f64, fs: f64) -> DspResult<Vec<f64>> {
    if num_samples == 0 {
        return Err(DspError::invalid_param("num_samples", "must be greater than zero"));
    }
    ensure_positive("f0", f0)?;
    ensure_positive("fs", fs)?;

    let period = fs / f0;
    if !period.is_finite() || period < 1.0 {
        return Err(DspError::invalid_param(
            "f0",
            format!("pitch period fs/f0 = {} must be at least one sample", period),
        ));
    }

    let mut excitation = vec![0.0; num_samples];
    let mut pulses = 0;
    // period >= 1, so at most num_samples pulses fit
    let last = ((num_samples - 1) as f64 / period).ceil() as u64;
    for k in 0..=last {
        let index = (k as f64 * period).round();
        if index >= num_samples as f64 {
            break;
        }
        excitation[index as usize] = 1.0;
        pulses += 1;
    }

    debug!(
        "Voiced excitation: {} pulses over {} samples (period {:.2})",
        pulses, num_samples, period
    );
    Ok(excitation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_positions() {
        let e = voiced_excitation(8000, 100.0, 8000.0).unwrap();
        assert_eq!(e.len(), 8000);
        for (i, &v) in e.iter().enumerate() {
            if i % 80 == 0 {
                assert_eq!(v, 1.0, "missing pulse at {}", i);
            } else {
                assert_eq!(v, 0.0, "unexpected pulse at {}", i);
            }
        }
    }

    #[test]
    fn test_fractional_period_rounds() {
        // period 8000 / 110 = 72.727...
        let e = voiced_excitation(300, 110.0, 8000.0).unwrap();
        let pulses: Vec<usize> = e
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 1.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(pulses, vec![0, 73, 145, 218, 291]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(voiced_excitation(0, 100.0, 8000.0).is_err());
        assert!(voiced_excitation(100, 0.0, 8000.0).is_err());
        assert!(voiced_excitation(100, -100.0, 8000.0).is_err());
        assert!(voiced_excitation(100, 100.0, 0.0).is_err());
    }

    #[test]
    fn test_sub_sample_period_rejected() {
        assert!(voiced_excitation(8, 1e300, 1e-300).is_err());
        assert!(voiced_excitation(8000, 1e9, 8000.0).is_err());
        assert!(voiced_excitation(8, 8001.0, 8000.0).is_err());
    }

    #[test]
    fn test_one_sample_period_fills_every_sample() {
        let e = voiced_excitation(16, 8000.0, 8000.0).unwrap();
        assert!(e.iter().all(|&v| v == 1.0));
    }
}
