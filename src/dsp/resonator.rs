//! Second-order all-pole resonator.
//!
//! ```text
//!    r     = exp(-pi * bandwidth / fs)
//!    theta = 2 * pi * center_freq / fs
//!    y[n]  = x[n] + a1 * y[n-1] + a2 * y[n-2],   a1 = 2r cos(theta), a2 = -r^2
//! ```
//!
//! The recurrence is evaluated strictly in sample order with `y[-1] = y[-2] = 0`.

use std::f64::consts::PI;

use biquad::{Biquad, Coefficients, DirectForm1};

use crate::error::{ensure_positive, DspError, DspResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resonator {
    a1: f64,
    a2: f64,
}

impl Resonator {
    pub fn new(center_freq: f64, bandwidth: f64, fs: f64) -> DspResult<Self> {
        if !center_freq.is_finite() || center_freq < 0.0 {
            return Err(DspError::invalid_param(
                "center_freq",
                format!("must be a non-negative finite frequency, got {}", center_freq),
            ));
        }
        ensure_positive("bandwidth", bandwidth)?;
        ensure_positive("fs", fs)?;

        let r = (-PI * bandwidth / fs).exp();
        let theta = 2.0 * PI * center_freq / fs;
        Ok(Self {
            a1: 2.0 * r * theta.cos(),
            a2: -r * r,
        })
    }

    /// Feedback coefficients `(a1, a2)` of the recurrence.
    pub fn feedback(&self) -> (f64, f64) {
        (self.a1, self.a2)
    }

    /// Filters `input`, carrying `(y[n-1], y[n-2])` from one sample to the next.
    pub fn filter(&self, input: &[f64]) -> DspResult<Vec<f64>> {
        if input.is_empty() {
            return Err(DspError::invalid_param("input", "must not be empty"));
        }
        let (a1, a2) = (self.a1, self.a2);
        Ok(input
            .iter()
            .scan((0.0_f64, 0.0_f64), |state, &x| {
                let (y1, y2) = *state;
                let y = x + a1 * y1 + a2 * y2;
                *state = (y, y1);
                Some(y)
            })
            .collect())
    }

    /// The same filter as standard biquad coefficients, in the `biquad` crate's
    /// sign convention (`y = b0 x + ... - a1 y1 - a2 y2`).
    pub fn coefficients(&self) -> Coefficients<f64> {
        Coefficients {
            a1: -self.a1,
            a2: -self.a2,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
        }
    }

    /// A stateful `DirectForm1` filter with zeroed history.
    pub fn direct_form(&self) -> DirectForm1<f64> {
        DirectForm1::<f64>::new(self.coefficients())
    }
}

/// Runs a biquad over `signal` in place.
pub fn run_in_place<F: Biquad<f64>>(signal: &mut [f64], filter: &mut F) {
    signal.iter_mut().for_each(|x| *x = filter.run(*x));
    filter.reset_state();
}

/// Free-function form of [`Resonator::filter`].
pub fn resonator(input: &[f64], center_freq: f64, bandwidth: f64, fs: f64) -> DspResult<Vec<f64>> {
    Resonator::new(center_freq, bandwidth, fs)?.filter(input)
}
