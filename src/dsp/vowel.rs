//! Source-filter vowel synthesis: a pulse train through a cascade of resonators.
//!
//! Formants are applied in the order given, lowest formant first for the
//! built-in table. Cascaded filters commute only in exact arithmetic, so the
//! order is part of the output.

use std::fmt;
use std::str::FromStr;

use log::debug;

use super::excitation::voiced_excitation;
use super::resonator::Resonator;
use crate::error::{DspError, DspResult};

/// A vocal-tract resonance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Formant {
    /// Center frequency in Hz.
    pub frequency: f64,
    /// Bandwidth in Hz.
    pub bandwidth: f64,
}

impl Formant {
    pub const fn new(frequency: f64, bandwidth: f64) -> Self {
        Self { frequency, bandwidth }
    }
}

/// Shared upper formants and bandwidths of the built-in vowel table.
const F3: f64 = 2500.0;
const F4: f64 = 3500.0;
const BANDWIDTHS: [f64; 4] = [100.0, 200.0, 300.0, 400.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vowel {
    A,
    I,
    U,
    E,
    O,
}

impl Vowel {
    pub const ALL: [Vowel; 5] = [Vowel::A, Vowel::I, Vowel::U, Vowel::E, Vowel::O];

    /// First and second formant frequencies in Hz.
    pub fn f1_f2(self) -> (f64, f64) {
        match self {
            Vowel::A => (800.0, 1150.0),
            Vowel::I => (300.0, 2200.0),
            Vowel::U => (350.0, 600.0),
            Vowel::E => (500.0, 1700.0),
            Vowel::O => (400.0, 800.0),
        }
    }

    /// The four formants used to synthesize this vowel, F1 first.
    pub fn formants(self) -> [Formant; 4] {
        let (f1, f2) = self.f1_f2();
        [
            Formant::new(f1, BANDWIDTHS[0]),
            Formant::new(f2, BANDWIDTHS[1]),
            Formant::new(F3, BANDWIDTHS[2]),
            Formant::new(F4, BANDWIDTHS[3]),
        ]
    }
}

impl FromStr for Vowel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Vowel::A),
            "i" => Ok(Vowel::I),
            "u" => Ok(Vowel::U),
            "e" => Ok(Vowel::E),
            "o" => Ok(Vowel::O),
            other => Err(format!("Unknown vowel '{}', expected one of a, i, u, e, o", other)),
        }
    }
}

impl fmt::Display for Vowel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Vowel::A => "a",
            Vowel::I => "i",
            Vowel::U => "u",
            Vowel::E => "e",
            Vowel::O => "o",
        };
        f.write_str(name)
    }
}

/// Voiced excitation at `f0` passed through one resonator per formant, in slice order.
pub fn synthesize_formants(
    num_samples: usize,
    f0: f64,
    formants: &[Formant],
    fs: f64,
) -> DspResult<Vec<f64>> {
    if formants.is_empty() {
        return Err(DspError::invalid_param("formants", "at least one formant is required"));
    }
    // validate every stage before generating anything
    let stages = formants
        .iter()
        .map(|f| Resonator::new(f.frequency, f.bandwidth, fs))
        .collect::<DspResult<Vec<_>>>()?;

    let excitation = voiced_excitation(num_samples, f0, fs)?;
    let speech = stages
        .iter()
        .try_fold(excitation, |signal, stage| stage.filter(&signal))?;

    debug!(
        "Synthesized {} samples at f0={}Hz through {} formants",
        num_samples,
        f0,
        formants.len()
    );
    Ok(speech)
}

/// Two-formant vowel: excitation at `f0`, then the F1 resonator, then the F2 resonator.
pub fn synthesize_vowel(
    num_samples: usize,
    f0: f64,
    f1: f64,
    f2: f64,
    bw1: f64,
    bw2: f64,
    fs: f64,
) -> DspResult<Vec<f64>> {
    synthesize_formants(
        num_samples,
        f0,
        &[Formant::new(f1, bw1), Formant::new(f2, bw2)],
        fs,
    )
}
