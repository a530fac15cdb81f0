//! KDL configuration.
//!
//! ```kdl
//! general sample-rate=8000 f0=110.0 frame-length=400 step=200
//! vowel "a" {
//!     formant 800.0 100.0
//!     formant 1150.0 200.0
//! }
//! ```

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use knuffel::Decode;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::dsp::{Formant, Vowel};

pub const DEFAULT_SAMPLE_RATE: u32 = 8000;
pub const DEFAULT_F0: f64 = 110.0;
pub const DEFAULT_FRAME_LENGTH: usize = 400;
pub const DEFAULT_STEP: usize = 200;

#[derive(Decode, Debug, Clone, Default, PartialEq)]
pub struct SynthConfig {
    #[knuffel(child)]
    pub general: Option<GeneralConfig>,
    #[knuffel(children(name = "vowel"))]
    pub vowels: Vec<VowelConfig>,
}

#[derive(Decode, Debug, Clone, Default, PartialEq)]
pub struct GeneralConfig {
    #[knuffel(property(name = "sample-rate"))]
    pub sample_rate: Option<u32>,
    #[knuffel(property)]
    pub f0: Option<f64>,
    #[knuffel(property(name = "frame-length"))]
    pub frame_length: Option<usize>,
    #[knuffel(property)]
    pub step: Option<usize>,
}

/// Formant override for one vowel.
#[derive(Decode, Debug, Clone, PartialEq)]
pub struct VowelConfig {
    #[knuffel(argument)]
    pub name: String,
    #[knuffel(children(name = "formant"))]
    pub formants: Vec<FormantConfig>,
}

#[derive(Decode, Debug, Clone, Copy, PartialEq)]
pub struct FormantConfig {
    #[knuffel(argument)]
    pub frequency: f64,
    #[knuffel(argument)]
    pub bandwidth: f64,
}

impl SynthConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&path.display().to_string(), &content)
    }

    pub fn parse(file_name: &str, content: &str) -> Result<Self> {
        let config: SynthConfig = knuffel::parse(file_name, content)?;
        config.validate()?;
        Ok(config)
    }

    /// The explicit path if given, else `config.kdl` in the platform config
    /// directory if present, else the defaults.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("Loading config from {}", path.display());
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let general = self.general.clone().unwrap_or_default();
        if general.sample_rate == Some(0) {
            bail!("sample-rate must be greater than zero");
        }
        if let Some(f0) = general.f0 {
            if !(f0.is_finite() && f0 > 0.0) {
                bail!("f0 must be positive, got {}", f0);
            }
        }
        if general.frame_length == Some(0) || general.step == Some(0) {
            bail!("frame-length and step must be greater than zero");
        }
        for vowel in &self.vowels {
            vowel
                .name
                .parse::<Vowel>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid vowel entry '{}'", vowel.name))?;
            if vowel.formants.is_empty() {
                bail!("Vowel '{}' has no formants", vowel.name);
            }
        }
        Ok(())
    }

    pub fn sample_rate(&self) -> u32 {
        self.general
            .as_ref()
            .and_then(|g| g.sample_rate)
            .unwrap_or(DEFAULT_SAMPLE_RATE)
    }

    pub fn f0(&self) -> f64 {
        self.general.as_ref().and_then(|g| g.f0).unwrap_or(DEFAULT_F0)
    }

    pub fn frame_length(&self) -> usize {
        self.general
            .as_ref()
            .and_then(|g| g.frame_length)
            .unwrap_or(DEFAULT_FRAME_LENGTH)
    }

    pub fn step(&self) -> usize {
        self.general.as_ref().and_then(|g| g.step).unwrap_or(DEFAULT_STEP)
    }

    /// Configured formants for `vowel`, or the built-in table.
    pub fn formants(&self, vowel: Vowel) -> Vec<Formant> {
        self.vowels
            .iter()
            .find(|v| v.name.parse::<Vowel>() == Ok(vowel))
            .map(|v| {
                v.formants
                    .iter()
                    .map(|f| Formant::new(f.frequency, f.bandwidth))
                    .collect()
            })
            .unwrap_or_else(|| vowel.formants().to_vec())
    }
}

fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "speechdsp", "speechdsp").map(|dirs| dirs.config_dir().join("config.kdl"))
}
