use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::path::Path;

use crate::audio;
use crate::config::SynthConfig;
use crate::dsp::{self, Vowel};
use crate::util::normalize_peak;

/// Peak level of synthesized output written to disk.
const OUTPUT_PEAK: f64 = 0.9;

/// Per-frame summary of an analyzed file.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePeak {
    pub frame: usize,
    pub bin: usize,
    pub frequency: f64,
    pub level_db: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub num_frames: usize,
    pub num_bins: usize,
    pub peaks: Vec<FramePeak>,
}

/// Frames, transforms and converts `samples`, then finds the loudest
/// non-negative-frequency bin of every frame.
pub fn analyze(samples: &[f64], sample_rate: u32, frame_length: usize, step: usize) -> Result<Analysis> {
    let frames = dsp::frame(samples, frame_length, step)?;
    let stft = dsp::transform(&frames)?;
    let spectrogram = dsp::to_spectrogram(&stft)?;

    let half = frame_length / 2 + 1;
    let peaks = spectrogram
        .columns()
        .enumerate()
        .filter_map(|(t, column)| {
            dsp::peak_bin(column, half).map(|bin| FramePeak {
                frame: t,
                bin,
                frequency: dsp::bin_frequency(bin, frame_length, sample_rate as f64),
                level_db: column[bin],
            })
        })
        .collect();

    Ok(Analysis {
        num_frames: spectrogram.cols(),
        num_bins: spectrogram.rows(),
        peaks,
    })
}

pub fn spectrogram(
    in_file: &Path,
    frame_length: Option<usize>,
    step: Option<usize>,
    config: &SynthConfig,
) -> Result<()> {
    let (samples, sample_rate) = audio::load_audio(in_file)
        .with_context(|| format!("Failed to load audio from {}", in_file.display()))?;
    let frame_length = frame_length.unwrap_or_else(|| config.frame_length());
    let step = step.unwrap_or_else(|| config.step());

    info!("Analyzing {} samples: frame_length={}, step={}", samples.len(), frame_length, step);
    let analysis = analyze(&samples, sample_rate, frame_length, step)?;

    println!("{} frames x {} bins", analysis.num_frames, analysis.num_bins);
    for peak in &analysis.peaks {
        println!(
            "frame {:>5}: peak bin {:>4} ({:>8.1} Hz) {:>6.1} dB",
            peak.frame, peak.bin, peak.frequency, peak.level_db
        );
    }
    Ok(())
}

pub fn excitation(out_file: &Path, f0: Option<f64>, num_samples: usize, config: &SynthConfig) -> Result<()> {
    let sample_rate = config.sample_rate();
    let f0 = f0.unwrap_or_else(|| config.f0());
    info!("Generating {} samples of excitation at {}Hz", num_samples, f0);

    let signal = dsp::voiced_excitation(num_samples, f0, sample_rate as f64)?;
    audio::save_audio(out_file, &signal, sample_rate)
        .with_context(|| format!("Failed to save audio to {}", out_file.display()))
}

pub fn vowel(
    out_file: &Path,
    vowel: Vowel,
    f0: Option<f64>,
    num_samples: usize,
    config: &SynthConfig,
) -> Result<()> {
    let sample_rate = config.sample_rate();
    let f0 = f0.unwrap_or_else(|| config.f0());
    let formants = config.formants(vowel);
    info!("Synthesizing /{}/ at {}Hz with {} formants", vowel, f0, formants.len());
    for (i, f) in formants.iter().enumerate() {
        debug!("F{}: {}Hz, bandwidth {}Hz", i + 1, f.frequency, f.bandwidth);
    }

    let mut speech = dsp::synthesize_formants(num_samples, f0, &formants, sample_rate as f64)?;
    normalize_peak(&mut speech, OUTPUT_PEAK);
    audio::save_audio(out_file, &speech, sample_rate)
        .with_context(|| format!("Failed to save audio to {}", out_file.display()))
}

/// Pitch period in samples from either an explicit period or a fundamental.
pub fn pitch_period(period: Option<f64>, f0: Option<f64>, sample_rate: u32) -> Result<f64> {
    match (period, f0) {
        (Some(t0), _) => Ok(t0),
        (None, Some(f0)) => Ok(sample_rate as f64 / f0),
        (None, None) => bail!("Either --period or --f0 is required"),
    }
}

pub fn resynth(
    in_file: &Path,
    out_file: &Path,
    harmonics: usize,
    period: Option<f64>,
    f0: Option<f64>,
    offset: usize,
    length: Option<usize>,
) -> Result<()> {
    let (samples, sample_rate) = audio::load_audio(in_file)
        .with_context(|| format!("Failed to load audio from {}", in_file.display()))?;
    if offset >= samples.len() {
        bail!("Offset {} is past the end of a {}-sample file", offset, samples.len());
    }
    let end = length.map_or(samples.len(), |len| (offset + len).min(samples.len()));
    let segment = &samples[offset..end];

    let t0 = pitch_period(period, f0, sample_rate)?;
    info!(
        "Resynthesizing {} samples with {} harmonics, T0={:.2} samples",
        segment.len(),
        harmonics,
        t0
    );

    let spectrum = dsp::spectrum(segment)?;
    let mut output = dsp::resynthesize(harmonics, &spectrum, t0)?;
    normalize_peak(&mut output, OUTPUT_PEAK);
    audio::save_audio(out_file, &output, sample_rate)
        .with_context(|| format!("Failed to save audio to {}", out_file.display()))
}
