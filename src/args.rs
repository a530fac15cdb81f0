use crate::dsp::Vowel;
use crate::util::{frequency_parser, positive_parser};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Speech analysis and source-filter synthesis.")]
pub struct Cli {
    /// KDL config file; defaults to config.kdl in the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Frame, transform and print a summary of the dB spectrogram of an audio file.
    Spectrogram {
        in_file: PathBuf,
        #[arg(long)]
        frame_length: Option<usize>,
        #[arg(long)]
        step: Option<usize>,
    },
    /// Write a voiced pulse train.
    Excitation {
        out_file: PathBuf,
        /// Fundamental in Hz or as a note name (A2, C#3).
        #[arg(long, value_parser = frequency_parser)]
        f0: Option<f64>,
        #[arg(long, default_value_t = 8000)]
        samples: usize,
    },
    /// Synthesize a four-formant vowel.
    Vowel {
        out_file: PathBuf,
        #[arg(long, default_value = "a")]
        vowel: Vowel,
        #[arg(long, value_parser = frequency_parser)]
        f0: Option<f64>,
        #[arg(long, default_value_t = 8000)]
        samples: usize,
    },
    /// Resynthesize a segment of an audio file from its harmonics.
    Resynth {
        in_file: PathBuf,
        out_file: PathBuf,
        #[arg(long)]
        harmonics: usize,
        /// Pitch period in samples.
        #[arg(long, value_parser = positive_parser, conflicts_with = "f0")]
        period: Option<f64>,
        /// Fundamental in Hz or as a note name; converted to a period.
        #[arg(long, value_parser = frequency_parser)]
        f0: Option<f64>,
        /// First sample of the segment.
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Segment length in samples; defaults to the rest of the file.
        #[arg(long)]
        length: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_vowel_command() {
        let cli = Cli::try_parse_from(["speechdsp", "vowel", "out.wav", "--vowel", "i", "--f0", "A2"]).unwrap();
        match cli.command {
            Commands::Vowel { vowel, f0, samples, .. } => {
                assert_eq!(vowel, Vowel::I);
                assert!((f0.unwrap() - 110.0).abs() < 1e-9);
                assert_eq!(samples, 8000);
            }
            _ => panic!("expected vowel command"),
        }
    }

    #[test]
    fn test_resynth_period_conflicts_with_f0() {
        let result = Cli::try_parse_from([
            "speechdsp", "resynth", "in.wav", "out.wav", "--harmonics", "10", "--period", "80", "--f0", "100",
        ]);
        assert!(result.is_err());
    }
}
