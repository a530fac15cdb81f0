use anyhow::Result;
use clap::Parser;
use speechdsp::args::{Cli, Commands};
use speechdsp::commands;
use speechdsp::config::SynthConfig;
use std::process;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = SynthConfig::locate(cli.config.as_deref())?;

    match cli.command {
        Commands::Spectrogram {
            in_file,
            frame_length,
            step,
        } => commands::spectrogram(&in_file, frame_length, step, &config),
        Commands::Excitation { out_file, f0, samples } => {
            commands::excitation(&out_file, f0, samples, &config)
        }
        Commands::Vowel {
            out_file,
            vowel,
            f0,
            samples,
        } => commands::vowel(&out_file, vowel, f0, samples, &config),
        Commands::Resynth {
            in_file,
            out_file,
            harmonics,
            period,
            f0,
            offset,
            length,
        } => commands::resynth(&in_file, &out_file, harmonics, period, f0, offset, length),
    }
}
