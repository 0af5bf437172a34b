//! harbour-xcode CLI - synthesizes Xcode targets for a build unit

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use harbour_xcode::synth::SynthError;
use harbour_xcode::util::diagnostic::{emit, ManifestParseError};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        report(e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("harbour_xcode=debug")
    } else {
        EnvFilter::new("harbour_xcode=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

fn report(e: anyhow::Error, color: bool) {
    if let Some(synth) = e.downcast_ref::<SynthError>() {
        emit(&synth.to_diagnostic(), color);
        return;
    }
    match e.downcast::<ManifestParseError>() {
        Ok(parse) => eprintln!("{:?}", miette::Report::new(parse)),
        Err(e) => eprintln!("error: {:#}", e),
    }
}
