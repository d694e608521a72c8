mod cli;
mod host;
mod output;

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, read_payloads};
use crate::host::HostError;

fn main() {
    if let Err(err) = real_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), HostError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.validate().map_err(HostError::InvalidArg)?;

    let payloads = if cli.payloads.is_empty() {
        read_payloads(io::stdin().lock())?
    } else {
        cli.payloads.iter().map(|p| p.clone().into_bytes()).collect()
    };

    let submission = host::submit(cli.library.as_deref(), payloads)?;
    output::print_submission(&cli.output, &submission)
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}
