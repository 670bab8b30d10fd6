use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::process::ExitCode;
use tracing::debug;

use sensor_hub_tools::{FrameError, validate_record};

/// Check the length and checksum of a logged XSens frame record.
///
/// The record is a comma-separated list of hex bytes as written to the hub
/// log, e.g. "fa,ff,30,00,d1". The first two fields are the preamble and
/// the bus id and are not inspected.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Frame record: comma-separated hex bytes.
    record: String,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_target(false)
        .init();

    match validate_record(&cli.record) {
        Ok(frame) => {
            debug!(%frame, "frame accepted");
            println!("OK!");
            ExitCode::SUCCESS
        }
        Err(err @ FrameError::LengthMismatch { .. }) => {
            debug!(%err, "frame rejected");
            println!("Length Failure!");
            ExitCode::from(1)
        }
        Err(err @ FrameError::ChecksumMismatch { .. }) => {
            debug!(%err, "frame rejected");
            println!("Checksum Failure!");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}
