use clap::{ArgAction, Parser, Subcommand};
use layout_bridge::io::{ArraySummary, BridgeIoError, RoundtripConfig};
use layout_bridge::load::load_array;
use layout_bridge::roundtrip::run_roundtrip;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "layout-bridge",
    version,
    about = "Inspect images as planar arrays and verify layout round trips."
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print dims, element type and per-channel ranges as JSON.
    Inspect {
        /// Image file to decode.
        image: PathBuf,
    },
    /// Convert an image through every layout and report mismatches.
    Roundtrip {
        /// Image file to decode.
        #[arg(required_unless_present = "config", conflicts_with = "config")]
        image: Option<PathBuf>,

        /// Feed the converters a (width, height) array and let them transpose.
        #[arg(long, conflicts_with = "config")]
        transpose: bool,

        /// Where to write the JSON report.
        #[arg(long)]
        report: Option<PathBuf>,

        /// JSON `RoundtripConfig` to run instead of command line arguments.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[cfg(feature = "tracing")]
fn init_logging(verbose: u8) {
    let level = layout_bridge::core::level_from_verbosity(verbose);
    let _ = tracing_log::LogTracer::init();
    layout_bridge::core::init_tracing(false, level);
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: u8) {
    let level = layout_bridge::core::level_from_verbosity(verbose);
    let _ = layout_bridge::core::init_with_level(level);
}

/// `Ok(false)` when the command ran but found mismatches.
fn run(command: Command) -> Result<bool, BridgeIoError> {
    match command {
        Command::Inspect { image } => {
            let array = load_array(&image)?;
            let summary = ArraySummary::of(&array);
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(true)
        }
        Command::Roundtrip {
            image,
            transpose,
            report,
            config,
        } => {
            let mut cfg = match (config, image) {
                (Some(path), _) => RoundtripConfig::load_json(path)?,
                (None, Some(image)) => RoundtripConfig {
                    transpose,
                    ..RoundtripConfig::new(image.to_string_lossy())
                },
                (None, None) => {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "an image path or --config is required",
                    )
                    .into())
                }
            };
            if let Some(report) = report {
                cfg.report_path = Some(report.to_string_lossy().into_owned());
            }

            let result = run_roundtrip(&cfg)?;
            let report_path = cfg.report_path();
            result.write_json(&report_path)?;
            info!("report written to {}", report_path.display());
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(result.passed())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
