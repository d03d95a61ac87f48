use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use sidfreq::{ScanConfig, TuneConfig};

mod sid;
use sid::{RetuneOptions, read_sid_file, retune as sid_retune, scan as sid_scan};

/// sidfreq command line tools
#[derive(Parser)]
#[command(
    name = "sidfreq",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate the frequency table and rewrite it for a new A4 pitch
    Retune {
        /// Input SID file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Output file (default: <INPUT stem>_MODIFIED_TABLE.sid)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
        /// Target A4 pitch in Hz (default: 424 Hz raised one semitone)
        #[arg(long = "target-a4", value_name = "HZ")]
        target_a4: Option<f64>,
        #[command(flatten)]
        scan: ScanArgs,
        /// Detect and report only; write nothing
        #[arg(long)]
        dry_run: bool,
        /// Write an unmodified copy when no table is found
        #[arg(long)]
        copy_on_miss: bool,
    },
    /// Locate the frequency table and print what was found
    Scan {
        /// Input SID file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[command(flatten)]
        scan: ScanArgs,
        /// Also list every stream-distance group of the split detector
        #[arg(long)]
        groups: bool,
    },
}

/// Detector overrides shared by the subcommands.
#[derive(Args)]
struct ScanArgs {
    /// Maximum distance between low-byte and high-byte streams
    #[arg(long, value_name = "BYTES")]
    window: Option<usize>,
    /// Semitone ratio tolerance of the split detector
    #[arg(long, value_name = "RATIO")]
    split_tolerance: Option<f64>,
    /// Semitone ratio tolerance of the interleaved detector
    #[arg(long, value_name = "RATIO")]
    interleaved_tolerance: Option<f64>,
}

impl ScanArgs {
    fn apply(&self, cfg: &mut ScanConfig) {
        if let Some(w) = self.window {
            cfg.split_window = w;
        }
        if let Some(t) = self.split_tolerance {
            cfg.split_tolerance = t;
        }
        if let Some(t) = self.interleaved_tolerance {
            cfg.interleaved_tolerance = t;
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("failed to initialise logging: {}", e);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Retune {
            input,
            output,
            target_a4,
            scan,
            dry_run,
            copy_on_miss,
        } => {
            let mut cfg = TuneConfig::default();
            scan.apply(&mut cfg.scan);
            if let Some(hz) = target_a4 {
                cfg.pitch.target_a4_hz = hz;
            }
            let bytes = read_sid_file(&input)?;
            let opts = RetuneOptions {
                output,
                dry_run,
                copy_on_miss,
            };
            sid_retune(&input, bytes, &cfg, &opts)?;
        }
        Commands::Scan {
            input,
            scan,
            groups,
        } => {
            let mut cfg = TuneConfig::default();
            scan.apply(&mut cfg.scan);
            let bytes = read_sid_file(&input)?;
            sid_scan(&input, &bytes, &cfg, groups)?;
        }
    }

    Ok(())
}
