//! pagesim CLI: replay a memory trace against a page replacement policy.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use pagesim::config::{SimulationConfig, DEFAULT_SWEEP_FRAMES};
use pagesim::errors::SimulationError;
use pagesim::mmu::PolicyKind;
use pagesim::shared::logger::setup_logger_with_level;
use pagesim::sim::{simulate, sweep, write_csv};

#[derive(Parser)]
#[command(name = "pagesim")]
#[command(about = "Virtual memory page replacement simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay one trace and print disk and fault counters
    Run {
        /// Trace file, one `<hex address> <R|W>` per line
        trace: PathBuf,

        /// Number of physical frames
        frames: usize,

        /// Replacement policy: rand, lru or clock
        algorithm: PolicyKind,

        /// `debug` logs every hit, miss, eviction and install
        #[arg(value_enum, default_value_t = Mode::Quiet)]
        mode: Mode,
    },

    /// Run every trace/policy/frame-count combination and write CSV
    Sweep {
        /// Trace files to replay
        #[arg(long, required = true, num_args = 1..)]
        traces: Vec<PathBuf>,

        /// Policies to compare (default: rand, lru, clock)
        #[arg(long, num_args = 1..)]
        algorithms: Vec<PolicyKind>,

        /// Frame counts to try (default: 2 up to 512)
        #[arg(long, num_args = 1..)]
        frames: Vec<usize>,

        /// Output CSV file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Quiet,
    Debug,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match &cli.command {
        Commands::Run {
            mode: Mode::Debug, ..
        } => LevelFilter::Debug,
        _ => LevelFilter::Info,
    };
    setup_logger_with_level(level);

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands) -> Result<(), SimulationError> {
    match command {
        Commands::Run {
            trace,
            frames,
            algorithm,
            mode,
        } => {
            let config = SimulationConfig::new(frames, algorithm).with_trace(mode == Mode::Debug);
            config.validate()?;

            let events = memtrace::read_trace(&trace)?;
            let report = simulate(&config, &events)?;
            println!("{report}");
        }
        Commands::Sweep {
            traces,
            algorithms,
            frames,
            output,
        } => {
            let algorithms = if algorithms.is_empty() {
                PolicyKind::ALL.to_vec()
            } else {
                algorithms
            };
            let frames = if frames.is_empty() {
                DEFAULT_SWEEP_FRAMES.to_vec()
            } else {
                frames
            };

            let rows = sweep(&traces, &algorithms, &frames)?;
            match output {
                Some(path) => {
                    write_csv(BufWriter::new(File::create(&path)?), &rows)?;
                    log::info!("wrote {} rows to {}", rows.len(), path.display());
                }
                None => write_csv(io::stdout().lock(), &rows)?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from(["pagesim", "run", "gcc.trace", "16", "clock", "debug"])
            .unwrap();
        match cli.command {
            Commands::Run {
                trace,
                frames,
                algorithm,
                mode,
            } => {
                assert_eq!(trace, PathBuf::from("gcc.trace"));
                assert_eq!(frames, 16);
                assert_eq!(algorithm, PolicyKind::Clock);
                assert!(mode == Mode::Debug);
            }
            Commands::Sweep { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["pagesim", "run", "gcc.trace", "16", "fifo"]).is_err());
    }

    #[test]
    fn test_parse_sweep_defaults() {
        let cli = Cli::try_parse_from(["pagesim", "sweep", "--traces", "a.trace", "b.trace"])
            .unwrap();
        match cli.command {
            Commands::Sweep {
                traces,
                algorithms,
                frames,
                output,
            } => {
                assert_eq!(traces.len(), 2);
                assert!(algorithms.is_empty());
                assert!(frames.is_empty());
                assert!(output.is_none());
            }
            Commands::Run { .. } => panic!("expected sweep"),
        }
    }
}
