//! Command-line front end for the simulator.
//!
//! Two modes: generate a synthetic workload CSV, or replay a workload CSV
//! under a dispatch discipline and write the report CSV.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use schedsim::csv::{read_workload, write_report, write_workload};
use schedsim::dispatching::{PolicyKind, DEFAULT_QUANTUM};
use schedsim::engine::simulate;
use schedsim::validation::ValidationError;
use schedsim::workload::{generate, Profile};

#[derive(Debug, Parser)]
#[clap(version, about = "Discrete-event CPU scheduling simulator")]
struct Opts {
    /// Increase verbosity (-v: debug, -vv: trace).
    #[clap(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a synthetic workload CSV.
    Generate {
        /// Output CSV path.
        #[clap(short, long, default_value = "workload.csv")]
        out: PathBuf,

        /// Number of jobs to generate.
        #[clap(short, long, default_value = "1500")]
        jobs: usize,

        /// Workload shape.
        #[clap(short, long, value_enum, default_value = "uniform")]
        profile: ProfileArg,

        /// RNG seed; the same seed reproduces the same workload.
        #[clap(short, long, default_value = "0")]
        seed: u64,
    },

    /// Simulate a workload CSV under a dispatch discipline.
    Simulate {
        /// Input workload CSV.
        #[clap(short, long)]
        data: PathBuf,

        /// Output report CSV. Defaults to `<data stem>_<policy>.csv`.
        #[clap(short, long)]
        out: Option<PathBuf>,

        /// Dispatch discipline.
        #[clap(short, long, value_enum)]
        policy: PolicyArg,

        /// Round-Robin quantum, in ticks.
        #[clap(short, long, default_value_t = DEFAULT_QUANTUM)]
        quantum: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileArg {
    /// Sizes around 150 ticks.
    Uniform,
    /// 20% short jobs around 50 ticks, 80% long around 250.
    Bimodal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Fcfs,
    Sjf,
    Stcf,
    Rr,
}

impl PolicyArg {
    fn kind(self, quantum: u64) -> PolicyKind {
        match self {
            PolicyArg::Fcfs => PolicyKind::Fcfs,
            PolicyArg::Sjf => PolicyKind::Sjf,
            PolicyArg::Stcf => PolicyKind::Stcf,
            PolicyArg::Rr => PolicyKind::RoundRobin { quantum },
        }
    }
}

fn init_logger(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut config = simplelog::ConfigBuilder::new();
    config
        .set_time_level(simplelog::LevelFilter::Off)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        level,
        config.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn validation_failure(errors: Vec<ValidationError>) -> anyhow::Error {
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    anyhow!("invalid input: {}", details.join("; "))
}

fn default_report_path(data: &Path, policy: PolicyArg) -> PathBuf {
    let stem = data
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let name = format!("{}_{:?}.csv", stem, policy).to_lowercase();
    data.with_file_name(name)
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logger(opts.verbose)?;

    match opts.command {
        Command::Generate {
            out,
            jobs,
            profile,
            seed,
        } => {
            let profile = match profile {
                ProfileArg::Uniform => Profile::uniform_mix(),
                ProfileArg::Bimodal => Profile::bimodal_mix(),
            };
            let workload = generate(&profile, jobs, seed);
            let file = File::create(&out)
                .with_context(|| format!("creating {}", out.display()))?;
            let mut writer = BufWriter::new(file);
            write_workload(&mut writer, &workload)?;
            writer.flush()?;
            info!("wrote {} jobs to {}", workload.len(), out.display());
        }

        Command::Simulate {
            data,
            out,
            policy,
            quantum,
        } => {
            let file = File::open(&data)
                .with_context(|| format!("opening {}", data.display()))?;
            let jobs = read_workload(BufReader::new(file))
                .with_context(|| format!("reading {}", data.display()))?;

            let kind = policy.kind(quantum);
            let report = simulate(jobs, kind).map_err(validation_failure)?;
            info!(
                "{}: {} jobs, avg response {:.2}, avg turnaround {:.2}",
                kind.name(),
                report.job_count(),
                report.metrics.avg_response_time,
                report.metrics.avg_turnaround_time
            );

            let out = out.unwrap_or_else(|| default_report_path(&data, policy));
            let file = File::create(&out)
                .with_context(|| format!("creating {}", out.display()))?;
            let mut writer = BufWriter::new(file);
            write_report(&mut writer, &report)?;
            writer.flush()?;
            info!("report written to {}", out.display());
        }
    }

    Ok(())
}
