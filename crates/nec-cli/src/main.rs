//! NEC CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use nec_analysis::{AxisCatalogue, build_registry, histogram_defs};
use std::path::PathBuf;

mod config;
mod run;
mod source;

use config::{Overrides, RunConfig, read_run_config};

#[derive(Parser)]
#[command(name = "nec")]
#[command(about = "Nucleon Energy Correlator histogramming")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the NEC histograms from an event file
    Run {
        /// Run config (YAML, or JSON by `.json` extension). Flags override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Input events (JSON Lines)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output artifact (pretty JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Lower Q² bound, exclusive [GeV²]
        #[arg(long, allow_negative_numbers = true)]
        min_q2: Option<f64>,

        /// Upper Q² bound, exclusive [GeV²]
        #[arg(long, allow_negative_numbers = true)]
        max_q2: Option<f64>,

        /// Power of x_B (reserved)
        #[arg(long, allow_negative_numbers = true)]
        n_pow: Option<f64>,

        /// Reconstructed particle collection
        #[arg(long)]
        rec_particles: Option<String>,

        /// Generated particle collection
        #[arg(long)]
        gen_particles: Option<String>,

        /// Threads (0 = auto). Use 1 for a sequential run.
        #[arg(long)]
        threads: Option<usize>,

        /// Stop after this many events
        #[arg(long)]
        max_events: Option<usize>,
    },
    /// List the histograms a run produces
    Histograms,
    /// Print version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Run {
            config,
            input,
            output,
            min_q2,
            max_q2,
            n_pow,
            rec_particles,
            gen_particles,
            threads,
            max_events,
        } => {
            let overrides = Overrides {
                input,
                output,
                max_events,
                min_q2,
                max_q2,
                n_pow,
                rec_particles,
                gen_particles,
                threads,
            };
            cmd_run(config.as_ref(), overrides)
        }
        Commands::Histograms => cmd_histograms(),
        Commands::Version => {
            println!("nec {}", nec_core::VERSION);
            Ok(())
        }
    }
}

fn cmd_run(config: Option<&PathBuf>, overrides: Overrides) -> Result<()> {
    let base = match config {
        Some(path) => read_run_config(path)?,
        None => RunConfig::default(),
    };
    let resolved = base.apply(overrides)?;
    run::run_nec(&resolved)?;
    Ok(())
}

fn cmd_histograms() -> Result<()> {
    let catalogue = AxisCatalogue::standard()?;
    let registry = build_registry(&catalogue, &histogram_defs())?;
    for h in registry.iter() {
        println!("{}\t{}d\t{}", h.name(), h.dim(), h.title());
    }
    Ok(())
}
