use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use sim_cli::config::SimConfig;
use sim_cli::session::{LogSink, Session};
use sim_cli::{batch, csv_loader, logging, report};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Electricity savings simulator.
///
/// Walks through the multi-step lead form (postal code, provider, plan,
/// contract capacity, monthly bill, email) and estimates the savings of
/// switching.
#[derive(Debug, Parser)]
#[command(name = "power-sim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive; overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill in the form at the terminal (default).
    Interactive,

    /// Analyze and validate every row of a CSV file.
    Batch {
        /// CSV file with postal_code, company, plan, capacity,
        /// electricity_bill, and email columns.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print areas, companies, plans, and capacity options.
    Catalog,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = SimConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    logging::init_logging(&config.logging).context("Failed to initialize logging")?;
    debug!(?config, "configuration loaded");

    let calculator = config.calculator()?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            let mut sink = LogSink::default();
            let submitted =
                Session::new(io::stdin().lock(), io::stdout().lock(), &mut sink, calculator)
                    .run()
                    .context("Terminal session failed")?;
            info!(submitted, "session finished");
        }
        Command::Batch { file } => {
            let forms = csv_loader::load_from_file(&file)
                .with_context(|| format!("Failed to load: {}", file.display()))?;
            info!(rows = forms.len(), "loaded {}", file.display());

            let outcomes = batch::evaluate(forms, &calculator);
            for outcome in &outcomes {
                println!("{}", report::render_batch_line(outcome));
            }
            let ready = outcomes.iter().filter(|o| o.can_submit).count();
            println!("{ready} of {} rows ready to submit.", outcomes.len());
        }
        Command::Catalog => print!("{}", report::render_catalog()),
    }

    Ok(())
}
