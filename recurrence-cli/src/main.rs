//! Recurrence CLI - evaluate A(n, m) with both engines and print their triangles

mod cli;
mod config;
mod error;
mod executor;
mod output;

use clap::Parser;
use cli::{Args, BackendKind, Width};
use config::Config;
use executor::Executor;
use output::OutputFormatter;
use recurrence_engine::memo::{DashMapBackend, MemoBackend, RwLockHashMapBackend};
use recurrence_engine::{Recurrence, RecurrenceValue};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;
    init_logging(&config);

    tracing::debug!(?config, "configuration resolved");
    if config.table_exceeds_limit() {
        tracing::warn!(
            n = config.n,
            max_table_rows = config.max_table_rows,
            "triangles skipped past the row limit; raise --max-table-rows to print them"
        );
    }

    match (config.width, config.backend) {
        (Width::U32, BackendKind::Dashmap) => run_with::<u32, _>(&config, DashMapBackend::new()),
        (Width::U32, BackendKind::Rwlock) => run_with::<u32, _>(&config, RwLockHashMapBackend::new()),
        (Width::U64, BackendKind::Dashmap) => run_with::<u64, _>(&config, DashMapBackend::new()),
        (Width::U64, BackendKind::Rwlock) => run_with::<u64, _>(&config, RwLockHashMapBackend::new()),
        (Width::U128, BackendKind::Dashmap) => run_with::<u128, _>(&config, DashMapBackend::new()),
        (Width::U128, BackendKind::Rwlock) => {
            run_with::<u128, _>(&config, RwLockHashMapBackend::new())
        }
    }
}

/// Install the stderr subscriber; `-q`/`-v` override `RUST_LOG`
fn init_logging(config: &Config) {
    let filter = match config.log_level() {
        Some(level) => EnvFilter::new(format!(
            "recurrence_engine={level},recurrence={level}"
        )),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run_with<V, B>(config: &Config, backend: B) -> Result<(), error::CliError>
where
    V: RecurrenceValue,
    B: MemoBackend<V>,
{
    let formatter = OutputFormatter::new(config.quiet);
    let executor = Executor::new(Recurrence::with_backend(backend), config)?;

    let report = executor.execute(config.n, config.m, config.builds_table())?;

    formatter.print_report(&report);
    formatter.print_summary(&report);
    Ok(())
}
