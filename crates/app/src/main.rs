use std::io;

use quiz_core::model::LoadError;
use services::{Clock, QuizService};
use storage::CsvFileSource;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::{Config, ConfigError};
use terminal::Terminal;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Error loading data: {0}")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let source = CsvFileSource::new(config.data_path());

    // The table is loaded once here and only read afterwards.
    let mut service =
        QuizService::from_source(&source, config.schema().clone(), Clock::system()).await?;
    if let Some(seed) = config.seed() {
        service = service.with_seed(seed);
    }
    tracing::info!(
        path = %config.data_path().display(),
        rows = service.table().len(),
        "quiz ready"
    );

    let mut quiz = service.open_session();
    let stdin = io::stdin();
    let stdout = io::stdout();
    Terminal::new(stdin.lock(), stdout.lock(), config.output()).run(&mut quiz)?;
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // Binary glue: report once and stop.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
