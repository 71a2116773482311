mod app;
mod error;
mod paths;
mod terminal;
mod widgets;

use std::fs::{self, File};
use std::process::ExitCode;

use artic_lib::ArticClient;
use artic_lib::table::TableConfig;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;
use crate::error::AppError;
use crate::terminal::TerminalGuard;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() -> Result<(), AppError> {
    paths::rotate_logs();

    let path = paths::log_file().ok_or(AppError::NoCacheDir)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let log_file = File::create(&path)?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;
    info!("Logging to {}", path.display());
    Ok(())
}

async fn run() -> Result<(), AppError> {
    let client = ArticClient::new()?;
    info!("Using endpoint {}", client.endpoint());

    let (app, outcomes) = App::new(client, TableConfig::default());
    let mut terminal = TerminalGuard::new()?;
    app.run(&mut terminal, outcomes).await
}
