#![deny(clippy::all, clippy::pedantic)]

use foglio::client::{ApiError, BlogClient};
use foglio::config::{LoadError, Settings};
use foglio::telemetry::TelemetryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn build_client(settings: &Settings) -> Result<BlogClient, CliError> {
    BlogClient::from_settings(settings).map_err(CliError::from)
}
