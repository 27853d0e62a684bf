//! Error type for the command-line front end.

use std::path::PathBuf;

use datum_core::DatumError;
use datum_instruments::InstrumentError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Datum(#[from] DatumError),

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error("Failed to read data file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse data file {path}: {source}")]
    FileParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("'{function}' needs --param")]
    MissingParameter { function: &'static str },
}

pub type CliResult<T> = Result<T, CliError>;
