use thiserror::Error;

pub type DatumResult<T> = Result<T, DatumError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatumError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Empty input: {what}")]
    EmptyInput { what: &'static str },

    #[error("Zero uncertainty at index {index}: weighted mean needs strictly positive uncertainties")]
    ZeroUncertainty { index: usize },

    #[error("Cannot parse datum from '{input}': {reason}")]
    Parse { input: String, reason: &'static str },
}
