//! Calibration lookup errors.

use thiserror::Error;

use crate::instrument::{Instrument, Quantity};

/// Result type for calibration lookups.
pub type InstrumentResult<T> = Result<T, InstrumentError>;

/// Errors raised while turning a raw reading into a datum.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// The instrument cannot run at the requested test frequency.
    #[error("{instrument} does not support a frequency of {frequency_hz} Hz")]
    UnsupportedFrequency {
        instrument: Instrument,
        frequency_hz: f64,
    },

    /// The reading is above every range of the instrument.
    #[error("{instrument} {quantity} reading {reading} exceeds every range")]
    OutOfRange {
        instrument: Instrument,
        quantity: Quantity,
        reading: f64,
    },

    /// The range exists but is not specified at this frequency.
    #[error("{instrument} {quantity} reading {reading} is outside the ranges available at {frequency_hz} Hz")]
    RangeUnavailable {
        instrument: Instrument,
        quantity: Quantity,
        reading: f64,
        frequency_hz: f64,
    },

    /// The instrument has no function for this quantity.
    #[error("{instrument} does not measure {quantity}")]
    UnsupportedQuantity {
        instrument: Instrument,
        quantity: Quantity,
    },

    /// A frequency must be given for this lookup.
    #[error("{instrument} {quantity} needs the signal frequency")]
    MissingFrequency {
        instrument: Instrument,
        quantity: Quantity,
    },

    /// Name did not match any known instrument or quantity.
    #[error("Unknown {what}: '{name}'")]
    UnknownName { what: &'static str, name: String },
}
