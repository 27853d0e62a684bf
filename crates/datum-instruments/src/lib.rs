//! datum-instruments: turn raw instrument readings into data.
//!
//! Each function looks the reading up in the manufacturer's accuracy table
//! and returns a `Datum` whose uncertainty is the stated accuracy. Readings
//! are selected into the first range whose upper bound exceeds `|reading|`;
//! the sign is kept on the returned value.
//!
//! ```
//! use datum_instruments::{Instrument, Quantity, Settings, amprobe, measure};
//!
//! let v = amprobe::dc_voltage(5.0).unwrap();
//! let same = measure(Instrument::Amprobe37XRA, Quantity::DcVoltage, 5.0, Settings::default()).unwrap();
//! assert_eq!(v, same);
//! ```

pub mod agilent;
pub mod amprobe;
pub mod error;
pub mod instrument;
pub mod keysight;
pub mod supertester;
mod table;

pub use error::{InstrumentError, InstrumentResult};
pub use instrument::{Instrument, Quantity, Settings, measure};
pub use table::{Accuracy, select_range};
