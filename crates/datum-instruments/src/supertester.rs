//! ICE SuperTester 680R analogue multimeter.
//!
//! Class 1 instrument: the uncertainty is 1 % of the full-scale value of the
//! selected range, whatever the needle position. The x2 sensitivity switch
//! doubles every full scale.

use datum_core::Datum;

use crate::error::InstrumentResult;
use crate::instrument::{Instrument, Quantity};
use crate::table::Lookup;

const DC_VOLTAGE: [f64; 7] = [0.1, 2.0, 10.0, 50.0, 200.0, 500.0, 1000.0];
const AC_VOLTAGE: [f64; 4] = [10.0, 50.0, 250.0, 750.0];
const DC_CURRENT: [f64; 6] = [50e-6, 500e-6, 5e-3, 50e-3, 500e-3, 5.0];
const AC_CURRENT: [f64; 5] = [250e-6, 2.5e-3, 25e-3, 250e-3, 2.5];

/// Accuracy class, percent of full scale.
const CLASS: f64 = 1.0;

fn full_scale<const N: usize>(
    quantity: Quantity,
    scales: [f64; N],
    reading: f64,
    x2_sensitivity: bool,
) -> InstrumentResult<Datum> {
    let lookup = Lookup::new(Instrument::SuperTester680R, quantity);
    let factor = if x2_sensitivity { 2.0 } else { 1.0 };
    let scales = scales.map(|s| s * factor);
    let range = lookup.range(&scales, reading)?;
    Ok(Datum::new(reading, scales[range] * CLASS / 100.0))
}

pub fn dc_voltage(reading: f64, x2_sensitivity: bool) -> InstrumentResult<Datum> {
    full_scale(Quantity::DcVoltage, DC_VOLTAGE, reading, x2_sensitivity)
}

pub fn ac_voltage(reading: f64, x2_sensitivity: bool) -> InstrumentResult<Datum> {
    full_scale(Quantity::AcVoltage, AC_VOLTAGE, reading, x2_sensitivity)
}

pub fn dc_current(reading: f64, x2_sensitivity: bool) -> InstrumentResult<Datum> {
    full_scale(Quantity::DcCurrent, DC_CURRENT, reading, x2_sensitivity)
}

pub fn ac_current(reading: f64, x2_sensitivity: bool) -> InstrumentResult<Datum> {
    full_scale(Quantity::AcCurrent, AC_CURRENT, reading, x2_sensitivity)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_below_one_percent_of_reading(v in 0.0f64..1000.0, x2 in any::<bool>()) {
            if let Ok(d) = dc_voltage(v, x2) {
                prop_assert!(d.uncertainty() >= v * CLASS / 100.0);
                prop_assert_eq!(d.value(), v);
            }
        }

        #[test]
        fn sign_does_not_matter(v in 0.0f64..5.0) {
            let pos = dc_current(v, false).map(|d| d.uncertainty());
            let neg = dc_current(-v, false).map(|d| d.uncertainty());
            prop_assert_eq!(pos.ok(), neg.ok());
        }
    }
}
