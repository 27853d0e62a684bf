//! Amprobe 37XR-A digital multimeter.

use datum_core::Datum;

use crate::error::InstrumentResult;
use crate::instrument::{Instrument, Quantity};
use crate::table::{Accuracy, Lookup};

const DC_VOLTAGE_BOUNDS: [f64; 4] = [1.0, 10.0, 100.0, 1e3];
const DC_VOLTAGE: [Accuracy; 4] = [
    Accuracy::new(0.1, 5e-4),
    Accuracy::new(0.1, 5e-3),
    Accuracy::new(0.1, 5e-2),
    Accuracy::new(0.1, 5e-1),
];

const CURRENT_BOUNDS: [f64; 6] = [100e-6, 1e-3, 10e-3, 100e-3, 400e-3, 10.0];
const DC_CURRENT: [Accuracy; 6] = [
    Accuracy::new(0.5, 1e-7),
    Accuracy::new(0.5, 5e-7),
    Accuracy::new(0.5, 5e-6),
    Accuracy::new(0.5, 5e-5),
    Accuracy::new(0.5, 5e-4),
    Accuracy::new(1.5, 1e-2),
];
const AC_CURRENT: [Accuracy; 6] = [
    Accuracy::new(1.5, 1e-7),
    Accuracy::new(1.5, 1e-6),
    Accuracy::new(1.5, 1e-5),
    Accuracy::new(1.5, 1e-4),
    Accuracy::new(2.0, 5e-4),
    Accuracy::new(2.5, 1e-2),
];

const AC_VOLTAGE_BOUNDS: [f64; 4] = [1.0, 10.0, 100.0, 750.0];
const AC_VOLTAGE_OFFSETS: [f64; 4] = [1e-3, 1e-2, 1e-1, 1.0];

pub fn dc_voltage(reading: f64) -> InstrumentResult<Datum> {
    let lookup = Lookup::new(Instrument::Amprobe37XRA, Quantity::DcVoltage);
    let range = lookup.range(&DC_VOLTAGE_BOUNDS, reading)?;
    Ok(DC_VOLTAGE[range].apply(reading))
}

pub fn dc_current(reading: f64) -> InstrumentResult<Datum> {
    let lookup = Lookup::new(Instrument::Amprobe37XRA, Quantity::DcCurrent);
    let range = lookup.range(&CURRENT_BOUNDS, reading)?;
    Ok(DC_CURRENT[range].apply(reading))
}

pub fn ac_current(reading: f64) -> InstrumentResult<Datum> {
    let lookup = Lookup::new(Instrument::Amprobe37XRA, Quantity::AcCurrent);
    let range = lookup.range(&CURRENT_BOUNDS, reading)?;
    Ok(AC_CURRENT[range].apply(reading))
}

/// Percentage term of the AC-voltage accuracy, which depends on the signal
/// frequency band. `None` outside the specified bands.
fn ac_voltage_percent(magnitude: f64, frequency_hz: f64) -> Option<f64> {
    let low_band = (45.0..500.0).contains(&frequency_hz);
    let high_band = (500.0..2e3).contains(&frequency_hz);
    if magnitude < 100.0 {
        if high_band {
            Some(2.0)
        } else if low_band {
            Some(1.2)
        } else {
            None
        }
    } else if magnitude < 750.0 && (45.0..1e3).contains(&frequency_hz) {
        Some(2.0)
    } else {
        None
    }
}

pub fn ac_voltage(reading: f64, frequency_hz: f64) -> InstrumentResult<Datum> {
    let lookup = Lookup::new(Instrument::Amprobe37XRA, Quantity::AcVoltage);
    let range = lookup.range(&AC_VOLTAGE_BOUNDS, reading)?;
    let percent = ac_voltage_percent(reading.abs(), frequency_hz)
        .ok_or_else(|| lookup.unavailable(reading, frequency_hz))?;
    Ok(Accuracy::new(percent, AC_VOLTAGE_OFFSETS[range]).apply(reading))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstrumentError;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs()
    }

    #[test]
    fn dc_voltage_rows() {
        let d = dc_voltage(5.0).unwrap();
        assert!(close(d.uncertainty(), 0.1 * 5.0 / 100.0 + 5e-3));
        assert!(matches!(
            dc_voltage(1e3),
            Err(InstrumentError::OutOfRange { .. })
        ));
    }

    #[test]
    fn currents() {
        let dc = dc_current(50e-3).unwrap();
        assert!(close(dc.uncertainty(), 0.5 * 50e-3 / 100.0 + 5e-5));
        let ac = ac_current(1.0).unwrap();
        assert!(close(ac.uncertainty(), 2.5 / 100.0 + 1e-2));
        assert!(ac_current(10.0).is_err());
    }

    #[test]
    fn ac_voltage_bands() {
        let low = ac_voltage(5.0, 50.0).unwrap();
        assert!(close(low.uncertainty(), 1.2 * 5.0 / 100.0 + 1e-2));
        let high = ac_voltage(5.0, 1e3).unwrap();
        assert!(close(high.uncertainty(), 2.0 * 5.0 / 100.0 + 1e-2));
        let mains = ac_voltage(230.0, 50.0).unwrap();
        assert!(close(mains.uncertainty(), 2.0 * 230.0 / 100.0 + 1.0));
    }

    #[test]
    fn ac_voltage_outside_bands() {
        assert!(matches!(
            ac_voltage(5.0, 10.0),
            Err(InstrumentError::RangeUnavailable { .. })
        ));
        assert!(matches!(
            ac_voltage(230.0, 1.5e3),
            Err(InstrumentError::RangeUnavailable { .. })
        ));
        assert!(matches!(
            ac_voltage(800.0, 50.0),
            Err(InstrumentError::OutOfRange { .. })
        ));
    }
}
