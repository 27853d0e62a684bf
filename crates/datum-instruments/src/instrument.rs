//! Instrument and quantity catalog, plus a single dispatching entry point.

use core::fmt;
use core::str::FromStr;

use datum_core::Datum;

use crate::error::{InstrumentError, InstrumentResult};
use crate::{agilent, amprobe, keysight, supertester};

/// Supported bench instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    /// Agilent U1731A handheld LCR meter
    AgilentU1731A,
    /// Keysight U1733C handheld LCR meter
    KeysightU1733C,
    /// Amprobe 37XR-A digital multimeter
    Amprobe37XRA,
    /// ICE SuperTester 680R analogue multimeter
    SuperTester680R,
}

/// Physical quantity read off an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Resistance,
    Capacitance,
    Inductance,
    DcVoltage,
    AcVoltage,
    DcCurrent,
    AcCurrent,
}

/// Front-panel settings that affect the accuracy lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Settings {
    /// Test/signal frequency in Hz. LCR meters default to 1 kHz when unset.
    pub frequency_hz: Option<f64>,
    /// SuperTester "x2" sensitivity switch.
    pub x2_sensitivity: bool,
}

const INSTRUMENT_ALIASES: [(Instrument, &[&str]); 4] = [
    (Instrument::AgilentU1731A, &["agilent-u1731a", "u1731a", "agilent"]),
    (Instrument::KeysightU1733C, &["keysight-u1733c", "u1733c", "keysight"]),
    (Instrument::Amprobe37XRA, &["amprobe-37xr-a", "37xr-a", "37xra", "amprobe"]),
    (Instrument::SuperTester680R, &["supertester-680r", "680r", "supertester"]),
];

const QUANTITY_ALIASES: [(Quantity, &[&str]); 7] = [
    (Quantity::Resistance, &["resistance", "r"]),
    (Quantity::Capacitance, &["capacitance", "c"]),
    (Quantity::Inductance, &["inductance", "l"]),
    (Quantity::DcVoltage, &["dc-voltage", "vdc"]),
    (Quantity::AcVoltage, &["ac-voltage", "vac"]),
    (Quantity::DcCurrent, &["dc-current", "idc"]),
    (Quantity::AcCurrent, &["ac-current", "iac"]),
];

impl Instrument {
    pub fn all() -> [Instrument; 4] {
        INSTRUMENT_ALIASES.map(|(i, _)| i)
    }

    /// Quantities this instrument has accuracy tables for.
    pub fn quantities(self) -> &'static [Quantity] {
        match self {
            Self::AgilentU1731A | Self::KeysightU1733C => &[
                Quantity::Resistance,
                Quantity::Capacitance,
                Quantity::Inductance,
            ],
            Self::Amprobe37XRA | Self::SuperTester680R => &[
                Quantity::DcVoltage,
                Quantity::AcVoltage,
                Quantity::DcCurrent,
                Quantity::AcCurrent,
            ],
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AgilentU1731A => write!(f, "Agilent U1731A"),
            Self::KeysightU1733C => write!(f, "Keysight U1733C"),
            Self::Amprobe37XRA => write!(f, "Amprobe 37XR-A"),
            Self::SuperTester680R => write!(f, "SuperTester 680R"),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resistance => write!(f, "resistance"),
            Self::Capacitance => write!(f, "capacitance"),
            Self::Inductance => write!(f, "inductance"),
            Self::DcVoltage => write!(f, "DC voltage"),
            Self::AcVoltage => write!(f, "AC voltage"),
            Self::DcCurrent => write!(f, "DC current"),
            Self::AcCurrent => write!(f, "AC current"),
        }
    }
}

fn lookup_alias<T: Copy>(table: &[(T, &[&str])], name: &str) -> Option<T> {
    let name = name.trim().to_ascii_lowercase();
    table
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| *alias == name))
        .map(|(item, _)| *item)
}

impl FromStr for Instrument {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_alias(&INSTRUMENT_ALIASES, s).ok_or_else(|| InstrumentError::UnknownName {
            what: "instrument",
            name: s.to_string(),
        })
    }
}

impl FromStr for Quantity {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_alias(&QUANTITY_ALIASES, s).ok_or_else(|| InstrumentError::UnknownName {
            what: "quantity",
            name: s.to_string(),
        })
    }
}

/// Look up the accuracy of `reading` on `instrument` and return it as a datum.
pub fn measure(
    instrument: Instrument,
    quantity: Quantity,
    reading: f64,
    settings: Settings,
) -> InstrumentResult<Datum> {
    let lcr_frequency = settings.frequency_hz.unwrap_or(1e3);
    let x2 = settings.x2_sensitivity;

    match (instrument, quantity) {
        (Instrument::AgilentU1731A, Quantity::Resistance) => {
            agilent::resistance(reading, lcr_frequency)
        }
        (Instrument::AgilentU1731A, Quantity::Capacitance) => {
            agilent::capacitance(reading, lcr_frequency)
        }
        (Instrument::AgilentU1731A, Quantity::Inductance) => {
            agilent::inductance(reading, lcr_frequency)
        }
        (Instrument::KeysightU1733C, Quantity::Resistance) => {
            keysight::resistance(reading, lcr_frequency)
        }
        (Instrument::KeysightU1733C, Quantity::Capacitance) => {
            keysight::capacitance(reading, lcr_frequency)
        }
        (Instrument::KeysightU1733C, Quantity::Inductance) => {
            keysight::inductance(reading, lcr_frequency)
        }
        (Instrument::Amprobe37XRA, Quantity::DcVoltage) => amprobe::dc_voltage(reading),
        (Instrument::Amprobe37XRA, Quantity::DcCurrent) => amprobe::dc_current(reading),
        (Instrument::Amprobe37XRA, Quantity::AcCurrent) => amprobe::ac_current(reading),
        (Instrument::Amprobe37XRA, Quantity::AcVoltage) => {
            let frequency_hz = settings
                .frequency_hz
                .ok_or(InstrumentError::MissingFrequency {
                    instrument,
                    quantity,
                })?;
            amprobe::ac_voltage(reading, frequency_hz)
        }
        (Instrument::SuperTester680R, Quantity::DcVoltage) => supertester::dc_voltage(reading, x2),
        (Instrument::SuperTester680R, Quantity::AcVoltage) => supertester::ac_voltage(reading, x2),
        (Instrument::SuperTester680R, Quantity::DcCurrent) => supertester::dc_current(reading, x2),
        (Instrument::SuperTester680R, Quantity::AcCurrent) => supertester::ac_current(reading, x2),
        _ => Err(InstrumentError::UnsupportedQuantity {
            instrument,
            quantity,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse() {
        assert_eq!("u1731a".parse::<Instrument>(), Ok(Instrument::AgilentU1731A));
        assert_eq!(" Keysight ".parse::<Instrument>(), Ok(Instrument::KeysightU1733C));
        assert_eq!("VDC".parse::<Quantity>(), Ok(Quantity::DcVoltage));
        assert!(matches!(
            "fluke".parse::<Instrument>(),
            Err(InstrumentError::UnknownName { what: "instrument", .. })
        ));
    }

    #[test]
    fn aliases_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for (_, aliases) in INSTRUMENT_ALIASES.iter() {
            for alias in *aliases {
                assert!(seen.insert(*alias), "duplicate alias {alias}");
            }
        }
        for (_, aliases) in QUANTITY_ALIASES.iter() {
            for alias in *aliases {
                assert!(seen.insert(*alias), "duplicate alias {alias}");
            }
        }
    }

    #[test]
    fn every_listed_quantity_dispatches() {
        let settings = Settings {
            frequency_hz: Some(1e3),
            x2_sensitivity: false,
        };
        for instrument in Instrument::all() {
            for &quantity in instrument.quantities() {
                let result = measure(instrument, quantity, 1e-6, settings);
                assert!(
                    !matches!(result, Err(InstrumentError::UnsupportedQuantity { .. })),
                    "{instrument} {quantity} not wired"
                );
            }
        }
    }

    #[test]
    fn unsupported_pairs_are_rejected() {
        let err = measure(
            Instrument::AgilentU1731A,
            Quantity::DcVoltage,
            1.0,
            Settings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, InstrumentError::UnsupportedQuantity { .. }));
    }

    #[test]
    fn amprobe_ac_voltage_needs_frequency() {
        let err = measure(
            Instrument::Amprobe37XRA,
            Quantity::AcVoltage,
            5.0,
            Settings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, InstrumentError::MissingFrequency { .. }));
    }

    #[test]
    fn lcr_defaults_to_one_kilohertz() {
        let implicit = measure(
            Instrument::KeysightU1733C,
            Quantity::Resistance,
            100.0,
            Settings::default(),
        )
        .unwrap();
        let explicit = keysight::resistance(100.0, 1e3).unwrap();
        assert_eq!(implicit, explicit);
    }
}
