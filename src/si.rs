//! Import uom si system and add unit constants
//! Zero values should be created using standard uom syntax ($Quantity::ZERO) after adding "use crate::imports::*"
//! Non-zero values should be created using standard uom syntax ($Quantity::new::<$unit>($value)) or multiplication syntax ($value * $UNIT_CONSTANT)

use uom::si;

pub use si::f64::{
    Length, MassDensity, Power, Pressure, Ratio, ThermodynamicTemperature, Time, Velocity,
};
pub use si::length::{kilometer, meter};
pub use si::mass_density::kilogram_per_cubic_meter;
pub use si::power::{kilowatt, megawatt, watt};
pub use si::pressure::{hectopascal, pascal};
pub use si::ratio::{percent, ratio};
pub use si::thermodynamic_temperature::{degree_celsius, kelvin};
pub use si::time::{hour, second};
pub use si::velocity::meter_per_second;
