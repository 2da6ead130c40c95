//! Unit constants for multiplication-syntax construction of `uom` quantities,
//! plus reference-atmosphere values shared by the density and power models.

use crate::si;
use std::marker::PhantomData;

/// 1 meter
pub const M: si::Length = si::Length {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0,
};

/// 1 meter per second
pub const MPS: si::Velocity = si::Velocity {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0,
};

/// 1 watt
pub const W: si::Power = si::Power {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0,
};

/// 1 kilowatt
pub const KW: si::Power = si::Power {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0e3,
};

/// 1 megawatt
pub const MW: si::Power = si::Power {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0e6,
};

/// 1 pascal
pub const PA: si::Pressure = si::Pressure {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0,
};

/// 1 kelvin
pub const KELVIN: si::ThermodynamicTemperature = si::ThermodynamicTemperature {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0,
};

/// 1 kilogram per cubic meter
pub const KGM3: si::MassDensity = si::MassDensity {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0,
};

/// 1 (dimensionless)
pub const R: si::Ratio = si::Ratio {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0,
};

/// 1 second
pub const S: si::Time = si::Time {
    dimension: PhantomData,
    units: PhantomData,
    value: 1.0,
};

/// standard ambient air density
pub fn rho_air() -> si::MassDensity {
    1.225 * KGM3
}

/// standard ambient temperature
pub fn t_std() -> si::ThermodynamicTemperature {
    288.15 * KELVIN
}

/// standard ambient pressure
pub fn p_std() -> si::Pressure {
    101_325.0 * PA
}
