#![allow(unused_imports)]

pub(crate) use crate::imports::*;

pub(crate) use super::power_curve::{PowerCurve, SmoothingConfig, SmoothingOrder, StdDevMethod};
pub(crate) use super::power_output::power_output;
pub(crate) use super::turbine::WindTurbine;
pub(crate) use super::wind_efficiency::{wind_efficiency_curve, WindEfficiencyCurve};
pub(crate) use super::wind_farm::{TurbineGroup, WindFarm};
pub(crate) use crate::atmosphere::{
    estimate_turbulence_intensity, temperature_at_hub, DensityModel, WindSpeedModel,
};
pub(crate) use crate::weather::{WeatherTrace, WeatherVariable};
