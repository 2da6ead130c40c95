pub use crate::atmosphere::{
    estimate_turbulence_intensity, hellman, linear_gradient, linear_interpolation_extrapolation,
    logarithmic_interpolation_extrapolation, temperature_at_hub, DensityModel, WindSpeedModel,
};
pub use crate::error::{WindPlantError, WindPlantResult};
pub use crate::plant::{
    power_output, wind_efficiency_curve, FarmPowerSim, PowerCurve, PowerSimConfig, SmoothingConfig,
    SmoothingOrder, StdDevMethod, TurbineGroup, TurbinePowerSim, WakeLossModel,
    WindEfficiencyCurve, WindFarm, WindTurbine, WIND_EFFICIENCY_CURVES,
};
pub use crate::traits::SerdeAPI;
pub use crate::utils::{interp1d, Extrapolate};
pub use crate::weather::{WeatherColumn, WeatherTrace, WeatherVariable};
