mod farm_power_sim;
mod plant_imports;
mod power_curve;
mod power_output;
mod turbine;
mod turbine_power_sim;
mod wind_efficiency;
mod wind_farm;

pub use farm_power_sim::*;
pub use power_curve::*;
pub use power_output::*;
pub use turbine::*;
pub use turbine_power_sim::*;
pub use wind_efficiency::*;
pub use wind_farm::*;

#[cfg(test)]
mod tests;
