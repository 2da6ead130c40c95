mod air_density;
mod height_profile;

pub use air_density::*;
pub use height_profile::*;
