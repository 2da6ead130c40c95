use super::plant_imports::*;
use super::farm_power_sim::{hub_density, hub_wind_speed, mean, PowerSimConfig, WakeLossModel};

/// Simulation of a single, standalone turbine: hub-height weather mapped
/// through the turbine's (optionally smoothed) power curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurbinePowerSim {
    pub turbine: WindTurbine,
    pub config: PowerSimConfig,
    /// turbine power curve after smoothing, populated by
    /// [Self::assign_power_curve]
    #[serde(default)]
    pub power_curve: Option<PowerCurve>,
    /// power-output series, populated by [Self::run]
    #[serde(default)]
    pub power_output: Vec<si::Power>,
}

impl SerdeAPI for TurbinePowerSim {
    fn init(&mut self) -> Result<(), WindPlantError> {
        self.turbine.init()?;
        if let Some(pc) = &mut self.power_curve {
            pc.init()?;
        }
        Ok(())
    }
}

impl TurbinePowerSim {
    pub fn new(turbine: WindTurbine, config: PowerSimConfig) -> anyhow::Result<Self> {
        let mut sim = Self {
            turbine,
            config,
            power_curve: None,
            power_output: Vec::new(),
        };
        sim.init()?;
        Ok(sim)
    }

    /// Assigns the turbine power curve, smoothed when configured. Wake-loss
    /// models describe farms and are ignored for a standalone turbine.
    pub fn assign_power_curve(&mut self, weather: &WeatherTrace) -> anyhow::Result<()> {
        if !self.config.wake_losses.is_none() {
            log::debug!("wake-loss models apply to farms; ignored for a standalone turbine");
        }
        let curve = match &self.config.smoothing {
            Some(config) => {
                let turbulence_intensity = match weather
                    .height_table(WeatherVariable::TurbulenceIntensity)
                    .ok()
                    .map(|(_, series)| mean(series[0]))
                {
                    Some(ti) => Some(ti),
                    None => weather
                        .height_table(WeatherVariable::RoughnessLength)
                        .ok()
                        .map(|(_, series)| {
                            self.turbine.turbulence_intensity(mean(series[0]) * uc::M)
                        })
                        .transpose()?,
                };
                self.turbine.power_curve.smooth(config, turbulence_intensity)?
            }
            None => self.turbine.power_curve.clone(),
        };
        self.power_curve = Some(curve);
        Ok(())
    }

    /// Runs the model chain against `weather`, populating
    /// [Self::power_output].
    pub fn run(&mut self, weather: &WeatherTrace) -> anyhow::Result<()> {
        ensure!(
            weather.has_variable(WeatherVariable::WindSpeed),
            WindPlantError::Config("weather data contains no wind_speed column".into())
        );
        if self.config.density_correction {
            ensure!(
                weather.has_variable(WeatherVariable::Pressure)
                    && weather.has_variable(WeatherVariable::Temperature),
                WindPlantError::Config(
                    "density correction requires pressure and temperature columns".into()
                )
            );
        }
        if self.power_curve.is_none() {
            self.assign_power_curve(weather)?;
        }

        let wind_speed =
            hub_wind_speed(weather, self.config.wind_speed_model, self.turbine.hub_height)?;
        let density = if self.config.density_correction {
            Some(hub_density(
                weather,
                self.config.density_model,
                self.turbine.hub_height,
            )?)
        } else {
            None
        };

        let curve = self.power_curve.as_ref().with_context(|| format_dbg!())?;
        self.power_output = power_output(curve, &wind_speed, density.as_deref())?;
        Ok(())
    }

    /// Power output normalized by the turbine's rated power.
    pub fn normalized_power_output(&self) -> Vec<si::Ratio> {
        self.power_output
            .iter()
            .map(|p| *p / self.turbine.nominal_power)
            .collect()
    }
}

impl Default for TurbinePowerSim {
    fn default() -> Self {
        Self {
            turbine: WindTurbine::default(),
            config: PowerSimConfig {
                wake_losses: WakeLossModel::None,
                ..Default::default()
            },
            power_curve: None,
            power_output: Vec::new(),
        }
    }
}
