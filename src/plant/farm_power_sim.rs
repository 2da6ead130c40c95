use super::plant_imports::*;

/// Wake-loss policy for the aggregate farm power curve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum WakeLossModel {
    /// no wake-loss correction
    None,
    /// scale the aggregate curve by [WindFarm::efficiency]
    FarmEfficiency,
    /// reduce the hub-height wind speed with the named reference curve; an
    /// unrecognized name logs a warning and skips the correction
    EfficiencyCurve(String),
}

impl Default for WakeLossModel {
    fn default() -> Self {
        Self::EfficiencyCurve("dena_mean".into())
    }
}

/// Model selection for a power simulation, resolved once at configuration
/// time and read-only while the model runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerSimConfig {
    #[serde(default)]
    pub wind_speed_model: WindSpeedModel,
    #[serde(default)]
    pub density_model: DensityModel,
    /// scale looked-up power by the air density ratio
    #[serde(default)]
    pub density_correction: bool,
    #[serde(default)]
    pub wake_losses: WakeLossModel,
    /// Gaussian power-curve smoothing; `None` disables smoothing
    #[serde(default)]
    pub smoothing: Option<SmoothingConfig>,
    #[serde(default)]
    pub smoothing_order: SmoothingOrder,
}

impl Default for PowerSimConfig {
    fn default() -> Self {
        Self {
            wind_speed_model: Default::default(),
            density_model: Default::default(),
            density_correction: false,
            wake_losses: Default::default(),
            smoothing: None,
            smoothing_order: Default::default(),
        }
    }
}

impl SerdeAPI for PowerSimConfig {}

/// Simulation of an aggregated wind farm / turbine cluster: builds the
/// aggregate power curve, applies the wake-loss policy, and maps hub-height
/// weather through the curve to the farm power-output series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FarmPowerSim {
    pub farm: WindFarm,
    pub config: PowerSimConfig,
    /// aggregate farm power curve, populated by [Self::assign_power_curve]
    #[serde(default)]
    pub power_curve: Option<PowerCurve>,
    /// wind-speed reduction deferred to run time
    #[serde(skip)]
    wake_curve: Option<&'static WindEfficiencyCurve>,
    /// farm power-output series, populated by [Self::run]
    #[serde(default)]
    pub power_output: Vec<si::Power>,
}

impl SerdeAPI for FarmPowerSim {
    fn init(&mut self) -> Result<(), WindPlantError> {
        self.farm.init()?;
        if let Some(pc) = &mut self.power_curve {
            pc.init()?;
        }
        Ok(())
    }
}

impl FarmPowerSim {
    pub fn new(farm: WindFarm, config: PowerSimConfig) -> anyhow::Result<Self> {
        let mut sim = Self {
            farm,
            config,
            power_curve: None,
            wake_curve: None,
            power_output: Vec::new(),
        };
        sim.init()?;
        Ok(sim)
    }

    /// Builds the aggregate farm power curve per the configured smoothing
    /// policy and applies the wake-loss model. Turbulence intensity and
    /// roughness length are taken from `weather` when recorded.
    pub fn assign_power_curve(&mut self, weather: &WeatherTrace) -> anyhow::Result<()> {
        let roughness_length_m = weather
            .height_table(WeatherVariable::RoughnessLength)
            .ok()
            .map(|(_, series)| mean(series[0]));
        let turbulence_intensity = weather
            .height_table(WeatherVariable::TurbulenceIntensity)
            .ok()
            .map(|(_, series)| mean(series[0]));

        let mut curve = self.farm.assign_power_curve(
            self.config.smoothing.as_ref(),
            self.config.smoothing_order,
            roughness_length_m,
            turbulence_intensity,
        )?;

        self.wake_curve = None;
        match &self.config.wake_losses {
            WakeLossModel::None => {}
            WakeLossModel::FarmEfficiency => {
                let efficiency = self.farm.efficiency.with_context(|| {
                    "farm efficiency required for the farm_efficiency wake-loss model"
                })?;
                curve.apply_efficiency(efficiency)?;
            }
            WakeLossModel::EfficiencyCurve(name) => match wind_efficiency_curve(name) {
                Some(wec) => self.wake_curve = Some(wec),
                None => log::warn!(
                    "unknown wind efficiency curve {name:?}; skipping wake-loss correction"
                ),
            },
        }
        self.power_curve = Some(curve);
        Ok(())
    }

    /// Runs the model chain against `weather`, populating
    /// [Self::power_output]. Assigns the power curve first if
    /// [Self::assign_power_curve] has not been called.
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

        let hub_height = self.farm.mean_hub_height();
        let mut wind_speed = hub_wind_speed(weather, self.config.wind_speed_model, hub_height)?;
        if let Some(wake_curve) = self.wake_curve {
            wind_speed = wake_curve.reduce_wind_speed(&wind_speed)?;
        }
        let density = if self.config.density_correction {
            Some(hub_density(weather, self.config.density_model, hub_height)?)
        } else {
            None
        };

        let curve = self.power_curve.as_ref().with_context(|| format_dbg!())?;
        self.power_output = power_output(curve, &wind_speed, density.as_deref())?;
        log::info!(
            "farm power sim produced {} samples at {:.1} m mean hub height",
            self.power_output.len(),
            hub_height.get::<si::meter>()
        );
        Ok(())
    }

    /// Power output normalized by the farm's installed capacity, for callers
    /// that scale a unit-capacity source.
    pub fn normalized_power_output(&self) -> Vec<si::Ratio> {
        let nominal = self.farm.nominal_power();
        self.power_output.iter().map(|p| *p / nominal).collect()
    }
}

impl Default for FarmPowerSim {
    fn default() -> Self {
        Self {
            farm: WindFarm::default(),
            config: PowerSimConfig::default(),
            power_curve: None,
            wake_curve: None,
            power_output: Vec::new(),
        }
    }
}

/// Hub-height wind speed series for `weather` per the configured profile
/// model.
pub(crate) fn hub_wind_speed(
    weather: &WeatherTrace,
    model: WindSpeedModel,
    hub_height: si::Length,
) -> anyhow::Result<Vec<f64>> {
    let (heights_m, series) = weather.height_table(WeatherVariable::WindSpeed)?;
    model.wind_speed_at_hub(&heights_m, &series, hub_height.get::<si::meter>())
}

/// Hub-height air density series for `weather` per the configured density
/// model, deriving hub temperature on the way.
pub(crate) fn hub_density(
    weather: &WeatherTrace,
    model: DensityModel,
    hub_height: si::Length,
) -> anyhow::Result<Vec<f64>> {
    let (t_heights_m, t_series) = weather.height_table(WeatherVariable::Temperature)?;
    let temperature_hub_k =
        temperature_at_hub(&t_heights_m, &t_series, hub_height.get::<si::meter>())?;
    let pressure = weather.closest_column(WeatherVariable::Pressure, hub_height)?;
    model.rho(
        &pressure.values,
        pressure.height,
        hub_height,
        &temperature_hub_k,
    )
}

pub(crate) fn mean(series: &[f64]) -> f64 {
    series.iter().sum::<f64>() / series.len() as f64
}
