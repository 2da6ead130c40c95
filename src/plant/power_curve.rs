use super::plant_imports::*;

/// Turbine- or farm-specific mapping from wind speed to power output.
///
/// Wind speeds must be ascending and unique; power values are assumed
/// non-decreasing up to rated capacity, then constant or zero beyond cut-out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerCurve {
    /// wind speeds at which power output is defined
    pub wind_speed: Vec<si::Velocity>,
    /// power output at each wind speed
    pub power: Vec<si::Power>,
}

impl SerdeAPI for PowerCurve {
    fn init(&mut self) -> Result<(), WindPlantError> {
        if self.wind_speed.len() != self.power.len() {
            return Err(WindPlantError::Init(format!(
                "power curve has {} wind speeds but {} power values",
                self.wind_speed.len(),
                self.power.len()
            )));
        }
        if self.wind_speed.len() < 2 {
            return Err(WindPlantError::Init(
                "power curve requires at least 2 points".into(),
            ));
        }
        if !self
            .wind_speed
            .windows(2)
            .all(|w| w[0] < w[1])
        {
            return Err(WindPlantError::Init(
                "power curve wind speeds must be ascending and unique".into(),
            ));
        }
        Ok(())
    }
}

impl PowerCurve {
    pub fn new(wind_speed_mps: Vec<f64>, power_w: Vec<f64>) -> anyhow::Result<Self> {
        let mut pc = Self {
            wind_speed: wind_speed_mps.iter().map(|v| *v * uc::MPS).collect(),
            power: power_w.iter().map(|p| *p * uc::W).collect(),
        };
        pc.init()?;
        Ok(pc)
    }

    pub fn len(&self) -> usize {
        self.wind_speed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wind_speed.is_empty() && self.power.is_empty()
    }

    pub fn speeds_mps(&self) -> Vec<f64> {
        self.wind_speed
            .iter()
            .map(|v| v.get::<si::meter_per_second>())
            .collect()
    }

    pub fn powers_w(&self) -> Vec<f64> {
        self.power.iter().map(|p| p.get::<si::watt>()).collect()
    }

    /// Largest power value of the curve.
    pub fn rated_power(&self) -> si::Power {
        self.power
            .iter()
            .fold(si::Power::ZERO, |acc, p| acc.max(*p))
    }

    /// Power in W at `wind_speed_mps` by piecewise-linear interpolation,
    /// clipped to the curve's domain: speeds below the first defined speed
    /// yield zero, speeds at or above the last defined speed yield the last
    /// defined value.
    pub fn power_at(&self, wind_speed_mps: f64) -> anyhow::Result<f64> {
        let speeds = self.speeds_mps();
        if wind_speed_mps < speeds[0] {
            return Ok(0.0);
        }
        interp1d(&wind_speed_mps, &speeds, &self.powers_w(), Extrapolate::No)
    }

    /// Scales every power value by a constant wake efficiency in (0, 1].
    pub fn apply_efficiency(&mut self, efficiency: si::Ratio) -> anyhow::Result<()> {
        ensure!(
            efficiency > si::Ratio::ZERO && efficiency <= 1.0 * uc::R,
            "wake efficiency must be in (0, 1], got {}",
            efficiency.get::<si::ratio>()
        );
        for p in &mut self.power {
            *p = *p * efficiency;
        }
        Ok(())
    }

    /// Replaces the curve with a Gaussian-weighted moving average over wind
    /// speed. The tail is padded with zero power out to
    /// [`SmoothingConfig::wind_speed_range`] past the last defined speed so
    /// smearing beyond cut-out pulls the curve down.
    ///
    /// # Arguments
    /// - `config`: smoothing parameters
    /// - `turbulence_intensity`: required for
    ///   [`StdDevMethod::TurbulenceIntensity`], ignored otherwise
    pub fn smooth(
        &self,
        config: &SmoothingConfig,
        turbulence_intensity: Option<f64>,
    ) -> anyhow::Result<Self> {
        let block_width = config.block_width.get::<si::meter_per_second>();
        ensure!(block_width > 0.0, "smoothing block width must be positive");
        let range = config.wind_speed_range.get::<si::meter_per_second>();
        let ti = match config.standard_deviation_method {
            StdDevMethod::TurbulenceIntensity => Some(turbulence_intensity.with_context(|| {
                "turbulence intensity required for smoothing with the turbulence_intensity method"
            })?),
            StdDevMethod::StaffellPfenninger => None,
        };

        let mut speeds = self.speeds_mps();
        let mut powers = self.powers_w();
        let max_speed = speeds.last().copied().with_context(|| format_dbg!())? + range;
        while speeds.last().copied().unwrap() < max_speed {
            speeds.push(speeds.last().unwrap() + 0.5);
            powers.push(0.0);
        }

        let mut smoothed = Vec::with_capacity(speeds.len());
        for (i, &v) in speeds.iter().enumerate() {
            let std_dev = match config.standard_deviation_method {
                StdDevMethod::TurbulenceIntensity => v * ti.unwrap(),
                StdDevMethod::StaffellPfenninger => 0.2 * v + 0.6,
            };
            if std_dev <= 0.0 {
                smoothed.push(powers[i]);
                continue;
            }
            let block = Vec::linspace(v - block_width, v + block_width, 21);
            let mut weight_sum = 0.0;
            let mut acc = 0.0;
            for vb in block {
                let weight = gauss_distribution(v - vb, std_dev, 0.0);
                let power = interp1d(&vb, &speeds, &powers, Extrapolate::No)?;
                weight_sum += weight;
                acc += weight * power;
            }
            smoothed.push(acc / weight_sum);
        }
        Self::new(speeds, smoothed)
    }
}

/// Gaussian probability density, the smoothing kernel.
pub(crate) fn gauss_distribution(x: f64, std_dev: f64, mean: f64) -> f64 {
    (-0.5 * ((x - mean) / std_dev).powi(2)).exp() / (std_dev * (2.0 * std::f64::consts::PI).sqrt())
}

/// Method for sizing the Gaussian smoothing kernel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum StdDevMethod {
    /// `sigma = wind_speed * turbulence_intensity`, with turbulence intensity
    /// taken from the weather data or estimated from roughness length
    #[default]
    TurbulenceIntensity,
    /// empirical `sigma = 0.2 * wind_speed + 0.6`
    StaffellPfenninger,
}

/// Whether smoothing is applied to each turbine's curve before aggregation or
/// to the aggregated farm curve. The two are not equivalent when member
/// turbines' curves differ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingOrder {
    /// smooth each turbine's curve, then aggregate
    TurbineCurves,
    /// aggregate, then smooth the farm curve
    #[default]
    AggregateCurve,
}

/// Gaussian power-curve smoothing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// span of wind speeds summed on each side of a curve point
    #[serde(default = "SmoothingConfig::default_block_width")]
    pub block_width: si::Velocity,
    #[serde(default)]
    pub standard_deviation_method: StdDevMethod,
    /// how far past the last defined speed the curve is padded with zeros
    #[serde(default = "SmoothingConfig::default_wind_speed_range")]
    pub wind_speed_range: si::Velocity,
}

impl SmoothingConfig {
    fn default_block_width() -> si::Velocity {
        0.5 * uc::MPS
    }

    fn default_wind_speed_range() -> si::Velocity {
        15.0 * uc::MPS
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            block_width: Self::default_block_width(),
            standard_deviation_method: StdDevMethod::default(),
            wind_speed_range: Self::default_wind_speed_range(),
        }
    }
}

impl SerdeAPI for SmoothingConfig {}
