use super::plant_imports::*;

/// Wind-speed-dependent farm efficiency: a dimensionless reduction factor in
/// [0, 1] applied to the hub-height wind speed before power lookup, standing
/// in for aggregate wake effects across a farm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindEfficiencyCurve {
    pub wind_speed: Vec<si::Velocity>,
    pub efficiency: Vec<si::Ratio>,
}

impl WindEfficiencyCurve {
    fn from_table(wind_speed_mps: &[f64], efficiency: &[f64]) -> Self {
        Self {
            wind_speed: wind_speed_mps.iter().map(|v| *v * uc::MPS).collect(),
            efficiency: efficiency.iter().map(|e| *e * uc::R).collect(),
        }
    }

    /// Reduction factor at `wind_speed_mps`, clamped to the curve's ends.
    pub fn efficiency_at(&self, wind_speed_mps: f64) -> anyhow::Result<f64> {
        let speeds: Vec<f64> = self
            .wind_speed
            .iter()
            .map(|v| v.get::<si::meter_per_second>())
            .collect();
        let efficiencies: Vec<f64> = self
            .efficiency
            .iter()
            .map(|e| e.get::<si::ratio>())
            .collect();
        interp1d(&wind_speed_mps, &speeds, &efficiencies, Extrapolate::No)
    }

    /// Attenuates a hub-height wind speed series sample by sample.
    pub fn reduce_wind_speed(&self, wind_speed_mps: &[f64]) -> anyhow::Result<Vec<f64>> {
        let speeds: Vec<f64> = self
            .wind_speed
            .iter()
            .map(|v| v.get::<si::meter_per_second>())
            .collect();
        let efficiencies: Vec<f64> = self
            .efficiency
            .iter()
            .map(|e| e.get::<si::ratio>())
            .collect();
        wind_speed_mps
            .iter()
            .map(|v| Ok(v * interp1d(v, &speeds, &efficiencies, Extrapolate::No)?))
            .collect()
    }
}

lazy_static! {
    /// Predefined reference wind-efficiency curves keyed by name, from the
    /// dena and Knorr wind farm studies. Initialized once at first use and
    /// immutable thereafter.
    pub static ref WIND_EFFICIENCY_CURVES: HashMap<&'static str, WindEfficiencyCurve> = {
        let wind_speed = [
            0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 25.0,
        ];
        let mut curves = HashMap::new();
        curves.insert(
            "dena_mean",
            WindEfficiencyCurve::from_table(
                &wind_speed,
                &[1.0, 0.98, 0.92, 0.85, 0.82, 0.84, 0.88, 0.93, 0.97, 0.99, 1.0, 1.0],
            ),
        );
        curves.insert(
            "dena_extreme1",
            WindEfficiencyCurve::from_table(
                &wind_speed,
                &[1.0, 0.97, 0.88, 0.78, 0.74, 0.77, 0.83, 0.90, 0.95, 0.98, 1.0, 1.0],
            ),
        );
        curves.insert(
            "dena_extreme2",
            WindEfficiencyCurve::from_table(
                &wind_speed,
                &[1.0, 0.98, 0.95, 0.90, 0.87, 0.89, 0.92, 0.96, 0.99, 1.0, 1.0, 1.0],
            ),
        );
        curves.insert(
            "knorr_mean",
            WindEfficiencyCurve::from_table(
                &wind_speed,
                &[1.0, 0.99, 0.94, 0.88, 0.85, 0.87, 0.91, 0.95, 0.98, 1.0, 1.0, 1.0],
            ),
        );
        curves.insert(
            "knorr_extreme1",
            WindEfficiencyCurve::from_table(
                &wind_speed,
                &[1.0, 0.96, 0.86, 0.76, 0.72, 0.75, 0.82, 0.89, 0.94, 0.98, 1.0, 1.0],
            ),
        );
        curves
    };
}

/// Looks up a predefined wind-efficiency curve by name.
pub fn wind_efficiency_curve(name: &str) -> Option<&'static WindEfficiencyCurve> {
    WIND_EFFICIENCY_CURVES.get(name)
}
