use crate::imports::*;

/// specific gas constant of dry air in J/(kg*K)
const R_DRY_AIR: f64 = 287.058;
/// assumed pressure gradient in hPa per m of height difference
const PRESSURE_GRADIENT_HPA_PER_M: f64 = -1.0 / 8.0;

/// Air density models, selected once at configuration time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum DensityModel {
    /// barometric height formula referenced to standard ambient conditions
    #[default]
    Barometric,
    /// ideal gas law on the pressure extrapolated to hub height
    IdealGas,
}

impl DensityModel {
    /// Air density series at hub height in kg/m^3.
    ///
    /// # Arguments
    /// - `pressure_pa`: pressure series in Pa at `pressure_height`
    /// - `pressure_height`: measurement height of the pressure series
    /// - `hub_height`: height of the rotor axis above ground
    /// - `temperature_hub_k`: temperature series in K, already at hub height
    pub fn rho(
        &self,
        pressure_pa: &[f64],
        pressure_height: si::Length,
        hub_height: si::Length,
        temperature_hub_k: &[f64],
    ) -> anyhow::Result<Vec<f64>> {
        ensure!(
            pressure_pa.len() == temperature_hub_k.len(),
            "pressure and temperature series must be the same length"
        );
        let dh = (hub_height - pressure_height).get::<si::meter>();
        let rho_std = uc::rho_air().get::<si::kilogram_per_cubic_meter>();
        let t_std = uc::t_std().get::<si::kelvin>();
        let p_std = uc::p_std().get::<si::pascal>();
        let rho = match self {
            Self::Barometric => pressure_pa
                .iter()
                .zip(temperature_hub_k)
                .map(|(p, t_hub)| {
                    (p / 100.0 + PRESSURE_GRADIENT_HPA_PER_M * dh) * rho_std * t_std * 100.0
                        / (p_std * t_hub)
                })
                .collect(),
            Self::IdealGas => pressure_pa
                .iter()
                .zip(temperature_hub_k)
                .map(|(p, t_hub)| {
                    let p_hub = (p / 100.0 + PRESSURE_GRADIENT_HPA_PER_M * dh) * 100.0;
                    p_hub / (R_DRY_AIR * t_hub)
                })
                .collect(),
        };
        Ok(rho)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barometric_standard_conditions() {
        let rho = DensityModel::Barometric
            .rho(&[101_325.0], 0.0 * uc::M, 100.0 * uc::M, &[288.15])
            .unwrap();
        // (101325/100 - 100/8) * (1.225 * 288.15 * 100) / (101325 * 288.15)
        assert!(almost_eq(rho[0], 1.2098876, Some(1e-6)));
    }

    #[test]
    fn test_ideal_gas_standard_conditions() {
        let rho = DensityModel::IdealGas
            .rho(&[101_325.0], 0.0 * uc::M, 100.0 * uc::M, &[288.15])
            .unwrap();
        // (101325/100 - 100/8) * 100 / (287.058 * 288.15)
        assert!(almost_eq(rho[0], 100_075.0 / (287.058 * 288.15), None));
    }

    #[test]
    fn test_density_decreases_with_hub_height() {
        for model in [DensityModel::Barometric, DensityModel::IdealGas] {
            let mut prev = f64::INFINITY;
            for hub_m in [10.0, 50.0, 100.0, 150.0, 200.0] {
                let rho = model
                    .rho(&[101_325.0], 0.0 * uc::M, hub_m * uc::M, &[288.15])
                    .unwrap();
                assert!(rho[0] < prev);
                prev = rho[0];
            }
        }
    }

    #[test]
    fn test_models_agree_near_standard_conditions() {
        let barometric = DensityModel::Barometric
            .rho(&[101_325.0], 0.0 * uc::M, 100.0 * uc::M, &[288.15])
            .unwrap();
        let ideal_gas = DensityModel::IdealGas
            .rho(&[101_325.0], 0.0 * uc::M, 100.0 * uc::M, &[288.15])
            .unwrap();
        assert!(almost_eq(barometric[0], ideal_gas[0], Some(1e-2)));
    }
}
