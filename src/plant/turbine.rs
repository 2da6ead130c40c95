use super::plant_imports::*;

/// Wind turbine descriptor, read-only to the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindTurbine {
    /// height of the rotor axis above ground
    pub hub_height: si::Length,
    pub rotor_diameter: si::Length,
    /// rated power
    pub nominal_power: si::Power,
    /// reference power curve at standard ambient density
    pub power_curve: PowerCurve,
}

impl SerdeAPI for WindTurbine {
    fn init(&mut self) -> Result<(), WindPlantError> {
        if self.hub_height.get::<si::meter>() <= 0.0 {
            return Err(WindPlantError::Init(format!(
                "hub height must be positive, got {} m",
                self.hub_height.get::<si::meter>()
            )));
        }
        if self.rotor_diameter.get::<si::meter>() <= 0.0 {
            return Err(WindPlantError::Init(format!(
                "rotor diameter must be positive, got {} m",
                self.rotor_diameter.get::<si::meter>()
            )));
        }
        if self.nominal_power <= si::Power::ZERO {
            return Err(WindPlantError::Init(format!(
                "nominal power must be positive, got {} W",
                self.nominal_power.get::<si::watt>()
            )));
        }
        self.power_curve.init()?;
        Ok(())
    }
}

impl Default for WindTurbine {
    fn default() -> Self {
        let file_contents = include_str!("turbine.default.yaml");
        Self::from_yaml(file_contents, false).unwrap()
    }
}

impl WindTurbine {
    /// Turbulence intensity at hub height, estimated from roughness length
    /// when no measured value is available.
    pub fn turbulence_intensity(&self, roughness_length: si::Length) -> anyhow::Result<f64> {
        estimate_turbulence_intensity(
            self.hub_height.get::<si::meter>(),
            roughness_length.get::<si::meter>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_turbine_is_valid() {
        let mut turbine = WindTurbine::default();
        assert!(turbine.init().is_ok());
        assert_eq!(turbine.nominal_power, 2.0 * uc::MW);
        assert_eq!(turbine.power_curve.rated_power(), 2.0 * uc::MW);
    }

    #[test]
    fn test_init_rejects_bad_geometry() {
        let mut turbine = WindTurbine::default();
        turbine.hub_height = si::Length::ZERO;
        assert!(turbine.init().is_err());
    }

    #[test]
    fn test_turbulence_intensity_estimate() {
        let turbine = WindTurbine::default();
        let ti = turbine.turbulence_intensity(0.15 * uc::M).unwrap();
        assert!(ti > 0.0 && ti < 0.3);
        assert!(turbine.turbulence_intensity(si::Length::ZERO).is_err());
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let turbine = WindTurbine::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turbine.yaml");
        turbine.to_file(&path).unwrap();
        let turbine2 = WindTurbine::from_file(&path, false).unwrap();
        assert_eq!(turbine, turbine2);
    }
}
