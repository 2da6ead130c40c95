use super::plant_imports::*;

/// Group of identical turbines within a farm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurbineGroup {
    pub turbine: WindTurbine,
    /// number of turbines of this type
    pub n_turbines: u32,
}

/// Aggregated wind farm / turbine cluster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindFarm {
    pub turbine_groups: Vec<TurbineGroup>,
    /// constant farm efficiency for the farm_efficiency wake-loss model
    #[serde(default)]
    pub efficiency: Option<si::Ratio>,
}

impl SerdeAPI for WindFarm {
    fn init(&mut self) -> Result<(), WindPlantError> {
        if self.turbine_groups.is_empty() {
            return Err(WindPlantError::Init(
                "wind farm requires at least one turbine group".into(),
            ));
        }
        for group in &mut self.turbine_groups {
            if group.n_turbines == 0 {
                return Err(WindPlantError::Init(
                    "turbine group requires at least one turbine".into(),
                ));
            }
            group.turbine.init()?;
        }
        if let Some(efficiency) = self.efficiency {
            let efficiency = efficiency.get::<si::ratio>();
            if !(0.0..=1.0).contains(&efficiency) || efficiency == 0.0 {
                return Err(WindPlantError::Init(format!(
                    "farm efficiency must be in (0, 1], got {efficiency}"
                )));
            }
        }
        Ok(())
    }
}

impl WindFarm {
    pub fn n_turbines(&self) -> u32 {
        self.turbine_groups.iter().map(|g| g.n_turbines).sum()
    }

    /// Installed capacity of the farm.
    pub fn nominal_power(&self) -> si::Power {
        self.turbine_groups
            .iter()
            .fold(si::Power::ZERO, |acc, g| {
                acc + g.turbine.nominal_power * g.n_turbines as f64
            })
    }

    /// Nominal-power-weighted logarithmic mean of the members' hub heights,
    /// the height used for all height-dependent calculations of the farm.
    pub fn mean_hub_height(&self) -> si::Length {
        let mut weighted_log_sum = 0.0;
        let mut weight_sum = 0.0;
        for group in &self.turbine_groups {
            let weight = group.turbine.nominal_power.get::<si::watt>() * group.n_turbines as f64;
            weighted_log_sum += group.turbine.hub_height.get::<si::meter>().ln() * weight;
            weight_sum += weight;
        }
        (weighted_log_sum / weight_sum).exp() * uc::M
    }

    /// Aggregate farm power curve: member curves are interpolated onto the
    /// union wind-speed grid and summed, weighted by turbine count. Smoothing
    /// is applied per turbine curve or to the summed curve depending on
    /// `smoothing_order`.
    ///
    /// # Arguments
    /// - `smoothing`: smoothing parameters; `None` disables smoothing
    /// - `smoothing_order`: where smoothing enters the aggregation
    /// - `roughness_length_m`: site roughness length for turbulence intensity
    ///   estimates when no measured value is supplied
    /// - `turbulence_intensity`: measured turbulence intensity, if any
    pub fn assign_power_curve(
        &self,
        smoothing: Option<&SmoothingConfig>,
        smoothing_order: SmoothingOrder,
        roughness_length_m: Option<f64>,
        turbulence_intensity: Option<f64>,
    ) -> anyhow::Result<PowerCurve> {
        let mut member_curves: Vec<(PowerCurve, f64)> = Vec::new();
        for group in &self.turbine_groups {
            let mut curve = group.turbine.power_curve.clone();
            if let (Some(config), SmoothingOrder::TurbineCurves) = (smoothing, smoothing_order) {
                let ti = self.resolve_turbulence_intensity(
                    group.turbine.hub_height.get::<si::meter>(),
                    roughness_length_m,
                    turbulence_intensity,
                    config,
                )?;
                curve = curve.smooth(config, ti)?;
            }
            member_curves.push((curve, group.n_turbines as f64));
        }

        let mut grid: Vec<f64> = member_curves
            .iter()
            .flat_map(|(curve, _)| curve.speeds_mps())
            .collect();
        grid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        grid.dedup_by(|a, b| almost_eq(*a, *b, None));

        let mut powers = Vec::with_capacity(grid.len());
        for v in &grid {
            let mut power = 0.0;
            for (curve, count) in &member_curves {
                power += count * curve.power_at(*v)?;
            }
            powers.push(power);
        }
        let mut aggregate = PowerCurve::new(grid, powers)?;

        if let (Some(config), SmoothingOrder::AggregateCurve) = (smoothing, smoothing_order) {
            let ti = self.resolve_turbulence_intensity(
                self.mean_hub_height().get::<si::meter>(),
                roughness_length_m,
                turbulence_intensity,
                config,
            )?;
            aggregate = aggregate.smooth(config, ti)?;
        }
        Ok(aggregate)
    }

    fn resolve_turbulence_intensity(
        &self,
        height_m: f64,
        roughness_length_m: Option<f64>,
        turbulence_intensity: Option<f64>,
        config: &SmoothingConfig,
    ) -> anyhow::Result<Option<f64>> {
        if !config.standard_deviation_method.is_turbulence_intensity() {
            return Ok(None);
        }
        match turbulence_intensity {
            Some(ti) => Ok(Some(ti)),
            None => roughness_length_m
                .map(|z0| estimate_turbulence_intensity(height_m, z0))
                .transpose()
                .with_context(|| "could not estimate turbulence intensity from roughness length"),
        }
    }
}

impl Default for WindFarm {
    fn default() -> Self {
        let mut farm = Self {
            turbine_groups: vec![TurbineGroup {
                turbine: WindTurbine::default(),
                n_turbines: 6,
            }],
            efficiency: Some(0.9 * uc::R),
        };
        farm.init().unwrap();
        farm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_power_sums_groups() {
        let farm = WindFarm::default();
        assert_eq!(farm.n_turbines(), 6);
        assert_eq!(farm.nominal_power(), 12.0 * uc::MW);
    }

    #[test]
    fn test_mean_hub_height_single_type() {
        let farm = WindFarm::default();
        assert!(almost_eq_uom(
            &farm.mean_hub_height(),
            &(105.0 * uc::M),
            None
        ));
    }

    #[test]
    fn test_mean_hub_height_is_power_weighted() {
        let mut tall = WindTurbine::default();
        tall.hub_height = 135.0 * uc::M;
        let farm = WindFarm {
            turbine_groups: vec![
                TurbineGroup {
                    turbine: WindTurbine::default(),
                    n_turbines: 1,
                },
                TurbineGroup {
                    turbine: tall,
                    n_turbines: 1,
                },
            ],
            efficiency: None,
        };
        let expected = ((105.0_f64.ln() + 135.0_f64.ln()) / 2.0).exp();
        assert!(almost_eq_uom(
            &farm.mean_hub_height(),
            &(expected * uc::M),
            None
        ));
    }

    #[test]
    fn test_aggregate_curve_scales_with_turbine_count() {
        let farm = WindFarm::default();
        let aggregate = farm
            .assign_power_curve(None, SmoothingOrder::default(), None, None)
            .unwrap();
        let single = &farm.turbine_groups[0].turbine.power_curve;
        assert!(almost_eq(
            aggregate.power_at(10.0).unwrap(),
            6.0 * single.power_at(10.0).unwrap(),
            None
        ));
        assert_eq!(aggregate.rated_power(), 12.0 * uc::MW);
    }

    #[test]
    fn test_smoothing_order_matters_for_mixed_farms() {
        let mut small = WindTurbine::default();
        small.nominal_power = 1.0 * uc::MW;
        small.hub_height = 80.0 * uc::M;
        small.power_curve = PowerCurve::new(
            vec![0.0, 3.0, 11.0, 25.0],
            vec![0.0, 0.0, 1.0e6, 1.0e6],
        )
        .unwrap();
        let farm = WindFarm {
            turbine_groups: vec![
                TurbineGroup {
                    turbine: WindTurbine::default(),
                    n_turbines: 3,
                },
                TurbineGroup {
                    turbine: small,
                    n_turbines: 3,
                },
            ],
            efficiency: None,
        };
        let config = SmoothingConfig::default();
        let per_turbine = farm
            .assign_power_curve(
                Some(&config),
                SmoothingOrder::TurbineCurves,
                Some(0.15),
                None,
            )
            .unwrap();
        let aggregate = farm
            .assign_power_curve(
                Some(&config),
                SmoothingOrder::AggregateCurve,
                Some(0.15),
                None,
            )
            .unwrap();
        let differs = [6.0, 9.0, 12.0].iter().any(|v| {
            !almost_eq(
                per_turbine.power_at(*v).unwrap(),
                aggregate.power_at(*v).unwrap(),
                Some(1e-6),
            )
        });
        assert!(differs);
    }

    #[test]
    fn test_init_rejects_empty_farm() {
        let mut farm = WindFarm {
            turbine_groups: Vec::new(),
            efficiency: None,
        };
        assert!(farm.init().is_err());
    }
}
