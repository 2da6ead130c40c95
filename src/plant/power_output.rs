use super::plant_imports::*;

/// Maps a hub-height wind-speed series through `curve` to a power-output
/// series. Lookup is piecewise-linear and clipped to the curve's domain:
/// speeds below the first defined speed yield zero, speeds at or above the
/// last defined speed yield the last defined value.
///
/// When `density_kgm3` is provided, each looked-up power is scaled by the
/// ratio of actual air density to the curve's reference density of
/// 1.225 kg/m^3, the aerodynamic dependence of power on air density.
pub fn power_output(
    curve: &PowerCurve,
    wind_speed_mps: &[f64],
    density_kgm3: Option<&[f64]>,
) -> anyhow::Result<Vec<si::Power>> {
    if let Some(density) = density_kgm3 {
        ensure!(
            density.len() == wind_speed_mps.len(),
            "density series has {} samples but wind speed has {}",
            density.len(),
            wind_speed_mps.len()
        );
    }
    let speeds = curve.speeds_mps();
    let powers = curve.powers_w();
    ensure!(!speeds.is_empty(), "power curve is empty");
    let rho_ref = uc::rho_air().get::<si::kilogram_per_cubic_meter>();

    wind_speed_mps
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let power = if *v < speeds[0] {
                0.0
            } else {
                interp1d(v, &speeds, &powers, Extrapolate::No)?
            };
            let power = match density_kgm3 {
                Some(density) => power * density[i] / rho_ref,
                None => power,
            };
            Ok(power * uc::W)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated_1mw_curve() -> PowerCurve {
        PowerCurve::new(
            vec![0.0, 3.0, 12.0, 25.0, 26.0],
            vec![0.0, 0.0, 1.0e6, 1.0e6, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_rated_plateau() {
        let pc = rated_1mw_curve();
        let out = power_output(&pc, &[15.0], None).unwrap();
        assert_eq!(out[0], 1.0e6 * uc::W);
    }

    #[test]
    fn test_domain_clipping() {
        let pc = PowerCurve::new(vec![3.0, 12.0, 25.0], vec![0.0, 1.0e6, 1.0e6]).unwrap();
        let out = power_output(&pc, &[0.0, 2.9, 25.0, 30.0], None).unwrap();
        assert_eq!(out[0], si::Power::ZERO);
        assert_eq!(out[1], si::Power::ZERO);
        assert_eq!(out[2], 1.0e6 * uc::W);
        assert_eq!(out[3], 1.0e6 * uc::W);
    }

    #[test]
    fn test_density_correction_scales_output() {
        let pc = rated_1mw_curve();
        let out = power_output(&pc, &[15.0, 15.0], Some(&[1.225, 1.1])).unwrap();
        assert_eq!(out[0], 1.0e6 * uc::W);
        assert!(almost_eq_uom(&out[1], &(1.0e6 * 1.1 / 1.225 * uc::W), None));
    }

    #[test]
    fn test_density_length_mismatch() {
        let pc = rated_1mw_curve();
        assert!(power_output(&pc, &[15.0, 15.0], Some(&[1.225])).is_err());
    }
}
