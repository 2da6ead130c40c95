use crate::imports::*;

/// default hellman exponent for onshore sites
const HELLMAN_EXPONENT: f64 = 1.0 / 7.0;
/// tropospheric lapse rate in K/m
const TEMPERATURE_GRADIENT: f64 = -6.5e-3;

/// Wind-speed height profile models.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum WindSpeedModel {
    /// logarithmic inter-/extrapolation between the two measurement heights
    /// nearest the hub
    #[default]
    Logarithmic,
    /// linear inter-/extrapolation between the two measurement heights
    /// nearest the hub
    Linear,
    /// hellman power law from the measurement height nearest the hub
    Hellman,
}

impl WindSpeedModel {
    /// Wind speed series at hub height derived from the recorded height table
    /// (see [crate::weather::WeatherTrace::height_table]).
    ///
    /// # Arguments
    /// - `heights_m`: measurement heights in m, ascending
    /// - `series`: one wind speed series in m/s per measurement height
    /// - `hub_height_m`: target hub height in m
    pub fn wind_speed_at_hub(
        &self,
        heights_m: &[f64],
        series: &[&[f64]],
        hub_height_m: f64,
    ) -> anyhow::Result<Vec<f64>> {
        ensure!(
            heights_m.len() == series.len(),
            "one series per measurement height required"
        );
        match self {
            Self::Linear => linear_interpolation_extrapolation(heights_m, series, hub_height_m),
            Self::Logarithmic => {
                logarithmic_interpolation_extrapolation(heights_m, series, hub_height_m)
            }
            Self::Hellman => {
                let i = nearest_height(heights_m, hub_height_m)?;
                Ok(hellman(series[i], heights_m[i], hub_height_m, None))
            }
        }
    }
}

/// Index of the measurement height closest to `target_m`.
fn nearest_height(heights_m: &[f64], target_m: f64) -> anyhow::Result<usize> {
    ensure!(!heights_m.is_empty(), "no measurement heights provided");
    Ok(heights_m
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (*a - target_m)
                .abs()
                .partial_cmp(&(*b - target_m).abs())
                .unwrap_or(Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap())
}

/// Indices of the two measurement heights closest to `target_m`.
/// Any further heights are deliberately ignored.
fn two_nearest_heights(heights_m: &[f64], target_m: f64) -> anyhow::Result<(usize, usize)> {
    ensure!(
        heights_m.len() >= 2,
        "inter-/extrapolation over height requires at least 2 measurement heights, got {}",
        heights_m.len()
    );
    let mut indices: Vec<usize> = (0..heights_m.len()).collect();
    indices.sort_by(|&a, &b| {
        (heights_m[a] - target_m)
            .abs()
            .partial_cmp(&(heights_m[b] - target_m).abs())
            .unwrap_or(Ordering::Equal)
    });
    let (i, j) = (indices[0], indices[1]);
    // keep the pair ordered by height
    if heights_m[i] <= heights_m[j] {
        Ok((i, j))
    } else {
        Ok((j, i))
    }
}

/// Linear inter-/extrapolation of a variable to `target_height_m` from the two
/// nearest measurement heights. A target equal to a recorded height falls out
/// of the same formula as the degenerate case.
pub fn linear_interpolation_extrapolation(
    heights_m: &[f64],
    series: &[&[f64]],
    target_height_m: f64,
) -> anyhow::Result<Vec<f64>> {
    ensure!(
        heights_m.len() == series.len(),
        "one series per measurement height required"
    );
    let (i, j) = two_nearest_heights(heights_m, target_height_m)?;
    let (h1, h2) = (heights_m[i], heights_m[j]);
    Ok(series[i]
        .iter()
        .zip(series[j])
        .map(|(v1, v2)| (v2 - v1) / (h2 - h1) * (target_height_m - h1) + v1)
        .collect())
}

/// Logarithmic inter-/extrapolation of a variable to `target_height_m` from
/// the two nearest measurement heights. Undefined for non-positive heights.
pub fn logarithmic_interpolation_extrapolation(
    heights_m: &[f64],
    series: &[&[f64]],
    target_height_m: f64,
) -> anyhow::Result<Vec<f64>> {
    ensure!(
        heights_m.len() == series.len(),
        "one series per measurement height required"
    );
    let (i, j) = two_nearest_heights(heights_m, target_height_m)?;
    let (h1, h2) = (heights_m[i], heights_m[j]);
    ensure!(
        h1 > 0.0 && h2 > 0.0 && target_height_m > 0.0,
        "logarithmic height profile is undefined for non-positive heights \
         (got {h1} m, {h2} m, target {target_height_m} m)"
    );
    Ok(series[i]
        .iter()
        .zip(series[j])
        .map(|(v1, v2)| {
            (v2 - v1) / (h2.ln() - h1.ln()) * (target_height_m.ln() - h1.ln()) + v1
        })
        .collect())
}

/// Hellman power-law wind profile from a single measurement height:
/// `v_hub = v * (h_hub / h)^alpha`, `alpha` defaulting to 1/7.
pub fn hellman(
    wind_speed_mps: &[f64],
    measurement_height_m: f64,
    hub_height_m: f64,
    exponent: Option<f64>,
) -> Vec<f64> {
    let exponent = exponent.unwrap_or(HELLMAN_EXPONENT);
    let scale = (hub_height_m / measurement_height_m).powf(exponent);
    wind_speed_mps.iter().map(|v| v * scale).collect()
}

/// Temperature series extrapolated to hub height with the standard linear
/// lapse rate of -6.5 K per km.
pub fn linear_gradient(
    temperature_k: &[f64],
    measurement_height_m: f64,
    hub_height_m: f64,
) -> Vec<f64> {
    temperature_k
        .iter()
        .map(|t| t + TEMPERATURE_GRADIENT * (hub_height_m - measurement_height_m))
        .collect()
}

/// Turbulence intensity estimated from the logarithmic wind profile:
/// `TI = 1 / ln(height / roughness_length)`.
pub fn estimate_turbulence_intensity(
    height_m: f64,
    roughness_length_m: f64,
) -> anyhow::Result<f64> {
    ensure!(
        roughness_length_m > 0.0 && height_m > roughness_length_m,
        "turbulence intensity estimate requires 0 < roughness length < height \
         (got z0 = {roughness_length_m} m, height = {height_m} m)"
    );
    Ok(1.0 / (height_m / roughness_length_m).ln())
}

/// Temperature series at hub height: linear inter-/extrapolation when two or
/// more measurement heights are recorded, otherwise the linear lapse rate from
/// the closest recorded height.
pub fn temperature_at_hub(
    heights_m: &[f64],
    series: &[&[f64]],
    hub_height_m: f64,
) -> anyhow::Result<Vec<f64>> {
    if heights_m.len() >= 2 {
        linear_interpolation_extrapolation(heights_m, series, hub_height_m)
    } else {
        let i = nearest_height(heights_m, hub_height_m)?;
        Ok(linear_gradient(series[i], heights_m[i], hub_height_m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_recovers_recorded_height() {
        let heights = [10.0, 80.0];
        let lower = [3.0, 4.0];
        let upper = [6.0, 8.0];
        let series: Vec<&[f64]> = vec![&lower, &upper];
        let at_10 = linear_interpolation_extrapolation(&heights, &series, 10.0).unwrap();
        assert_eq!(at_10, lower.to_vec());
        let at_80 = linear_interpolation_extrapolation(&heights, &series, 80.0).unwrap();
        assert_eq!(at_80, upper.to_vec());
    }

    #[test]
    fn test_linear_extrapolation_above_top_height() {
        let heights = [10.0, 80.0];
        let lower = [3.0];
        let upper = [6.0];
        let series: Vec<&[f64]> = vec![&lower, &upper];
        let at_100 = linear_interpolation_extrapolation(&heights, &series, 100.0).unwrap();
        // 6 + (6 - 3) / (80 - 10) * (100 - 80)
        assert!(almost_eq(at_100[0], 6.857142857142857, None));
    }

    #[test]
    fn test_logarithmic_midpoint_is_arithmetic_mean() {
        let heights: [f64; 2] = [10.0, 90.0];
        let lower = [4.0];
        let upper = [8.0];
        let series: Vec<&[f64]> = vec![&lower, &upper];
        let midpoint = (heights[0].ln() + heights[1].ln()) / 2.0;
        let at_mid =
            logarithmic_interpolation_extrapolation(&heights, &series, midpoint.exp()).unwrap();
        assert!(almost_eq(at_mid[0], 6.0, None));
    }

    #[test]
    fn test_logarithmic_rejects_non_positive_heights() {
        let heights = [0.0, 80.0];
        let lower = [3.0];
        let upper = [6.0];
        let series: Vec<&[f64]> = vec![&lower, &upper];
        assert!(logarithmic_interpolation_extrapolation(&heights, &series, 100.0).is_err());
    }

    #[test]
    fn test_two_nearest_ignores_far_heights() {
        let heights = [10.0, 40.0, 80.0, 120.0];
        assert_eq!(two_nearest_heights(&heights, 100.0).unwrap(), (2, 3));
        assert_eq!(two_nearest_heights(&heights, 12.0).unwrap(), (0, 1));
    }

    #[test]
    fn test_hellman_increases_wind_speed_aloft() {
        let v_hub = hellman(&[5.0], 10.0, 100.0, None);
        assert!(almost_eq(v_hub[0], 5.0 * 10.0_f64.powf(1.0 / 7.0), None));
    }

    #[test]
    fn test_linear_gradient_cools_aloft() {
        let t_hub = linear_gradient(&[288.15], 0.0, 100.0);
        assert!(almost_eq(t_hub[0], 288.15 - 0.65, None));
    }

    #[test]
    fn test_turbulence_intensity_estimate() {
        let ti = estimate_turbulence_intensity(100.0, 0.15).unwrap();
        assert!(almost_eq(ti, 1.0 / (100.0_f64 / 0.15).ln(), None));
        assert!(estimate_turbulence_intensity(100.0, 0.0).is_err());
        assert!(estimate_turbulence_intensity(0.1, 0.15).is_err());
    }
}
