use super::*;
use crate::imports::*;
use crate::weather::{WeatherTrace, WeatherVariable};

#[test]
/// Unit test for the full cluster model chain against the synthetic weather
/// trace.
fn test_farm_power_sim() {
    let mut sim = FarmPowerSim::default();
    let weather = WeatherTrace::default();

    assert!(sim.power_curve.is_none());
    assert!(sim.power_output.is_empty());
    sim.run(&weather).unwrap();

    assert_eq!(sim.power_output.len(), weather.len());
    let nominal = sim.farm.nominal_power();
    assert!(sim.power_output.iter().any(|p| *p > si::Power::ZERO));
    for p in &sim.power_output {
        assert!(*p >= si::Power::ZERO && *p <= nominal);
    }
    let aggregate = sim.power_curve.as_ref().unwrap();
    assert_eq!(aggregate.rated_power(), nominal);
    for f in sim.normalized_power_output() {
        let f = f.get::<si::ratio>();
        assert!((0.0..=1.0).contains(&f));
    }
}

#[test]
fn test_constant_efficiency_scales_the_whole_series() {
    let weather = WeatherTrace::default();

    let mut baseline = FarmPowerSim::new(
        WindFarm::default(),
        PowerSimConfig {
            wake_losses: WakeLossModel::None,
            ..Default::default()
        },
    )
    .unwrap();
    baseline.run(&weather).unwrap();

    let mut scaled = FarmPowerSim::new(
        WindFarm::default(),
        PowerSimConfig {
            wake_losses: WakeLossModel::FarmEfficiency,
            ..Default::default()
        },
    )
    .unwrap();
    scaled.run(&weather).unwrap();

    for (b, s) in baseline.power_output.iter().zip(&scaled.power_output) {
        assert!(crate::utils::almost_eq_uom(&(*b * 0.9), s, Some(1e-6)));
    }
}

#[test]
fn test_wind_speed_reduction_never_increases_output() {
    let weather = WeatherTrace::default();

    let mut baseline = FarmPowerSim::new(
        WindFarm::default(),
        PowerSimConfig {
            wake_losses: WakeLossModel::None,
            ..Default::default()
        },
    )
    .unwrap();
    baseline.run(&weather).unwrap();

    let mut reduced = FarmPowerSim::default();
    assert!(matches!(
        reduced.config.wake_losses,
        WakeLossModel::EfficiencyCurve(_)
    ));
    reduced.run(&weather).unwrap();

    for (b, r) in baseline.power_output.iter().zip(&reduced.power_output) {
        assert!(r <= b);
    }
}

#[test]
fn test_unknown_efficiency_curve_falls_back_to_no_correction() {
    let weather = WeatherTrace::default();

    let mut baseline = FarmPowerSim::new(
        WindFarm::default(),
        PowerSimConfig {
            wake_losses: WakeLossModel::None,
            ..Default::default()
        },
    )
    .unwrap();
    baseline.run(&weather).unwrap();

    let mut fallback = FarmPowerSim::new(
        WindFarm::default(),
        PowerSimConfig {
            wake_losses: WakeLossModel::EfficiencyCurve("no_such_study".into()),
            ..Default::default()
        },
    )
    .unwrap();
    fallback.run(&weather).unwrap();

    assert_eq!(baseline.power_output, fallback.power_output);
}

#[test]
fn test_missing_wind_speed_column_is_a_configuration_error() {
    let mut weather = WeatherTrace::default();
    weather
        .columns
        .retain(|c| c.variable != WeatherVariable::WindSpeed);
    let mut sim = FarmPowerSim::default();
    assert!(sim.run(&weather).is_err());
}

#[test]
fn test_density_correction_requires_pressure_and_temperature() {
    let mut weather = WeatherTrace::default();
    weather
        .columns
        .retain(|c| c.variable != WeatherVariable::Pressure);
    let mut sim = FarmPowerSim::new(
        WindFarm::default(),
        PowerSimConfig {
            density_correction: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(sim.run(&weather).is_err());
}

#[test]
fn test_density_correction_changes_output_below_rated() {
    let weather = WeatherTrace::default();
    let config = PowerSimConfig {
        wake_losses: WakeLossModel::None,
        ..Default::default()
    };

    let mut baseline = FarmPowerSim::new(WindFarm::default(), config.clone()).unwrap();
    baseline.run(&weather).unwrap();

    let mut corrected = FarmPowerSim::new(
        WindFarm::default(),
        PowerSimConfig {
            density_correction: true,
            ..config
        },
    )
    .unwrap();
    corrected.run(&weather).unwrap();

    assert_ne!(baseline.power_output, corrected.power_output);
    // at 281 K the hub air is denser than the 1.225 kg/m^3 reference, so the
    // correction uprates every sample
    for (b, c) in baseline.power_output.iter().zip(&corrected.power_output) {
        assert!(c >= b);
    }
}

#[test]
fn test_smoothed_cluster_run() {
    let weather = WeatherTrace::default();
    let mut sim = FarmPowerSim::new(
        WindFarm::default(),
        PowerSimConfig {
            smoothing: Some(SmoothingConfig::default()),
            ..Default::default()
        },
    )
    .unwrap();
    sim.run(&weather).unwrap();
    assert_eq!(sim.power_output.len(), weather.len());
    assert!(sim.power_output.iter().any(|p| *p > si::Power::ZERO));
}

#[test]
fn test_turbine_power_sim() {
    let weather = WeatherTrace::default();
    let mut sim = TurbinePowerSim::default();
    sim.run(&weather).unwrap();
    assert_eq!(sim.power_output.len(), weather.len());
    assert!(sim.power_output.iter().any(|p| *p > si::Power::ZERO));
    for p in &sim.power_output {
        assert!(*p <= sim.turbine.nominal_power);
    }
}

#[test]
fn test_linear_wind_speed_model_end_to_end() {
    let weather = WeatherTrace::default();
    let mut sim = FarmPowerSim::new(
        WindFarm::default(),
        PowerSimConfig {
            wind_speed_model: crate::atmosphere::WindSpeedModel::Linear,
            wake_losses: WakeLossModel::None,
            ..Default::default()
        },
    )
    .unwrap();
    sim.run(&weather).unwrap();
    assert_eq!(sim.power_output.len(), weather.len());
}

#[test]
fn test_sim_yaml_round_trip() {
    let mut sim = FarmPowerSim::default();
    let weather = WeatherTrace::default();
    sim.run(&weather).unwrap();

    let yaml = sim.to_yaml().unwrap();
    let sim2 = FarmPowerSim::from_yaml(&yaml, false).unwrap();
    assert_eq!(sim.farm, sim2.farm);
    assert_eq!(sim.power_curve, sim2.power_curve);
    assert_eq!(sim.power_output, sim2.power_output);
}
