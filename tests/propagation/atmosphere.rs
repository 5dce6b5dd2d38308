extern crate nyx_decay as decay;

use decay::cosmic::EnvironmentInputs;
use decay::dynamics::atmosphere::density_kg_m3;
use decay::dynamics::{AtmosphericModel, ScaleHeightAtmosphere};
use rstest::*;

#[rstest]
#[case(100.0)]
#[case(200.0)]
#[case(465.0)]
#[case(1000.0)]
#[case(2000.0)]
#[case(5877.5)]
fn density_positive_and_finite(#[case] altitude_km: f64) {
    for flux in [0.0, 70.0, 150.0, 300.0] {
        for ap in [0.0, 10.0, 50.0, 400.0] {
            let rho = density_kg_m3(altitude_km, flux, ap);
            assert!(rho.is_finite(), "{altitude_km} km F{flux} Ap{ap}: {rho}");
            assert!(rho > 0.0, "{altitude_km} km F{flux} Ap{ap}: {rho}");
        }
    }
}

#[test]
fn density_decreases_with_altitude() {
    let atmosphere = ScaleHeightAtmosphere::default();
    let weather = EnvironmentInputs::new(70.0, 10.0);
    let mut prev = atmosphere.density_kg_m3(90.0, &weather);
    for altitude_km in (100..=5800).step_by(10) {
        let rho = atmosphere.density_kg_m3(altitude_km as f64, &weather);
        assert!(rho <= prev, "density increased at {altitude_km} km");
        prev = rho;
    }
}

#[test]
fn density_increases_with_space_weather() {
    let atmosphere = ScaleHeightAtmosphere::default();
    // Above the reference altitude of 175 km, where a hotter atmosphere is denser
    for altitude_km in [200.0, 300.0, 465.0, 800.0] {
        let quiet = atmosphere.density_kg_m3(altitude_km, &EnvironmentInputs::new(70.0, 10.0));
        let active_sun = atmosphere.density_kg_m3(altitude_km, &EnvironmentInputs::new(150.0, 10.0));
        let storm = atmosphere.density_kg_m3(altitude_km, &EnvironmentInputs::new(70.0, 100.0));
        assert!(active_sun > quiet, "{altitude_km} km");
        assert!(storm > quiet, "{altitude_km} km");
    }
}
