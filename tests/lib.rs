mod mission_design;
mod persistence;
mod propagation;

extern crate nyx_decay as decay;

use decay::cosmic::{EnvironmentInputs, SatelliteParameters};

/// The 3U cubesat of the reference scenario
pub fn cubesat() -> SatelliteParameters {
    SatelliteParameters::new(3.0, 0.03)
}

/// Quiet sun, quiet geomagnetic field
pub fn quiet_weather() -> EnvironmentInputs {
    EnvironmentInputs::new(70.0, 10.0)
}
