/*
    Nyx Decay, orbital lifetime of small satellites
    Copyright (C) 2018-onwards Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::fmt;

use crate::errors::{DecayError, NonPositiveAreaSnafu, NonPositiveMassSnafu};

/// The physical properties of a satellite relevant to drag.
///
/// The effective area is the windward cross section multiplied by the drag coefficient, so a
/// 10 cm x 30 cm face with a Cd of 2.2 has an effective area of 0.066 m^2.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SatelliteParameters {
    /// Mass in kilograms
    pub mass_kg: f64,
    /// Effective windward area (area times drag coefficient) in square meters
    pub effective_area_m2: f64,
}

impl SatelliteParameters {
    /// Initializes new satellite parameters. Use `validate` before handing these to a simulation.
    pub fn new(mass_kg: f64, effective_area_m2: f64) -> Self {
        Self {
            mass_kg,
            effective_area_m2,
        }
    }

    /// Returns the area to mass ratio, in m^2/kg. Higher values decay faster.
    pub fn area_to_mass(&self) -> f64 {
        self.effective_area_m2 / self.mass_kg
    }

    /// Ensures that both the mass and the area are strictly positive (and not NaN).
    pub fn validate(&self) -> Result<(), DecayError> {
        ensure!(
            self.mass_kg > 0.0,
            NonPositiveMassSnafu {
                mass_kg: self.mass_kg
            }
        );
        ensure!(
            self.effective_area_m2 > 0.0,
            NonPositiveAreaSnafu {
                area_m2: self.effective_area_m2
            }
        );
        Ok(())
    }
}

impl fmt::Display for SatelliteParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "satellite of {} kg with effective area {} m^2",
            self.mass_kg, self.effective_area_m2
        )
    }
}

/// Average space weather over the lifetime of the satellite.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentInputs {
    /// Average solar radio flux at 10.7 cm (F10.7), in solar flux units
    pub solar_radio_flux: f64,
    /// Average geomagnetic A index
    pub geomagnetic_a_index: f64,
}

impl EnvironmentInputs {
    pub fn new(solar_radio_flux: f64, geomagnetic_a_index: f64) -> Self {
        Self {
            solar_radio_flux,
            geomagnetic_a_index,
        }
    }

    /// Returns a copy of these inputs with the provided solar radio flux
    pub fn with_solar_radio_flux(mut self, solar_radio_flux: f64) -> Self {
        self.solar_radio_flux = solar_radio_flux;
        self
    }

    /// Returns a copy of these inputs with the provided geomagnetic A index
    pub fn with_geomagnetic_a_index(mut self, geomagnetic_a_index: f64) -> Self {
        self.geomagnetic_a_index = geomagnetic_a_index;
        self
    }
}

impl fmt::Display for EnvironmentInputs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "F10.7 = {} sfu, Ap = {}",
            self.solar_radio_flux, self.geomagnetic_a_index
        )
    }
}

#[cfg(test)]
mod ut_satellite {
    use super::*;

    #[test]
    fn validate_rejects_non_positive() {
        assert!(SatelliteParameters::new(3.0, 0.03).validate().is_ok());
        assert!(matches!(
            SatelliteParameters::new(0.0, 0.03).validate(),
            Err(DecayError::NonPositiveMass { .. })
        ));
        assert!(matches!(
            SatelliteParameters::new(3.0, -1.0).validate(),
            Err(DecayError::NonPositiveArea { .. })
        ));
        assert!(SatelliteParameters::new(f64::NAN, 0.03).validate().is_err());
    }

    #[test]
    fn environment_overrides() {
        let env = EnvironmentInputs::new(70.0, 10.0);
        assert_eq!(env.with_solar_radio_flux(150.0).solar_radio_flux, 150.0);
        assert_eq!(env.with_solar_radio_flux(150.0).geomagnetic_a_index, 10.0);
        assert_eq!(env.with_geomagnetic_a_index(4.0).geomagnetic_a_index, 4.0);
    }
}
