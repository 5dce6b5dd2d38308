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

use super::AtmosphericModel;
use crate::cosmic::EnvironmentInputs;

/// `ScaleHeightAtmosphere` is the simple thermospheric model used by the Australian Space Weather
/// Services for satellite orbital decay calculations.
///
/// ```text
/// T    = 900 + 2.5 (F10.7 - 70) + 1.5 Ap      (exospheric temperature, K)
/// m(h) = 27 - 0.012 (h - 200)                 (mean molecular mass)
/// H    = T / m(h)                             (scale height, km)
/// rho  = 6e-10 exp(-(h - 175) / H)            (density, kg/m^3)
/// ```
///
/// **WARNING:** the molecular mass term reaches zero at 2450 km, and the density of this formula
/// increases again past the midpoint between the reference altitude (175 km) and that zero
/// crossing, i.e. above 1312.5 km. This model holds the density constant above that turning
/// altitude, such that the density is always finite, positive, and non-increasing with altitude.
/// Between 1312.5 km and 2450 km this departs from the raw formula, which grows there by orders of
/// magnitude (about 500 times the turning altitude density at 2000 km under quiet weather), so
/// lifetimes of orbits starting in that band are longer than the raw formula would predict. Above
/// 2450 km the raw formula has no meaning at all.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleHeightAtmosphere {
    /// Exospheric temperature under quiet conditions, in K
    pub base_temperature_k: f64,
    /// Temperature increase per sfu of F10.7 above the reference flux
    pub flux_coefficient: f64,
    /// Reference solar radio flux, in sfu
    pub reference_flux: f64,
    /// Temperature increase per unit of Ap
    pub geomagnetic_coefficient: f64,
    /// Mean molecular mass at the mass reference altitude
    pub base_molecular_mass: f64,
    /// Decrease of the molecular mass per km
    pub molecular_mass_gradient: f64,
    /// Altitude at which the molecular mass equals the base value, in km
    pub mass_reference_altitude_km: f64,
    /// Density at the density reference altitude, in kg/m^3
    pub reference_density_kg_m3: f64,
    /// Altitude of the reference density, in km
    pub density_reference_altitude_km: f64,
}

impl Default for ScaleHeightAtmosphere {
    fn default() -> Self {
        Self {
            base_temperature_k: 900.0,
            flux_coefficient: 2.5,
            reference_flux: 70.0,
            geomagnetic_coefficient: 1.5,
            base_molecular_mass: 27.0,
            molecular_mass_gradient: 0.012,
            mass_reference_altitude_km: 200.0,
            reference_density_kg_m3: 6e-10,
            density_reference_altitude_km: 175.0,
        }
    }
}

impl ScaleHeightAtmosphere {
    /// Temperature-like term built from the space weather, in K.
    pub fn temperature_k(&self, weather: &EnvironmentInputs) -> f64 {
        self.base_temperature_k
            + self.flux_coefficient * (weather.solar_radio_flux - self.reference_flux)
            + self.geomagnetic_coefficient * weather.geomagnetic_a_index
    }

    /// Mean molecular mass term at the provided altitude. Non-positive from `zero_mass_altitude_km` and above.
    pub fn molecular_mass(&self, altitude_km: f64) -> f64 {
        self.base_molecular_mass
            - self.molecular_mass_gradient * (altitude_km - self.mass_reference_altitude_km)
    }

    /// Altitude at which the molecular mass term vanishes, in km (2450 km by default).
    pub fn zero_mass_altitude_km(&self) -> f64 {
        self.mass_reference_altitude_km + self.base_molecular_mass / self.molecular_mass_gradient
    }

    /// Altitude past which the formula would yield an increasing density, in km (1312.5 km by default).
    ///
    /// The exponent is `-(h - h_rho) m(h) / T`, a downward parabola in `h` with roots at the density
    /// reference altitude and at the zero mass altitude, whose extremum does not depend on `T`.
    pub fn turning_altitude_km(&self) -> f64 {
        0.5 * (self.density_reference_altitude_km + self.zero_mass_altitude_km())
    }

    /// Scale height in km at the provided altitude, or None if the model is degenerate there.
    pub fn scale_height_km(&self, altitude_km: f64, weather: &EnvironmentInputs) -> Option<f64> {
        let temperature = self.temperature_k(weather);
        let mass = self.molecular_mass(altitude_km.min(self.turning_altitude_km()));
        if temperature > 0.0 && mass > 0.0 {
            Some(temperature / mass)
        } else {
            None
        }
    }
}

impl AtmosphericModel for ScaleHeightAtmosphere {
    fn density_kg_m3(&self, altitude_km: f64, weather: &EnvironmentInputs) -> f64 {
        let altitude_km = altitude_km.min(self.turning_altitude_km());
        match self.scale_height_km(altitude_km, weather) {
            Some(scale_height) => {
                let rho = self.reference_density_kg_m3
                    * (-(altitude_km - self.density_reference_altitude_km) / scale_height).exp();
                if rho.is_finite() {
                    rho
                } else {
                    0.0
                }
            }
            // A non-positive temperature means an infinitely thin atmosphere
            None => 0.0,
        }
    }
}

/// Density in kg/m^3 with the default scale height model, at the provided altitude in km.
pub fn density_kg_m3(altitude_km: f64, solar_radio_flux: f64, geomagnetic_a_index: f64) -> f64 {
    ScaleHeightAtmosphere::default().density_kg_m3(
        altitude_km,
        &EnvironmentInputs::new(solar_radio_flux, geomagnetic_a_index),
    )
}
