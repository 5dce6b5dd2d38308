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

use std::f64::consts::PI;

use super::AtmosphericModel;
use crate::cosmic::{EnvironmentInputs, OrbitalState, SatelliteParameters};

/// `PeriodDecay` implements the secular decay of the period of a circular orbit due to drag,
/// dP/dt = -3 pi (A/m) a rho, where A already includes the drag coefficient.
///
/// **WARNING:** This model assumes a circular orbit in an atmosphere co-rotating with neither the
/// Earth nor the spacecraft. **Do not** use it for anything beyond lifetime estimates.
#[derive(Copy, Clone, Debug)]
pub struct PeriodDecay<A: AtmosphericModel> {
    pub atmosphere: A,
    pub satellite: SatelliteParameters,
    pub weather: EnvironmentInputs,
}

impl<A: AtmosphericModel> PeriodDecay<A> {
    pub fn new(atmosphere: A, satellite: SatelliteParameters, weather: EnvironmentInputs) -> Self {
        Self {
            atmosphere,
            satellite,
            weather,
        }
    }

    /// Atmospheric density at the altitude of the provided state, in kg/m^3
    pub fn density_kg_m3(&self, state: &OrbitalState) -> f64 {
        self.atmosphere
            .density_kg_m3(state.altitude_km(), &self.weather)
    }

    /// Magnitude of the period rate of change, in seconds per second. Never negative.
    pub fn period_rate(&self, state: &OrbitalState) -> f64 {
        3.0 * PI * self.satellite.area_to_mass() * state.orbital_radius_m * self.density_kg_m3(state)
    }

    /// Period lost over a step of the provided duration in seconds.
    pub fn period_decrement(&self, state: &OrbitalState, step_s: f64) -> f64 {
        self.period_rate(state) * step_s
    }
}
