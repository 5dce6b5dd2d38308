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

use std::fmt;

use crate::cosmic::EnvironmentInputs;

/// Scale height atmospheric density model driven by the solar radio flux and the geomagnetic A index.
pub mod atmosphere;
pub use atmosphere::ScaleHeightAtmosphere;

/// Drag induced decay of the orbital period.
pub mod drag;
pub use drag::PeriodDecay;

/// An atmospheric density model.
///
/// Implementations must be total over the altitudes a satellite may reach between the Karman line
/// and the maximum orbit altitude, and must never return a negative or non-finite density.
pub trait AtmosphericModel: Clone + fmt::Debug {
    /// Returns the density in kg/m^3 at the provided altitude in kilometers, under the provided space weather.
    fn density_kg_m3(&self, altitude_km: f64, weather: &EnvironmentInputs) -> f64;
}
