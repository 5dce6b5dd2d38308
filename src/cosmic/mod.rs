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

mod satellite;
pub use satellite::{EnvironmentInputs, SatelliteParameters};

mod state;
pub use state::OrbitalState;

/// Mean equatorial radius of the Earth, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_000.0;
/// Mass of the Earth, in kilograms.
pub const EARTH_MASS_KG: f64 = 5.98e24;
/// Newtonian constant of gravitation, in m^3 kg^-1 s^-2.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67e-11;
/// Gravitational parameter of the Earth, consistent with the mass and constant above, in m^3/s^2.
pub const EARTH_GM: f64 = GRAVITATIONAL_CONSTANT * EARTH_MASS_KG;

/// Days per (Julian) year, only used for display.
pub const DAYS_PER_YEAR: f64 = 365.25;
