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
use std::fmt;

use super::{EARTH_GM, EARTH_RADIUS_M};
use crate::time::{Duration, Unit};

/// The state of a circular orbit being decayed by drag.
///
/// The period is the integrated quantity: the radius and altitude are always derived from it
/// through Kepler's third law.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrbitalState {
    /// Altitude above the mean equatorial radius, in meters
    pub altitude_m: f64,
    /// Distance from the center of the Earth, in meters
    pub orbital_radius_m: f64,
    /// Orbital period, in seconds
    pub orbital_period_s: f64,
    /// Simulated time since the start of the run
    pub elapsed: Duration,
}

impl OrbitalState {
    /// Builds the initial circular orbit state at the provided altitude, in kilometers.
    pub fn from_altitude_km(altitude_km: f64) -> Self {
        let orbital_radius_m = EARTH_RADIUS_M + altitude_km * 1e3;
        Self {
            altitude_m: altitude_km * 1e3,
            orbital_radius_m,
            orbital_period_s: Self::period_from_radius(orbital_radius_m),
            elapsed: Duration::ZERO,
        }
    }

    /// Period of a circular orbit of the provided radius, in seconds.
    pub fn period_from_radius(radius_m: f64) -> f64 {
        2.0 * PI * (radius_m.powi(3) / EARTH_GM).sqrt()
    }

    /// Radius of a circular orbit of the provided period, in meters. Zero for a non-positive period.
    pub fn radius_from_period(period_s: f64) -> f64 {
        if period_s > 0.0 {
            (EARTH_GM * period_s.powi(2) / (4.0 * PI * PI)).cbrt()
        } else {
            0.0
        }
    }

    /// Period of a circular orbit at zero altitude, in seconds.
    pub fn surface_period_s() -> f64 {
        Self::period_from_radius(EARTH_RADIUS_M)
    }

    /// Sets the period and re-derives the radius and the altitude from it.
    pub fn set_period(&mut self, orbital_period_s: f64) {
        self.orbital_period_s = orbital_period_s;
        self.orbital_radius_m = Self::radius_from_period(orbital_period_s);
        self.altitude_m = self.orbital_radius_m - EARTH_RADIUS_M;
    }

    pub fn altitude_km(&self) -> f64 {
        self.altitude_m / 1e3
    }

    pub fn orbital_period_min(&self) -> f64 {
        self.orbital_period_s / 60.0
    }

    pub fn elapsed_days(&self) -> f64 {
        self.elapsed.to_unit(Unit::Day)
    }
}

impl fmt::Display for OrbitalState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{:.3} days] altitude = {:.3} km\tperiod = {:.3} min",
            self.elapsed_days(),
            self.altitude_km(),
            self.orbital_period_min()
        )
    }
}
