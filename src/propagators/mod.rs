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
use std::fmt;

mod integrator;
pub use integrator::*;
mod options;
pub use options::*;
mod simulation;
pub use simulation::*;

use crate::cosmic::DAYS_PER_YEAR;
use crate::time::{Duration, Unit};

/// How a simulation run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecayStatus {
    /// The altitude fell below the Karman line
    Reentered,
    /// The maximum modeled lifetime was reached before reentry. This is an expected outcome for
    /// high or very dense satellites, not a failure.
    ExceededMaxDuration,
}

impl fmt::Display for DecayStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Reentered => write!(f, "reentered"),
            Self::ExceededMaxDuration => write!(f, "exceeded maximum lifetime"),
        }
    }
}

/// The outcome of a single simulation run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationResult {
    /// Initial altitude of this run, in km
    pub initial_altitude_km: f64,
    /// Simulated time until termination
    pub elapsed: Duration,
    /// Altitude at termination, in meters
    pub terminal_altitude_m: f64,
    /// Orbital period at termination, in seconds
    pub terminal_period_s: f64,
    /// Number of integration steps taken
    pub steps: u64,
    pub status: DecayStatus,
}

impl SimulationResult {
    pub fn elapsed_s(&self) -> f64 {
        self.elapsed.to_seconds()
    }

    pub fn elapsed_days(&self) -> f64 {
        self.elapsed.to_unit(Unit::Day)
    }

    pub fn elapsed_years(&self) -> f64 {
        self.elapsed_days() / DAYS_PER_YEAR
    }

    pub fn terminal_altitude_km(&self) -> f64 {
        self.terminal_altitude_m / 1e3
    }

    pub fn reentered(&self) -> bool {
        self.status == DecayStatus::Reentered
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.status {
            DecayStatus::Reentered => write!(
                f,
                "re-entry from {} km after {:.3} days ({:.3} years)",
                self.initial_altitude_km,
                self.elapsed_days(),
                self.elapsed_years()
            ),
            DecayStatus::ExceededMaxDuration => write!(
                f,
                "still in orbit at {:.3} km after {:.3} days ({:.3} years) from {} km",
                self.terminal_altitude_km(),
                self.elapsed_days(),
                self.elapsed_years(),
                self.initial_altitude_km
            ),
        }
    }
}

/// Repeats a simulation from increasing initial altitudes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    /// Number of runs, at least one
    pub runs: usize,
    /// Initial altitude increase between two consecutive runs, in km
    pub increment_km: f64,
}

impl Sweep {
    pub fn new(runs: usize, increment_km: f64) -> Self {
        Self { runs, increment_km }
    }

    /// A single run, no sweep.
    pub fn single() -> Self {
        Self::new(1, 0.0)
    }

    /// Initial altitude of the run of the provided index, in km.
    pub fn altitude_km(&self, initial_altitude_km: f64, run: usize) -> f64 {
        initial_altitude_km + (run as f64) * self.increment_km
    }

    /// Initial altitude of the last run of this sweep, in km.
    pub fn last_altitude_km(&self, initial_altitude_km: f64) -> f64 {
        self.altitude_km(initial_altitude_km, self.runs.saturating_sub(1))
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self::single()
    }
}
