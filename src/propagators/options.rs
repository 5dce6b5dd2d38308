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

use serde::{Deserialize, Serialize};
use snafu::ensure;
use typed_builder::TypedBuilder;

use crate::errors::{AltitudeAboveMaximumSnafu, DecayError, NegativeAltitudeSnafu, NonPositiveStepSnafu};
use crate::io::{duration_from_str, duration_to_str};
use crate::time::{Duration, Unit};

/// Default integration step, in seconds.
///
/// The integrator is an explicit Euler scheme on the orbital period, so the step directly sets the
/// truncation error: shorter steps are more accurate and proportionally slower.
pub const DEFAULT_STEP_S: f64 = 60.0;
/// Altitude below which the satellite is considered to have reentered, in km.
pub const KARMAN_LINE_KM: f64 = 100.0;
/// Maximum modeled lifetime, in seconds (about 50 years). This is a safety cap, not a physical limit.
pub const MAX_LIFETIME_S: f64 = 1.577e9;
/// Default cadence of the trace samples, in days of simulated time.
pub const REPORT_CADENCE_DAYS: f64 = 7.0;
/// Maximum initial altitude of a simulation, in km. The circular orbit relations of this model are
/// not meaningful above it.
pub const MAX_ORBIT_ALTITUDE_KM: f64 = 5877.5;

/// DecayOpts stores the options of the decay integrator and of the simulation driver.
///
/// All options have a default, so only the ones that differ need to be provided to the builder:
/// ```
/// use nyx_decay::propagators::DecayOpts;
/// use nyx_decay::time::Unit;
///
/// let opts = DecayOpts::builder().step(10.0 * Unit::Minute).build();
/// assert_eq!(opts.karman_line_km, 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
#[serde(default)]
pub struct DecayOpts {
    /// Fixed integration step
    #[builder(default_code = "DEFAULT_STEP_S * Unit::Second")]
    #[serde(serialize_with = "duration_to_str", deserialize_with = "duration_from_str")]
    pub step: Duration,
    /// Reentry altitude, in km
    #[builder(default = KARMAN_LINE_KM)]
    pub karman_line_km: f64,
    /// Maximum simulated duration of a single run
    #[builder(default_code = "MAX_LIFETIME_S * Unit::Second")]
    #[serde(serialize_with = "duration_to_str", deserialize_with = "duration_from_str")]
    pub max_lifetime: Duration,
    /// Simulated time between two trace samples, independent of the step
    #[builder(default_code = "REPORT_CADENCE_DAYS * Unit::Day")]
    #[serde(serialize_with = "duration_to_str", deserialize_with = "duration_from_str")]
    pub report_cadence: Duration,
    /// Maximum initial altitude accepted at the boundary, in km
    #[builder(default = MAX_ORBIT_ALTITUDE_KM)]
    pub max_altitude_km: f64,
}

impl Default for DecayOpts {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DecayOpts {
    /// Default options with the provided fixed step.
    pub fn with_fixed_step(step: Duration) -> Self {
        Self::builder().step(step).build()
    }

    pub fn with_fixed_step_s(step: f64) -> Self {
        Self::with_fixed_step(step * Unit::Second)
    }

    /// Upper bound on the number of steps of a single run.
    pub fn max_steps(&self) -> u64 {
        (self.max_lifetime.to_seconds() / self.step.to_seconds()).ceil() as u64
    }

    /// Checks that the step is positive and that the initial altitude is within the modeled range.
    pub fn validate_initial_altitude(&self, altitude_km: f64) -> Result<(), DecayError> {
        ensure!(
            self.step.to_seconds() > 0.0,
            NonPositiveStepSnafu { step: self.step }
        );
        ensure!(altitude_km >= 0.0, NegativeAltitudeSnafu { altitude_km });
        ensure!(
            altitude_km <= self.max_altitude_km,
            AltitudeAboveMaximumSnafu {
                altitude_km,
                max_altitude_km: self.max_altitude_km
            }
        );
        Ok(())
    }

    /// Returns a string with the information about these options
    pub fn info(&self) -> String {
        format!("{self}")
    }
}

impl fmt::Display for DecayOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fixed step: {}, karman line: {} km, max lifetime: {}, trace every {}",
            self.step, self.karman_line_km, self.max_lifetime, self.report_cadence
        )
    }
}

#[cfg(test)]
mod ut_opts {
    use super::*;

    #[test]
    fn defaults() {
        let opts = DecayOpts::default();
        assert_eq!(opts.step, 60.0 * Unit::Second);
        assert_eq!(opts.report_cadence, 7.0 * Unit::Day);
        assert_eq!(opts.max_altitude_km, 5877.5);
        assert_eq!(opts.max_steps(), 26_283_334);
        println!("{}", opts.info());
    }

    #[test]
    fn initial_altitude_bounds() {
        let opts = DecayOpts::default();
        assert!(opts.validate_initial_altitude(465.0).is_ok());
        assert!(opts.validate_initial_altitude(5877.5).is_ok());
        assert!(matches!(
            opts.validate_initial_altitude(5877.6),
            Err(DecayError::AltitudeAboveMaximum { .. })
        ));
        assert!(matches!(
            opts.validate_initial_altitude(-1.0),
            Err(DecayError::NegativeAltitude { .. })
        ));
        assert!(matches!(
            DecayOpts::with_fixed_step_s(0.0).validate_initial_altitude(465.0),
            Err(DecayError::NonPositiveStep { .. })
        ));
    }
}
