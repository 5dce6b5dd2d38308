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

use snafu::prelude::*;
use std::io;

use crate::time::Duration;

/// Errors raised at the boundary of the library, before any simulation runs.
///
/// The integrator and the solver assume sanitized inputs, so these are the only checks performed.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DecayError {
    #[snafu(display("satellite mass must be strictly positive, got {mass_kg} kg"))]
    NonPositiveMass { mass_kg: f64 },
    #[snafu(display("effective windward area must be strictly positive, got {area_m2} m^2"))]
    NonPositiveArea { area_m2: f64 },
    #[snafu(display("initial altitude must not be negative, got {altitude_km} km"))]
    NegativeAltitude { altitude_km: f64 },
    #[snafu(display(
        "initial altitude of {altitude_km} km exceeds the maximum orbit altitude of {max_altitude_km} km"
    ))]
    AltitudeAboveMaximum {
        altitude_km: f64,
        max_altitude_km: f64,
    },
    #[snafu(display("sweep requires at least one run"))]
    NoRuns,
    #[snafu(display("sweep altitude increment must be strictly positive, got {increment_km} km"))]
    NonPositiveIncrement { increment_km: f64 },
    #[snafu(display("mission time must be at least one day, got {days} days"))]
    NonPositiveMissionTime { days: i64 },
    #[snafu(display(
        "mission time of {days} days is beyond the maximum modeled lifetime of {max_lifetime}"
    ))]
    MissionBeyondMaxLifetime { days: i64, max_lifetime: Duration },
    #[snafu(display("integration step must be strictly positive, got {step}"))]
    NonPositiveStep { step: Duration },
    #[snafu(display("trace sink failed: {source}"))]
    Trace { source: TraceError },
}

/// Errors of the trace handlers.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TraceError {
    #[snafu(display("could not write CSV trace: {source}"))]
    CsvError { source: csv::Error },
    #[snafu(display("could not flush trace: {source}"))]
    FlushError { source: io::Error },
}

/// Errors of the YAML configuration loaders.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to read configuration file: {source}"))]
    ReadError { source: io::Error },
    #[snafu(display("failed to parse YAML configuration file: {source}"))]
    ParseError { source: serde_yaml::Error },
    #[snafu(display("invalid configuration: {msg}"))]
    InvalidConfig { msg: String },
}

impl PartialEq for ConfigError {
    /// No two configuration errors match
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

impl PartialEq for DecayError {
    /// Errors are equal if they are the same kind of error, regardless of their payload
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}
