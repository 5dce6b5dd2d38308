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
use snafu::{ensure, ResultExt};

use crate::cosmic::{EnvironmentInputs, OrbitalState, SatelliteParameters};
use crate::errors::{
    DecayError, MissionBeyondMaxLifetimeSnafu, NoRunsSnafu, NonPositiveIncrementSnafu,
    NonPositiveMissionTimeSnafu, TraceError, TraceSnafu,
};
use crate::propagators::{DecayOpts, DecaySimulation, SimulationResult, Sweep};
use crate::time::{Duration, Unit};

/// Damped direction-reversal search of the maximum tolerable space weather.
pub mod solver;
pub use solver::{
    ParameterSolver, SearchAttempt, SearchDirection, SearchState, SolveFor, SolverConfig,
    SolverSolution,
};

/// A sample of the decay trace, in the units used for display and persistence.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Index of the run in a sweep, zero otherwise
    pub run: usize,
    pub elapsed_days: f64,
    pub altitude_km: f64,
    pub orbital_period_minutes: f64,
}

impl TraceRecord {
    pub fn from_state(run: usize, state: &OrbitalState) -> Self {
        Self {
            run,
            elapsed_days: state.elapsed_days(),
            altitude_km: state.altitude_km(),
            orbital_period_minutes: state.orbital_period_min(),
        }
    }
}

/// A trace handler, which receives the samples of a simulation as they are computed.
///
/// The simulation only produces these records: formatting and storage are up to the handler.
pub trait TraceSink {
    fn handle(&mut self, record: &TraceRecord) -> Result<(), TraceError>;

    /// Called once all of the runs of a simulation are done.
    fn finish(&mut self) -> Result<(), TraceError> {
        Ok(())
    }
}

/// Collects the trace in memory.
impl TraceSink for Vec<TraceRecord> {
    fn handle(&mut self, record: &TraceRecord) -> Result<(), TraceError> {
        self.push(*record);
        Ok(())
    }
}

/// Checks the satellite, the step and the initial altitude.
pub fn validate_inputs(
    satellite: &SatelliteParameters,
    initial_altitude_km: f64,
    opts: &DecayOpts,
) -> Result<(), DecayError> {
    satellite.validate()?;
    opts.validate_initial_altitude(initial_altitude_km)
}

/// Checks the number of runs and the increment, and that the last run starts below the maximum altitude.
pub fn validate_sweep(
    sweep: &Sweep,
    initial_altitude_km: f64,
    opts: &DecayOpts,
) -> Result<(), DecayError> {
    ensure!(sweep.runs > 0, NoRunsSnafu);
    if sweep.runs > 1 {
        ensure!(
            sweep.increment_km > 0.0,
            NonPositiveIncrementSnafu {
                increment_km: sweep.increment_km
            }
        );
    }
    opts.validate_initial_altitude(sweep.last_altitude_km(initial_altitude_km))
}

/// Converts a mission time in days into the target duration of a solve, checking that it is reachable.
pub fn mission_target(target_mission_days: i64, opts: &DecayOpts) -> Result<Duration, DecayError> {
    ensure!(
        target_mission_days > 0,
        NonPositiveMissionTimeSnafu {
            days: target_mission_days
        }
    );
    let target = (target_mission_days as f64) * Unit::Day;
    ensure!(
        target <= opts.max_lifetime,
        MissionBeyondMaxLifetimeSnafu {
            days: target_mission_days,
            max_lifetime: opts.max_lifetime
        }
    );
    Ok(target)
}

/// Time until the satellite falls below the Karman line, from the provided altitude in km.
pub fn simulate_reentry(
    satellite: SatelliteParameters,
    environment: EnvironmentInputs,
    initial_altitude_km: f64,
    opts: DecayOpts,
) -> Result<SimulationResult, DecayError> {
    validate_inputs(&satellite, initial_altitude_km, &opts)?;
    Ok(DecaySimulation::new(satellite, environment, opts).run_silent(initial_altitude_km))
}

/// Same as `simulate_reentry` but publishes the trace to the provided sink.
pub fn simulate_reentry_with_trace<S: TraceSink + ?Sized>(
    satellite: SatelliteParameters,
    environment: EnvironmentInputs,
    initial_altitude_km: f64,
    opts: DecayOpts,
    sink: &mut S,
) -> Result<SimulationResult, DecayError> {
    validate_inputs(&satellite, initial_altitude_km, &opts)?;
    let rslt = DecaySimulation::new(satellite, environment, opts)
        .run_with_trace(initial_altitude_km, 0, sink)
        .context(TraceSnafu)?;
    sink.finish().context(TraceSnafu)?;
    Ok(rslt)
}

/// Runs `simulate_reentry` once per run of the sweep, run `i` starting at `initial_altitude_km + i * increment_km`.
pub fn sweep_reentry(
    satellite: SatelliteParameters,
    environment: EnvironmentInputs,
    initial_altitude_km: f64,
    sweep: Sweep,
    opts: DecayOpts,
    sink: Option<&mut dyn TraceSink>,
) -> Result<Vec<SimulationResult>, DecayError> {
    validate_inputs(&satellite, initial_altitude_km, &opts)?;
    validate_sweep(&sweep, initial_altitude_km, &opts)?;
    DecaySimulation::new(satellite, environment, opts)
        .sweep(initial_altitude_km, sweep, sink)
        .context(TraceSnafu)
}

/// Maximum average solar radio flux the satellite can endure while staying in orbit for the mission time.
/// The geomagnetic A index of the environment is held constant, its solar radio flux is ignored.
pub fn solve_max_flux(
    satellite: SatelliteParameters,
    environment: EnvironmentInputs,
    initial_altitude_km: f64,
    target_mission_days: i64,
    opts: DecayOpts,
) -> Result<SolverSolution, DecayError> {
    solve_max(
        SolveFor::SolarRadioFlux,
        satellite,
        environment,
        initial_altitude_km,
        target_mission_days,
        opts,
        SolverConfig::default(),
        |_| {},
    )
}

/// Maximum average geomagnetic A index the satellite can endure while staying in orbit for the mission time.
/// The solar radio flux of the environment is held constant, its geomagnetic A index is ignored.
pub fn solve_max_geomagnetic_index(
    satellite: SatelliteParameters,
    environment: EnvironmentInputs,
    initial_altitude_km: f64,
    target_mission_days: i64,
    opts: DecayOpts,
) -> Result<SolverSolution, DecayError> {
    solve_max(
        SolveFor::GeomagneticIndex,
        satellite,
        environment,
        initial_altitude_km,
        target_mission_days,
        opts,
        SolverConfig::default(),
        |_| {},
    )
}

/// Validates the inputs and solves for the requested parameter, calling `progress` after each attempt.
#[allow(clippy::too_many_arguments)]
pub fn solve_max<F: FnMut(&SearchAttempt)>(
    solve_for: SolveFor,
    satellite: SatelliteParameters,
    environment: EnvironmentInputs,
    initial_altitude_km: f64,
    target_mission_days: i64,
    opts: DecayOpts,
    config: SolverConfig,
    progress: F,
) -> Result<SolverSolution, DecayError> {
    validate_inputs(&satellite, initial_altitude_km, &opts)?;
    let target = mission_target(target_mission_days, &opts)?;

    let solver = ParameterSolver::new(
        DecaySimulation::new(satellite, environment, opts),
        initial_altitude_km,
        config,
    );

    Ok(solver.solve_with_progress(solve_for, target, progress))
}
