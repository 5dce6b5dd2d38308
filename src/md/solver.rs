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

use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::fmt;
use typed_builder::TypedBuilder;

use crate::cosmic::EnvironmentInputs;
use crate::dynamics::{AtmosphericModel, ScaleHeightAtmosphere};
use crate::io::{duration_from_str, duration_to_str};
use crate::propagators::{DecaySimulation, DecayStatus, SimulationResult};
use crate::time::{Duration, Unit};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Default initial estimate of the solar radio flux, in sfu.
pub const FLUX_SEED: f64 = 70.0;
/// Default initial estimate of the geomagnetic A index.
pub const GEOMAGNETIC_SEED: f64 = 10.0;
/// Default initial step of the estimate.
pub const INITIAL_STEP: f64 = 1.0;
/// Default maximum number of simulations of a single solve.
pub const MAX_ATTEMPTS: usize = 100;

/// The space weather parameter to solve for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Sequence)]
pub enum SolveFor {
    SolarRadioFlux,
    GeomagneticIndex,
}

impl SolveFor {
    /// Returns a copy of the environment with this parameter set to the provided value.
    pub fn apply(&self, environment: EnvironmentInputs, value: f64) -> EnvironmentInputs {
        match self {
            Self::SolarRadioFlux => environment.with_solar_radio_flux(value),
            Self::GeomagneticIndex => environment.with_geomagnetic_a_index(value),
        }
    }

    pub fn seed(&self, config: &SolverConfig) -> f64 {
        match self {
            Self::SolarRadioFlux => config.flux_seed,
            Self::GeomagneticIndex => config.geomagnetic_seed,
        }
    }
}

impl fmt::Display for SolveFor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::SolarRadioFlux => write!(f, "F10.7"),
            Self::GeomagneticIndex => write!(f, "Ap"),
        }
    }
}

/// Where the simulated lifetime of an attempt landed compared to the target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchDirection {
    /// Decayed before the target: too much drag, the estimate must decrease
    Undershoot,
    /// Stayed in orbit past the target: the estimate may increase
    Overshoot,
}

/// The state of a damped direction-reversal search.
///
/// The estimate moves by the step size after each attempt, and the step is halved every time the
/// direction reverses. There is no bracketing: this is a hill climb which assumes that the lifetime
/// is monotonic in the estimate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchState {
    pub estimate: f64,
    pub step_size: f64,
    pub last_direction: Option<SearchDirection>,
    pub attempt_count: usize,
}

impl SearchState {
    pub fn new(seed: f64, step_size: f64) -> Self {
        Self {
            estimate: seed,
            step_size,
            last_direction: None,
            attempt_count: 0,
        }
    }

    /// Moves the estimate according to the direction of the latest attempt.
    pub fn update(&mut self, direction: SearchDirection) {
        if self.last_direction.is_some_and(|last| last != direction) {
            self.step_size *= 0.5;
        }
        match direction {
            SearchDirection::Undershoot => self.estimate -= self.step_size,
            SearchDirection::Overshoot => self.estimate += self.step_size,
        }
        self.last_direction = Some(direction);
    }
}

/// SolverConfig stores the seeds, the damping and the stopping conditions of the solver.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
#[serde(default)]
pub struct SolverConfig {
    #[builder(default = FLUX_SEED)]
    pub flux_seed: f64,
    #[builder(default = GEOMAGNETIC_SEED)]
    pub geomagnetic_seed: f64,
    #[builder(default = INITIAL_STEP)]
    pub initial_step: f64,
    #[builder(default = MAX_ATTEMPTS)]
    pub max_attempts: usize,
    /// A lifetime within this duration of the target stops the search. Zero requires exact equality.
    #[builder(default_code = "Duration::ZERO")]
    #[serde(serialize_with = "duration_to_str", deserialize_with = "duration_from_str")]
    pub tolerance: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A single attempt of the search, as reported to the progress callback.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchAttempt {
    /// One-based attempt number
    pub attempt: usize,
    /// Value of the parameter used for this attempt
    pub estimate: f64,
    /// Step size that will be applied after this attempt (before any damping)
    pub step_size: f64,
    pub elapsed: Duration,
    pub status: DecayStatus,
    /// Simulated lifetime minus the target
    pub residual: Duration,
}

impl fmt::Display for SearchAttempt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "#{}: {:.9} -> {:.3} days (Δ = {:.3} days, step {:.3e})",
            self.attempt,
            self.estimate,
            self.elapsed.to_unit(Unit::Day),
            self.residual.to_unit(Unit::Day),
            self.step_size
        )
    }
}

/// Defines a solver solution
#[derive(Clone, Debug)]
pub struct SolverSolution {
    pub solve_for: SolveFor,
    /// The final estimate, i.e. the estimate after the last attempt's update, unless converged
    pub estimate: f64,
    /// The target lifetime
    pub target: Duration,
    /// Whether an attempt reached the target within the tolerance
    pub converged: bool,
    /// All of the attempts, in order
    pub attempts: Vec<SearchAttempt>,
    /// Computation duration
    pub computation_dur: Duration,
}

impl SolverSolution {
    pub fn iterations(&self) -> usize {
        self.attempts.len()
    }

    pub fn last_attempt(&self) -> Option<&SearchAttempt> {
        self.attempts.last()
    }

    /// The attempt whose lifetime was the closest to the target.
    pub fn best_attempt(&self) -> Option<&SearchAttempt> {
        self.attempts.iter().min_by_key(|a| a.residual.abs())
    }
}

impl fmt::Display for SolverSolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let status = if self.converged {
            "converged"
        } else {
            "did not converge"
        };
        write!(
            f,
            "Solver {} after {} iterations (computed in {})\n\tmax {} = {:.6} for a target of {:.3} days",
            status,
            self.iterations(),
            self.computation_dur,
            self.solve_for,
            self.estimate,
            self.target.to_unit(Unit::Day)
        )?;
        if let Some(last) = self.last_attempt() {
            write!(f, "\n\tlast attempt {last}")?;
        }
        Ok(())
    }
}

/// The ParameterSolver finds the space weather parameter for which the simulated lifetime matches a target.
///
/// Each attempt runs the silent simulation with the current estimate. If the satellite decayed
/// before the target, the estimate decreases by the step, otherwise it increases. The step is
/// halved on every direction reversal. The search stops when an attempt matches the target, or
/// after the maximum number of attempts, whichever comes first. The estimate is returned in both
/// cases: callers should check the residual to judge its quality.
#[derive(Clone, Debug)]
pub struct ParameterSolver<A: AtmosphericModel = ScaleHeightAtmosphere> {
    /// Simulation of the satellite, whose environment holds the fixed parameter
    pub simulation: DecaySimulation<A>,
    pub initial_altitude_km: f64,
    pub config: SolverConfig,
}

impl<A: AtmosphericModel> ParameterSolver<A> {
    pub fn new(simulation: DecaySimulation<A>, initial_altitude_km: f64, config: SolverConfig) -> Self {
        Self {
            simulation,
            initial_altitude_km,
            config,
        }
    }

    /// Runs the silent simulation with the parameter set to the provided value.
    pub fn evaluate(&self, solve_for: SolveFor, value: f64) -> SimulationResult {
        self.simulation
            .with_weather(solve_for.apply(self.simulation.weather, value))
            .run_silent(self.initial_altitude_km)
    }

    /// Simulated lifetime with the parameter set to the provided value, minus the target.
    pub fn residual(&self, solve_for: SolveFor, value: f64, target: Duration) -> Duration {
        self.evaluate(solve_for, value).elapsed - target
    }

    pub fn solve(&self, solve_for: SolveFor, target: Duration) -> SolverSolution {
        self.solve_with_progress(solve_for, target, |_| {})
    }

    /// Solves for the provided parameter, calling `progress` after each attempt.
    pub fn solve_with_progress<F: FnMut(&SearchAttempt)>(
        &self,
        solve_for: SolveFor,
        target: Duration,
        mut progress: F,
    ) -> SolverSolution {
        #[cfg(not(target_arch = "wasm32"))]
        let tick = Instant::now();

        let mut search = SearchState::new(solve_for.seed(&self.config), self.config.initial_step);
        let mut attempts = Vec::with_capacity(self.config.max_attempts);
        let mut converged = false;

        info!(
            "Solving for the max {solve_for} with a lifetime of {target} from {} km ({})",
            self.initial_altitude_km, self.simulation.satellite
        );

        while search.attempt_count < self.config.max_attempts {
            search.attempt_count += 1;

            let rslt = self.evaluate(solve_for, search.estimate);
            let residual = rslt.elapsed - target;

            let attempt = SearchAttempt {
                attempt: search.attempt_count,
                estimate: search.estimate,
                step_size: search.step_size,
                elapsed: rslt.elapsed,
                status: rslt.status,
                residual,
            };
            debug!("{solve_for} {attempt}");
            progress(&attempt);
            attempts.push(attempt);

            if residual.abs() <= self.config.tolerance {
                converged = true;
                break;
            } else if residual < Duration::ZERO {
                search.update(SearchDirection::Undershoot);
            } else {
                search.update(SearchDirection::Overshoot);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        let computation_dur: Duration = tick.elapsed().into();
        #[cfg(target_arch = "wasm32")]
        let computation_dur = Duration::ZERO;

        let sol = SolverSolution {
            solve_for,
            estimate: search.estimate,
            target,
            converged,
            attempts,
            computation_dur,
        };

        if converged {
            info!("{sol}");
        } else {
            warn!("{sol}");
        }

        sol
    }
}
