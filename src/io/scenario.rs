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

use super::{ConfigError, ConfigRepr};
use crate::cosmic::{EnvironmentInputs, SatelliteParameters};
use crate::errors::DecayError;
use crate::md::{
    mission_target, solve_max, sweep_reentry, validate_inputs, validate_sweep, SearchAttempt,
    SolveFor, SolverConfig, SolverSolution, TraceSink,
};
use crate::propagators::{DecayOpts, SimulationResult, Sweep};

/// A decay scenario, as loaded from YAML.
///
/// Without a mission time, the scenario computes the time to reentry from each altitude of the
/// sweep. With one, it solves for the maximum tolerable space weather parameter instead.
///
/// ```yaml
/// name: 3U cubesat
/// satellite:
///   mass_kg: 3.0
///   effective_area_m2: 0.03
/// environment:
///   solar_radio_flux: 70.0
///   geomagnetic_a_index: 10.0
/// initial_altitude_km: 465.0
/// sweep:
///   runs: 3
///   increment_km: 25.0
/// opts:
///   step: 1 min
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecayScenario {
    #[serde(default)]
    pub name: Option<String>,
    pub satellite: SatelliteParameters,
    pub environment: EnvironmentInputs,
    pub initial_altitude_km: f64,
    #[serde(default)]
    pub sweep: Option<Sweep>,
    /// Target mission time, in days
    #[serde(default)]
    pub mission_days: Option<i64>,
    /// Parameter to solve for when a mission time is set, defaults to the solar radio flux
    #[serde(default)]
    pub solve_for: Option<SolveFor>,
    #[serde(default)]
    pub opts: DecayOpts,
    #[serde(default)]
    pub solver: SolverConfig,
}

impl ConfigRepr for DecayScenario {}

/// What running a scenario produced.
#[derive(Clone, Debug)]
pub enum ScenarioOutcome {
    Reentry(Vec<SimulationResult>),
    Solved(SolverSolution),
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Reentry(rslts) => {
                for (run, rslt) in rslts.iter().enumerate() {
                    if run > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "run #{run}: {rslt}")?;
                }
                Ok(())
            }
            Self::Solved(sol) => write!(f, "{sol}"),
        }
    }
}

impl DecayScenario {
    pub fn sweep(&self) -> Sweep {
        self.sweep.unwrap_or_default()
    }

    pub fn solve_for(&self) -> SolveFor {
        self.solve_for.unwrap_or(SolveFor::SolarRadioFlux)
    }

    /// Checks all of the inputs of this scenario before running anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = || -> Result<(), DecayError> {
            validate_inputs(&self.satellite, self.initial_altitude_km, &self.opts)?;
            validate_sweep(&self.sweep(), self.initial_altitude_km, &self.opts)?;
            if let Some(days) = self.mission_days {
                mission_target(days, &self.opts)?;
            }
            Ok(())
        };

        check().map_err(|e| ConfigError::InvalidConfig {
            msg: format!("{}: {e}", self.label()),
        })
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("scenario")
    }

    /// Runs this scenario. The trace sink is only used for reentry scenarios, and the progress
    /// callback only for solver scenarios.
    pub fn run<F: FnMut(&SearchAttempt)>(
        &self,
        sink: Option<&mut dyn TraceSink>,
        progress: F,
    ) -> Result<ScenarioOutcome, DecayError> {
        info!("Running {}", self.label());
        match self.mission_days {
            Some(days) => solve_max(
                self.solve_for(),
                self.satellite,
                self.environment,
                self.initial_altitude_km,
                days,
                self.opts,
                self.solver,
                progress,
            )
            .map(ScenarioOutcome::Solved),
            None => sweep_reentry(
                self.satellite,
                self.environment,
                self.initial_altitude_km,
                self.sweep(),
                self.opts,
                sink,
            )
            .map(ScenarioOutcome::Reentry),
        }
    }
}
