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

use super::{DecayOpts, DecayStatus, SimulationResult};
use crate::cosmic::OrbitalState;
use crate::dynamics::{AtmosphericModel, PeriodDecay};

/// Integrator state: running until a termination condition is met, and then terminated for good.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntegratorStatus {
    Running,
    Terminated(DecayStatus),
}

/// The DecayIntegrator advances a circular orbit by fixed steps of the decay of its period.
///
/// Each step computes the density at the current altitude, removes the period lost to drag over
/// the step, and re-derives the radius and the altitude from the new period. The termination test
/// runs after every step, and once on initialization such that an orbit starting below the Karman
/// line is immediately terminated.
///
/// The period lost in a single step is capped at the period of an orbit grazing the surface of the
/// Earth: a step which would remove more than that grounds the satellite and terminates the run as
/// reentered. Coarse steps on light satellites would otherwise drive the period negative, and the
/// squared period of Kepler's third law would send them back up.
#[derive(Clone, Debug)]
pub struct DecayIntegrator<A: AtmosphericModel> {
    /// The orbital state of this integrator
    pub state: OrbitalState,
    pub dynamics: PeriodDecay<A>,
    pub opts: DecayOpts,
    status: IntegratorStatus,
    steps: u64,
    initial_altitude_km: f64,
    // Cached from the options, this is the hot loop
    step_s: f64,
    karman_line_m: f64,
    surface_period_s: f64,
}

impl<A: AtmosphericModel> DecayIntegrator<A> {
    /// Initializes a new integrator on a circular orbit at the provided altitude, in km.
    pub fn new(dynamics: PeriodDecay<A>, opts: DecayOpts, initial_altitude_km: f64) -> Self {
        let mut me = Self {
            state: OrbitalState::from_altitude_km(initial_altitude_km),
            dynamics,
            opts,
            status: IntegratorStatus::Running,
            steps: 0,
            initial_altitude_km,
            step_s: opts.step.to_seconds(),
            karman_line_m: opts.karman_line_km * 1e3,
            surface_period_s: OrbitalState::surface_period_s(),
        };
        me.check_termination();
        me
    }

    pub fn status(&self) -> IntegratorStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == IntegratorStatus::Running
    }

    /// Number of steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Termination test on the current state, without changing the status of the integrator.
    /// Reentry takes precedence if both conditions are met on the same step.
    pub fn termination(&self) -> Option<DecayStatus> {
        if self.state.altitude_m < self.karman_line_m {
            Some(DecayStatus::Reentered)
        } else if self.state.elapsed >= self.opts.max_lifetime {
            Some(DecayStatus::ExceededMaxDuration)
        } else {
            None
        }
    }

    fn check_termination(&mut self) {
        if let Some(status) = self.termination() {
            self.status = IntegratorStatus::Terminated(status);
        }
    }

    /// Takes a single step, unless already terminated, and returns the status after this step.
    pub fn single_step(&mut self) -> IntegratorStatus {
        if let IntegratorStatus::Running = self.status {
            let delta_period = self.dynamics.period_decrement(&self.state, self.step_s);
            let period_s = self.state.orbital_period_s - delta_period;
            let grounded = period_s.is_nan() || period_s <= self.surface_period_s;

            self.state.set_period(if grounded {
                self.surface_period_s
            } else {
                period_s
            });
            self.state.elapsed += self.opts.step;
            self.steps += 1;

            if grounded {
                debug!(
                    "step of {} removed {delta_period:.3} s of period: grounded at {}",
                    self.opts.step, self.state.elapsed
                );
                self.status = IntegratorStatus::Terminated(DecayStatus::Reentered);
            } else {
                self.check_termination();
            }
        }
        self.status
    }

    /// Steps until termination and returns the result.
    pub fn run_to_termination(&mut self) -> SimulationResult {
        loop {
            if let IntegratorStatus::Terminated(status) = self.single_step() {
                return self.result_with(status);
            }
        }
    }

    /// The result of this run, available once terminated.
    pub fn result(&self) -> Option<SimulationResult> {
        match self.status {
            IntegratorStatus::Running => None,
            IntegratorStatus::Terminated(status) => Some(self.result_with(status)),
        }
    }

    pub(crate) fn result_with(&self, status: DecayStatus) -> SimulationResult {
        SimulationResult {
            initial_altitude_km: self.initial_altitude_km,
            elapsed: self.state.elapsed,
            terminal_altitude_m: self.state.altitude_m,
            terminal_period_s: self.state.orbital_period_s,
            steps: self.steps,
            status,
        }
    }
}
