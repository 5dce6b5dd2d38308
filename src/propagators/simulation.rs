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

use super::{DecayIntegrator, DecayOpts, DecayStatus, IntegratorStatus, SimulationResult, Sweep};
use crate::cosmic::{EnvironmentInputs, SatelliteParameters};
use crate::dynamics::{AtmosphericModel, PeriodDecay, ScaleHeightAtmosphere};
use crate::errors::TraceError;
use crate::md::{TraceRecord, TraceSink};
use crate::time::Duration;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// A DecaySimulation drives the decay integrator of a given satellite under constant space weather,
/// from an initial altitude until reentry or until the maximum lifetime.
///
/// This structure does not validate its inputs: use the functions of the `md` module for that.
#[derive(Clone, Debug)]
pub struct DecaySimulation<A: AtmosphericModel = ScaleHeightAtmosphere> {
    pub satellite: SatelliteParameters,
    pub weather: EnvironmentInputs,
    pub atmosphere: A,
    pub opts: DecayOpts,
}

impl DecaySimulation<ScaleHeightAtmosphere> {
    /// Initializes a new simulation with the default scale height atmosphere.
    pub fn new(satellite: SatelliteParameters, weather: EnvironmentInputs, opts: DecayOpts) -> Self {
        Self::with_atmosphere(ScaleHeightAtmosphere::default(), satellite, weather, opts)
    }
}

impl<A: AtmosphericModel> DecaySimulation<A> {
    pub fn with_atmosphere(
        atmosphere: A,
        satellite: SatelliteParameters,
        weather: EnvironmentInputs,
        opts: DecayOpts,
    ) -> Self {
        Self {
            satellite,
            weather,
            atmosphere,
            opts,
        }
    }

    /// Returns a copy of this simulation under different space weather.
    pub fn with_weather(&self, weather: EnvironmentInputs) -> Self {
        let mut me = self.clone();
        me.weather = weather;
        me
    }

    /// Builds a fresh integrator starting at the provided altitude, in km.
    pub fn integrator(&self, initial_altitude_km: f64) -> DecayIntegrator<A> {
        DecayIntegrator::new(
            PeriodDecay::new(self.atmosphere.clone(), self.satellite, self.weather),
            self.opts,
            initial_altitude_km,
        )
    }

    /// Runs a single simulation from the provided altitude without any trace or logging.
    pub fn run_silent(&self, initial_altitude_km: f64) -> SimulationResult {
        self.integrator(initial_altitude_km).run_to_termination()
    }

    /// Runs a single simulation and publishes the trace to the provided sink.
    ///
    /// Samples are published at the start of the run, every `report_cadence` of simulated time
    /// (whatever the step size), and once more at termination.
    pub fn run_with_trace<S: TraceSink + ?Sized>(
        &self,
        initial_altitude_km: f64,
        run: usize,
        sink: &mut S,
    ) -> Result<SimulationResult, TraceError> {
        let mut integrator = self.integrator(initial_altitude_km);

        let cadence = if self.opts.report_cadence > Duration::ZERO {
            self.opts.report_cadence
        } else {
            self.opts.step
        };

        let mut last_reported = integrator.state.elapsed;
        self.publish(run, &integrator, sink)?;
        let mut next_report = last_reported + cadence;

        loop {
            match integrator.single_step() {
                IntegratorStatus::Running => {
                    let elapsed = integrator.state.elapsed;
                    if elapsed >= next_report {
                        self.publish(run, &integrator, sink)?;
                        last_reported = elapsed;
                        while next_report <= elapsed {
                            next_report += cadence;
                        }
                    }
                }
                IntegratorStatus::Terminated(status) => {
                    if integrator.state.elapsed != last_reported {
                        self.publish(run, &integrator, sink)?;
                    }
                    return Ok(integrator.result_with(status));
                }
            }
        }
    }

    fn publish<S: TraceSink + ?Sized>(
        &self,
        run: usize,
        integrator: &DecayIntegrator<A>,
        sink: &mut S,
    ) -> Result<(), TraceError> {
        trace!("run #{run} {}", integrator.state);
        sink.handle(&TraceRecord::from_state(run, &integrator.state))
    }

    /// Runs the whole simulation once per run of the sweep, each from a higher initial altitude,
    /// with all of the state reset in between. Returns one result per run, in order.
    pub fn sweep(
        &self,
        initial_altitude_km: f64,
        sweep: Sweep,
        mut sink: Option<&mut dyn TraceSink>,
    ) -> Result<Vec<SimulationResult>, TraceError> {
        #[cfg(not(target_arch = "wasm32"))]
        let tick = Instant::now();

        if sweep.runs > 1 {
            info!(
                "Sweeping {} runs from {} km by {} km for {} ({})",
                sweep.runs, initial_altitude_km, sweep.increment_km, self.satellite, self.weather
            );
        }

        let mut rslts = Vec::with_capacity(sweep.runs);
        for run in 0..sweep.runs {
            let altitude_km = sweep.altitude_km(initial_altitude_km, run);
            debug!("run #{run} starting at {altitude_km} km");

            let rslt = match sink.as_deref_mut() {
                Some(sink) => self.run_with_trace(altitude_km, run, sink)?,
                None => self.run_silent(altitude_km),
            };

            match rslt.status {
                DecayStatus::Reentered => info!("run #{run}: {rslt}"),
                DecayStatus::ExceededMaxDuration => warn!("run #{run}: {rslt}"),
            }
            rslts.push(rslt);
        }

        if let Some(sink) = sink {
            sink.finish()?;
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let tock: Duration = tick.elapsed().into();
            debug!("Sweep of {} run(s) done in {}", sweep.runs, tock);
        }

        Ok(rslts)
    }
}
