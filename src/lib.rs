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

/*! # nyx-decay

Orbital lifetime estimation of small satellites in low Earth orbit.

The orbital period of a circular orbit is decayed step by step by atmospheric drag, where the
density follows a scale height approximation driven by the average solar radio flux (F10.7) and
the average geomagnetic A index. The simulation stops once the satellite falls below the Karman
line, or after fifty years of simulated time.

Inverting that prediction, the [md::ParameterSolver] finds the maximum average solar radio flux
(or geomagnetic A index) that a satellite can endure while still meeting a desired mission
duration.

```no_run
use nyx_decay::cosmic::{EnvironmentInputs, SatelliteParameters};
use nyx_decay::md::simulate_reentry;
use nyx_decay::propagators::DecayOpts;

let cubesat = SatelliteParameters::new(3.0, 0.03);
let weather = EnvironmentInputs::new(70.0, 10.0);

let rslt = simulate_reentry(cubesat, weather, 465.0, DecayOpts::default()).unwrap();
println!("{rslt}");
```
*/

/// Earth constants, satellite and space weather parameters, and the orbital state.
pub mod cosmic;

/// Atmospheric density models and the drag induced period decay.
pub mod dynamics;

/// Fixed step decay integrator and the simulation driver.
pub mod propagators;

/// Mission design: trace handlers, the space weather parameter solver, and the validated entry points.
pub mod md;

/// All the input/output needs of this library: YAML scenarios and CSV traces.
pub mod io;

mod errors;
/// Functions which may fail will return an error, the library never panics on invalid input.
pub use self::errors::{ConfigError, DecayError, TraceError};

#[macro_use]
extern crate log;
extern crate hifitime;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export some useful things
pub use self::cosmic::{EnvironmentInputs, OrbitalState, SatelliteParameters};
pub use self::propagators::{DecayOpts, DecayStatus, SimulationResult};
