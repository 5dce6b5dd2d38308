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

extern crate clap;
extern crate dialoguer;
extern crate indicatif;
extern crate log;
extern crate nyx_decay as decay;
extern crate pretty_env_logger;

use clap::{Args, Parser, Subcommand};
use decay::cosmic::{EnvironmentInputs, SatelliteParameters};
use decay::io::{ConfigRepr, CsvTraceWriter, DecayScenario, ScenarioOutcome};
use decay::md::{
    simulate_reentry_with_trace, solve_max, sweep_reentry, SearchAttempt, SolveFor, SolverConfig,
    SolverSolution, TraceRecord, TraceSink,
};
use decay::propagators::{DecayOpts, SimulationResult, Sweep};
use decay::{ConfigError, DecayError, TraceError};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use enum_iterator::{all, Sequence};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use snafu::prelude::*;
use std::env::{set_var, var};
use std::fmt;
use std::path::{Path, PathBuf};

const LOG_VAR: &str = "DECAY_LOG";

#[derive(Debug, Snafu)]
enum CliError {
    #[snafu(display("{source}"))]
    Decay { source: DecayError },
    #[snafu(display("{source}"))]
    Config { source: ConfigError },
    #[snafu(display("{source}"))]
    Trace { source: TraceError },
    #[snafu(display("prompt failed: {source}"))]
    Prompt { source: dialoguer::Error },
}

/// Orbital lifetime of small satellites under atmospheric drag.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// Also save the decay trace to this CSV file
    #[arg(long, global = true)]
    csv: Option<PathBuf>,
    /// Integration step, in seconds
    #[arg(long, global = true)]
    step_s: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Time to reentry, optionally from several initial altitudes
    Reentry {
        #[command(flatten)]
        satellite: SatelliteArgs,
        /// Average solar radio flux (F10.7), in sfu
        #[arg(long)]
        flux: f64,
        /// Average geomagnetic A index
        #[arg(long)]
        ap: f64,
        /// Initial altitude, in km
        #[arg(long)]
        altitude: f64,
        #[arg(long, default_value_t = 1)]
        runs: usize,
        /// Altitude increment between runs, in km
        #[arg(long, default_value_t = 0.0)]
        increment: f64,
    },
    /// Maximum average solar radio flux for a mission time
    MaxFlux {
        #[command(flatten)]
        satellite: SatelliteArgs,
        /// Average geomagnetic A index
        #[arg(long)]
        ap: f64,
        /// Initial altitude, in km
        #[arg(long)]
        altitude: f64,
        /// Mission time, in days
        #[arg(long)]
        days: i64,
    },
    /// Maximum average geomagnetic A index for a mission time
    MaxGeo {
        #[command(flatten)]
        satellite: SatelliteArgs,
        /// Average solar radio flux (F10.7), in sfu
        #[arg(long)]
        flux: f64,
        /// Initial altitude, in km
        #[arg(long)]
        altitude: f64,
        /// Mission time, in days
        #[arg(long)]
        days: i64,
    },
    /// Runs all of the scenarios of a YAML file
    Scenario { path: PathBuf },
    /// Interactive menu (default)
    Interactive,
}

#[derive(Args, Debug)]
struct SatelliteArgs {
    /// Satellite mass, in kg
    #[arg(long)]
    mass: f64,
    /// Effective windward area (area times drag coefficient), in m^2
    #[arg(long)]
    area: f64,
}

impl From<&SatelliteArgs> for SatelliteParameters {
    fn from(args: &SatelliteArgs) -> Self {
        SatelliteParameters::new(args.mass, args.area)
    }
}

/// Prints the trace to the console, one line per sample.
#[derive(Default)]
struct ConsoleTrace {
    current_run: Option<usize>,
}

impl TraceSink for ConsoleTrace {
    fn handle(&mut self, record: &TraceRecord) -> Result<(), TraceError> {
        if self.current_run != Some(record.run) {
            println!("\nTIME (days)\tHEIGHT (km)\tPERIOD (minutes)");
            self.current_run = Some(record.run);
        }
        println!(
            "{:.2}\t\t{:.2}\t\t{:.2}",
            record.elapsed_days, record.altitude_km, record.orbital_period_minutes
        );
        Ok(())
    }
}

/// Forwards the trace to the console and optionally to a CSV file.
struct Sinks {
    console: ConsoleTrace,
    csv: Option<CsvTraceWriter<std::fs::File>>,
}

impl Sinks {
    fn new(csv: &Option<PathBuf>) -> Result<Self, CliError> {
        let csv = match csv {
            Some(path) => Some(CsvTraceWriter::from_path(path).context(TraceSnafu)?),
            None => None,
        };
        Ok(Self {
            console: ConsoleTrace::default(),
            csv,
        })
    }
}

impl TraceSink for Sinks {
    fn handle(&mut self, record: &TraceRecord) -> Result<(), TraceError> {
        self.console.handle(record)?;
        if let Some(csv) = self.csv.as_mut() {
            csv.handle(record)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), TraceError> {
        if let Some(csv) = self.csv.as_mut() {
            csv.finish()?;
        }
        Ok(())
    }
}

fn progress_bar(solve_for: SolveFor, config: &SolverConfig) -> ProgressBar {
    let pb = ProgressBar::new(config.max_attempts as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:60.cyan/blue} {pos:>4}/{len:4} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message(format!("max {solve_for}"));
    pb
}

fn solve_with_bar(
    solve_for: SolveFor,
    satellite: SatelliteParameters,
    environment: EnvironmentInputs,
    altitude_km: f64,
    days: i64,
    opts: DecayOpts,
) -> Result<SolverSolution, CliError> {
    let config = SolverConfig::default();
    let pb = progress_bar(solve_for, &config);
    let sol = solve_max(
        solve_for,
        satellite,
        environment,
        altitude_km,
        days,
        opts,
        config,
        |attempt: &SearchAttempt| {
            pb.set_message(format!("{solve_for} = {:.6}", attempt.estimate));
            pb.inc(1);
        },
    );
    pb.finish_and_clear();
    sol.context(DecaySnafu)
}

/// Trace file of the scenario of the provided index: scenarios of a multi-scenario file each get
/// their own file, suffixed by their index.
fn scenario_csv_path(path: &Path, index: usize, count: usize) -> PathBuf {
    if count <= 1 {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trace".to_string());
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}-{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{index}"),
    };
    path.with_file_name(file_name)
}

fn print_reentry(rslts: &[SimulationResult]) {
    for rslt in rslts {
        println!("\n{rslt}");
    }
}

fn print_solution(sol: &SolverSolution, days: i64) {
    println!("\n{sol}");
    println!(
        "Maximum average {} for a mission of {days} days: {:.6}",
        sol.solve_for, sol.estimate
    );
}

/// The choices of the interactive menu, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Sequence)]
enum MenuChoice {
    ReentryTime,
    MaxSolarRadioFlux,
    MaxGeomagneticIndex,
    Quit,
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ReentryTime => write!(f, "1) Time to reentry"),
            Self::MaxSolarRadioFlux => write!(f, "2) Maximum average solar radio flux (F10.7)"),
            Self::MaxGeomagneticIndex => write!(f, "3) Maximum average geomagnetic A index"),
            Self::Quit => write!(f, "0) Quit"),
        }
    }
}

/// The states of the interactive session.
enum MenuState {
    Menu,
    Capture(MenuChoice),
    Display(Box<ScenarioOutcome>, Option<i64>),
    Done,
}

struct Session {
    theme: ColorfulTheme,
    opts: DecayOpts,
    csv: Option<PathBuf>,
}

impl Session {
    fn prompt<T>(&self, prompt: &str, default: T) -> Result<T, CliError>
    where
        T: Clone + fmt::Display + std::str::FromStr,
        <T as std::str::FromStr>::Err: fmt::Display + fmt::Debug,
    {
        Input::<T>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_text()
            .context(PromptSnafu)
    }

    fn satellite(&self) -> Result<SatelliteParameters, CliError> {
        Ok(SatelliteParameters::new(
            self.prompt("Satellite mass (kg)", 3.0)?,
            self.prompt("Effective windward area (m^2)", 0.03)?,
        ))
    }

    fn select(&self) -> Result<MenuChoice, CliError> {
        let choices: Vec<MenuChoice> = all::<MenuChoice>().collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("\n\nSelect the computation")
            .default(0)
            .items(&choices)
            .interact()
            .context(PromptSnafu)?;
        Ok(choices[selection])
    }

    /// Captures the inputs of the provided choice and runs it.
    fn capture(&self, choice: MenuChoice) -> Result<MenuState, CliError> {
        let satellite = self.satellite()?;
        match choice {
            MenuChoice::ReentryTime => {
                let environment = EnvironmentInputs::new(
                    self.prompt("Average solar radio flux (F10.7)", 70.0)?,
                    self.prompt("Average geomagnetic A index", 10.0)?,
                );
                let altitude_km = self.prompt("Initial altitude (km)", 465.0)?;
                let runs = self.prompt("Number of runs", 1_usize)?;
                let increment_km = if runs > 1 {
                    self.prompt("Altitude increment between runs (km)", 10.0)?
                } else {
                    0.0
                };
                let mut sinks = Sinks::new(&self.csv)?;
                let rslts = sweep_reentry(
                    satellite,
                    environment,
                    altitude_km,
                    Sweep::new(runs, increment_km),
                    self.opts,
                    Some(&mut sinks),
                )
                .context(DecaySnafu)?;
                Ok(MenuState::Display(
                    Box::new(ScenarioOutcome::Reentry(rslts)),
                    None,
                ))
            }
            MenuChoice::MaxSolarRadioFlux | MenuChoice::MaxGeomagneticIndex => {
                let (solve_for, environment) = if choice == MenuChoice::MaxSolarRadioFlux {
                    let ap = self.prompt("Average geomagnetic A index", 10.0)?;
                    (SolveFor::SolarRadioFlux, EnvironmentInputs::new(70.0, ap))
                } else {
                    let flux = self.prompt("Average solar radio flux (F10.7)", 70.0)?;
                    (SolveFor::GeomagneticIndex, EnvironmentInputs::new(flux, 10.0))
                };
                let altitude_km = self.prompt("Initial altitude (km)", 465.0)?;
                let days = self.prompt("Mission time (days)", 3000_i64)?;
                let sol =
                    solve_with_bar(solve_for, satellite, environment, altitude_km, days, self.opts)?;
                Ok(MenuState::Display(
                    Box::new(ScenarioOutcome::Solved(sol)),
                    Some(days),
                ))
            }
            MenuChoice::Quit => Ok(MenuState::Done),
        }
    }

    fn run(&self) -> Result<(), CliError> {
        let mut state = MenuState::Menu;
        loop {
            state = match state {
                MenuState::Menu => match self.select()? {
                    MenuChoice::Quit => MenuState::Done,
                    choice => MenuState::Capture(choice),
                },
                MenuState::Capture(choice) => match self.capture(choice) {
                    Ok(next) => next,
                    // Invalid inputs go back to the menu
                    Err(CliError::Decay { source }) => {
                        error!("{source}");
                        MenuState::Menu
                    }
                    Err(e) => return Err(e),
                },
                MenuState::Display(outcome, days) => {
                    match (*outcome, days) {
                        (ScenarioOutcome::Solved(sol), Some(days)) => print_solution(&sol, days),
                        (outcome, _) => println!("\n{outcome}"),
                    }
                    MenuState::Menu
                }
                MenuState::Done => return Ok(()),
            };
        }
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }

    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }

    let opts = match cli.step_s {
        Some(step_s) => DecayOpts::with_fixed_step_s(step_s),
        None => DecayOpts::default(),
    };

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Reentry {
            satellite,
            flux,
            ap,
            altitude,
            runs,
            increment,
        } => {
            let mut sinks = Sinks::new(&cli.csv)?;
            let environment = EnvironmentInputs::new(flux, ap);
            let rslts = if runs > 1 {
                sweep_reentry(
                    (&satellite).into(),
                    environment,
                    altitude,
                    Sweep::new(runs, increment),
                    opts,
                    Some(&mut sinks),
                )
            } else {
                simulate_reentry_with_trace(
                    (&satellite).into(),
                    environment,
                    altitude,
                    opts,
                    &mut sinks,
                )
                .map(|rslt| vec![rslt])
            }
            .context(DecaySnafu)?;
            print_reentry(&rslts);
        }
        Command::MaxFlux {
            satellite,
            ap,
            altitude,
            days,
        } => {
            let sol = solve_with_bar(
                SolveFor::SolarRadioFlux,
                (&satellite).into(),
                EnvironmentInputs::new(70.0, ap),
                altitude,
                days,
                opts,
            )?;
            print_solution(&sol, days);
        }
        Command::MaxGeo {
            satellite,
            flux,
            altitude,
            days,
        } => {
            let sol = solve_with_bar(
                SolveFor::GeomagneticIndex,
                (&satellite).into(),
                EnvironmentInputs::new(flux, 10.0),
                altitude,
                days,
                opts,
            )?;
            print_solution(&sol, days);
        }
        Command::Scenario { path } => {
            let scenarios = DecayScenario::load_many(&path).context(ConfigSnafu)?;
            info!("Loaded {} scenario(s) from {}", scenarios.len(), path.display());
            for (index, scenario) in scenarios.iter().enumerate() {
                scenario.validate().context(ConfigSnafu)?;
                let outcome = if scenario.mission_days.is_some() {
                    let pb = progress_bar(scenario.solve_for(), &scenario.solver);
                    let outcome = scenario.run(None, |attempt| {
                        pb.set_message(format!("{:.6}", attempt.estimate));
                        pb.inc(1);
                    });
                    pb.finish_and_clear();
                    outcome
                } else {
                    let csv = cli
                        .csv
                        .as_deref()
                        .map(|csv| scenario_csv_path(csv, index, scenarios.len()));
                    let mut sinks = Sinks::new(&csv)?;
                    scenario.run(Some(&mut sinks), |_| {})
                };
                println!("\n{}", outcome.context(DecaySnafu)?);
            }
        }
        Command::Interactive => Session {
            theme: ColorfulTheme::default(),
            opts,
            csv: cli.csv,
        }
        .run()?,
    }

    Ok(())
}
