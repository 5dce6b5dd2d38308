extern crate nyx_decay as decay;

use decay::io::{ConfigRepr, DecayScenario, ScenarioOutcome};
use decay::md::{SolveFor, TraceRecord};
use decay::time::Unit;
use std::path::PathBuf;

fn scenarios_path() -> PathBuf {
    let manifest_dir =
        PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or(".".to_string()));
    manifest_dir.join("tests/data/scenarios.yaml")
}

#[test]
fn load_many_scenarios() {
    let scenarios = DecayScenario::load_many(scenarios_path()).unwrap();
    assert_eq!(scenarios.len(), 2);

    let sweep = &scenarios[0];
    assert_eq!(sweep.mission_days, None);
    assert_eq!(sweep.sweep().runs, 3);
    assert_eq!(sweep.opts.report_cadence, 1.0 * Unit::Day);
    assert_eq!(sweep.opts.karman_line_km, 100.0);

    let solve = &scenarios[1];
    assert_eq!(solve.mission_days, Some(30));
    assert_eq!(solve.solve_for(), SolveFor::SolarRadioFlux);
    assert_eq!(solve.solver.max_attempts, 50);
    assert_eq!(solve.solver.flux_seed, 70.0);
    assert_eq!(solve.solver.tolerance, 1.0 * Unit::Day);

    for scenario in &scenarios {
        scenario.validate().unwrap();
    }
}

#[test]
fn run_scenarios() {
    let scenarios = DecayScenario::load_many(scenarios_path()).unwrap();

    let mut trace: Vec<TraceRecord> = Vec::new();
    match scenarios[0].run(Some(&mut trace), |_| {}).unwrap() {
        ScenarioOutcome::Reentry(rslts) => {
            assert_eq!(rslts.len(), 3);
            assert!(rslts.iter().all(|rslt| rslt.reentered()));
        }
        ScenarioOutcome::Solved(_) => panic!("expected a reentry sweep"),
    }
    assert_eq!(trace.last().unwrap().run, 2);

    let mut attempts = 0;
    let outcome = scenarios[1].run(None, |_| attempts += 1).unwrap();
    println!("{outcome}");
    match outcome {
        ScenarioOutcome::Solved(sol) => {
            assert_eq!(sol.iterations(), attempts);
            assert!(sol.converged);
            assert!(sol.last_attempt().unwrap().residual.abs() <= 1.0 * Unit::Day);
        }
        ScenarioOutcome::Reentry(_) => panic!("expected a solve"),
    }
}
