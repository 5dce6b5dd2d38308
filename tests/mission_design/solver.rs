extern crate nyx_decay as decay;
extern crate pretty_env_logger;

use decay::md::{
    simulate_reentry, solve_max, solve_max_flux, solve_max_geomagnetic_index, SolveFor,
    SolverConfig,
};
use decay::propagators::DecayOpts;
use decay::time::{Duration, Unit};

use crate::{cubesat, quiet_weather};

#[test]
fn max_flux_for_reference_mission() {
    let _ = pretty_env_logger::try_init();

    let target_days = 3000;
    let target = (target_days as f64) * Unit::Day;
    let opts = DecayOpts::default();

    let sol = solve_max_flux(cubesat(), quiet_weather(), 465.0, target_days, opts).unwrap();
    println!("{sol}");

    assert_eq!(sol.solve_for, SolveFor::SolarRadioFlux);
    assert!(sol.iterations() <= 100);
    assert_eq!(sol.attempts[0].estimate, 70.0);

    let achieved = simulate_reentry(
        cubesat(),
        quiet_weather().with_solar_radio_flux(sol.estimate),
        465.0,
        opts,
    )
    .unwrap();
    let residual = (achieved.elapsed - target).abs();

    if sol.converged {
        assert_eq!(residual, Duration::ZERO);
    } else {
        let seed_residual = sol.attempts[0].residual.abs();
        assert!(
            residual <= 60.0 * Unit::Second || residual < seed_residual,
            "residual of {residual} vs {seed_residual} for the seed"
        );
    }
}

#[test]
fn max_geomagnetic_index_for_short_mission() {
    let opts = DecayOpts::with_fixed_step(10.0 * Unit::Minute);
    let target_days = 100;
    let target = (target_days as f64) * Unit::Day;

    let sol =
        solve_max_geomagnetic_index(cubesat(), quiet_weather(), 320.0, target_days, opts).unwrap();
    println!("{sol}");

    assert_eq!(sol.solve_for, SolveFor::GeomagneticIndex);
    assert_eq!(sol.attempts[0].estimate, 10.0);

    let best = sol.best_attempt().unwrap();
    assert!(best.residual.abs() <= sol.attempts[0].residual.abs());

    let achieved = simulate_reentry(
        cubesat(),
        quiet_weather().with_geomagnetic_a_index(sol.estimate),
        320.0,
        opts,
    )
    .unwrap();
    let residual = (achieved.elapsed - target).abs();
    assert!(
        residual <= opts.step || residual < sol.attempts[0].residual.abs(),
        "residual of {residual}"
    );
}

#[test]
fn search_reverses_and_damps() {
    let opts = DecayOpts::with_fixed_step(1.0 * Unit::Hour);
    let mut steps = Vec::new();
    let sol = solve_max(
        SolveFor::SolarRadioFlux,
        cubesat(),
        quiet_weather(),
        300.0,
        30,
        opts,
        SolverConfig::builder().initial_step(16.0).max_attempts(40).build(),
        |attempt| steps.push(attempt.step_size),
    )
    .unwrap();

    assert_eq!(steps.len(), sol.iterations());
    // The step size never grows
    assert!(steps.windows(2).all(|pair| pair[1] <= pair[0]));
    // Consecutive estimates are one step apart
    for pair in sol.attempts.windows(2) {
        assert!(((pair[1].estimate - pair[0].estimate).abs() - pair[1].step_size).abs() < 1e-12);
    }
}

#[test]
fn tolerance_stops_early() {
    let opts = DecayOpts::with_fixed_step(1.0 * Unit::Hour);
    let loose = SolverConfig::builder()
        .initial_step(8.0)
        .tolerance(5.0 * Unit::Day)
        .build();
    let sol = solve_max(
        SolveFor::SolarRadioFlux,
        cubesat(),
        quiet_weather(),
        300.0,
        30,
        opts,
        loose,
        |_| {},
    )
    .unwrap();

    assert!(sol.converged);
    let last = sol.last_attempt().unwrap();
    assert!(last.residual.abs() <= 5.0 * Unit::Day);
    // Converged solutions return the estimate that met the tolerance
    assert_eq!(sol.estimate, last.estimate);
}
