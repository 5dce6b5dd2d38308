extern crate nyx_decay as decay;

use decay::md::{simulate_reentry, simulate_reentry_with_trace, TraceRecord};
use decay::propagators::{DecayOpts, DecaySimulation, DecayStatus, IntegratorStatus};
use decay::time::Unit;
use decay::{DecayError, SatelliteParameters};
use rstest::*;

use crate::{cubesat, quiet_weather};

#[test]
fn reference_cubesat_reenters() {
    let rslt = simulate_reentry(cubesat(), quiet_weather(), 465.0, DecayOpts::default()).unwrap();
    println!("{rslt}");

    assert_eq!(rslt.status, DecayStatus::Reentered);
    assert!(rslt.reentered());
    assert!(rslt.elapsed_s() > 0.0);
    assert!(rslt.terminal_altitude_km() < 100.0);
    assert!(rslt.steps <= DecayOpts::default().max_steps());
    // One step per minute
    assert!((rslt.elapsed_s() - (rslt.steps as f64) * 60.0).abs() < 1e-3);
}

#[test]
fn below_karman_line_is_already_reentered() {
    let rslt = simulate_reentry(cubesat(), quiet_weather(), 99.0, DecayOpts::default()).unwrap();
    assert_eq!(rslt.status, DecayStatus::Reentered);
    assert_eq!(rslt.steps, 0);
    assert_eq!(rslt.elapsed_s(), 0.0);
}

#[test]
fn dense_satellite_exceeds_max_lifetime() {
    // One day steps keep this under twenty thousand steps
    let opts = DecayOpts::with_fixed_step(1.0 * Unit::Day);
    let rslt = simulate_reentry(
        SatelliteParameters::new(1000.0, 0.01),
        quiet_weather(),
        1200.0,
        opts,
    )
    .unwrap();
    println!("{rslt}");

    assert_eq!(rslt.status, DecayStatus::ExceededMaxDuration);
    assert!(!rslt.reentered());
    assert!(rslt.elapsed >= opts.max_lifetime);
    assert!(rslt.elapsed - opts.max_lifetime < opts.step);
    assert!(rslt.steps <= opts.max_steps());
    assert!(rslt.terminal_altitude_km() > 1000.0);
}

#[rstest]
fn altitude_never_increases(
    #[values(0.01, 1.0, 100.0)] area_to_mass: f64,
    #[values(60.0, 3_600.0, 86_400.0)] step_s: f64,
) {
    // The reference cubesat, or 1 m^2 of effective area
    let satellite = if area_to_mass < 1.0 {
        cubesat()
    } else {
        SatelliteParameters::new(1.0 / area_to_mass, 1.0)
    };
    let sim = DecaySimulation::new(
        satellite,
        quiet_weather(),
        DecayOpts::with_fixed_step_s(step_s),
    );
    let mut integrator = sim.integrator(400.0);
    let mut prev_altitude_m = integrator.state.altitude_m;
    while integrator.single_step() == IntegratorStatus::Running {
        assert!(
            integrator.state.altitude_m <= prev_altitude_m,
            "A/m = {area_to_mass}, step = {step_s} s: rose at {}",
            integrator.state
        );
        prev_altitude_m = integrator.state.altitude_m;
    }
    assert!(integrator.state.altitude_m <= prev_altitude_m);
    assert!(integrator.state.orbital_period_s > 0.0);

    let rslt = integrator.result().unwrap();
    assert_eq!(
        rslt.status,
        DecayStatus::Reentered,
        "A/m = {area_to_mass}, step = {step_s} s: {rslt}"
    );
    // Grounded at worst, never below the surface
    assert!(rslt.terminal_altitude_m > -1e-3);
    assert!(rslt.terminal_altitude_km() < 100.0);

    // Terminated integrators do not move anymore
    let final_state = integrator.state;
    integrator.single_step();
    assert_eq!(integrator.state, final_state);
}

#[rstest]
#[case(300.0)]
#[case(400.0)]
#[case(465.0)]
fn lifetime_decreases_with_solar_flux(#[case] altitude_km: f64) {
    let opts = DecayOpts::with_fixed_step(30.0 * Unit::Minute);
    let mut prev = None;
    for flux in [50.0, 70.0, 100.0, 150.0, 250.0] {
        let rslt = simulate_reentry(
            cubesat(),
            quiet_weather().with_solar_radio_flux(flux),
            altitude_km,
            opts,
        )
        .unwrap();
        if let Some(prev_elapsed) = prev {
            assert!(rslt.elapsed <= prev_elapsed, "F10.7 = {flux} from {altitude_km} km");
        }
        prev = Some(rslt.elapsed);
    }
}

#[rstest]
#[case(300.0)]
#[case(465.0)]
fn lifetime_decreases_with_geomagnetic_index(#[case] altitude_km: f64) {
    let opts = DecayOpts::with_fixed_step(30.0 * Unit::Minute);
    let mut prev = None;
    for ap in [0.0, 10.0, 30.0, 80.0, 200.0] {
        let rslt = simulate_reentry(
            cubesat(),
            quiet_weather().with_geomagnetic_a_index(ap),
            altitude_km,
            opts,
        )
        .unwrap();
        if let Some(prev_elapsed) = prev {
            assert!(rslt.elapsed <= prev_elapsed, "Ap = {ap} from {altitude_km} km");
        }
        prev = Some(rslt.elapsed);
    }
}

#[test]
fn higher_area_to_mass_decays_faster() {
    let opts = DecayOpts::with_fixed_step(30.0 * Unit::Minute);
    let heavy = simulate_reentry(
        SatelliteParameters::new(6.0, 0.03),
        quiet_weather(),
        350.0,
        opts,
    )
    .unwrap();
    let light = simulate_reentry(cubesat(), quiet_weather(), 350.0, opts).unwrap();
    assert!(light.elapsed < heavy.elapsed);
}

#[test]
fn trace_matches_silent_run() {
    let opts = DecayOpts::builder()
        .step(10.0 * Unit::Minute)
        .report_cadence(7.0 * Unit::Day)
        .build();

    let mut trace: Vec<TraceRecord> = Vec::new();
    let traced =
        simulate_reentry_with_trace(cubesat(), quiet_weather(), 300.0, opts, &mut trace).unwrap();
    let silent = simulate_reentry(cubesat(), quiet_weather(), 300.0, opts).unwrap();

    assert_eq!(traced, silent);

    let first = trace.first().unwrap();
    assert_eq!(first.elapsed_days, 0.0);
    assert_eq!(first.altitude_km, 300.0);

    // Weekly samples and the terminal one
    for (i, rec) in trace.iter().take(trace.len() - 1).enumerate() {
        assert!((rec.elapsed_days - 7.0 * i as f64).abs() < 1e-9);
    }
    let last = trace.last().unwrap();
    assert!((last.elapsed_days - traced.elapsed_days()).abs() < 1e-9);
    assert!(last.altitude_km < 100.0);
    assert!(trace.iter().all(|rec| rec.run == 0));
}

#[test]
fn invalid_inputs() {
    let opts = DecayOpts::default();
    assert!(matches!(
        simulate_reentry(SatelliteParameters::new(3.0, 0.0), quiet_weather(), 465.0, opts),
        Err(DecayError::NonPositiveArea { .. })
    ));
    assert!(matches!(
        simulate_reentry(cubesat(), quiet_weather(), -1.0, opts),
        Err(DecayError::NegativeAltitude { .. })
    ));
    assert!(matches!(
        simulate_reentry(
            cubesat(),
            quiet_weather(),
            465.0,
            DecayOpts::with_fixed_step_s(0.0)
        ),
        Err(DecayError::NonPositiveStep { .. })
    ));
}
