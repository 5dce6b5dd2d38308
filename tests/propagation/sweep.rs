extern crate nyx_decay as decay;

use decay::md::{simulate_reentry, sweep_reentry, TraceRecord};
use decay::propagators::{DecayOpts, Sweep};
use decay::time::Unit;
use decay::DecayError;

use crate::{cubesat, quiet_weather};

#[test]
fn sweep_matches_independent_runs() {
    let opts = DecayOpts::with_fixed_step(20.0 * Unit::Minute);
    let sweep = Sweep::new(4, 15.0);

    let rslts = sweep_reentry(cubesat(), quiet_weather(), 300.0, sweep, opts, None).unwrap();
    assert_eq!(rslts.len(), 4);

    for (run, rslt) in rslts.iter().enumerate() {
        let altitude_km = 300.0 + (run as f64) * 15.0;
        assert_eq!(rslt.initial_altitude_km, altitude_km);
        // No state carries over from one run to the next
        let alone = simulate_reentry(cubesat(), quiet_weather(), altitude_km, opts).unwrap();
        assert_eq!(*rslt, alone);
    }

    // Higher orbits last longer
    for pair in rslts.windows(2) {
        assert!(pair[0].elapsed < pair[1].elapsed);
    }
}

#[test]
fn sweep_trace_is_tagged_by_run() {
    let opts = DecayOpts::builder()
        .step(1.0 * Unit::Hour)
        .report_cadence(1.0 * Unit::Day)
        .build();

    let mut trace: Vec<TraceRecord> = Vec::new();
    let rslts = sweep_reentry(
        cubesat(),
        quiet_weather(),
        250.0,
        Sweep::new(3, 10.0),
        opts,
        Some(&mut trace),
    )
    .unwrap();

    for (run, rslt) in rslts.iter().enumerate() {
        let records: Vec<&TraceRecord> = trace.iter().filter(|rec| rec.run == run).collect();
        assert!(!records.is_empty());
        assert_eq!(records[0].elapsed_days, 0.0);
        assert_eq!(records[0].altitude_km, rslt.initial_altitude_km);
        let last = records[records.len() - 1];
        assert!((last.elapsed_days - rslt.elapsed_days()).abs() < 1e-9);
    }

    // Runs are published in order
    assert!(trace.windows(2).all(|pair| pair[0].run <= pair[1].run));
}

#[test]
fn single_run_sweep() {
    let opts = DecayOpts::with_fixed_step(1.0 * Unit::Hour);
    // A single run does not need an increment
    let rslts =
        sweep_reentry(cubesat(), quiet_weather(), 300.0, Sweep::new(1, 0.0), opts, None).unwrap();
    assert_eq!(rslts.len(), 1);
    assert_eq!(
        rslts[0],
        simulate_reentry(cubesat(), quiet_weather(), 300.0, opts).unwrap()
    );

    assert_eq!(
        sweep_reentry(cubesat(), quiet_weather(), 300.0, Sweep::new(0, 1.0), opts, None),
        Err(DecayError::NoRuns)
    );
}
