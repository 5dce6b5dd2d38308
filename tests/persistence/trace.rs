extern crate nyx_decay as decay;

use decay::io::CsvTraceWriter;
use decay::md::{sweep_reentry, TraceRecord, TraceSink};
use decay::propagators::{DecayOpts, Sweep};
use decay::time::Unit;
use std::path::PathBuf;

use crate::{cubesat, quiet_weather};

#[test]
fn sweep_trace_to_csv() {
    let path: PathBuf = std::env::temp_dir().join("nyx_decay_sweep_trace.csv");

    let opts = DecayOpts::builder()
        .step(1.0 * Unit::Hour)
        .report_cadence(2.0 * Unit::Day)
        .build();

    let mut wtr = CsvTraceWriter::from_path(&path).unwrap();
    let rslts = sweep_reentry(
        cubesat(),
        quiet_weather(),
        260.0,
        Sweep::new(2, 20.0),
        opts,
        Some(&mut wtr as &mut dyn TraceSink),
    )
    .unwrap();
    let rows = wtr.rows();
    drop(wtr);

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["run", "elapsed_days", "altitude_km", "orbital_period_minutes"]
    );

    let records: Vec<TraceRecord> = rdr.deserialize::<TraceRecord>().map(|rec| rec.unwrap()).collect();
    assert_eq!(records.len(), rows);
    assert_eq!(records[0].altitude_km, 260.0);

    let second_run_start = records.iter().position(|rec| rec.run == 1).unwrap();
    assert_eq!(records[second_run_start].altitude_km, 280.0);
    assert_eq!(records[second_run_start].elapsed_days, 0.0);
    assert!(
        (records[second_run_start - 1].elapsed_days - rslts[0].elapsed_days()).abs() < 1e-9
    );

    std::fs::remove_file(path).unwrap();
}
