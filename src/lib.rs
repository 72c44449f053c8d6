//! corechart: scaling charts for parallel numerical-integration benchmarks.
//!
//! One CSV table per core count (`csv/<cores>error.csv`) is loaded up front,
//! then four PNG charts compare the core counts: speedup, parallel time,
//! error against time, and efficiency.
//!
//! Nothing is drawn until every table has loaded, so a missing or malformed
//! table leaves no chart behind.
#![recursion_limit = "1024"]
#![deny(missing_docs)]

extern crate csv;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate plotters;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate toml;

#[cfg(test)]
extern crate tempfile;

pub mod errors;

mod chart;
pub use chart::Chart;
pub use chart::render;

mod series;
pub use series::color_for;
pub use series::CoreSeries;
pub use series::Rgba;
pub use series::CORE_SERIES;

mod setting;
pub use setting::Setting;
pub use setting::SETTING_FILE;

mod table;
pub use table::alignment_issues;
pub use table::BenchmarkTable;
pub use table::Row;
pub use table::REQUIRED_COLUMNS;

use errors::*;
use std::path::PathBuf;

/// Loads the table of every series in `setting`, in series order. Fails on
/// the first missing or malformed table.
pub fn load_tables(setting: &Setting) -> Result<Vec<BenchmarkTable>> {
    setting
        .series
        .iter()
        .map(|s| BenchmarkTable::from_path(s.cores, setting.table_path(s)))
        .collect()
}

/// Checks that the tables line up. Issues are logged, or rejected when
/// `strict` is set.
pub fn check_alignment(tables: &[BenchmarkTable], strict: bool) -> Result<()> {
    let issues = alignment_issues(tables);
    if issues.is_empty() {
        return Ok(());
    }
    if strict {
        bail!(ErrorKind::Misaligned(issues.join("; ")));
    }
    for issue in &issues {
        warn!("{}", issue);
    }
    Ok(())
}

/// Loads every table, then renders every chart. Returns the written paths.
pub fn run(setting: &Setting) -> Result<Vec<PathBuf>> {
    let tables = load_tables(setting)?;
    check_alignment(&tables, setting.strict_alignment)?;

    let mut written = Vec::new();
    for &chart in Chart::all().iter() {
        written.push(render(chart, &tables, setting)?);
    }
    info!("{} charts written to {}", written.len(), setting.output_dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> Vec<BenchmarkTable> {
        let aligned = "\
steps,speedup_integration,parallel_integration_time,integration_error
1000,0.5,0.002,1e-7
10000,2.0,0.004,1e-9
";
        let short = "\
steps,speedup_integration,parallel_integration_time,integration_error
1000,0.5,0.002,1e-7
";
        vec![
            BenchmarkTable::from_reader(8, "8error.csv", aligned.as_bytes()).unwrap(),
            BenchmarkTable::from_reader(16, "16error.csv", short.as_bytes()).unwrap(),
        ]
    }

    #[test]
    fn permissive_alignment_passes() {
        assert!(check_alignment(&tables(), false).is_ok());
    }

    #[test]
    fn strict_alignment_rejects() {
        match check_alignment(&tables(), true) {
            Err(Error(ErrorKind::Misaligned(issues), _)) => {
                assert!(issues.contains("16 cores"));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(check_alignment(&tables()[..1], true).is_ok());
    }

    #[test]
    fn load_stops_at_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut setting = Setting::default();
        setting.input_dir = dir.path().to_path_buf();
        match load_tables(&setting) {
            Err(Error(ErrorKind::MissingFile(path), _)) => {
                assert_eq!(path, dir.path().join("8error.csv"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
