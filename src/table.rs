//! Benchmark tables: one CSV per core count.

use csv;
use errors::*;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Columns every benchmark table must carry. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "steps",
    "speedup_integration",
    "parallel_integration_time",
    "integration_error",
];

/// Row is one problem size measured at a fixed core count.
///
/// ```ignore
/// steps,speedup_integration,parallel_integration_time,integration_error
/// 1000,0.41,0.000152,8.33e-08
/// 10000,2.87,0.000217,8.33e-10
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Row {
    /// Number of discretization steps.
    pub steps: u64,

    /// Serial time over parallel time.
    pub speedup_integration: f64,

    /// Parallel wall time, in seconds.
    pub parallel_integration_time: f64,

    /// Absolute deviation of the estimate from π.
    pub integration_error: f64,
}

/// All rows measured with one core count, in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkTable {
    cores: u32,
    source: PathBuf,
    rows: Vec<Row>,
}

impl BenchmarkTable {
    /// Loads the table for `cores` from a CSV file with a header row.
    pub fn from_path<P: AsRef<Path>>(cores: u32, path: P) -> Result<BenchmarkTable> {
        let path = path.as_ref();
        if !path.exists() {
            bail!(ErrorKind::MissingFile(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let table = BenchmarkTable::from_reader(cores, path, file)?;
        info!(
            "loaded {} rows for {} cores from {}",
            table.len(),
            cores,
            path.display()
        );
        Ok(table)
    }

    /// Parses a table from any reader. `source` only names the input in
    /// errors.
    pub fn from_reader<P: AsRef<Path>, R: Read>(
        cores: u32,
        source: P,
        reader: R,
    ) -> Result<BenchmarkTable> {
        let source = source.as_ref().to_path_buf();
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        {
            let headers = rdr.headers()?;
            for column in REQUIRED_COLUMNS.iter() {
                if !headers.iter().any(|h| h == *column) {
                    let reason = format!("missing column `{}`", column);
                    bail!(ErrorKind::MalformedTable(source, reason));
                }
            }
        }

        let mut rows = Vec::new();
        for (i, record) in rdr.deserialize().enumerate() {
            let row: Row = match record {
                Ok(row) => row,
                Err(e) => {
                    let reason = format!("row {}: {}", i + 1, e);
                    bail!(ErrorKind::MalformedTable(source, reason));
                }
            };
            rows.push(row);
        }
        debug!("parsed {} rows from {}", rows.len(), source.display());

        Ok(BenchmarkTable {
            cores: cores,
            source: source,
            rows: rows,
        })
    }

    /// The core count this table was measured with.
    pub fn cores(&self) -> u32 {
        self.cores
    }

    /// Where the table was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// All rows, in file order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `steps` column.
    pub fn steps(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.steps).collect()
    }

    /// The `speedup_integration` column.
    pub fn speedup(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.speedup_integration).collect()
    }

    /// The `parallel_integration_time` column.
    pub fn parallel_time(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.parallel_integration_time).collect()
    }

    /// The `integration_error` column.
    pub fn error(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.integration_error).collect()
    }

    /// Speedup divided by the core count, per row. 1.0 is linear scaling.
    pub fn efficiency(&self) -> Vec<f64> {
        let cores = self.cores as f64;
        self.rows
            .iter()
            .map(|r| r.speedup_integration / cores)
            .collect()
    }
}

/// Finds tables that do not line up with each other: steps out of order,
/// row counts or step values that differ from the first table. An empty
/// result means the tables are aligned.
pub fn alignment_issues(tables: &[BenchmarkTable]) -> Vec<String> {
    let mut issues = Vec::new();

    for t in tables {
        let sorted = t.rows.windows(2).all(|w| w[0].steps < w[1].steps);
        if !sorted {
            issues.push(format!("{} cores: steps are not increasing", t.cores));
        }
    }

    let first = match tables.first() {
        Some(first) => first,
        None => return issues,
    };
    for t in &tables[1..] {
        if t.len() != first.len() {
            issues.push(format!(
                "{} cores: {} rows, {} cores has {}",
                t.cores,
                t.len(),
                first.cores,
                first.len()
            ));
        } else if t.steps() != first.steps() {
            issues.push(format!(
                "{} cores: steps differ from {} cores",
                t.cores,
                first.cores
            ));
        }
    }

    issues
}
