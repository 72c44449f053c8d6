extern crate corechart;
extern crate tempfile;

use corechart::errors::{Error, ErrorKind};
use corechart::{Chart, Setting};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CORES: [u32; 5] = [8, 16, 32, 64, 128];

fn table_text(cores: u32) -> String {
    let mut text =
        String::from("steps,speedup_integration,parallel_integration_time,integration_error\n");
    for (i, &steps) in [1000u64, 10000, 100000].iter().enumerate() {
        let speedup = (i as f64 + 1.0) * cores as f64 / 16.0;
        let time = 1e-4 * (i as f64 + 1.0) * 10.0 / cores as f64;
        let error = 1e-6 / 100f64.powi(i as i32);
        text.push_str(&format!("{},{},{},{:e}\n", steps, speedup, time, error));
    }
    text
}

/// A scratch directory with `csv/<cores>error.csv` for every core count but
/// `skip`, and a setting pointing into it.
fn workspace(skip: Option<u32>) -> (TempDir, Setting) {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("csv");
    fs::create_dir(&csv).unwrap();
    for &cores in CORES.iter().filter(|&&c| Some(c) != skip) {
        fs::write(csv.join(format!("{}error.csv", cores)), table_text(cores)).unwrap();
    }

    let mut setting = Setting::default();
    setting.input_dir = csv;
    setting.output_dir = dir.path().join("out");
    setting.dpi = 40;
    (dir, setting)
}

fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(d) = pending.pop() {
        for entry in fs::read_dir(&d).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let bytes = fs::read(&path).unwrap();
                files.insert(path, bytes);
            }
        }
    }
    files
}

fn pngs(dir: &Path) -> Vec<PathBuf> {
    snapshot(dir)
        .into_iter()
        .map(|(p, _)| p)
        .filter(|p| p.extension().map_or(false, |e| e == "png"))
        .collect()
}

#[test]
fn writes_every_chart() {
    let (dir, setting) = workspace(None);
    let before = snapshot(dir.path());

    let written = corechart::run(&setting).unwrap();

    let expected = Chart::all()
        .iter()
        .map(|c| setting.output_dir.join(c.file_name()))
        .collect::<Vec<_>>();
    assert_eq!(written, expected);

    let after = snapshot(dir.path());
    assert_eq!(after.len(), before.len() + 4);
    for (path, bytes) in &before {
        assert_eq!(after.get(path), Some(bytes), "{} changed", path.display());
    }
    for path in &expected {
        let bytes = &after[path];
        assert!(bytes.len() > 8);
        assert_eq!(&bytes[1..4], b"PNG");
    }
}

#[test]
fn each_chart_writes_one_file() {
    let (dir, setting) = workspace(None);
    let tables = corechart::load_tables(&setting).unwrap();
    fs::create_dir_all(&setting.output_dir).unwrap();

    for (i, &chart) in Chart::all().iter().enumerate() {
        let path = corechart::render(chart, &tables, &setting).unwrap();
        assert_eq!(path, setting.output_dir.join(chart.file_name()));
        assert!(fs::metadata(&path).unwrap().len() > 0);
        assert_eq!(pngs(dir.path()).len(), i + 1);
    }
}

#[test]
fn missing_table_writes_nothing() {
    let (dir, setting) = workspace(Some(32));

    match corechart::run(&setting) {
        Err(Error(ErrorKind::MissingFile(path), _)) => {
            assert_eq!(path, setting.input_dir.join("32error.csv"));
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert!(pngs(dir.path()).is_empty());
}

#[test]
fn malformed_table_writes_nothing() {
    let (dir, setting) = workspace(None);
    fs::write(
        setting.input_dir.join("64error.csv"),
        "steps,speedup_integration,integration_error\n1000,1.0,0.1\n",
    ).unwrap();

    match corechart::run(&setting) {
        Err(Error(ErrorKind::MalformedTable(path, _), _)) => {
            assert_eq!(path, setting.input_dir.join("64error.csv"));
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert!(pngs(dir.path()).is_empty());
}

#[test]
fn strict_alignment_writes_nothing() {
    let (dir, mut setting) = workspace(None);
    fs::write(
        setting.input_dir.join("128error.csv"),
        "steps,speedup_integration,parallel_integration_time,integration_error\n1000,1.0,0.1,0.1\n",
    ).unwrap();

    setting.strict_alignment = true;
    match corechart::run(&setting) {
        Err(Error(ErrorKind::Misaligned(_), _)) => {}
        other => panic!("unexpected: {:?}", other),
    }
    assert!(pngs(dir.path()).is_empty());

    setting.strict_alignment = false;
    assert_eq!(corechart::run(&setting).unwrap().len(), 4);
}

#[test]
fn rerun_overwrites_with_same_content() {
    let (dir, setting) = workspace(None);

    corechart::run(&setting).unwrap();
    let first = snapshot(dir.path());
    corechart::run(&setting).unwrap();
    let second = snapshot(dir.path());

    assert_eq!(first, second);
}
