//! Run settings, optionally read from a TOML file.

use errors::*;
use series::{CoreSeries, CORE_SERIES};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use toml;

/// File looked up in the working directory by [`Setting::discover`].
pub const SETTING_FILE: &str = "Charts.toml";

/// The run setting. Every field may be left out of the TOML file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Setting {
    /// Directory that holds one `<cores>error.csv` per series.
    pub input_dir: PathBuf,

    /// Directory the charts are written to.
    pub output_dir: PathBuf,

    /// Dots per inch.
    pub dpi: u32,

    /// Figure width and height, in inches.
    pub figure_size: (f64, f64),

    /// Abort instead of warning when tables do not line up.
    pub strict_alignment: bool,

    /// Core counts to plot and their colors, in drawing order.
    pub series: Vec<CoreSeries>,
}

impl Default for Setting {
    fn default() -> Self {
        Setting {
            input_dir: PathBuf::from("csv"),
            output_dir: PathBuf::from("."),
            dpi: 300,
            figure_size: (8.0, 6.0),
            strict_alignment: false,
            series: CORE_SERIES.to_vec(),
        }
    }
}

impl Setting {
    /// Initialize from a file.
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Setting> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Reads [`SETTING_FILE`] from the working directory when it exists,
    /// falls back to the defaults otherwise.
    pub fn discover() -> Result<Setting> {
        let path = Path::new(SETTING_FILE);
        if path.exists() {
            info!("using settings from {}", path.display());
            Setting::init(path)
        } else {
            Ok(Setting::default())
        }
    }

    /// Path of the benchmark table for `series`.
    pub fn table_path(&self, series: &CoreSeries) -> PathBuf {
        self.input_dir.join(series.table_file())
    }

    /// Path a chart named `file_name` is written to.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Figure size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.figure_size.0 * dpi).round() as u32,
            (self.figure_size.1 * dpi).round() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use series::Rgba;

    #[test]
    fn defaults() {
        let s = Setting::default();
        assert_eq!(s.pixel_size(), (2400, 1800));
        assert_eq!(s.series.len(), 5);
        assert_eq!(s.table_path(&s.series[0]), PathBuf::from("csv/8error.csv"));
        assert_eq!(
            s.output_path("speedup_all_cores.png"),
            PathBuf::from("./speedup_all_cores.png")
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s: Setting = toml::from_str("dpi = 100\noutput_dir = \"out\"\n").unwrap();
        assert_eq!(s.dpi, 100);
        assert_eq!(s.output_dir, PathBuf::from("out"));
        assert_eq!(s.input_dir, PathBuf::from("csv"));
        assert_eq!(s.pixel_size(), (800, 600));
        assert!(!s.strict_alignment);
        assert_eq!(s.series, CORE_SERIES.to_vec());
    }

    #[test]
    fn series_from_toml() {
        let text = "\
figure_size = [4.0, 3.0]
strict_alignment = true

[[series]]
cores = 2
color = [0.0, 0.0, 1.0, 0.5]

[[series]]
cores = 4
color = [1.0, 0.0, 0.0, 1.0]
";
        let s: Setting = toml::from_str(text).unwrap();
        assert!(s.strict_alignment);
        assert_eq!(s.figure_size, (4.0, 3.0));
        assert_eq!(
            s.series,
            vec![
                CoreSeries { cores: 2, color: Rgba(0.0, 0.0, 1.0, 0.5) },
                CoreSeries { cores: 4, color: Rgba(1.0, 0.0, 0.0, 1.0) },
            ]
        );
    }

    #[test]
    fn init_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTING_FILE);
        ::std::fs::write(&path, "input_dir = \"results\"\n").unwrap();
        let s = Setting::init(&path).unwrap();
        assert_eq!(s.input_dir, PathBuf::from("results"));

        ::std::fs::write(&path, "dpi = \"high\"\n").unwrap();
        match Setting::init(&path) {
            Err(Error(ErrorKind::Toml(_), _)) => {}
            other => panic!("unexpected: {:?}", other),
        }

        match Setting::init(dir.path().join("missing.toml")) {
            Err(Error(ErrorKind::Io(_), _)) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }
}
