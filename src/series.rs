//! Core counts and the colors their series are drawn with.

use plotters::style::RGBAColor;

/// An RGBA color with every channel in `[0, 1]`. The last channel is the
/// opacity of the series.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Rgba(pub f64, pub f64, pub f64, pub f64);

impl Rgba {
    /// The opacity channel.
    pub fn opacity(&self) -> f64 {
        self.3
    }

    /// Converts to the 8-bit color used by the drawing backend.
    pub fn to_color(&self) -> RGBAColor {
        RGBAColor(channel(self.0), channel(self.1), channel(self.2), self.3)
    }
}

#[inline]
fn channel(v: f64) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}

/// A core count paired with the color of its series. The order of a list of
/// these is the order series are loaded, drawn and listed in legends.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CoreSeries {
    /// Number of cores the benchmark table was measured with.
    pub cores: u32,

    /// Color of every mark in this series.
    pub color: Rgba,
}

/// Default series: blue and faint for few cores, red and opaque for many.
pub const CORE_SERIES: [CoreSeries; 5] = [
    CoreSeries { cores: 8, color: Rgba(0.1, 0.1, 0.8, 0.3) },
    CoreSeries { cores: 16, color: Rgba(0.3, 0.3, 0.9, 0.5) },
    CoreSeries { cores: 32, color: Rgba(0.5, 0.5, 1.0, 0.7) },
    CoreSeries { cores: 64, color: Rgba(0.7, 0.2, 0.7, 0.8) },
    CoreSeries { cores: 128, color: Rgba(0.9, 0.1, 0.1, 1.0) },
];

impl CoreSeries {
    /// Legend label, e.g. `"32 cores"`.
    pub fn label(&self) -> String {
        format!("{} cores", self.cores)
    }

    /// File name of the benchmark table, e.g. `"32error.csv"`.
    pub fn table_file(&self) -> String {
        format!("{}error.csv", self.cores)
    }
}

/// Looks up the color assigned to `cores` in `series`.
pub fn color_for(series: &[CoreSeries], cores: u32) -> Option<Rgba> {
    series.iter().find(|s| s.cores == cores).map(|s| s.color)
}
