//! The four comparison charts and how they are drawn.

use errors::*;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use series::{self, CoreSeries};
use setting::Setting;
use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};
use table::BenchmarkTable;

type DrawResult<T> = ::std::result::Result<T, Box<dyn StdError + Send + Sync>>;

const GREY: RGBColor = RGBColor(128, 128, 128);

/// Chart kinds, each written to its own PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chart {
    /// Speedup against problem size.
    Speedup,
    /// Parallel time against problem size.
    ParallelTime,
    /// Parallel time against integration error.
    ErrorTime,
    /// Parallel efficiency against problem size.
    Efficiency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Circle,
    Square,
    Triangle,
}

/// A horizontal line drawn across the whole chart.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Reference {
    y: f64,
    label: Option<&'static str>,
}

impl Chart {
    /// Every chart, in the order they are rendered.
    pub fn all() -> [Chart; 4] {
        [
            Chart::Speedup,
            Chart::ParallelTime,
            Chart::ErrorTime,
            Chart::Efficiency,
        ]
    }

    /// Output file name.
    pub fn file_name(&self) -> &'static str {
        match *self {
            Chart::Speedup => "speedup_all_cores.png",
            Chart::ParallelTime => "parallel_time_all_cores.png",
            Chart::ErrorTime => "error_time_all_cores.png",
            Chart::Efficiency => "efficiency_all_cores.png",
        }
    }

    fn title(&self) -> &'static str {
        match *self {
            Chart::Speedup => "Speedup vs Problem Size (All Core Counts)",
            Chart::ParallelTime => "Parallel Time vs Problem Size (All Core Counts)",
            Chart::ErrorTime => "Time vs Accuracy Trade-off (All Core Counts)",
            Chart::Efficiency => "Parallel Efficiency vs Problem Size",
        }
    }

    fn x_desc(&self) -> &'static str {
        match *self {
            Chart::ErrorTime => "Absolute Error from π",
            _ => "Number of Steps",
        }
    }

    fn y_desc(&self) -> &'static str {
        match *self {
            Chart::Speedup => "Speedup (Serial/Parallel)",
            Chart::ParallelTime | Chart::ErrorTime => "Time (seconds)",
            Chart::Efficiency => "Efficiency (Speedup / Cores)",
        }
    }

    fn marker(&self) -> Marker {
        match *self {
            Chart::Speedup | Chart::ErrorTime => Marker::Circle,
            Chart::ParallelTime => Marker::Square,
            Chart::Efficiency => Marker::Triangle,
        }
    }

    /// Whether consecutive points are joined by a line.
    fn connected(&self) -> bool {
        *self != Chart::ErrorTime
    }

    /// The x axis is always logarithmic.
    fn log_y(&self) -> bool {
        match *self {
            Chart::ParallelTime | Chart::ErrorTime => true,
            Chart::Speedup | Chart::Efficiency => false,
        }
    }

    fn reference(&self) -> Option<Reference> {
        match *self {
            Chart::Speedup => Some(Reference { y: 1.0, label: None }),
            Chart::Efficiency => Some(Reference { y: 1.0, label: Some("Ideal") }),
            _ => None,
        }
    }

    fn legend_position(&self) -> SeriesLabelPosition {
        match *self {
            Chart::ErrorTime => SeriesLabelPosition::UpperRight,
            _ => SeriesLabelPosition::UpperLeft,
        }
    }

    /// The (x, y) pairs this chart plots for one table, before any filtering.
    pub fn points(&self, table: &BenchmarkTable) -> Vec<(f64, f64)> {
        let steps = table.steps().into_iter().map(|s| s as f64);
        match *self {
            Chart::Speedup => steps.zip(table.speedup()).collect(),
            Chart::ParallelTime => steps.zip(table.parallel_time()).collect(),
            Chart::ErrorTime => table
                .error()
                .into_iter()
                .zip(table.parallel_time())
                .collect(),
            Chart::Efficiency => steps.zip(table.efficiency()).collect(),
        }
    }

    /// Points that can be placed on this chart's axes: finite, and positive
    /// on every logarithmic axis.
    fn plottable(&self, table: &BenchmarkTable) -> Vec<(f64, f64)> {
        let log_y = self.log_y();
        self.points(table)
            .into_iter()
            .filter(|&(x, y)| x.is_finite() && y.is_finite())
            .filter(|&(x, y)| x > 0.0 && (!log_y || y > 0.0))
            .collect()
    }
}

/// Sizes in pixels, scaled from typographic points at the figure DPI.
#[derive(Debug, Clone, Copy)]
struct Style {
    title: f64,
    label: f64,
    tick: f64,
    legend: f64,
    line: u32,
    grid: u32,
    marker: u32,
    margin: u32,
    x_label_area: u32,
    y_label_area: u32,
}

impl Style {
    fn for_dpi(dpi: u32) -> Style {
        let pt = |points: f64| points * dpi as f64 / 72.0;
        let px = |points: f64| pt(points).round().max(1.0) as u32;
        Style {
            title: pt(12.0),
            label: pt(10.0),
            tick: pt(9.0),
            legend: pt(9.0),
            line: px(2.0),
            grid: px(0.8),
            marker: px(3.0),
            margin: px(6.0),
            x_label_area: px(32.0),
            y_label_area: px(44.0),
        }
    }
}

/// Draws `chart` from `tables` and writes it under the output directory,
/// replacing any previous file. Returns the written path.
pub fn render(chart: Chart, tables: &[BenchmarkTable], setting: &Setting) -> Result<PathBuf> {
    let path = setting.output_path(chart.file_name());
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    draw(chart, tables, setting, &path)
        .map_err(|e| Error::from(ErrorKind::Render(chart.file_name().to_string(), e.to_string())))?;

    info!("wrote {}", path.display());
    Ok(path)
}

fn draw(chart: Chart, tables: &[BenchmarkTable], setting: &Setting, path: &Path) -> DrawResult<()> {
    let style = Style::for_dpi(setting.dpi);
    let mut data = Vec::with_capacity(tables.len());
    for table in tables {
        match series::color_for(&setting.series, table.cores()) {
            Some(color) => {
                let s = CoreSeries {
                    cores: table.cores(),
                    color: color,
                };
                let points = chart.plottable(table);
                debug!(
                    "{}: {} of {} points plottable for {} cores",
                    chart.file_name(),
                    points.len(),
                    table.len(),
                    s.cores
                );
                data.push((s, points));
            }
            None => warn!("no color for {} cores, skipping its series", table.cores()),
        }
    }

    let xs = data
        .iter()
        .flat_map(|d| d.1.iter().map(|p| p.0))
        .collect::<Vec<_>>();
    let mut ys = data
        .iter()
        .flat_map(|d| d.1.iter().map(|p| p.1))
        .collect::<Vec<_>>();
    if let Some(reference) = chart.reference() {
        ys.push(reference.y);
    }
    let x_span = log_span(&xs);

    let root = BitMapBackend::new(path, setting.pixel_size()).into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .caption(chart.title(), ("sans-serif", style.title).into_font())
        .margin(style.margin)
        .x_label_area_size(style.x_label_area)
        .y_label_area_size(style.y_label_area);

    if chart.log_y() {
        let y_span = log_span(&ys);
        let mut ctx = builder.build_cartesian_2d(
            (x_span.0..x_span.1).log_scale(),
            (y_span.0..y_span.1).log_scale(),
        )?;
        plot(&mut ctx, chart, &data, &style, x_span)?;
    } else {
        let y_span = linear_span(&ys);
        let mut ctx =
            builder.build_cartesian_2d((x_span.0..x_span.1).log_scale(), y_span.0..y_span.1)?;
        plot(&mut ctx, chart, &data, &style, x_span)?;
    }

    root.present()?;
    Ok(())
}

fn plot<'a, DB, X, Y>(
    ctx: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    chart: Chart,
    data: &[(CoreSeries, Vec<(f64, f64)>)],
    style: &Style,
    x_span: (f64, f64),
) -> DrawResult<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    let grid = if chart.log_y() { 0.2 } else { 0.3 };
    let minor = if chart.log_y() {
        BLACK.mix(grid).stroke_width(1)
    } else {
        WHITE.mix(0.0).stroke_width(1)
    };
    let x_fmt = scientific;
    {
        let mut mesh = ctx.configure_mesh();
        mesh.x_desc(chart.x_desc())
            .y_desc(chart.y_desc())
            .axis_desc_style(("sans-serif", style.label).into_font())
            .label_style(("sans-serif", style.tick).into_font())
            .bold_line_style(BLACK.mix(grid).stroke_width(style.grid))
            .light_line_style(minor)
            .x_label_formatter(&x_fmt);
        if chart.log_y() {
            mesh.y_label_formatter(&x_fmt);
        }
        mesh.draw()?;
    }

    let size = if chart.connected() { style.marker } else { style.marker * 4 / 3 };
    let half = style.line as i32 * 6;
    for &(ref s, ref points) in data {
        let color = s.color.to_color();
        let line = color.stroke_width(style.line);
        let fill = color.filled();
        let connected = chart.connected();

        if connected {
            ctx.draw_series(LineSeries::new(points.iter().cloned(), line))?;
        }

        match chart.marker() {
            Marker::Circle => {
                let anno = ctx.draw_series(points.iter().map(|&p| Circle::new(p, size, fill)))?;
                anno.label(s.label());
                if connected {
                    anno.legend(move |(x, y)| {
                        EmptyElement::at((x, y))
                            + PathElement::new(vec![(-half, 0), (half, 0)], line)
                            + Circle::new((0, 0), size, fill)
                    });
                } else {
                    anno.legend(move |(x, y)| Circle::new((x, y), size, fill));
                }
            }
            Marker::Square => {
                let r = size as i32;
                let anno = ctx.draw_series(
                    points
                        .iter()
                        .map(|&p| EmptyElement::at(p) + Rectangle::new([(-r, -r), (r, r)], fill)),
                )?;
                anno.label(s.label()).legend(move |(x, y)| {
                    EmptyElement::at((x, y))
                        + PathElement::new(vec![(-half, 0), (half, 0)], line)
                        + Rectangle::new([(-r, -r), (r, r)], fill)
                });
            }
            Marker::Triangle => {
                let anno = ctx.draw_series(
                    points
                        .iter()
                        .map(|&p| TriangleMarker::new(p, size + size / 3, fill)),
                )?;
                anno.label(s.label()).legend(move |(x, y)| {
                    EmptyElement::at((x, y))
                        + PathElement::new(vec![(-half, 0), (half, 0)], line)
                        + TriangleMarker::new((0, 0), size + size / 3, fill)
                });
            }
        }
    }

    if let Some(reference) = chart.reference() {
        let line = GREY.mix(0.7).stroke_width((style.line * 3 / 4).max(1));
        let dash = style.line * 4;
        let anno = ctx.draw_series(DashedLineSeries::new(
            vec![(x_span.0, reference.y), (x_span.1, reference.y)],
            dash,
            dash / 2,
            line,
        ))?;
        if let Some(label) = reference.label {
            anno.label(label).legend(move |(x, y)| {
                PathElement::new(vec![(x - half, y), (x + half, y)], line)
            });
        }
    }

    ctx.configure_series_labels()
        .position(chart.legend_position())
        .label_font(("sans-serif", style.legend).into_font())
        .margin(style.margin)
        .legend_area_size(half as u32 * 2 + style.margin)
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.mix(0.3).stroke_width(1))
        .draw()?;

    Ok(())
}

fn scientific(v: &f64) -> String {
    format!("{:.0e}", v)
}

/// Logarithmic axis bounds covering `values`, padded by a quarter decade.
/// Non-positive values are ignored.
fn log_span(values: &[f64]) -> (f64, f64) {
    let positive = values.iter().cloned().filter(|v| *v > 0.0 && v.is_finite());
    let (lo, hi) = bounds(positive).unwrap_or((1.0, 10.0));
    let pad = 10f64.powf(0.25);
    (lo / pad, hi * pad)
}

/// Linear axis bounds covering `values`, padded by 5% of their range.
fn linear_span(values: &[f64]) -> (f64, f64) {
    let finite = values.iter().cloned().filter(|v| v.is_finite());
    let (lo, hi) = bounds(finite).unwrap_or((0.0, 1.0));
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad, hi + pad)
}

fn bounds<I: Iterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
