//! PNG chart rendering with plotters.
//!
//! Three chart families:
//! - Metric vs problem size per operation, one error-bar series per dtype
//! - Speedup vs problem size relative to a baseline operation
//! - Roofline scatter with the two-regime ceiling curve

use crate::aggregator::Metric;
use crate::derived::{RooflineCeiling, SpeedupTable};
use crate::parser::schema::{IntensityPoint, SummaryRow};
use crate::utils::config::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use crate::utils::error::RenderError;
use log::{debug, info};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const TITLE_FONT_SIZE: u32 = 24;
const LABEL_FONT_SIZE: u32 = 16;
const EMPTY_MESSAGE: &str = "No matching data to plot";

/// Chart configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::DrawingFailed(err.to_string())
}

/// Make an operation name safe to embed in a file name
pub fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Padded `[min, max]` of `values`, never zero-width
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if lo > hi {
        return (0.0, 1.0);
    }

    let span = hi - lo;
    let pad = if span > 0.0 { span * 0.05 } else { lo.abs().max(1.0) * 0.1 };
    (lo - pad, hi + pad)
}

/// X coordinate for a problem size: log2 when every size is positive
fn size_axis(log2: bool, size: i64) -> f64 {
    if log2 {
        (size as f64).log2()
    } else {
        size as f64
    }
}

fn format_size_tick(log2: bool, x: f64) -> String {
    if log2 {
        format!("{:.0}", x.exp2())
    } else {
        format!("{:.0}", x)
    }
}

fn ensure_dir(dir: &Path) -> Result<(), RenderError> {
    if !dir.exists() {
        debug!("Creating output directory: {}", dir.display());
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Fill the area and write a centred notice instead of a blank chart
fn draw_empty<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    title: &str,
) -> Result<(), RenderError> {
    let (width, height) = root.dim_in_pixel();
    let title_style = ("sans-serif", TITLE_FONT_SIZE).into_font();
    let body_style = TextStyle::from(("sans-serif", LABEL_FONT_SIZE).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));

    root.draw(&Text::new(title.to_string(), (20, 20), title_style))
        .map_err(draw_err)?;
    root.draw(&Text::new(
        EMPTY_MESSAGE,
        (width as i32 / 2, height as i32 / 2),
        body_style,
    ))
    .map_err(draw_err)?;
    Ok(())
}

/// Render one `<metric>_<op>.png` chart per operation
///
/// **Public** - used by the plot command for gflops and gbps
pub fn render_metric_charts(
    rows: &[SummaryRow],
    metric: Metric,
    outdir: &Path,
    config: &RenderConfig,
) -> Result<Vec<PathBuf>, RenderError> {
    ensure_dir(outdir)?;

    let mut by_op: BTreeMap<&str, BTreeMap<&str, Vec<&SummaryRow>>> = BTreeMap::new();
    for row in rows {
        by_op
            .entry(row.op.as_str())
            .or_default()
            .entry(row.dtype.as_str())
            .or_default()
            .push(row);
    }

    let mut written = Vec::with_capacity(by_op.len());

    for (op, by_dtype) in &by_op {
        let path = outdir.join(format!("{}_{}.png", metric.name(), file_stem(op)));
        let title = format!("{} - {}", op, metric.label());
        draw_metric_chart(&path, &title, metric, by_dtype, config)?;
        info!("✓ Chart written to: {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn draw_metric_chart(
    path: &Path,
    title: &str,
    metric: Metric,
    by_dtype: &BTreeMap<&str, Vec<&SummaryRow>>,
    config: &RenderConfig,
) -> Result<(), RenderError> {
    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let all_rows: Vec<&SummaryRow> = by_dtype.values().flatten().copied().collect();
    if all_rows.is_empty() {
        draw_empty(&root, title)?;
        return root.present().map_err(draw_err);
    }

    let log2 = all_rows.iter().all(|row| row.size > 0);
    let x_range = padded_range(all_rows.iter().map(|row| size_axis(log2, row.size)));
    let y_range = padded_range(all_rows.iter().flat_map(|row| {
        let (lo, hi) = metric.of(row).bounds();
        [lo, hi]
    }));

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Problem size (elements or M·N·K)")
        .y_desc(metric.label())
        .x_label_formatter(&|x| format_size_tick(log2, *x))
        .label_style(("sans-serif", LABEL_FONT_SIZE))
        .draw()
        .map_err(draw_err)?;

    for (idx, (dtype, series)) in by_dtype.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        let points: Vec<(f64, &SummaryRow)> = series
            .iter()
            .map(|row| (size_axis(log2, row.size), *row))
            .collect();

        chart
            .draw_series(LineSeries::new(
                points.iter().map(|(x, row)| (*x, metric.of(row).median)),
                color.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label(dtype.to_string())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart
            .draw_series(points.iter().map(|(x, row)| {
                let summary = metric.of(row);
                let (lo, hi) = summary.bounds();
                ErrorBar::new_vertical(*x, lo, summary.median, hi, color.filled(), 6)
            }))
            .map_err(draw_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)
}

/// Render `speedup_vs_<baseline>.png`
///
/// Baseline sizes are drawn as a reference line at 1.0 per dtype.
pub fn render_speedup_chart(
    rows: &[SummaryRow],
    speedups: &SpeedupTable,
    baseline: &str,
    outdir: &Path,
    config: &RenderConfig,
) -> Result<PathBuf, RenderError> {
    ensure_dir(outdir)?;

    let path = outdir.join(format!("speedup_vs_{}.png", file_stem(baseline)));
    let title = format!("Speedup vs {}", baseline);

    let mut reference: BTreeMap<&str, Vec<i64>> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.op == baseline) {
        reference.entry(row.dtype.as_str()).or_default().push(row.size);
    }

    let mut series: BTreeMap<(&str, &str), Vec<(i64, f64)>> = BTreeMap::new();
    for row in &speedups.rows {
        series
            .entry((row.op.as_str(), row.dtype.as_str()))
            .or_default()
            .push((row.size, row.speedup));
    }

    let root = BitMapBackend::new(&path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    if reference.is_empty() && series.is_empty() {
        draw_empty(&root, &title)?;
        root.present().map_err(draw_err)?;
        return Ok(path.clone());
    }

    let sizes: Vec<i64> = reference
        .values()
        .flatten()
        .copied()
        .chain(series.values().flatten().map(|(size, _)| *size))
        .collect();
    let log2 = sizes.iter().all(|size| *size > 0);
    let x_range = padded_range(sizes.iter().map(|size| size_axis(log2, *size)));
    let y_range = padded_range(
        series
            .values()
            .flatten()
            .map(|(_, speedup)| *speedup)
            .chain(std::iter::once(1.0)),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", TITLE_FONT_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Problem size")
        .y_desc("Speedup (×)")
        .x_label_formatter(&|x| format_size_tick(log2, *x))
        .label_style(("sans-serif", LABEL_FONT_SIZE))
        .draw()
        .map_err(draw_err)?;

    for (dtype, sizes) in &reference {
        let style = BLACK.mix(0.6).stroke_width(1);
        chart
            .draw_series(LineSeries::new(
                sizes.iter().map(|size| (size_axis(log2, *size), 1.0)),
                style,
            ))
            .map_err(draw_err)?
            .label(format!("{} ({})", baseline, dtype))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    for (idx, ((op, dtype), points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        chart
            .draw_series(LineSeries::new(
                points.iter().map(|(size, speedup)| (size_axis(log2, *size), *speedup)),
                color.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label(format!("{} ({})", op, dtype))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart
            .draw_series(points.iter().map(|(size, speedup)| {
                Circle::new((size_axis(log2, *size), *speedup), 4, color.filled())
            }))
            .map_err(draw_err)?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    info!("✓ Chart written to: {}", path.display());

    Ok(path.clone())
}

/// Render `roofline.png` on log-log axes
///
/// Points with a non-positive coordinate cannot sit on log axes and are skipped.
/// The ridge point, where the two regimes meet, is marked on the ceiling.
pub fn render_roofline_chart(
    points: &[IntensityPoint],
    ceiling: &RooflineCeiling,
    outdir: &Path,
    config: &RenderConfig,
) -> Result<PathBuf, RenderError> {
    ensure_dir(outdir)?;

    let path = outdir.join("roofline.png");
    let curve = ceiling.sweep();
    let ridge = (ceiling.ridge_point(), ceiling.peak_flops);

    let mut series: BTreeMap<(&str, &str), Vec<(f64, f64)>> = BTreeMap::new();
    for point in points.iter().filter(|p| p.intensity > 0.0 && p.gflops > 0.0) {
        series
            .entry((point.op.as_str(), point.dtype.as_str()))
            .or_default()
            .push((point.intensity, point.gflops));
    }

    let all_points = || {
        curve
            .iter()
            .chain(series.values().flatten())
            .chain(std::iter::once(&ridge))
    };
    let x_lo = all_points().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let x_hi = all_points().map(|(x, _)| *x).fold(f64::NEG_INFINITY, f64::max);
    let y_lo = all_points().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let y_hi = all_points().map(|(_, y)| *y).fold(f64::NEG_INFINITY, f64::max);

    let root = BitMapBackend::new(&path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Roofline", ("sans-serif", TITLE_FONT_SIZE))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (x_lo * 0.8..x_hi * 1.25).log_scale(),
            (y_lo * 0.8..y_hi * 1.5).log_scale(),
        )
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Arithmetic intensity (F/B)")
        .y_desc("Attained performance (GFLOP/s)")
        .label_style(("sans-serif", LABEL_FONT_SIZE))
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(curve.iter().copied(), BLUE.stroke_width(2)))
        .map_err(draw_err)?
        .label(ceiling.to_string())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    chart
        .draw_series(std::iter::once(
            EmptyElement::at(ridge)
                + Circle::new((0, 0), 5, BLUE.filled())
                + Text::new(
                    format!("ridge {:.2} F/B", ridge.0),
                    (8, 8),
                    ("sans-serif", LABEL_FONT_SIZE).into_font(),
                ),
        ))
        .map_err(draw_err)?;

    for (idx, ((op, dtype), points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx + 1).mix(0.9);
        chart
            .draw_series(points.iter().map(|pt| Circle::new(*pt, 4, color.filled())))
            .map_err(draw_err)?
            .label(format!("{} ({})", op, dtype))
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    info!("✓ Roofline written to: {}", path.display());

    Ok(path.clone())
}
