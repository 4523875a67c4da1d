//! Static PNG charts rendered once at startup and served from the plots directory.

use crate::aggregate;
use crate::dataset::Dataset;
use anyhow::{anyhow, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

pub const SUMMARY_IMAGE: &str = "summary.png";
pub const PLATFORM_DISTRIBUTION_IMAGE: &str = "platform_distribution.png";

/// Family every caption and axis label is drawn with.
const CHART_FONT_FAMILY: &str = "sans-serif";
static CHART_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static FONT_REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Make the embedded font available to plotters under [`CHART_FONT_FAMILY`].
fn register_chart_font() -> Result<()> {
    FONT_REGISTERED
        .get_or_init(|| {
            register_font(CHART_FONT_FAMILY, FontStyle::Normal, CHART_FONT)
                .map_err(|_| "InvalidFont".to_string())
        })
        .clone()
        .map_err(|err| anyhow!("register chart font: {err}"))
}

fn plot_err<E: Display>(err: E) -> anyhow::Error {
    anyhow!("plot rendering failed: {err}")
}

/// Write both static images into `dir`, creating it if needed.
pub fn render_static_images(dataset: &Dataset, dir: &Path) -> Result<Vec<PathBuf>> {
    register_chart_font()?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create plots directory {}", dir.display()))?;

    let summary = dir.join(SUMMARY_IMAGE);
    draw_summary(dataset, &summary)
        .with_context(|| format!("render {}", summary.display()))?;

    let distribution = dir.join(PLATFORM_DISTRIBUTION_IMAGE);
    draw_platform_distribution(dataset, &distribution)
        .with_context(|| format!("render {}", distribution.display()))?;

    info!(dir = %dir.display(), "static chart images written");
    Ok(vec![summary, distribution])
}

/// Three panels: sales per year, sales per platform, games per sales column.
fn draw_summary(dataset: &Dataset, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (2400, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let panels = root.split_evenly((1, 3));

    let yearly: Vec<(i32, f64)> = aggregate::yearly_sales(dataset)
        .into_iter()
        .filter_map(|g| g.key.map(|year| (year, g.total)))
        .collect();
    draw_line(&panels[0], "Global sales by year", &yearly)?;

    let platforms: Vec<(String, f64)> = aggregate::platform_sales(dataset)
        .into_iter()
        .map(|g| (g.key, g.total))
        .collect();
    draw_bars(&panels[1], "Global sales by platform", &platforms)?;

    let regions: Vec<(String, f64)> = aggregate::region_game_counts(dataset)
        .into_iter()
        .map(|c| (c.key.column_name().to_string(), c.count as f64))
        .collect();
    draw_bars(&panels[2], "Games per region", &regions)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Record count per platform, most common first.
fn draw_platform_distribution(dataset: &Dataset, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let counts: Vec<(String, f64)> = aggregate::platform_counts(dataset)
        .into_iter()
        .map(|c| (c.key, c.count as f64))
        .collect();
    draw_bars(&root, "Games per platform", &counts)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

fn y_ceiling(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max).max(1.0) * 1.05
}

fn draw_line(area: &Area<'_>, title: &str, points: &[(i32, f64)]) -> Result<()> {
    let (x_min, x_max) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.0, last.0.max(first.0 + 1)),
        _ => (0, 1),
    };
    let y_max = y_ceiling(points.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(area)
        .caption(title, (CHART_FONT_FAMILY, 28.0).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(plot_err)?;
    chart.configure_mesh().draw().map_err(plot_err)?;
    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(plot_err)?;
    Ok(())
}

fn draw_bars(area: &Area<'_>, title: &str, bars: &[(String, f64)]) -> Result<()> {
    let width = bars.len().max(1) as f64;
    let y_max = y_ceiling(bars.iter().map(|b| b.1));

    let mut chart = ChartBuilder::on(area)
        .caption(title, (CHART_FONT_FAMILY, 28.0).into_font())
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..width, 0.0..y_max)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len().max(1))
        .x_label_formatter(&|x: &f64| {
            bars.get(x.floor() as usize)
                .map(|b| b.0.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(plot_err)?;
    chart
        .draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
            let left = i as f64 + 0.1;
            let right = i as f64 + 0.9;
            Rectangle::new([(left, 0.0), (right, *value)], Palette99::pick(i).filled())
        }))
        .map_err(plot_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample;

    #[test]
    fn writes_both_images_into_a_fresh_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("static").join("plots");
        let written = render_static_images(&sample(), &dir).unwrap();
        assert_eq!(written.len(), 2);
        for path in written {
            let meta = std::fs::metadata(&path).unwrap();
            assert!(meta.len() > 0, "{} is empty", path.display());
        }
        assert!(dir.join(SUMMARY_IMAGE).exists());
        assert!(dir.join(PLATFORM_DISTRIBUTION_IMAGE).exists());
    }

    #[test]
    fn captions_put_ink_on_the_canvas() {
        register_chart_font().unwrap();
        let (w, h) = (240u32, 60u32);
        let mut buf = vec![255u8; (w * h * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
            let style = (CHART_FONT_FAMILY, 28.0).into_font().color(&BLACK);
            root.draw_text("Games per platform", &style, (5, 10)).unwrap();
            root.present().unwrap();
        }
        assert!(buf.iter().any(|&px| px < 128), "no text was rasterized");
    }

    #[test]
    fn empty_dataset_still_renders() {
        let tmp = tempfile::tempdir().unwrap();
        render_static_images(&Dataset::default(), tmp.path()).unwrap();
        assert!(tmp.path().join(SUMMARY_IMAGE).exists());
    }
}
