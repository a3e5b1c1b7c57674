//! Scatter plot rendering.
//!
//! One figure per run: object id on the x axis, absolute magnitude on the
//! y axis, styled entirely from the merged config. Rendering goes through
//! Plotters' SVG backend so labels stay text elements and no font
//! rasterizer is involved.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::info;

use crate::config::Config;
use crate::data::Dataset;
use crate::error::AppError;

/// Pixels per configured "inch" of figure size.
const PX_PER_INCH: f64 = 100.0;

/// Rotated tick labels kick in at this configured angle. Plotters only
/// supports quarter-turn text transforms, so anything from 45 degrees up
/// renders as a vertical label.
const ROTATE_THRESHOLD_DEG: f64 = 45.0;

/// Figure styling resolved from the merged config. Every field is required
/// in some config layer; the loader applies no defaults.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    pub width_px: u32,
    pub height_px: u32,
    pub color: RGBColor,
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub xtick_rotation_deg: f64,
    pub xtick_size_pt: f64,
    pub default_save_path: PathBuf,
}

impl PlotStyle {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let width_in = config.get_f64("plot_size_w")?;
        let height_in = config.get_f64("plot_size_h")?;
        if width_in <= 0.0 || height_in <= 0.0 {
            return Err(AppError::config(
                "plot_size_w and plot_size_h must be positive",
            ));
        }

        Ok(Self {
            width_px: (width_in * PX_PER_INCH).round() as u32,
            height_px: (height_in * PX_PER_INCH).round() as u32,
            color: parse_color(config.get_str("plot_color")?)?,
            title: config.get_str("plot_title")?.to_string(),
            xlabel: config.get_str("plot_xlabel")?.to_string(),
            ylabel: config.get_str("plot_ylabel")?.to_string(),
            xtick_rotation_deg: config.get_f64("plot_xtick_rotation")?,
            xtick_size_pt: config.get_f64("plot_xtick_size")?,
            default_save_path: PathBuf::from(config.get_str("plot_default_save_path")?),
        })
    }
}

/// Map a matplotlib-style color name to an RGB value.
pub fn parse_color(name: &str) -> Result<RGBColor, AppError> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" | "k" => RGBColor(0, 0, 0),
        "white" | "w" => RGBColor(255, 255, 255),
        "red" | "r" => RGBColor(255, 0, 0),
        "green" | "g" => RGBColor(0, 128, 0),
        "blue" | "b" => RGBColor(0, 0, 255),
        "cyan" | "c" => RGBColor(0, 255, 255),
        "magenta" | "m" => RGBColor(255, 0, 255),
        "yellow" | "y" => RGBColor(255, 200, 0),
        "orange" => RGBColor(255, 165, 0),
        "purple" => RGBColor(128, 0, 128),
        "teal" => RGBColor(0, 128, 128),
        "navy" => RGBColor(0, 0, 128),
        "gray" | "grey" => RGBColor(128, 128, 128),
        other => {
            return Err(AppError::plot(format!("Unknown plot_color '{other}'")));
        }
    };
    Ok(color)
}

/// Where the figure lands: explicit caller path wins over the configured
/// default.
pub fn target_path(style: &PlotStyle, save_path: Option<&Path>) -> PathBuf {
    save_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| style.default_save_path.clone())
}

/// Render the scatter plot and save it as SVG.
///
/// Rows without a magnitude are skipped. Returns the path the figure was
/// written to; any rendering or I/O failure is a fatal plot error.
pub fn render_scatter(
    dataset: &Dataset,
    style: &PlotStyle,
    save_path: Option<&Path>,
) -> Result<PathBuf, AppError> {
    let path = target_path(style, save_path);

    let mut ids = Vec::new();
    let mut points = Vec::new();
    for row in dataset.rows() {
        if let Some(magnitude) = row.absolute_magnitude_h {
            points.push((ids.len() as f64, magnitude));
            ids.push(row.id.clone());
        }
    }
    if points.is_empty() {
        return Err(AppError::plot("No magnitude values to plot"));
    }

    let y_lo = points.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
    let y_hi = points
        .iter()
        .map(|&(_, y)| y)
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = ((y_hi - y_lo) * 0.05).max(0.5);

    {
        let root = SVGBackend::new(&path, (style.width_px, style.height_px)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&style.title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(70)
            .y_label_area_size(55)
            .build_cartesian_2d(-0.5..(points.len() as f64 - 0.5), (y_lo - pad)..(y_hi + pad))
            .map_err(draw_error)?;

        let mut tick_font = ("sans-serif", style.xtick_size_pt as u32).into_font();
        if style.xtick_rotation_deg.abs() >= ROTATE_THRESHOLD_DEG {
            tick_font = tick_font.transform(FontTransform::Rotate90);
        }

        chart
            .configure_mesh()
            .x_desc(&style.xlabel)
            .y_desc(&style.ylabel)
            .x_labels(ids.len().min(30))
            .x_label_style(tick_font)
            .x_label_formatter(&|x| {
                // Only integer positions get a label, and it is the object id.
                let i = x.round();
                if (x - i).abs() > 1e-6 || i < 0.0 {
                    return String::new();
                }
                ids.get(i as usize).cloned().unwrap_or_default()
            })
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, style.color.filled())),
            )
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    info!(path = %path.display(), "figure saved");
    Ok(path)
}

fn draw_error<E: std::fmt::Display>(err: E) -> AppError {
    AppError::plot(format!("Failed to render chart: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::test_row;
    use crate::error::ErrorKind;
    use std::collections::BTreeMap;
    use serde_yaml::Value;

    fn style_config() -> Config {
        let mut values = BTreeMap::new();
        values.insert("plot_size_w".to_string(), Value::from(8.0));
        values.insert("plot_size_h".to_string(), Value::from(6));
        values.insert("plot_color".to_string(), Value::from("teal"));
        values.insert("plot_title".to_string(), Value::from("NEO magnitudes"));
        values.insert("plot_xlabel".to_string(), Value::from("Object id"));
        values.insert("plot_ylabel".to_string(), Value::from("Absolute magnitude (H)"));
        values.insert("plot_xtick_rotation".to_string(), Value::from(90));
        values.insert("plot_xtick_size".to_string(), Value::from(10));
        values.insert(
            "plot_default_save_path".to_string(),
            Value::from("neo_scatter.svg"),
        );
        Config::from_values(values)
    }

    #[test]
    fn style_resolves_from_config() {
        let style = PlotStyle::from_config(&style_config()).unwrap();
        assert_eq!(style.width_px, 800);
        assert_eq!(style.height_px, 600);
        assert_eq!(style.color, RGBColor(0, 128, 128));
        assert_eq!(style.default_save_path, PathBuf::from("neo_scatter.svg"));
    }

    #[test]
    fn unknown_color_name_is_rejected() {
        let err = parse_color("chartreuse-ish").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Plot);
    }

    #[test]
    fn explicit_save_path_wins_over_default() {
        let style = PlotStyle::from_config(&style_config()).unwrap();
        let explicit = Path::new("/tmp/override.svg");
        assert_eq!(target_path(&style, Some(explicit)), explicit);
        assert_eq!(target_path(&style, None), PathBuf::from("neo_scatter.svg"));
    }

    #[test]
    fn renders_a_figure_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("scatter.svg");
        let style = PlotStyle::from_config(&style_config()).unwrap();
        let dataset = Dataset::from_rows(vec![
            test_row("2465633", Some(21.1)),
            test_row("3426410", Some(24.3)),
            test_row("3553060", None),
            test_row("54016476", Some(18.9)),
        ]);

        let path = render_scatter(&dataset, &style, Some(&out)).unwrap();
        assert_eq!(path, out);
        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.contains("<svg"), "expected an SVG document");
    }

    #[test]
    fn all_missing_magnitudes_cannot_be_plotted() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("scatter.svg");
        let style = PlotStyle::from_config(&style_config()).unwrap();
        let dataset = Dataset::from_rows(vec![test_row("a", None)]);

        let err = render_scatter(&dataset, &style, Some(&out)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Plot);
    }
}
