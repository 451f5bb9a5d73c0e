//! Chart renderer: turns a validated [`ChartSpec`] plus a dataset into a
//! [`ChartArtifact`], dispatching on the chart kind.

use crate::canvas::{Canvas, PieSlice, XyGeom};
use crate::chart_spec::{ChartKind, ChartSpec};
use crate::dataset::{Column, Dataset};
use crate::error::{ChartError, Result};
use crate::RenderOptions;

/// The rendered output of one chart request: an RGB8 pixel buffer plus the
/// title and axis metadata that describe it.
#[derive(Debug, Clone)]
pub struct ChartArtifact {
    kind: ChartKind,
    title: String,
    x_label: Option<String>,
    y_label: Option<String>,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ChartArtifact {
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// X axis label; pie charts have no axes.
    pub fn x_label(&self) -> Option<&str> {
        self.x_label.as_deref()
    }

    pub fn y_label(&self) -> Option<&str> {
        self.y_label.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB8 pixels, row-major, `width * height * 3` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Render a chart. Pure with respect to the dataset: reads, never mutates.
pub fn render(spec: &ChartSpec, dataset: &Dataset, options: &RenderOptions) -> Result<ChartArtifact> {
    // Field existence was checked at spec construction, but the active
    // dataset may have been replaced since; look columns up again.
    let x_col = dataset.column(spec.x_field())?;
    let y_col = dataset.column(spec.y_field())?;

    let title = spec.title();
    let mut canvas = Canvas::new(options.width, options.height);
    let mut axes = Some((spec.x_field().to_string(), spec.y_field().to_string()));

    match spec.kind() {
        ChartKind::Line | ChartKind::Scatter => {
            let xs = numeric_values(x_col)?;
            let ys = numeric_values(y_col)?;
            let points: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
            let geom = if spec.kind() == ChartKind::Line {
                XyGeom::Line
            } else {
                XyGeom::Scatter
            };
            canvas.draw_xy(&title, spec.x_field(), spec.y_field(), &points, geom)?;
        }
        ChartKind::Bar => {
            let categories = x_col.labels();
            let values = numeric_values(y_col)?;
            canvas.draw_bars(&title, spec.x_field(), spec.y_field(), &categories, values)?;
        }
        ChartKind::Pie => {
            let values = magnitudes(y_col)?;
            let percentages =
                slice_percentages(&values).ok_or_else(|| ChartError::InvalidValue {
                    column: y_col.name.clone(),
                    message: "magnitudes sum to zero".to_string(),
                })?;
            let slices: Vec<PieSlice> = x_col
                .labels()
                .into_iter()
                .zip(values.iter().copied())
                .zip(percentages)
                .map(|((label, value), pct)| PieSlice {
                    label: format!("{label} ({pct:.1}%)"),
                    value,
                })
                .collect();
            canvas.draw_pie(&title, &slices)?;
            axes = None;
        }
    }

    let (x_label, y_label) = match axes {
        Some((x, y)) => (Some(x), Some(y)),
        None => (None, None),
    };

    Ok(ChartArtifact {
        kind: spec.kind(),
        title,
        x_label,
        y_label,
        width: canvas.width(),
        height: canvas.height(),
        pixels: canvas.into_rgb(),
    })
}

/// The column's numeric values, or `InvalidValue` for a textual column fed
/// to a magnitude axis.
fn numeric_values(column: &Column) -> Result<&[f64]> {
    column.numeric().ok_or_else(|| ChartError::InvalidValue {
        column: column.name.clone(),
        message: "column is not numeric".to_string(),
    })
}

/// Pie magnitudes: numeric, finite, and non-negative.
fn magnitudes(column: &Column) -> Result<Vec<f64>> {
    let values = numeric_values(column)?;
    for &v in values {
        if !v.is_finite() || v < 0.0 {
            return Err(ChartError::InvalidValue {
                column: column.name.clone(),
                message: format!("magnitude {v} must be a non-negative number"),
            });
        }
    }
    Ok(values.to_vec())
}

/// Slice percentages: `value / sum * 100` per slice, or `None` when the sum
/// is not positive and the shares are undefined.
fn slice_percentages(values: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return None;
    }
    Some(values.iter().map(|v| v / total * 100.0).collect())
}
