use std::ops::Range;

use plotters::prelude::*;

use crate::error::{ChartError, Result};

/// Geometry for the two-series cartesian chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XyGeom {
    Line,
    Scatter,
}

/// One pie slice: display label (percentage already baked in) and magnitude.
#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

const LINE_COLOR: RGBColor = RGBColor(0x2f, 0x6f, 0xba);
const SCATTER_COLOR: RGBColor = RGBColor(0x8b, 0x42, 0x11);
const BAR_COLOR: RGBColor = RGBColor(0x4c, 0xaf, 0x6e);

/// Fixed-size RGB bitmap canvas the chart kinds draw onto.
pub struct Canvas {
    buffer: Vec<u8>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            buffer: vec![0u8; (width * height * 3) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Draw a line or scatter series over a continuous x axis.
    pub fn draw_xy(
        &mut self,
        title: &str,
        x_label: &str,
        y_label: &str,
        points: &[(f64, f64)],
        geom: XyGeom,
    ) -> Result<()> {
        if points.is_empty() {
            return Err(ChartError::Render("no data points to draw".to_string()));
        }
        let x_range = padded_range(points.iter().map(|p| p.0));
        let y_range = padded_range(points.iter().map(|p| p.1));

        let (width, height) = (self.width, self.height);
        let root =
            BitMapBackend::with_buffer(&mut self.buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(title, ("sans-serif", 20))
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(x_label)
            .y_desc(y_label)
            .draw()
            .map_err(draw_err)?;

        match geom {
            XyGeom::Line => {
                chart
                    .draw_series(LineSeries::new(
                        points.to_vec(),
                        LINE_COLOR.stroke_width(2),
                    ))
                    .map_err(draw_err)?;
                // Point markers on top of the line, matching the dashboard's
                // marker-per-sample look.
                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|&(x, y)| Circle::new((x, y), 3, LINE_COLOR.filled())),
                    )
                    .map_err(draw_err)?;
            }
            XyGeom::Scatter => {
                chart
                    .draw_series(
                        points
                            .iter()
                            .map(|&(x, y)| Circle::new((x, y), 5, SCATTER_COLOR.filled())),
                    )
                    .map_err(draw_err)?;
            }
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }

    /// Draw one bar per category over a categorical x axis.
    pub fn draw_bars(
        &mut self,
        title: &str,
        x_label: &str,
        y_label: &str,
        categories: &[String],
        values: &[f64],
    ) -> Result<()> {
        if categories.is_empty() {
            return Err(ChartError::Render("no data points to draw".to_string()));
        }

        let x_range = 0.0..(categories.len() as f64);
        // Bars rise from the zero baseline, so the range must include it.
        let y_range = padded_range(values.iter().copied().chain(std::iter::once(0.0)));

        let (width, height) = (self.width, self.height);
        let root =
            BitMapBackend::with_buffer(&mut self.buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(title, ("sans-serif", 20))
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        let tick_labels = categories.to_vec();
        chart
            .configure_mesh()
            .x_labels(categories.len())
            .x_label_formatter(&|x| {
                let idx = *x as usize;
                tick_labels.get(idx).cloned().unwrap_or_default()
            })
            .x_desc(x_label)
            .y_desc(y_label)
            .draw()
            .map_err(draw_err)?;

        let bar_width = 0.8;
        for (idx, &value) in values.iter().enumerate() {
            let center = idx as f64 + 0.5;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [
                        (center - bar_width / 2.0, 0.0),
                        (center + bar_width / 2.0, value),
                    ],
                    BAR_COLOR.filled(),
                )))
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }

    /// Draw a pie chart: one filled sector per slice, labels outside the rim.
    pub fn draw_pie(&mut self, title: &str, slices: &[PieSlice]) -> Result<()> {
        if slices.is_empty() {
            return Err(ChartError::Render("no data points to draw".to_string()));
        }
        let total: f64 = slices.iter().map(|s| s.value).sum();
        if total <= 0.0 {
            return Err(ChartError::Render(
                "pie magnitudes sum to zero".to_string(),
            ));
        }

        let (width, height) = (self.width, self.height);
        let root =
            BitMapBackend::with_buffer(&mut self.buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let root = root.titled(title, ("sans-serif", 20)).map_err(draw_err)?;

        let (area_w, area_h) = root.dim_in_pixel();
        let center = (area_w as i32 / 2, area_h as i32 / 2);
        let radius = f64::from(area_w.min(area_h)) * 0.32;

        // Sectors start at twelve o'clock and sweep clockwise.
        let mut start = 0.0f64;
        for (idx, slice) in slices.iter().enumerate() {
            let sweep = slice.value / total * std::f64::consts::TAU;
            let color = Palette99::pick(idx);

            let steps = ((sweep / 0.02).ceil() as usize).max(2);
            let mut points = Vec::with_capacity(steps + 2);
            points.push(center);
            for step in 0..=steps {
                let angle = start + sweep * (step as f64 / steps as f64);
                points.push((
                    center.0 + (radius * angle.sin()).round() as i32,
                    center.1 - (radius * angle.cos()).round() as i32,
                ));
            }
            root.draw(&Polygon::new(points, color.filled()))
                .map_err(draw_err)?;

            let mid = start + sweep / 2.0;
            let label_pos = (
                center.0 + (radius * 1.2 * mid.sin()).round() as i32,
                center.1 - (radius * 1.2 * mid.cos()).round() as i32,
            );
            root.draw(&Text::new(
                slice.label.clone(),
                label_pos,
                ("sans-serif", 14).into_font(),
            ))
            .map_err(draw_err)?;

            start += sweep;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }

    /// Hand over the raw RGB8 pixels.
    pub fn into_rgb(self) -> Vec<u8> {
        self.buffer
    }
}

/// Range over the data with 5% padding; degenerate spans widen by one unit
/// on each side.
fn padded_range(data: impl Iterator<Item = f64>) -> Range<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in data {
        min = min.min(v);
        max = max.max(v);
    }
    if min == max {
        (min - 1.0)..(max + 1.0)
    } else {
        let padding = (max - min) * 0.05;
        (min - padding)..(max + padding)
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}
