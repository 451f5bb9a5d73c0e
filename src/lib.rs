//! chartdash: a data-to-visualization mapping engine.
//!
//! Loads a tabular dataset (CSV or JSON records), validates a chart request
//! (kind + two field selections), renders it to a bitmap chart, and manages
//! the single active chart through create / replace / clear / export.

pub mod canvas;
pub mod catalog;
pub mod chart_spec;
pub mod dataset;
pub mod error;
pub mod export;
pub mod render;
pub mod session;

pub use chart_spec::{ChartKind, ChartSpec};
pub use dataset::{Dataset, DatasetStore};
pub use error::{ChartError, Result};
pub use render::ChartArtifact;
pub use session::VisualizationSession;

use serde::Deserialize;

/// Canvas dimensions for rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}
