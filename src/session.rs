use crate::chart_spec::{ChartKind, ChartSpec};
use crate::dataset::DatasetStore;
use crate::error::{ChartError, Result};
use crate::render::{self, ChartArtifact};
use crate::RenderOptions;

/// Lifecycle holder for the single active chart.
///
/// Two states: empty, or holding exactly one [`ChartArtifact`]. A successful
/// generate replaces the prior artifact; a failed one leaves it untouched.
#[derive(Debug, Default)]
pub struct VisualizationSession {
    artifact: Option<ChartArtifact>,
    options: RenderOptions,
}

impl VisualizationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        VisualizationSession {
            artifact: None,
            options,
        }
    }

    /// Validate the selection against the store's active dataset, render,
    /// and install the result as the current chart.
    pub fn generate(
        &mut self,
        store: &DatasetStore,
        kind: ChartKind,
        x_field: &str,
        y_field: &str,
    ) -> Result<&ChartArtifact> {
        let dataset = store.active().ok_or(ChartError::NoDataset)?;
        let spec = ChartSpec::new(kind, x_field, y_field, dataset)?;
        let artifact = render::render(&spec, dataset, &self.options)?;
        log::info!("generated chart: {}", artifact.title());
        Ok(self.artifact.insert(artifact))
    }

    /// Drop the current chart. Idempotent: clearing an empty session is a
    /// no-op.
    pub fn clear(&mut self) {
        if self.artifact.take().is_some() {
            log::debug!("cleared active chart");
        }
    }

    /// The current chart, if one is active.
    pub fn current(&self) -> Option<&ChartArtifact> {
        self.artifact.as_ref()
    }
}
