use std::io;

use thiserror::Error;

/// Error taxonomy for the mapping engine.
///
/// Every variant is recoverable at the caller's boundary: a failed operation
/// reports what went wrong and leaves prior state (active dataset, active
/// chart) untouched.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The source could not be parsed into a dataset, or a free-form input
    /// string (e.g. a chart-kind name) was not recognized.
    #[error("parse error: {0}")]
    Parse(String),

    /// The parsed dataset has fewer than two columns.
    #[error("dataset must contain at least two columns (found {found})")]
    Schema { found: usize },

    /// A selected field does not exist in the active dataset.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// One or both field selections are empty.
    #[error("both an x and a y field must be selected")]
    MissingSelection,

    /// A chart was requested before any dataset was loaded.
    #[error("no dataset loaded")]
    NoDataset,

    /// Column data is unusable for the requested chart kind, e.g. textual
    /// values on a magnitude axis or a negative pie slice.
    #[error("invalid value in column '{column}': {message}")]
    InvalidValue { column: String, message: String },

    /// Export was requested with no active chart.
    #[error("no chart to export")]
    NoArtifact,

    /// A file could not be read or written.
    #[error("i/o error on '{path}'")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The plotting backend or image encoder failed.
    #[error("render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;

impl ChartError {
    pub(crate) fn io(path: &std::path::Path, source: io::Error) -> Self {
        ChartError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ChartError::Schema { found: 1 };
        assert_eq!(
            err.to_string(),
            "dataset must contain at least two columns (found 1)"
        );

        let err = ChartError::UnknownColumn("price".to_string());
        assert_eq!(err.to_string(), "unknown column 'price'");

        let err = ChartError::InvalidValue {
            column: "amount".to_string(),
            message: "negative magnitude -5".to_string(),
        };
        assert!(err.to_string().contains("amount"));
        assert!(err.to_string().contains("negative magnitude"));
    }

    #[test]
    fn test_io_carries_source() {
        use std::error::Error as _;
        let err = ChartError::io(
            std::path::Path::new("/no/such/file"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/no/such/file"));
        assert!(err.source().is_some());
    }
}
