use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::catalog;
use crate::dataset::Dataset;
use crate::error::{ChartError, Result};

/// The closed set of supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Scatter,
    ];

    /// Human-readable label, also used in chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Scatter => "Scatter Plot",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    /// Accepts short names ("bar") and label forms ("Bar Chart"),
    /// case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "bar" | "barchart" => Ok(ChartKind::Bar),
            "line" | "linechart" => Ok(ChartKind::Line),
            "pie" | "piechart" => Ok(ChartKind::Pie),
            "scatter" | "scatterplot" => Ok(ChartKind::Scatter),
            _ => Err(ChartError::Parse(format!("unknown chart kind '{s}'"))),
        }
    }
}

/// A validated visualization request: chart kind plus two field selections.
///
/// Construction is the boundary where free-form UI strings become checked
/// values; rendering never sees an empty or unknown field name.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    kind: ChartKind,
    x_field: String,
    y_field: String,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, x_field: &str, y_field: &str, dataset: &Dataset) -> Result<Self> {
        if x_field.trim().is_empty() || y_field.trim().is_empty() {
            return Err(ChartError::MissingSelection);
        }
        for field in [x_field, y_field] {
            if !catalog::contains(dataset, field) {
                return Err(ChartError::UnknownColumn(field.to_string()));
            }
        }
        Ok(ChartSpec {
            kind,
            x_field: x_field.to_string(),
            y_field: y_field.to_string(),
        })
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn x_field(&self) -> &str {
        &self.x_field
    }

    pub fn y_field(&self) -> &str {
        &self.y_field
    }

    /// Chart title derived from the selection.
    pub fn title(&self) -> String {
        match self.kind {
            ChartKind::Bar => format!("{} by {} ({})", self.y_field, self.x_field, self.kind.label()),
            ChartKind::Line | ChartKind::Scatter => {
                format!("{} vs {} ({})", self.y_field, self.x_field, self.kind.label())
            }
            ChartKind::Pie => format!("{} Distribution ({})", self.y_field, self.kind.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_rows(
            vec!["A".to_string(), "B".to_string()],
            vec![vec!["1".to_string(), "4".to_string()]],
        )
        .unwrap()
    }

    #[test]
    fn test_kind_from_short_name() {
        assert_eq!("bar".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("scatter".parse::<ChartKind>().unwrap(), ChartKind::Scatter);
    }

    #[test]
    fn test_kind_from_label_form() {
        assert_eq!("Bar Chart".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("Line Chart".parse::<ChartKind>().unwrap(), ChartKind::Line);
        assert_eq!("Pie Chart".parse::<ChartKind>().unwrap(), ChartKind::Pie);
        assert_eq!(
            "Scatter Plot".parse::<ChartKind>().unwrap(),
            ChartKind::Scatter
        );
    }

    #[test]
    fn test_kind_unknown_string() {
        let result = "histogram".parse::<ChartKind>();
        assert!(matches!(result, Err(ChartError::Parse(_))));
    }

    #[test]
    fn test_spec_titles() {
        let ds = dataset();
        let spec = ChartSpec::new(ChartKind::Bar, "A", "B", &ds).unwrap();
        assert_eq!(spec.title(), "B by A (Bar Chart)");

        let spec = ChartSpec::new(ChartKind::Line, "A", "B", &ds).unwrap();
        assert_eq!(spec.title(), "B vs A (Line Chart)");

        let spec = ChartSpec::new(ChartKind::Scatter, "A", "B", &ds).unwrap();
        assert_eq!(spec.title(), "B vs A (Scatter Plot)");

        let spec = ChartSpec::new(ChartKind::Pie, "A", "B", &ds).unwrap();
        assert_eq!(spec.title(), "B Distribution (Pie Chart)");
    }

    #[test]
    fn test_spec_empty_selection() {
        let ds = dataset();
        let result = ChartSpec::new(ChartKind::Line, "", "B", &ds);
        assert!(matches!(result, Err(ChartError::MissingSelection)));

        let result = ChartSpec::new(ChartKind::Line, "A", "  ", &ds);
        assert!(matches!(result, Err(ChartError::MissingSelection)));
    }

    #[test]
    fn test_spec_unknown_column() {
        let ds = dataset();
        let result = ChartSpec::new(ChartKind::Line, "A", "C", &ds);
        assert!(matches!(result, Err(ChartError::UnknownColumn(name)) if name == "C"));
    }
}
