use std::fs::File;
use std::path::Path;

use serde_json::Value;

use crate::error::{ChartError, Result};

/// Cell values of a single column, typed uniformly.
///
/// A column is numeric iff every source cell parses as `f64`; anything else
/// (including empty cells) makes the whole column textual. No per-cell
/// coercion happens later.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

/// One named column of the dataset.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    /// Build a column from raw cells, inferring the type.
    pub fn from_cells(name: String, cells: Vec<String>) -> Self {
        let parsed: Option<Vec<f64>> = cells
            .iter()
            .map(|c| c.trim().parse::<f64>().ok())
            .collect();
        let values = match parsed {
            Some(numbers) if !cells.is_empty() => ColumnValues::Numeric(numbers),
            _ => ColumnValues::Text(cells),
        };
        Column { name, values }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The numeric values, if this is a numeric column.
    pub fn numeric(&self) -> Option<&[f64]> {
        match &self.values {
            ColumnValues::Numeric(v) => Some(v),
            ColumnValues::Text(_) => None,
        }
    }

    /// Every cell formatted as a display label (category axis, pie slices).
    pub fn labels(&self) -> Vec<String> {
        match &self.values {
            ColumnValues::Text(v) => v.clone(),
            ColumnValues::Numeric(v) => v.iter().map(|n| format_number(*n)).collect(),
        }
    }
}

/// Format a numeric cell the way it reads in the source: integral values
/// without a trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// An immutable tabular dataset: ordered, equally sized, named columns.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset from a header row and data rows.
    ///
    /// Fails with `Schema` for fewer than two columns and `Parse` for ragged
    /// rows or zero data rows.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if headers.len() < 2 {
            return Err(ChartError::Schema {
                found: headers.len(),
            });
        }
        if rows.is_empty() {
            return Err(ChartError::Parse(
                "source must contain at least one data row".to_string(),
            ));
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(ChartError::Parse(format!(
                    "row {} has {} fields, expected {}",
                    idx + 1,
                    row.len(),
                    headers.len()
                )));
            }
        }

        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(col_idx, name)| {
                let cells = rows.iter().map(|row| row[col_idx].clone()).collect();
                Column::from_cells(name, cells)
            })
            .collect();

        Ok(Dataset { columns })
    }

    /// Build a dataset from a JSON array of flat record objects. Field order
    /// follows the first record (serde_json's `preserve_order` feature keeps
    /// source order).
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or_else(|| ChartError::Parse("input must be a JSON array of objects".to_string()))?;
        if array.is_empty() {
            return Err(ChartError::Parse("input data array is empty".to_string()));
        }

        let first = array[0]
            .as_object()
            .ok_or_else(|| ChartError::Parse("items in array must be objects".to_string()))?;
        let headers: Vec<String> = first.keys().cloned().collect();

        let mut rows = Vec::with_capacity(array.len());
        for item in array {
            let obj = item
                .as_object()
                .ok_or_else(|| ChartError::Parse("items in array must be objects".to_string()))?;
            let mut row = Vec::with_capacity(headers.len());
            for header in &headers {
                let cell = match obj.get(header) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::Bool(b)) => b.to_string(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => {
                        return Err(ChartError::Parse(format!(
                            "unsupported value {other} for field '{header}'"
                        )))
                    }
                };
                row.push(cell);
            }
            rows.push(row);
        }

        Dataset::from_rows(headers, rows)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in source order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ChartError::UnknownColumn(name.to_string()))
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }
}

/// Owner of the single active dataset.
///
/// The dataset is replaced wholesale on each successful load; a failed load
/// leaves the previous one in place.
#[derive(Debug, Default)]
pub struct DatasetStore {
    active: Option<Dataset>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dataset from a file, dispatching on the extension.
    ///
    /// Supported formats:
    /// * `.csv` – delimited text with a header row
    /// * `.json` – array of flat record objects
    pub fn load(&mut self, path: &Path) -> Result<&Dataset> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let dataset = match ext.as_str() {
            "csv" => load_csv(path)?,
            "json" => load_json(path)?,
            other => {
                return Err(ChartError::Parse(format!(
                    "unsupported file extension '.{other}'"
                )))
            }
        };

        log::info!(
            "loaded {} ({} columns, {} rows)",
            path.display(),
            dataset.columns().len(),
            dataset.row_count()
        );
        Ok(self.active.insert(dataset))
    }

    /// The currently active dataset, if any.
    pub fn active(&self) -> Option<&Dataset> {
        self.active.as_ref()
    }
}

fn load_csv(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| ChartError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ChartError::Parse(format!("{}: {e}", path.display())))?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ChartError::Parse(format!("{}: {e}", path.display())))?;
        rows.push(record.iter().map(String::from).collect());
    }

    Dataset::from_rows(headers, rows)
}

fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).map_err(|e| ChartError::io(path, e))?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| ChartError::Parse(format!("{}: {e}", path.display())))?;
    Dataset::from_json(&value)
}
