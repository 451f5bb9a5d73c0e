//! Column catalog: pure projections over a dataset used to populate
//! selection surfaces.

use crate::dataset::Dataset;

/// Column names in source order.
pub fn names(dataset: &Dataset) -> Vec<String> {
    dataset.column_names()
}

/// Whether a column exists in the dataset.
pub fn contains(dataset: &Dataset, name: &str) -> bool {
    dataset.columns().iter().any(|c| c.name == name)
}

/// Default field pair for a freshly loaded dataset: x from the first column,
/// y from the second. Matches the selection a user expects after loading a
/// minimal two-column file.
pub fn default_selection(dataset: &Dataset) -> Option<(String, String)> {
    let columns = dataset.columns();
    match (columns.first(), columns.get(1)) {
        (Some(x), Some(y)) => Some((x.name.clone(), y.name.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(headers: Vec<&str>) -> Dataset {
        let row = vec!["1"; headers.len()];
        Dataset::from_rows(
            headers.iter().map(|s| s.to_string()).collect(),
            vec![row.iter().map(|s| s.to_string()).collect()],
        )
        .unwrap()
    }

    #[test]
    fn test_names_preserve_source_order() {
        let ds = dataset(vec!["zulu", "alpha", "mike"]);
        assert_eq!(names(&ds), vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_contains() {
        let ds = dataset(vec!["a", "b"]);
        assert!(contains(&ds, "a"));
        assert!(!contains(&ds, "A"));
        assert!(!contains(&ds, "c"));
    }

    #[test]
    fn test_default_selection_first_two_columns() {
        let ds = dataset(vec!["time", "temp", "humidity"]);
        assert_eq!(
            default_selection(&ds),
            Some(("time".to_string(), "temp".to_string()))
        );
    }

    #[test]
    fn test_default_selection_exactly_two_columns() {
        let ds = dataset(vec!["A", "B"]);
        assert_eq!(
            default_selection(&ds),
            Some(("A".to_string(), "B".to_string()))
        );
    }
}
