//! Raw spreadsheet rows.

use crate::domain::CellValue;
use std::collections::HashMap;

static EMPTY: CellValue = CellValue::Empty;

/// One data row from the row source, keyed by exact header text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// 1-based position among the data rows (the header is not counted)
    pub index: usize,

    cells: HashMap<String, CellValue>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            cells: HashMap::new(),
        }
    }

    /// Builder-style cell insertion.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a cell value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Look up a cell by exact column name. Absent columns read as empty.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&EMPTY)
    }

    /// Whether the row has a column with this exact name.
    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        let row = RawRow::new(1).with(" Epost BT", "kari@example.no");
        assert_eq!(row.get(" Epost BT"), &CellValue::from("kari@example.no"));
        assert_eq!(row.get("Epost BT"), &CellValue::Empty);
        assert_eq!(row.get(" epost bt"), &CellValue::Empty);
        assert!(row.has_column(" Epost BT"));
        assert!(!row.has_column("Epost BT"));
    }

    #[test]
    fn test_absent_column_is_empty() {
        let row = RawRow::new(3);
        assert!(row.is_empty());
        assert!(row.get("Bedriftsnavn").is_blank());
    }
}
