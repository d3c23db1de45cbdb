//! Raw spreadsheet cell values.

use std::fmt;

/// A single cell as read from the row source.
///
/// Spreadsheets hand out a mix of text, numbers and blanks for the same
/// column, so normalizers accept any variant and decide for themselves.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value (blank cell or absent column).
    #[default]
    Empty,

    /// Text cell, kept verbatim.
    Text(String),

    /// Numeric cell.
    Number(f64),

    /// Boolean cell.
    Bool(bool),
}

impl CellValue {
    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(n) => n.is_nan(),
            Self::Bool(_) => false,
        }
    }

    /// Render the cell as text, or `None` if it is blank.
    ///
    /// Integral numbers render without a fractional part, so a phone number
    /// stored as `12345678.0` comes out as `"12345678"`.
    pub fn to_text(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }

        match self {
            Self::Empty => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Bool(b) => Some(b.to_string()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "<empty>"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}
