//! Row source: loads a spreadsheet export into ordered [`RawRow`]s.
//!
//! Supports Excel workbooks through `calamine` and delimited text through
//! `csv`. The first row is the header; header text is kept verbatim so that
//! column lookups stay exact. Rows in which every cell is blank are dropped.
//! Any failure here is fatal to the run.

use crate::domain::CellValue;
use crate::error::{SourceError, SourceResult};
use crate::models::RawRow;
use calamine::{open_workbook_auto, Data, Reader};
use encoding_rs::Encoding;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Extensions read through `calamine`.
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Extensions read as delimited text.
pub const TEXT_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Load all data rows from `path`.
///
/// `sheet` selects a worksheet by name; the first sheet is used otherwise.
/// It is ignored for CSV input.
pub fn load_rows(path: &Path, sheet: Option<&str>) -> SourceResult<Vec<RawRow>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = match extension.as_str() {
        ext if WORKBOOK_EXTENSIONS.contains(&ext) => load_workbook(path, sheet)?,
        ext if TEXT_EXTENSIONS.contains(&ext) => load_csv(path)?,
        other => return Err(SourceError::UnsupportedFormat(other.to_string())),
    };

    tracing::info!(path = %path.display(), rows = rows.len(), "Loaded rows");
    Ok(rows)
}

fn load_workbook(path: &Path, sheet: Option<&str>) -> SourceResult<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| SourceError::Workbook(e.to_string()))?;

    let sheet_name = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(SourceError::SheetNotFound(name.to_string()));
            }
            name.to_string()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(SourceError::Empty)?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| SourceError::Workbook(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or(SourceError::Empty)?
        .iter()
        .map(|cell| match cell {
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect();

    let data = rows.map(|cells| cells.iter().map(cell_from_data).collect::<Vec<_>>());
    Ok(build_rows(&header, data))
}

fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

fn load_csv(path: &Path) -> SourceResult<Vec<RawRow>> {
    let bytes = fs::read(path)?;
    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, encoding);
    tracing::debug!(path = %path.display(), encoding = encoding.name(), "Decoded CSV input");
    let content = content.trim_start_matches('\u{feff}');

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(content) as u8)
        .flexible(true)
        .from_reader(content.as_bytes());

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if header.iter().all(|h| h.is_empty()) {
        return Err(SourceError::Empty);
    }

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(CellValue::from).collect::<Vec<_>>());
    }

    Ok(build_rows(&header, records))
}

/// Detect the text encoding of a CSV export.
///
/// Valid UTF-8 is taken as is. Anything else goes through `chardet`; Western
/// single-byte charsets are honoured and everything else falls back to
/// windows-1252.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(bytes).is_ok() {
        return encoding_rs::UTF_8;
    }

    let (charset, confidence, _) = chardet::detect(bytes);
    match charset.to_lowercase().as_str() {
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15,
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252,
        other => {
            tracing::debug!(charset = other, confidence, "Unrecognised charset, using windows-1252");
            encoding_rs::WINDOWS_1252
        }
    }
}

/// Decode bytes with the given encoding. Malformed sequences become U+FFFD.
pub fn decode_content(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (content, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = encoding.name(), "Input contained undecodable bytes");
    }
    content.into_owned()
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Make header names unique: a repeated `X` becomes `X.1`, `X.2`, ...
/// so the first column keeps the plain name.
fn unique_headers(header: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(header.len());

    for name in header {
        let mut candidate = name.clone();
        if !name.is_empty() {
            let mut suffix = 1;
            while seen.contains(&candidate) {
                candidate = format!("{}.{}", name, suffix);
                suffix += 1;
            }
            seen.insert(candidate.clone());
        }
        unique.push(candidate);
    }

    unique
}

fn build_rows<I>(header: &[String], data: I) -> Vec<RawRow>
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let header = unique_headers(header);
    let mut rows = Vec::new();

    for cells in data {
        if cells.iter().all(CellValue::is_blank) {
            continue;
        }

        let mut row = RawRow::new(rows.len() + 1);
        for (column, value) in header.iter().zip(cells) {
            if !column.is_empty() {
                row.insert(column.clone(), value);
            }
        }
        rows.push(row);
    }

    rows
}
