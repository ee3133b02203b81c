use std::path::Path;

use crate::dip::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Ids for the entries that come without one: the file name and the line.
pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

pub fn log_provider_for_path(path: &str) -> String {
    match extension(path).as_deref() {
        Some("csv") => "csv",
        Some("xlsx") | Some("xlsm") => "xlsx",
        _ => "json",
    }
    .to_string()
}

pub fn pool_provider_for_path(path: &str) -> String {
    match extension(path).as_deref() {
        Some("json") => "json",
        _ => "text",
    }
    .to_string()
}

/// Where the fields of an entry are in a table with a header row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LogColumns {
    pub id: Option<usize>,
    pub date: usize,
    pub persons: [usize; 3],
}

impl LogColumns {
    pub fn from_header(header: &[String], path: &str) -> DipResult<LogColumns> {
        let find = |column: &str| -> DipResult<usize> {
            column_index(header, column).context(MissingColumnSnafu { column, path })
        };
        let res = LogColumns {
            id: column_index(header, "id"),
            date: find("date")?,
            persons: [find("person1")?, find("person2")?, find("person3")?],
        };
        debug!("from_header: {:?} -> {:?}", header, res);
        Ok(res)
    }
}

fn column_index(header: &[String], column: &str) -> Option<usize> {
    header
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
}

/// Builds an entry from the cells of a row. Rows with nothing in them are
/// skipped.
pub fn entry_from_cells(
    cells: &[String],
    columns: &LogColumns,
    default_id: impl Fn() -> String,
) -> Option<LogEntry> {
    let cell = |idx: usize| -> String {
        cells
            .get(idx)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };
    let date = cell(columns.date);
    let [p1, p2, p3] = columns.persons.map(&cell);
    if date.is_empty() && p1.is_empty() && p2.is_empty() && p3.is_empty() {
        return None;
    }
    let id = match columns.id.map(&cell) {
        Some(id) if !id.is_empty() => id,
        _ => default_id(),
    };
    Some(LogEntry {
        id,
        date,
        person1: p1,
        person2: p2,
        person3: p3,
        timestamp: None,
    })
}
