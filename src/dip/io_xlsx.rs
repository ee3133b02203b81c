// Primitives for reading Excel files.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use chrono::{Duration, NaiveDate};

use crate::dip::{
    io_common::{entry_from_cells, make_default_id, LogColumns},
    *,
};

pub fn read_excel_log(path: &str, cfs: &FileSource) -> DipResult<Vec<LogEntry>> {
    let default_id = make_default_id(path);
    let wrange = get_range(path, cfs)?;

    let mut rows = wrange.rows();
    let header_row = rows.next().context(EmptyExcelSnafu { path })?;
    let mut header: Vec<String> = Vec::new();
    for (col, cell) in header_row.iter().enumerate() {
        header.push(read_cell(cell, 1, col, false)?);
    }
    debug!("read_excel_log: header: {:?}", header);
    let columns = LogColumns::from_header(&header, path)?;

    let mut res: Vec<LogEntry> = Vec::new();
    for (idx, row) in rows.enumerate() {
        let lineno = idx + 2;
        let mut cells: Vec<String> = Vec::new();
        for (col, cell) in row.iter().enumerate() {
            cells.push(read_cell(cell, lineno, col, col == columns.date)?);
        }
        debug!("read_excel_log: lineno: {:?} row: {:?}", lineno, cells);
        if let Some(e) = entry_from_cells(&cells, &columns, || default_id(lineno)) {
            res.push(e);
        }
    }
    Ok(res)
}

fn get_range(path: &str, cfs: &FileSource) -> DipResult<Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, cfs.excel_worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match cfs.excel_worksheet_name.as_ref() {
        // A worksheet name was provided, use it.
        Some(worksheet_name) => workbook.worksheet_range(worksheet_name),
        None => workbook.worksheet_range_at(0),
    };
    wrange
        .context(EmptyExcelSnafu { path })?
        .context(OpeningExcelSnafu { path })
}

// Spreadsheets store dates as a number of days since 1899-12-30.
// The last valid serial is 2958465 (9999-12-31).
fn excel_date(serial: f64) -> Option<String> {
    if !serial.is_finite() || !(0.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let d = epoch.checked_add_signed(Duration::try_days(serial.trunc() as i64)?)?;
    Some(d.format("%Y-%m-%d").to_string())
}

fn read_cell(cell: &DataType, lineno: usize, col: usize, is_date: bool) -> DipResult<String> {
    match cell {
        DataType::String(s) => Ok(s.trim().to_string()),
        DataType::Empty => Ok("".to_string()),
        DataType::DateTime(f) | DataType::Float(f) if is_date => {
            excel_date(*f).context(ExcelWrongCellTypeSnafu {
                lineno,
                col,
                content: format!("{:?}", cell),
            })
        }
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            col,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}
