// Primitives for reading CSV files.

use crate::dip::{
    io_common::{entry_from_cells, make_default_id, LogColumns},
    *,
};

pub fn read_csv_log(path: &str) -> DipResult<Vec<LogEntry>> {
    let default_id = make_default_id(path);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1_usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    let columns = LogColumns::from_header(&header, path)?;

    let mut res: Vec<LogEntry> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_log: {:?} {:?}", lineno, line);
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        if let Some(e) = entry_from_cells(&cells, &columns, || default_id(lineno)) {
            res.push(e);
        }
    }
    Ok(res)
}
