// Primitives for reading and writing the JSON documents of the store.

use crate::dip::{io_common::make_default_id, *};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct LogEntryJs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    date: String,
    #[serde(default)]
    person1: String,
    #[serde(default)]
    person2: String,
    #[serde(default)]
    person3: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<u64>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct LogDocument {
    logs: Vec<LogEntryJs>,
}

// The log may be the full document or just the list of entries.
#[derive(Deserialize)]
#[serde(untagged)]
enum LogFile {
    Document(LogDocument),
    Entries(Vec<LogEntryJs>),
}

#[derive(Eq, PartialEq, Debug, Clone, Deserialize)]
struct PoolRecordJs {
    #[serde(default)]
    names: Vec<String>,
    #[serde(rename = "ownerId")]
    owner_id: Option<String>,
    #[serde(rename = "lastUpdated")]
    last_updated: Option<u64>,
}

pub fn read_json_log(path: &str) -> DipResult<Vec<LogEntry>> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let file: LogFile = serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    let entries_js = match file {
        LogFile::Document(doc) => doc.logs,
        LogFile::Entries(l) => l,
    };
    let default_id = make_default_id(path);
    let res: Vec<LogEntry> = entries_js
        .into_iter()
        .enumerate()
        .map(|(idx, e)| LogEntry {
            id: e.id.unwrap_or_else(|| default_id(idx + 1)),
            date: e.date,
            person1: e.person1,
            person2: e.person2,
            person3: e.person3,
            timestamp: e.timestamp,
        })
        .collect();
    debug!("read_json_log: {:?}: {} entries", path, res.len());
    Ok(res)
}

pub fn write_json_log(path: &str, entries: &[LogEntry]) -> DipResult<()> {
    let doc = LogDocument {
        logs: entries
            .iter()
            .map(|e| LogEntryJs {
                id: Some(e.id.clone()),
                date: e.date.clone(),
                person1: e.person1.clone(),
                person2: e.person2.clone(),
                person3: e.person3.clone(),
                timestamp: e.timestamp,
            })
            .collect(),
    };
    let js = serde_json::to_string_pretty(&doc).context(WritingJsonSnafu {})?;
    fs::write(path, js).context(WritingFileSnafu { path })?;
    info!("Wrote {} entries to {:?}", entries.len(), path);
    Ok(())
}

pub fn read_pool_record(path: &str) -> DipResult<NamePoolRecord> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: PoolRecordJs = serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    debug!("read_pool_record: {:?}", js);
    Ok(NamePoolRecord {
        names: js.names,
        owner_id: js.owner_id,
        last_updated: js.last_updated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_keeps_ids() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("logs.json").display().to_string();
        fs::write(
            &p,
            r#"[{"date": "2024-05-01", "person1": "A", "person2": "B"}]"#,
        )
        .unwrap();
        let entries = read_json_log(&p).unwrap();
        assert_eq!(entries[0].id, "logs.json-00000001");
        assert_eq!(entries[0].person3, "");

        write_json_log(&p, &entries).unwrap();
        let again = read_json_log(&p).unwrap();
        assert_eq!(entries, again);
        let raw = fs::read_to_string(&p).unwrap();
        assert!(raw.contains("\"logs\""));
    }

    #[test]
    fn bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("logs.json").display().to_string();
        fs::write(&p, "{ not json").unwrap();
        assert!(matches!(read_json_log(&p), Err(DipError::ParsingJson { .. })));
        assert!(matches!(
            read_json_log("/nonexistent/logs.json"),
            Err(DipError::OpeningFile { .. })
        ));
    }
}
