use log::{debug, info, warn};

use lucky_dip::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::{EntryArgs, SourceArgs};
use crate::dip::config_reader::*;

mod io_common;
mod io_csv;
mod io_json;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum DipError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error producing JSON"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Excel file {path} has no usable worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Unexpected cell at line {lineno}, column {col}: {content}"))]
    ExcelWrongCellType {
        lineno: usize,
        col: usize,
        content: String,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Missing column {column} in the header of {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Expected a positive integer, got {content}"))]
    ParsingJsonNumber { content: String },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Cannot pick a name"))]
    Picking { source: PickError },
    #[snafu(display("Cannot change the log"))]
    Store { source: StoreError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DipResult<T> = Result<T, DipError>;

pub mod config_reader {
    use crate::dip::*;

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
    pub struct OutputSettings {
        #[serde(rename = "logName")]
        pub log_name: Option<String>,
        #[serde(rename = "outputPath")]
        pub output_path: Option<String>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct FileSource {
        pub provider: String,
        #[serde(rename = "filePath")]
        pub file_path: String,
        #[serde(rename = "excelWorksheetName")]
        pub excel_worksheet_name: Option<String>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
    pub struct DipRules {
        #[serde(rename = "randomSeed")]
        pub random_seed: Option<JSValue>,
        #[serde(rename = "picksPerRequest")]
        pub picks_per_request: Option<JSValue>,
    }

    impl DipRules {
        pub fn random_seed(&self) -> DipResult<Option<u64>> {
            read_js_int(&self.random_seed)
        }

        pub fn picks_per_request(&self) -> DipResult<Option<usize>> {
            match read_js_int(&self.picks_per_request)? {
                None => Ok(None),
                Some(x) => usize::try_from(x)
                    .ok()
                    .map(Some)
                    .context(ParsingJsonNumberSnafu {
                        content: x.to_string(),
                    }),
            }
        }
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
    pub struct DipConfig {
        #[serde(rename = "outputSettings", default)]
        pub output_settings: OutputSettings,
        #[serde(rename = "poolSource")]
        pub pool_source: Option<FileSource>,
        #[serde(rename = "logSources", default)]
        pub log_sources: Vec<FileSource>,
        #[serde(default)]
        pub rules: DipRules,
    }

    /// Reads a configuration file. The file paths it contains are resolved
    /// against the directory of the configuration.
    pub fn read_config(path: &str) -> DipResult<DipConfig> {
        let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
        let mut config: DipConfig =
            serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
        let root = Path::new(path).parent().context(MissingParentDirSnafu {})?;
        if let Some(cfs) = config.pool_source.as_mut() {
            cfs.file_path = resolve(root, &cfs.file_path);
        }
        for cfs in config.log_sources.iter_mut() {
            cfs.file_path = resolve(root, &cfs.file_path);
        }
        debug!("read_config: {:?}", config);
        Ok(config)
    }

    pub fn read_summary(path: &str) -> DipResult<JSValue> {
        let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
        debug!("read content: {:?}", contents);
        let js: JSValue =
            serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
        Ok(js)
    }

    fn resolve(root: &Path, file_path: &str) -> String {
        let p: PathBuf = root.join(file_path);
        p.as_path().display().to_string()
    }

    // Numbers are accepted either as JSON numbers or as strings.
    fn read_js_int(x: &Option<JSValue>) -> DipResult<Option<u64>> {
        match x {
            None => Ok(None),
            Some(JSValue::Number(n)) => n.as_u64().map(Some).context(ParsingJsonNumberSnafu {
                content: n.to_string(),
            }),
            Some(JSValue::String(s)) => s
                .trim()
                .parse::<u64>()
                .ok()
                .map(Some)
                .context(ParsingJsonNumberSnafu { content: s.clone() }),
            Some(js) => None.context(ParsingJsonNumberSnafu {
                content: js.to_string(),
            }),
        }
    }
}

/// The sources of a command, once the configuration file and the command
/// line flags are merged. Flags win.
#[derive(Eq, PartialEq, Debug, Clone)]
struct Inputs {
    config: DipConfig,
    pool: Option<FileSource>,
    logs: Vec<FileSource>,
}

fn resolve_inputs(
    config_path: &Option<String>,
    sources: &SourceArgs,
    pool_path: &Option<String>,
) -> DipResult<Inputs> {
    let config = match config_path {
        Some(p) => read_config(p)?,
        None => DipConfig::default(),
    };
    let pool = match pool_path {
        Some(p) => Some(FileSource {
            provider: io_common::pool_provider_for_path(p),
            file_path: p.clone(),
            excel_worksheet_name: None,
        }),
        None => config.pool_source.clone(),
    };
    let logs = if sources.log.is_empty() {
        config.log_sources.clone()
    } else {
        sources
            .log
            .iter()
            .map(|p| FileSource {
                provider: io_common::log_provider_for_path(p),
                file_path: p.clone(),
                excel_worksheet_name: sources.excel_worksheet_name.clone(),
            })
            .collect()
    };
    let res = Inputs { config, pool, logs };
    debug!("resolve_inputs: {:?}", res);
    Ok(res)
}

fn read_log_entries(sources: &[FileSource]) -> DipResult<Vec<LogEntry>> {
    let mut res: Vec<LogEntry> = Vec::new();
    for cfs in sources {
        info!("Attempting to read log file {:?}", cfs.file_path);
        let mut entries = match cfs.provider.as_str() {
            "json" => io_json::read_json_log(&cfs.file_path)?,
            "csv" => io_csv::read_csv_log(&cfs.file_path)?,
            "xlsx" => io_xlsx::read_excel_log(&cfs.file_path, cfs)?,
            x => whatever!("Log provider not implemented {:?}", x),
        };
        debug!("read_log_entries: {} entries in {:?}", entries.len(), cfs.file_path);
        res.append(&mut entries);
    }
    Ok(res)
}

fn read_pool(cfs: &FileSource) -> DipResult<NamePool> {
    info!("Attempting to read name pool {:?}", cfs.file_path);
    let pool = match cfs.provider.as_str() {
        "text" => {
            let contents = fs::read_to_string(&cfs.file_path).context(OpeningFileSnafu {
                path: cfs.file_path.clone(),
            })?;
            parse_pool(&contents)
        }
        "json" => io_json::read_pool_record(&cfs.file_path)?.pool(),
        x => whatever!("Pool provider not implemented {:?}", x),
    };
    debug!("read_pool: {:?}", pool);
    Ok(pool)
}

/// Runs the lucky dip: draws `count` names in one session and prints them.
pub fn run_pick(
    config_path: &Option<String>,
    sources: &SourceArgs,
    pool_path: &Option<String>,
    count: Option<usize>,
    seed: Option<u64>,
) -> DipResult<Vec<Pick>> {
    let inputs = resolve_inputs(config_path, sources, pool_path)?;
    let pool_source = match inputs.pool.as_ref() {
        Some(cfs) => cfs,
        None => whatever!("No name pool: use --pool or set poolSource in the configuration"),
    };
    let pool = read_pool(pool_source)?;
    let store = MemoryLogStore::with_entries(read_log_entries(&inputs.logs)?);

    let count = match count {
        Some(c) => c,
        None => inputs.config.rules.picks_per_request()?.unwrap_or(1),
    };
    let seed = match seed {
        Some(s) => Some(s),
        None => inputs.config.rules.random_seed()?,
    };
    let mut rng = match seed {
        Some(s) => ChaChaRng::seed_from_u64(s),
        None => ChaChaRng::from_entropy(),
    };
    info!(
        "run_pick: {} names in the pool, {} log entries, {} picks, seed {:?}",
        pool.len(),
        store.len(),
        count,
        seed
    );

    let mut session = Session::new();
    let mut picks: Vec<Pick> = Vec::new();
    for _ in 0..count {
        let logged = logged_names(&store.entries());
        let pick = session
            .pick(&pool, &logged, &mut rng)
            .context(PickingSnafu {})?;
        if pick.reset == Some(ResetReason::AllLogged) {
            warn!("All members have been logged, starting a new round");
            eprintln!("All members have been logged! Starting a new round.");
        }
        println!("{}", pick.name);
        picks.push(pick);
    }
    Ok(picks)
}

fn build_summary_js(config: &DipConfig, entries: &[LogEntry]) -> JSValue {
    let participation: Vec<JSValue> = participation(entries)
        .into_iter()
        .map(|(name, count)| {
            json!({
                "name": name,
                "count": count,
                "label": selected_label(count)
            })
        })
        .collect();
    json!({
        "config": {
            "logName": config.output_settings.log_name.clone(),
            "entries": entries.len()
        },
        "participation": participation
    })
}

/// Computes the participation summary and writes it out. If a reference
/// summary is given, the computed one must match it.
pub fn run_stats(
    config_path: &Option<String>,
    sources: &SourceArgs,
    out: &Option<String>,
    reference: &Option<String>,
) -> DipResult<JSValue> {
    let inputs = resolve_inputs(config_path, sources, &None)?;
    let store = MemoryLogStore::with_entries(read_log_entries(&inputs.logs)?);
    let result_js = build_summary_js(&inputs.config, &store.entries());
    let pretty_js_stats =
        serde_json::to_string_pretty(&result_js).context(WritingJsonSnafu {})?;

    let out_path = out
        .clone()
        .or_else(|| inputs.config.output_settings.output_path.clone());
    match out_path.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(p) => {
            info!("Writing summary to {:?}", p);
            fs::write(p, &pretty_js_stats).context(WritingFileSnafu { path: p })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(WritingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }
    Ok(result_js)
}

const TABLE_HEADER: [&str; 4] = [
    "Date",
    "Convoy Leader",
    "Deputy Convoy Leader 1",
    "Deputy Convoy Leader 2",
];

/// The log as a text table. The ids are only shown to admins, who need them
/// to edit entries.
fn render_table(entries: &[LogEntry], show_ids: bool) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut header = format!(
        "{:<20} {:<24} {:<24} {:<24}",
        TABLE_HEADER[0], TABLE_HEADER[1], TABLE_HEADER[2], TABLE_HEADER[3]
    );
    if show_ids {
        header.push_str(" Id");
    }
    lines.push(header.trim_end().to_string());
    for e in entries {
        let mut line = format!(
            "{:<20} {:<24} {:<24} {:<24}",
            format_date(&e.date),
            e.person1,
            e.person2,
            e.person3
        );
        if show_ids {
            line.push(' ');
            line.push_str(&e.id);
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Prints the log table, newest entries first. Returns the number of rows.
pub fn run_list(
    config_path: &Option<String>,
    sources: &SourceArgs,
    user: &Option<String>,
) -> DipResult<usize> {
    let inputs = resolve_inputs(config_path, sources, &None)?;
    let store = MemoryLogStore::with_entries(read_log_entries(&inputs.logs)?);
    let mut session = Session::new();
    if let Some(u) = user {
        session.sign_in(u);
    }
    let show_ids = session.is_signed_in();
    let sid = store.subscribe(Box::new(move |snapshot: &[LogEntry]| {
        println!("{}", render_table(snapshot, show_ids));
    }));
    store.unsubscribe(sid);
    Ok(store.len())
}

// Changes go to a single JSON log, which is created if needed.
fn single_json_log(logs: &[FileSource]) -> DipResult<&FileSource> {
    match logs {
        [cfs] if cfs.provider == "json" => Ok(cfs),
        _ => whatever!(
            "Adding or editing entries needs exactly one JSON log file, got {:?}",
            logs.iter().map(|cfs| &cfs.file_path).collect::<Vec<_>>()
        ),
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn apply_entry_args(draft: &mut EntryDraft, entry: &EntryArgs) {
    if let Some(d) = &entry.date {
        draft.date = d.clone();
    }
    if let Some(p) = &entry.person1 {
        draft.person1 = p.clone();
    }
    if let Some(p) = &entry.person2 {
        draft.person2 = p.clone();
    }
    if let Some(p) = &entry.person3 {
        draft.person3 = p.clone();
    }
}

/// Adds a new entry (`id` is None) or edits an existing one, then writes the
/// log back. Returns the id of the stored entry.
pub fn run_save(
    config_path: &Option<String>,
    sources: &SourceArgs,
    entry: &EntryArgs,
    id: Option<&str>,
) -> DipResult<String> {
    let inputs = resolve_inputs(config_path, sources, &None)?;
    let target = single_json_log(&inputs.logs)?;
    let entries = if Path::new(&target.file_path).exists() {
        io_json::read_json_log(&target.file_path)?
    } else {
        info!("Log file {:?} does not exist yet", target.file_path);
        Vec::new()
    };
    let store = MemoryLogStore::with_entries(entries);

    let mut session = Session::new();
    if let Some(user) = &entry.user {
        session.sign_in(user);
    }
    let draft = match id {
        Some(id) => {
            let current = session.begin_edit(&store, id).context(StoreSnafu {})?;
            let mut draft = EntryDraft::from(&current);
            apply_entry_args(&mut draft, entry);
            draft
        }
        None => {
            session.begin_new_entry();
            let mut draft = EntryDraft {
                date: today(),
                ..EntryDraft::default()
            };
            apply_entry_args(&mut draft, entry);
            draft
        }
    };
    let saved_id = session.save_entry(&store, &draft).context(StoreSnafu {})?;
    io_json::write_json_log(&target.file_path, &store.entries())?;
    println!("{}", saved_id);
    Ok(saved_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_data(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn log_args(paths: &[&str]) -> SourceArgs {
        SourceArgs {
            log: paths.iter().map(|p| test_data(p)).collect(),
            excel_worksheet_name: None,
        }
    }

    fn entry_args(user: Option<&str>, date: &str, p: [&str; 3]) -> EntryArgs {
        EntryArgs {
            user: user.map(|u| u.to_string()),
            date: Some(date.to_string()),
            person1: Some(p[0].to_string()),
            person2: Some(p[1].to_string()),
            person3: Some(p[2].to_string()),
        }
    }

    #[test]
    fn config_paths_are_relative_to_the_config() {
        let config = read_config(&test_data("config.json")).unwrap();
        let pool = config.pool_source.unwrap();
        assert_eq!(pool.provider, "text");
        assert!(Path::new(&pool.file_path).exists(), "{:?}", pool.file_path);
        assert_eq!(config.log_sources.len(), 1);
        assert_eq!(config.rules.random_seed().unwrap(), Some(42));
        assert_eq!(config.rules.picks_per_request().unwrap(), Some(2));
    }

    #[test]
    fn flags_override_config() {
        let inputs = resolve_inputs(
            &Some(test_data("config.json")),
            &log_args(&["logs.csv"]),
            &Some(test_data("pool.json")),
        )
        .unwrap();
        assert_eq!(inputs.logs.len(), 1);
        assert_eq!(inputs.logs[0].provider, "csv");
        assert_eq!(inputs.pool.unwrap().provider, "json");
    }

    #[test]
    fn pools() {
        let text = read_pool(&FileSource {
            provider: "text".to_string(),
            file_path: test_data("pool.txt"),
            excel_worksheet_name: None,
        })
        .unwrap();
        assert_eq!(
            text.names(),
            &["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"]
        );
        let record = read_pool(&FileSource {
            provider: "json".to_string(),
            file_path: test_data("pool.json"),
            excel_worksheet_name: None,
        })
        .unwrap();
        assert_eq!(record.names(), &["Alice", "Bob"]);
    }

    #[test]
    fn log_sources_are_concatenated() {
        let sources = log_args(&["logs.json", "logs_array.json", "logs.csv", "logs.xlsx"]);
        let inputs = resolve_inputs(&None, &sources, &None).unwrap();
        assert_eq!(inputs.logs[3].provider, "xlsx");
        let entries = read_log_entries(&inputs.logs).unwrap();
        assert_eq!(entries.len(), 7);
        let names = logged_names(&entries);
        for n in ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"] {
            assert!(names.contains(n), "{}", n);
        }
    }

    #[test]
    fn picks_per_request_must_be_an_integer() {
        let rules = DipRules {
            random_seed: None,
            picks_per_request: Some(json!("three")),
        };
        assert!(matches!(
            rules.picks_per_request(),
            Err(DipError::ParsingJsonNumber { .. })
        ));
        let rules = DipRules {
            random_seed: None,
            picks_per_request: Some(json!(-2)),
        };
        assert!(rules.picks_per_request().is_err());
        let rules = DipRules {
            random_seed: None,
            picks_per_request: Some(json!(" 4 ")),
        };
        assert_eq!(rules.picks_per_request().unwrap(), Some(4));
    }

    #[test]
    fn excel_worksheet_from_the_command_line() {
        use crate::args::{Args, Command};
        use clap::Parser;

        let log = test_data("logs.xlsx");
        let args = Args::try_parse_from([
            "convoylog",
            "stats",
            "--log",
            log.as_str(),
            "--excel-worksheet-name",
            "Archive",
        ])
        .unwrap();
        let sources = match args.command {
            Command::Stats { sources, .. } => sources,
            c => panic!("unexpected command {:?}", c),
        };
        let inputs = resolve_inputs(&args.config, &sources, &None).unwrap();
        assert_eq!(inputs.logs[0].excel_worksheet_name.as_deref(), Some("Archive"));
        let entries = read_log_entries(&inputs.logs).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].participants(), ["Frank", "Grace", "Heidi"]);

        let js = build_summary_js(&inputs.config, &entries);
        assert_eq!(js["config"]["entries"], 1);
        assert_eq!(js["participation"][0]["name"], "Frank");
    }

    #[test]
    fn pick_from_config() {
        // Only Frank is not logged yet: he comes up, then comes up again
        // once the session has used him.
        let picks = run_pick(
            &Some(test_data("config.json")),
            &SourceArgs::default(),
            &None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(picks.len(), 2);
        for p in picks {
            assert_eq!(p.name, "Frank");
            assert_eq!(p.reset, None);
        }
    }

    #[test]
    fn pick_when_everyone_is_logged() {
        let picks = run_pick(
            &None,
            &log_args(&["logs.json", "logs_array.json"]),
            &Some(test_data("pool.txt")),
            Some(3),
            Some(7),
        )
        .unwrap();
        assert_eq!(picks.len(), 3);
        assert!(picks
            .iter()
            .all(|p| p.reset == Some(ResetReason::AllLogged)));
    }

    #[test]
    fn pick_from_empty_pool() {
        let res = run_pick(
            &None,
            &SourceArgs::default(),
            &Some(test_data("empty_pool.txt")),
            None,
            Some(1),
        );
        let err = res.unwrap_err();
        assert!(matches!(
            err,
            DipError::Picking {
                source: PickError::EmptyPool
            }
        ));
        // The cause is only reported once, through the source chain.
        assert_eq!(err.to_string(), "Cannot pick a name");
        let cause = std::error::Error::source(&err).map(|s| s.to_string());
        assert!(cause.unwrap().contains("add names first"));
    }

    #[test]
    fn pick_without_pool() {
        let res = run_pick(&None, &SourceArgs::default(), &None, None, Some(1));
        assert!(matches!(res, Err(DipError::Whatever { .. })));
    }

    #[test]
    fn stats_match_reference() {
        let js = run_stats(
            &Some(test_data("config.json")),
            &SourceArgs::default(),
            &None,
            &Some(test_data("stats_expected.json")),
        )
        .unwrap();
        assert_eq!(js["participation"][0]["name"], "Alice");
        assert_eq!(js["participation"][0]["count"], 2);
    }

    #[test]
    fn stats_differ_from_reference() {
        let res = run_stats(
            &None,
            &log_args(&["logs.csv"]),
            &None,
            &Some(test_data("stats_expected.json")),
        );
        assert!(res.is_err());
    }

    #[test]
    fn table() {
        let inputs = resolve_inputs(&None, &log_args(&["logs.json"]), &None).unwrap();
        let entries = read_log_entries(&inputs.logs).unwrap();
        let store = MemoryLogStore::with_entries(entries);
        let public = render_table(&store.entries(), false);
        let lines: Vec<&str> = public.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[1].starts_with("May 3, 2024"));
        assert!(!public.contains("e1"));
        let admin = render_table(&store.entries(), true);
        assert!(admin.lines().nth(2).unwrap().ends_with(" e1"));
        assert_eq!(
            run_list(&None, &log_args(&["logs.json"]), &Some("admin".to_string())).unwrap(),
            2
        );
    }

    #[test]
    fn add_and_edit() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("logs.json").display().to_string();
        let sources = SourceArgs {
            log: vec![log_path.clone()],
            excel_worksheet_name: None,
        };

        let refused = run_save(
            &None,
            &sources,
            &entry_args(None, "2024-06-01", ["Alice", "Bob", "Carol"]),
            None,
        );
        assert!(matches!(
            refused,
            Err(DipError::Store {
                source: StoreError::NotSignedIn
            })
        ));
        assert!(!Path::new(&log_path).exists());

        let id = run_save(
            &None,
            &sources,
            &entry_args(Some("admin"), "2024-06-01", ["Alice", "Bob", "Carol"]),
            None,
        )
        .unwrap();
        let entries = io_json::read_json_log(&log_path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);

        let edit = EntryArgs {
            user: Some("admin".to_string()),
            person2: Some("Dave".to_string()),
            ..EntryArgs::default()
        };
        let id2 = run_save(&None, &sources, &edit, Some(id.as_str())).unwrap();
        assert_eq!(id, id2);
        let entries = io_json::read_json_log(&log_path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].person1, "Alice");
        assert_eq!(entries[0].person2, "Dave");
        assert_eq!(entries[0].date, "2024-06-01");

        let missing = run_save(&None, &sources, &edit, Some("nope"));
        assert!(matches!(
            missing,
            Err(DipError::Store {
                source: StoreError::NotFound(_)
            })
        ));
    }

    #[test]
    fn save_needs_one_json_log() {
        let res = run_save(
            &None,
            &log_args(&["logs.csv"]),
            &entry_args(Some("admin"), "2024-06-01", ["A", "B", "C"]),
            None,
        );
        assert!(matches!(res, Err(DipError::Whatever { .. })));
    }
}
