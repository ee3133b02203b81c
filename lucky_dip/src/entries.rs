//! Helpers over the persisted convoy log: the names it contains, the order of
//! the live table and the participation tally behind the chart.

use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

use crate::config::{LogEntry, LoggedNames};

impl LogEntry {
    /// The leader and the two deputies, in this order.
    pub fn participants(&self) -> [&str; 3] {
        [
            self.person1.as_str(),
            self.person2.as_str(),
            self.person3.as_str(),
        ]
    }
}

/// All the names that appear in the log, in any of the three slots.
/// Names are trimmed and empty slots are ignored.
pub fn logged_names(entries: &[LogEntry]) -> LoggedNames {
    entries
        .iter()
        .flat_map(|e| e.participants())
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(|n| n.to_string())
        .collect()
}

/// Orders the entries the way the log table shows them: most recent date
/// first. Entries with the same date keep their relative order.
pub fn sort_by_date_desc(entries: &mut [LogEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Formats an ISO date (`2024-05-01`) as `May 1, 2024`.
/// Anything that does not look like an ISO date is returned unchanged.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(d) => d.format("%B %-d, %Y").to_string(),
        Err(e) => {
            debug!("format_date: not an ISO date: {:?}: {}", date, e);
            date.to_string()
        }
    }
}

/// Counts how many times each name was selected across all the entries.
///
/// The result is sorted by decreasing count. Names with the same count keep
/// the order in which they first appear in `entries`.
pub fn participation(entries: &[LogEntry]) -> Vec<(String, u64)> {
    let mut tally: Vec<(String, u64)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for name in entries.iter().flat_map(|e| e.participants()) {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        match positions.get(name) {
            Some(&idx) => tally[idx].1 += 1,
            None => {
                positions.insert(name.to_string(), tally.len());
                tally.push((name.to_string(), 1));
            }
        }
    }
    // Stable: ties stay in order of first appearance.
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally
}

/// The label shown next to a participation count.
pub fn selected_label(count: u64) -> String {
    format!("Selected {} time{}", count, if count == 1 { "" } else { "s" })
}
