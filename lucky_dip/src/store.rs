//! The boundary with the document store that holds the convoy log.
//!
//! Readers get snapshots: either by asking for [`LogStore::entries`] or by
//! subscribing to be called back with a fresh snapshot after every write.

use log::{debug, info};
use rand::distributions::{Alphanumeric, DistString};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{EntryDraft, LogEntry, StoreError};
use crate::entries::sort_by_date_desc;

pub type SubscriptionId = u64;

/// Called with the whole log, newest entries first.
pub type SnapshotCallback = Box<dyn Fn(&[LogEntry]) + Send + Sync>;

pub trait LogStore {
    /// All the entries, newest first.
    fn entries(&self) -> Vec<LogEntry>;

    fn get(&self, id: &str) -> Result<LogEntry, StoreError>;

    /// Stores a new entry and returns its id.
    fn add(&self, draft: &EntryDraft) -> Result<String, StoreError>;

    fn update(&self, id: &str, draft: &EntryDraft) -> Result<(), StoreError>;

    /// Registers a callback. It is called right away with the current
    /// snapshot, then after every successful write.
    fn subscribe(&self, callback: SnapshotCallback) -> SubscriptionId;

    /// Returns false if the subscription was not (or no longer) registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

type Subscriber = Arc<dyn Fn(&[LogEntry]) + Send + Sync>;

/// A log store kept in memory.
///
/// It is the store used by the command line, loaded from the log files and
/// written back once the changes are done.
#[derive(Default)]
pub struct MemoryLogStore {
    entries: Mutex<Vec<LogEntry>>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: Mutex<SubscriptionId>,
}

// Same shape as the ids of the hosted document store.
const ID_LEN: usize = 20;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

fn now_secs() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

fn generate_id(existing: &HashSet<String>) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let candidate = Alphanumeric.sample_string(&mut rng, ID_LEN);
        if !existing.contains(&candidate) {
            return candidate;
        }
    }
}

fn validate(draft: &EntryDraft) -> Result<(), StoreError> {
    if draft.date.trim().is_empty() {
        return Err(StoreError::InvalidEntry("the date is required".to_string()));
    }
    Ok(())
}

impl MemoryLogStore {
    pub fn new() -> MemoryLogStore {
        MemoryLogStore::default()
    }

    /// A store seeded with entries read from somewhere else. Their ids are
    /// kept as is.
    pub fn with_entries(entries: Vec<LogEntry>) -> MemoryLogStore {
        MemoryLogStore {
            entries: Mutex::new(entries),
            ..MemoryLogStore::default()
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }

    // Called without holding any lock so that callbacks may read the store.
    fn notify(&self) {
        let subscribers: Vec<Subscriber> = lock(&self.subscribers)
            .iter()
            .map(|(_, s)| s.clone())
            .collect();
        if subscribers.is_empty() {
            return;
        }
        let snapshot = self.entries();
        debug!(
            "notify: {} subscribers, {} entries",
            subscribers.len(),
            snapshot.len()
        );
        for s in subscribers {
            s(snapshot.as_slice());
        }
    }
}

impl LogStore for MemoryLogStore {
    fn entries(&self) -> Vec<LogEntry> {
        let mut res = lock(&self.entries).clone();
        sort_by_date_desc(&mut res);
        res
    }

    fn get(&self, id: &str) -> Result<LogEntry, StoreError> {
        lock(&self.entries)
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn add(&self, draft: &EntryDraft) -> Result<String, StoreError> {
        validate(draft)?;
        let id = {
            let mut entries = lock(&self.entries);
            let existing: HashSet<String> = entries.iter().map(|e| e.id.clone()).collect();
            let id = generate_id(&existing);
            entries.push(LogEntry {
                id: id.clone(),
                date: draft.date.clone(),
                person1: draft.person1.clone(),
                person2: draft.person2.clone(),
                person3: draft.person3.clone(),
                timestamp: now_secs(),
            });
            id
        };
        info!("add: new entry {} for {}", id, draft.date);
        self.notify();
        Ok(id)
    }

    fn update(&self, id: &str, draft: &EntryDraft) -> Result<(), StoreError> {
        validate(draft)?;
        {
            let mut entries = lock(&self.entries);
            let entry = entries
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            entry.date = draft.date.clone();
            entry.person1 = draft.person1.clone();
            entry.person2 = draft.person2.clone();
            entry.person3 = draft.person3.clone();
            entry.timestamp = now_secs();
        }
        info!("update: entry {} for {}", id, draft.date);
        self.notify();
        Ok(())
    }

    fn subscribe(&self, callback: SnapshotCallback) -> SubscriptionId {
        let subscriber: Subscriber = Arc::from(callback);
        let id = {
            let mut next = lock(&self.next_subscription);
            *next += 1;
            *next
        };
        lock(&self.subscribers).push((id, subscriber.clone()));
        debug!("subscribe: subscription {}", id);
        subscriber(self.entries().as_slice());
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = lock(&self.subscribers);
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        debug!("unsubscribe: subscription {}", id);
        subscribers.len() < before
    }
}
