mod config;
pub mod entries;
pub mod manual;
pub mod session;
pub mod store;

use log::{debug, info};
use rand::Rng;

use std::collections::HashSet;
use std::sync::Mutex;

pub use crate::config::*;
pub use crate::entries::*;
pub use crate::session::Session;
pub use crate::store::{LogStore, MemoryLogStore, SnapshotCallback, SubscriptionId};

/// Parses the free-form text of a name pool.
///
/// Names are separated by newlines or commas. Each token is trimmed and the
/// empty ones are dropped. Order and repeated names are preserved.
///
/// ```
/// use lucky_dip::parse_pool;
///
/// let pool = parse_pool("Alice\nBob, Carol");
/// assert_eq!(pool.names(), &["Alice", "Bob", "Carol"]);
/// assert!(parse_pool(" ,, \n").is_empty());
/// ```
pub fn parse_pool(text: &str) -> NamePool {
    NamePool::from_names(text.split(|c: char| c == '\n' || c == ','))
}

// The pool names that are not in the log, in pool order.
fn not_logged<'a>(pool: &'a NamePool, logged: &LoggedNames) -> Vec<&'a String> {
    pool.iter().filter(|n| !logged.contains(n.as_str())).collect()
}

/// The lucky-dip picker.
///
/// It remembers the names drawn during the current session so that the same
/// person is not drawn twice before everyone else had a turn. This memory is
/// the only state it keeps: the pool and the logged names are supplied fresh
/// on every call.
#[derive(Debug, Clone, Default)]
pub struct Picker {
    used: HashSet<String>,
}

impl Picker {
    pub fn new() -> Picker {
        Picker::default()
    }

    /// The names drawn since the last reset.
    pub fn used_names(&self) -> &HashSet<String> {
        &self.used
    }

    /// Draws one name from the pool.
    ///
    /// Names already in the log are avoided, and so are the names drawn
    /// earlier in this session. When every name of the pool is logged, the
    /// whole pool becomes eligible again and the pick is flagged with
    /// [`ResetReason::AllLogged`]. When every remaining name was already
    /// drawn in the session, the session memory is cleared silently.
    ///
    /// Arguments:
    /// * `pool` the configured names
    /// * `logged` the names present in the persisted log (may be empty)
    /// * `rng` the source of randomness; seed it to get repeatable draws
    pub fn pick<R: Rng + ?Sized>(
        &mut self,
        pool: &NamePool,
        logged: &LoggedNames,
        rng: &mut R,
    ) -> Result<Pick, PickError> {
        if pool.is_empty() {
            debug!("pick: empty pool");
            return Err(PickError::EmptyPool);
        }

        let mut reset: Option<ResetReason> = None;
        let mut available = not_logged(pool, logged);
        if available.is_empty() {
            info!(
                "pick: all {} names of the pool are logged, starting a new round",
                pool.len()
            );
            available = pool.iter().collect();
            self.used.clear();
            reset = Some(ResetReason::AllLogged);
        }

        let mut eligible: Vec<&String> = available
            .iter()
            .filter(|n| !self.used.contains(n.as_str()))
            .cloned()
            .collect();
        if eligible.is_empty() {
            debug!(
                "pick: all {} available names were used in this session, clearing {:?}",
                available.len(),
                self.used
            );
            self.used.clear();
            eligible = not_logged(pool, logged);
        }
        // Not empty: when everything is logged, the used names were cleared above.
        debug!("pick: eligible: {:?}", eligible);

        let idx = rng.gen_range(0..eligible.len());
        let name = eligible[idx].clone();
        self.used.insert(name.clone());
        info!("pick: selected {:?} ({} eligible)", name, eligible.len());
        Ok(Pick { name, reset })
    }

    /// Same as [`Picker::pick`], starting from the raw text of the pool.
    pub fn pick_text<R: Rng + ?Sized>(
        &mut self,
        pool_text: &str,
        logged: &LoggedNames,
        rng: &mut R,
    ) -> Result<Pick, PickError> {
        self.pick(&parse_pool(pool_text), logged, rng)
    }
}

/// A picker that can be shared between threads.
///
/// Each pick holds the lock for the whole read-modify-write of the session
/// memory, so concurrent callers never lose each other's draws.
#[derive(Debug, Default)]
pub struct SharedPicker {
    inner: Mutex<Picker>,
}

impl SharedPicker {
    pub fn new(picker: Picker) -> SharedPicker {
        SharedPicker {
            inner: Mutex::new(picker),
        }
    }

    pub fn pick<R: Rng + ?Sized>(
        &self,
        pool: &NamePool,
        logged: &LoggedNames,
        rng: &mut R,
    ) -> Result<Pick, PickError> {
        // The picker holds a plain set: a panic elsewhere cannot leave it half-updated.
        let mut picker = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        picker.pick(pool, logged, rng)
    }

    pub fn used_names(&self) -> HashSet<String> {
        let picker = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        picker.used_names().clone()
    }
}
