use log::{debug, info};
use rand::Rng;

use crate::config::{EntryDraft, LogEntry, LoggedNames, NamePool, Pick, PickError, StoreError};
use crate::entries::logged_names;
use crate::store::LogStore;
use crate::{parse_pool, Picker};

/// Everything an admin session carries around: who is signed in, which
/// entry is being edited, and the picker with its memory of this session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    picker: Picker,
    current_user: Option<String>,
    editing_id: Option<String>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn sign_in(&mut self, user: &str) {
        info!("sign_in: {}", user);
        self.current_user = Some(user.to_string());
    }

    /// Signing out also abandons any edit in progress.
    pub fn sign_out(&mut self) {
        info!("sign_out: {:?}", self.current_user);
        self.current_user = None;
        self.cancel_edit();
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    /// The next save will create a new entry.
    pub fn begin_new_entry(&mut self) {
        self.editing_id = None;
    }

    /// Loads an entry so that the next save replaces it.
    pub fn begin_edit<S: LogStore + ?Sized>(
        &mut self,
        store: &S,
        id: &str,
    ) -> Result<LogEntry, StoreError> {
        let entry = store.get(id)?;
        debug!("begin_edit: {:?}", entry);
        self.editing_id = Some(id.to_string());
        Ok(entry)
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
    }

    /// Saves the draft: it replaces the entry being edited, or is added as a
    /// new one. Returns the id of the stored entry.
    ///
    /// Only a signed-in user may write to the log.
    pub fn save_entry<S: LogStore + ?Sized>(
        &mut self,
        store: &S,
        draft: &EntryDraft,
    ) -> Result<String, StoreError> {
        if !self.is_signed_in() {
            return Err(StoreError::NotSignedIn);
        }
        let id = match self.editing_id.clone() {
            Some(id) => {
                store.update(&id, draft)?;
                id
            }
            None => store.add(draft)?,
        };
        self.cancel_edit();
        Ok(id)
    }

    pub fn pick<R: Rng + ?Sized>(
        &mut self,
        pool: &NamePool,
        logged: &LoggedNames,
        rng: &mut R,
    ) -> Result<Pick, PickError> {
        self.picker.pick(pool, logged, rng)
    }

    /// Picks against the current content of the store.
    pub fn pick_from_store<S: LogStore + ?Sized, R: Rng + ?Sized>(
        &mut self,
        pool_text: &str,
        store: &S,
        rng: &mut R,
    ) -> Result<Pick, PickError> {
        let logged = logged_names(&store.entries());
        self.picker.pick(&parse_pool(pool_text), &logged, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResetReason;
    use crate::store::MemoryLogStore;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn draft(date: &str, p: [&str; 3]) -> EntryDraft {
        EntryDraft {
            date: date.to_string(),
            person1: p[0].to_string(),
            person2: p[1].to_string(),
            person3: p[2].to_string(),
        }
    }

    #[test]
    fn save_requires_sign_in() {
        let store = MemoryLogStore::new();
        let mut session = Session::new();
        let res = session.save_entry(&store, &draft("2024-05-01", ["A", "B", "C"]));
        assert_eq!(res, Err(StoreError::NotSignedIn));
        assert_eq!(
            StoreError::NotSignedIn.to_string(),
            "Please log in to make changes"
        );
        assert!(store.is_empty());
    }

    #[test]
    fn add_then_edit() {
        let store = MemoryLogStore::new();
        let mut session = Session::new();
        session.sign_in("admin@example.com");
        assert_eq!(session.current_user(), Some("admin@example.com"));

        session.begin_new_entry();
        let id = session
            .save_entry(&store, &draft("2024-05-01", ["A", "B", "C"]))
            .unwrap();
        assert_eq!(store.len(), 1);

        let loaded = session.begin_edit(&store, &id).unwrap();
        assert_eq!(session.editing_id(), Some(id.as_str()));
        let mut d = EntryDraft::from(&loaded);
        d.person3 = "Z".to_string();
        let id2 = session.save_entry(&store, &d).unwrap();
        assert_eq!(id, id2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().person3, "Z");
        assert_eq!(session.editing_id(), None);
    }

    #[test]
    fn edit_unknown_entry() {
        let store = MemoryLogStore::new();
        let mut session = Session::new();
        assert!(matches!(
            session.begin_edit(&store, "missing"),
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(session.editing_id(), None);
    }

    #[test]
    fn sign_out_cancels_edit() {
        let store = MemoryLogStore::new();
        let mut session = Session::new();
        session.sign_in("admin");
        let id = session
            .save_entry(&store, &draft("2024-05-01", ["A", "B", "C"]))
            .unwrap();
        session.begin_edit(&store, &id).unwrap();
        session.sign_out();
        assert!(!session.is_signed_in());
        assert_eq!(session.editing_id(), None);
    }

    #[test]
    fn pick_avoids_logged_members() {
        let store = MemoryLogStore::new();
        let mut session = Session::new();
        session.sign_in("admin");
        session
            .save_entry(&store, &draft("2024-05-01", ["Alice", "Bob", "Carol"]))
            .unwrap();
        let mut rng = ChaChaRng::seed_from_u64(8);
        let pool = "Alice\nBob\nCarol\nDave";
        let p = session.pick_from_store(pool, &store, &mut rng).unwrap();
        assert_eq!(p.name, "Dave");
        assert_eq!(p.reset, None);

        session
            .save_entry(&store, &draft("2024-05-02", ["Dave", "Bob", "Carol"]))
            .unwrap();
        let p = session.pick_from_store(pool, &store, &mut rng).unwrap();
        assert_eq!(p.reset, Some(ResetReason::AllLogged));
        assert!(session.picker().used_names().contains(&p.name));
    }
}
