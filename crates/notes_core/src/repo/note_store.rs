//! Local note store kept as a JSON array under one key.
//!
//! # Responsibility
//! - Load, upsert, update and delete device-local notes.
//!
//! # Invariants
//! - Notes keep insertion order; upsert replaces in place.
//! - A missing key reads as an empty list.

use super::kv_store::KvStore;
use super::{RepoError, RepoResult};
use crate::model::note::LocalNote;
use log::debug;

/// Key under which the note list is stored.
pub const NOTES_KEY: &str = "notes";

/// Note persistence over any `KvStore`.
#[derive(Debug)]
pub struct LocalNoteStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> LocalNoteStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns all stored notes in insertion order.
    pub fn load_notes(&self) -> RepoResult<Vec<LocalNote>> {
        match self.store.get(NOTES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|err| {
                RepoError::InvalidData(format!("`{NOTES_KEY}` is not a note list: {err}"))
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Returns one note by id.
    pub fn get_note(&self, id: &str) -> RepoResult<Option<LocalNote>> {
        Ok(self.load_notes()?.into_iter().find(|note| note.id == id))
    }

    /// Inserts `note`, or replaces the stored note with the same id.
    pub fn save_note(&self, note: &LocalNote) -> RepoResult<()> {
        let mut notes = self.load_notes()?;
        match notes.iter_mut().find(|existing| existing.id == note.id) {
            Some(existing) => *existing = note.clone(),
            None => notes.push(note.clone()),
        }
        self.write_notes(&notes)
    }

    /// Replaces an existing note.
    ///
    /// # Errors
    /// - `NotFound` when no note has `note.id`.
    pub fn update_note(&self, note: &LocalNote) -> RepoResult<()> {
        let mut notes = self.load_notes()?;
        let existing = notes
            .iter_mut()
            .find(|existing| existing.id == note.id)
            .ok_or_else(|| RepoError::NotFound(note.id.clone()))?;
        *existing = note.clone();
        self.write_notes(&notes)
    }

    /// Deletes a note; returns whether it existed.
    pub fn delete_note(&self, id: &str) -> RepoResult<bool> {
        let mut notes = self.load_notes()?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            return Ok(false);
        }
        self.write_notes(&notes)?;
        Ok(true)
    }

    fn write_notes(&self, notes: &[LocalNote]) -> RepoResult<()> {
        let raw = serde_json::to_string(notes)
            .map_err(|err| RepoError::InvalidData(format!("cannot encode notes: {err}")))?;
        self.store.put(NOTES_KEY, &raw)?;
        debug!(
            "event=local_notes_write module=repo status=ok count={}",
            notes.len()
        );
        Ok(())
    }
}
