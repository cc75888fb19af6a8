//! Client core for the notes app.
//!
//! Owns deadline date handling, display status resolution, the task service
//! contract with its REST client, and device-local note storage.

pub mod access;
pub mod config;
pub mod date;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod status;

pub use access::{AccessResult, HttpTaskAccess, TaskAccess, TaskAccessError, TaskSort};
pub use config::{ClientConfig, ConfigError};
pub use date::{CalendarDate, Locale, ParseError};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogInitError};
pub use model::note::LocalNote;
pub use model::task::{DisplayStatus, Priority, Task, TaskId, TaskValidationError};
pub use repo::kv_store::{KvStore, SqliteKvStore};
pub use repo::note_store::LocalNoteStore;
pub use repo::{RepoError, RepoResult};
pub use service::{NoteBoard, NoteRow, TaskInput, TaskService, TaskServiceError};
pub use status::{deadline_urgency, resolve_status, DeadlineUrgency};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
