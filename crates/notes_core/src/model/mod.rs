//! Domain model for tasks and local notes.
//!
//! # Responsibility
//! - Define the task record, its label sets and client-side validation.
//! - Define the device-local note kept by the offline fallback store.
//!
//! # Invariants
//! - Display status is derived, never a stored field.
//! - Label lookups are exhaustive matches with a typed error.

pub mod note;
pub mod quick_entry;
pub mod task;
