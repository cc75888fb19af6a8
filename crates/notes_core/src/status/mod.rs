//! Status derivation for task display.
//!
//! # Responsibility
//! - Derive `DisplayStatus` from completion flag, deadline and today.
//! - Classify deadline urgency for list decoration.
//!
//! # Invariants
//! - Results are pure functions of their inputs; nothing is cached.
//! - The deadline day itself counts as on time.

mod resolver;

pub use resolver::{deadline_urgency, resolve_status, DeadlineUrgency, DUE_SOON_DAYS};
