//! Local note model for the offline key-value fallback.
//!
//! # Invariants
//! - `id` is a UUID v4 string generated on creation and never reused.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Note kept only on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalNote {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl LocalNote {
    /// Creates a note with a fresh stable id.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            body: body.into(),
        }
    }
}
