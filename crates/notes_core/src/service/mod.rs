//! Use-case services over the task backend.
//!
//! # Responsibility
//! - Orchestrate `TaskAccess` calls into screen-level operations.
//! - Keep the rendered list consistent with the service state.

pub mod board;
pub mod task_service;

pub use board::{NoteBoard, NoteRow};
pub use task_service::{TaskInput, TaskService, TaskServiceError, TaskServiceResult};
