//! Owned note list rendered once per pass.
//!
//! # Responsibility
//! - Hold the tasks currently shown to the user.
//! - Apply local mutations (optimistic toggle, removal) before the service
//!   confirms them.
//! - Render rows with freshly derived status and urgency.
//!
//! # Invariants
//! - Rows are rebuilt from `Task` values on every `render`; status is never
//!   stored on the board.
//! - Task order is the order received from the service.

use crate::date::{format_deadline, CalendarDate, Locale};
use crate::model::task::{DisplayStatus, Priority, Task, TaskId};
use crate::status::{deadline_urgency, DeadlineUrgency};

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: Option<TaskId>,
    pub title: String,
    pub body: String,
    /// Localized deadline, or the no-deadline label.
    pub deadline_label: String,
    pub status: DisplayStatus,
    pub urgency: DeadlineUrgency,
    pub priority: Option<Priority>,
    /// Checkbox state.
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteBoard {
    tasks: Vec<Task>,
}

impl NoteBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Replaces the whole list, e.g. after a reload.
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == Some(id))
    }

    /// Replaces the task with the same id, or appends it.
    pub fn upsert(&mut self, task: Task) {
        let slot = task
            .id
            .and_then(|id| self.tasks.iter_mut().find(|existing| existing.id == Some(id)));
        match slot {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    /// Sets the completion flag locally; returns the previous value.
    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| task.id == Some(id))?;
        Some(std::mem::replace(&mut task.completed, completed))
    }

    /// Removes a task; returns its former position and value.
    pub fn remove(&mut self, id: TaskId) -> Option<(usize, Task)> {
        let index = self.tasks.iter().position(|task| task.id == Some(id))?;
        Some((index, self.tasks.remove(index)))
    }

    /// Puts a removed task back at (or near) its former position.
    pub fn restore(&mut self, index: usize, task: Task) {
        let index = index.min(self.tasks.len());
        self.tasks.insert(index, task);
    }

    /// Renders every task for `today`.
    pub fn render(&self, today: CalendarDate, locale: Locale) -> Vec<NoteRow> {
        self.tasks
            .iter()
            .map(|task| render_row(task, today, locale))
            .collect()
    }
}

fn render_row(task: &Task, today: CalendarDate, locale: Locale) -> NoteRow {
    let status = task.display_status(today);
    NoteRow {
        id: task.id,
        title: task.title.clone(),
        body: task.body.clone(),
        deadline_label: format_deadline(task.deadline, locale),
        status,
        urgency: deadline_urgency(task.deadline, today),
        priority: task.priority,
        checked: status.is_completed(),
    }
}
