//! Task list use-cases.
//!
//! # Responsibility
//! - Turn user input into validated tasks before calling `TaskAccess`.
//! - Keep the `NoteBoard` in step with the service, including optimistic
//!   completion toggles.
//!
//! # Invariants
//! - A failed toggle leaves the board as it was before the call.
//! - A failed delete restores the task at its former position, except when
//!   the service reports it is already gone.

use crate::access::{TaskAccess, TaskAccessError, TaskSort};
use crate::date::{from_iso, parse_localized, CalendarDate, Locale, ParseError};
use crate::model::quick_entry::apply_title_macros;
use crate::model::task::{Priority, Task, TaskId, TaskValidationError};
use crate::service::board::{NoteBoard, NoteRow};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw form input for create/edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub body: String,
    /// Localized date text, ISO date, the no-deadline label, or `None`.
    pub deadline: Option<String>,
    pub priority: Option<Priority>,
}

impl TaskInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskServiceError {
    /// Deadline text could not be read.
    Input(ParseError),
    /// Task rejected before any request was sent.
    Invalid(TaskValidationError),
    Access(TaskAccessError),
}

impl TaskServiceError {
    /// Message suitable for an error dialog.
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(err) => format!("invalid deadline: {err}"),
            Self::Invalid(err) => err.to_string(),
            Self::Access(err) => err.user_message(),
        }
    }
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Access(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Invalid(err) => Some(err),
            Self::Access(err) => Some(err),
        }
    }
}

impl From<ParseError> for TaskServiceError {
    fn from(value: ParseError) -> Self {
        Self::Input(value)
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<TaskAccessError> for TaskServiceError {
    fn from(value: TaskAccessError) -> Self {
        Self::Access(value)
    }
}

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Use-case facade over a task backend and the on-screen list.
pub struct TaskService<A: TaskAccess> {
    access: A,
    board: NoteBoard,
    locale: Locale,
}

impl<A: TaskAccess> TaskService<A> {
    pub fn new(access: A, locale: Locale) -> Self {
        Self {
            access,
            board: NoteBoard::default(),
            locale,
        }
    }

    pub fn access(&self) -> &A {
        &self.access
    }

    pub fn board(&self) -> &NoteBoard {
        &self.board
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Reloads the board from the service.
    pub async fn load(&mut self, sort: Option<TaskSort>) -> TaskServiceResult<&[Task]> {
        let tasks = self.access.list(sort).await?;
        info!(
            "event=board_load module=service status=ok count={}",
            tasks.len()
        );
        self.board.replace(tasks);
        Ok(self.board.tasks())
    }

    /// Fetches one task without touching the board.
    pub async fn open(&self, id: TaskId) -> TaskServiceResult<Task> {
        Ok(self.access.get(id).await?)
    }

    /// Builds the task that `create` would send, without sending it.
    pub fn draft(&self, input: &TaskInput, today: CalendarDate) -> TaskServiceResult<Task> {
        let mut task = Task::new(input.title.clone(), input.body.clone())
            .with_deadline(self.read_deadline(input.deadline.as_deref())?)
            .with_priority(input.priority);
        task.normalize();
        apply_title_macros(&mut task, today)?;
        task.validate()?;
        Ok(task)
    }

    /// Creates a task and appends the stored copy to the board.
    pub async fn create(&mut self, input: &TaskInput, today: CalendarDate) -> TaskServiceResult<Task> {
        let task = self.draft(input, today)?;
        let created = self.access.create(&task).await?;
        self.board.upsert(created.clone());
        Ok(created)
    }

    /// Replaces the editable fields of task `id`.
    ///
    /// Completion is kept from the board copy when one is present.
    pub async fn edit(
        &mut self,
        id: TaskId,
        input: &TaskInput,
        today: CalendarDate,
    ) -> TaskServiceResult<Task> {
        let mut task = self.draft(input, today)?.with_id(id);
        if let Some(current) = self.board.get(id) {
            task.completed = current.completed;
        }
        let updated = self.access.update(&task).await?;
        self.board.upsert(updated.clone());
        Ok(updated)
    }

    /// Toggles completion optimistically.
    ///
    /// The board reflects `completed` before the request is sent and is
    /// reverted when the request fails.
    pub async fn set_completed(&mut self, id: TaskId, completed: bool) -> TaskServiceResult<Task> {
        let previous = self.board.set_completed(id, completed);

        let result = if completed {
            self.access.complete(id).await
        } else {
            self.access.uncomplete(id).await
        };

        match result {
            Ok(task) => {
                self.board.upsert(task.clone());
                Ok(task)
            }
            Err(err) => {
                if let Some(previous) = previous {
                    self.board.set_completed(id, previous);
                }
                warn!(
                    "event=task_toggle module=service status=reverted id={} completed={} error={}",
                    id, completed, err
                );
                Err(err.into())
            }
        }
    }

    /// Removes task `id` locally, then on the service.
    pub async fn delete(&mut self, id: TaskId) -> TaskServiceResult<()> {
        let removed = self.board.remove(id);

        match self.access.delete(id).await {
            Ok(()) => Ok(()),
            Err(err @ TaskAccessError::NotFound(_)) => {
                warn!(
                    "event=task_delete module=service status=missing id={} error={}",
                    id, err
                );
                Err(err.into())
            }
            Err(err) => {
                if let Some((index, task)) = removed {
                    self.board.restore(index, task);
                }
                warn!(
                    "event=task_delete module=service status=reverted id={} error={}",
                    id, err
                );
                Err(err.into())
            }
        }
    }

    /// Renders the board for `today` in the service locale.
    pub fn render(&self, today: CalendarDate) -> Vec<NoteRow> {
        self.board.render(today, self.locale)
    }

    fn read_deadline(&self, text: Option<&str>) -> TaskServiceResult<Option<CalendarDate>> {
        let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
            return Ok(None);
        };
        parse_localized(text, self.locale)
            .or_else(|err| from_iso(text).map_err(|_| err))
            .map_err(TaskServiceError::from)
    }
}
