#![allow(dead_code)]

use async_trait::async_trait;
use notes_core::access::{AccessResult, TaskAccess, TaskAccessError, TaskSort};
use notes_core::{CalendarDate, Task, TaskId};
use std::sync::Mutex;

/// In-memory task backend with scripted failures.
#[derive(Default)]
pub struct FakeTaskAccess {
    tasks: Mutex<Vec<Task>>,
    next_id: Mutex<TaskId>,
    fail_next: Mutex<Option<TaskAccessError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeTaskAccess {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().filter_map(|task| task.id).max().unwrap_or(0);
        Self {
            tasks: Mutex::new(tasks),
            next_id: Mutex::new(next_id),
            ..Self::default()
        }
    }

    /// Makes the next call fail with `err`.
    pub fn fail_next(&self, err: TaskAccessError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored(&self, id: TaskId) -> Option<Task> {
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|task| task.id == Some(id))
            .cloned()
    }

    fn enter(&self, call: String) -> AccessResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> AccessResult<Task> {
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == Some(id))
            .ok_or(TaskAccessError::NotFound(Some(id)))?;
        task.completed = completed;
        Ok(task.clone())
    }
}

#[async_trait]
impl TaskAccess for FakeTaskAccess {
    async fn list(&self, sort: Option<TaskSort>) -> AccessResult<Vec<Task>> {
        self.enter(format!("list {:?}", sort.map(TaskSort::as_query)))?;
        let mut tasks = self.tasks.lock().unwrap().clone();
        if sort == Some(TaskSort::Deadline) {
            tasks.sort_by_key(|task| task.deadline.unwrap_or(CalendarDate::MAX));
        }
        Ok(tasks)
    }

    async fn get(&self, id: TaskId) -> AccessResult<Task> {
        self.enter(format!("get {id}"))?;
        self.stored(id).ok_or(TaskAccessError::NotFound(Some(id)))
    }

    async fn create(&self, task: &Task) -> AccessResult<Task> {
        self.enter("create".to_string())?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let created = task.clone().with_id(*next_id).with_completed(false);
        self.tasks.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, task: &Task) -> AccessResult<Task> {
        let id = task.id.ok_or(TaskAccessError::MissingId)?;
        self.enter(format!("update {id}"))?;
        let mut tasks = self.tasks.lock().unwrap();
        let stored = tasks
            .iter_mut()
            .find(|stored| stored.id == Some(id))
            .ok_or(TaskAccessError::NotFound(Some(id)))?;
        *stored = task.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: TaskId) -> AccessResult<()> {
        self.enter(format!("delete {id}"))?;
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|task| task.id != Some(id));
        if tasks.len() == before {
            return Err(TaskAccessError::NotFound(Some(id)));
        }
        Ok(())
    }

    async fn complete(&self, id: TaskId) -> AccessResult<Task> {
        self.enter(format!("complete {id}"))?;
        self.set_completed(id, true)
    }

    async fn uncomplete(&self, id: TaskId) -> AccessResult<Task> {
        self.enter(format!("uncomplete {id}"))?;
        self.set_completed(id, false)
    }
}

pub fn day(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::from_ymd_opt(year, month, day).unwrap()
}
