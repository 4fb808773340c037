use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    history::Originator,
    models::{memento::TodoMemento, todo::Todo},
};

/// Owner of the single live draft being created or edited.
///
/// Only `title` and `task` take part in undo/redo; the identifier, number,
/// completion flag and timestamp are fixed for the lifetime of the draft.
pub struct TodoOriginator {
    memento: TodoMemento,
    id: Uuid,
    number: Option<u64>,
    completed: Option<bool>,
    created_at: Option<Timestamp>,
}

impl TodoOriginator {
    /// Draft for a brand new todo: fresh identifier, empty fields.
    pub fn new() -> Self {
        Self {
            memento: TodoMemento::default(),
            id: Uuid::new_v4(),
            number: None,
            completed: None,
            created_at: None,
        }
    }

    /// Draft pre-populated from an existing todo.
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            memento: TodoMemento::new(todo.title.clone(), todo.task.clone()),
            id: todo.id,
            number: Some(todo.number),
            completed: Some(todo.completed),
            created_at: Some(todo.created_at),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.memento.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.memento.title = title.into();
    }

    pub fn task(&self) -> &str {
        &self.memento.task
    }

    pub fn set_task(&mut self, task: impl Into<String>) {
        self.memento.task = task.into();
    }

    /// Whether `build` would currently succeed. Recomputed from the live
    /// fields on every call rather than cached, so it can never drift.
    pub fn is_valid(&self) -> bool {
        !self.memento.title.trim().is_empty() && !self.memento.task.trim().is_empty()
    }

    /// Materializes a finished todo from the draft, trimming both fields.
    /// Returns `None` when either field is empty after trimming.
    pub fn build(&self) -> Option<Todo> {
        if !self.is_valid() {
            return None;
        }

        Some(Todo {
            id: self.id,
            number: self.number.unwrap_or(0),
            title: self.memento.title.trim().to_string(),
            task: self.memento.task.trim().to_string(),
            completed: self.completed.unwrap_or(false),
            created_at: self.created_at.unwrap_or_else(Timestamp::now),
        })
    }
}

impl Originator for TodoOriginator {
    fn memento(&self) -> TodoMemento {
        self.memento.clone()
    }

    fn restore(&mut self, memento: &TodoMemento) {
        self.memento = memento.clone();
    }
}
