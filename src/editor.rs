use thiserror::Error;

use crate::{
    history::{Originator, caretaker::TodoCaretaker, originator::TodoOriginator},
    models::{memento::TodoMemento, status::HistoryStatus, store::Store, todo::Todo},
    services::todos::save_todo,
    storage::{Storage, StorageError},
};

#[derive(Debug, Error)]
pub enum EditorSaveError {
    #[error("A todo needs a non-empty title and body")]
    InvalidDraft,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// One editing session: a draft, its undo/redo history, and the fields the
/// session opened with. Created per todo being created or edited and
/// discarded when the editor closes; nothing here outlives the session
/// except the todo written on save.
pub struct EditorSession {
    originator: TodoOriginator,
    caretaker: TodoCaretaker,
    opened_with: TodoMemento,
}

impl EditorSession {
    /// Session over a brand new draft.
    pub fn new() -> Self {
        Self::start(TodoOriginator::new())
    }

    /// Session editing an existing todo.
    pub fn edit(todo: &Todo) -> Self {
        Self::start(TodoOriginator::from_todo(todo))
    }

    fn start(originator: TodoOriginator) -> Self {
        let opened_with = originator.memento();
        let mut caretaker = TodoCaretaker::new();
        // Baseline snapshot: the state the session opened with is always
        // reachable through undo.
        caretaker.backup(&originator);

        Self {
            originator,
            caretaker,
            opened_with,
        }
    }

    pub fn title(&self) -> &str {
        self.originator.title()
    }

    pub fn task(&self) -> &str {
        self.originator.task()
    }

    pub fn status(&self) -> HistoryStatus {
        self.caretaker.status()
    }

    pub fn is_valid(&self) -> bool {
        self.originator.is_valid()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&HistoryStatus) + 'static) {
        self.caretaker.subscribe(subscriber);
    }

    /// Applies a title edit and records it as one undoable step.
    pub fn update_title(&mut self, title: impl Into<String>) {
        self.originator.set_title(title);
        self.caretaker.backup(&self.originator);
    }

    /// Applies a body edit and records it as one undoable step.
    pub fn update_task(&mut self, task: impl Into<String>) {
        self.originator.set_task(task);
        self.caretaker.backup(&self.originator);
    }

    pub fn undo(&mut self) {
        self.caretaker.undo(&mut self.originator);
    }

    pub fn redo(&mut self) {
        self.caretaker.redo(&mut self.originator);
    }

    /// Whether the draft differs from the fields the session opened with.
    pub fn has_unsaved_changes(&self) -> bool {
        self.originator.memento() != self.opened_with
    }

    /// Builds the entity and persists it with the upsert-by-existence
    /// policy. The session itself is left untouched, so a failed save
    /// keeps the history intact.
    pub fn save(&self, store: &mut Store, storage: &impl Storage) -> Result<Todo, EditorSaveError> {
        let todo = self.originator.build().ok_or(EditorSaveError::InvalidDraft)?;
        let saved = save_todo(store, storage, todo)?;
        Ok(saved)
    }
}
