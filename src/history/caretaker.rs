use crate::{
    history::Originator,
    models::{memento::TodoMemento, status::HistoryStatus},
};

type StatusSubscriber = Box<dyn FnMut(&HistoryStatus)>;

/// Owner of the undo/redo history for one draft.
///
/// Holds the ordered snapshot sequence and a cursor into it. The draft is
/// borrowed per call rather than owned, so the caller keeps normal access
/// to it between operations. Undo/redo past a boundary are silent no-ops.
pub struct TodoCaretaker {
    mementos: Vec<TodoMemento>,
    pointer: usize,
    status: HistoryStatus,
    subscribers: Vec<StatusSubscriber>,
}

impl TodoCaretaker {
    pub fn new() -> Self {
        Self {
            mementos: vec![],
            pointer: 0,
            status: HistoryStatus::default(),
            subscribers: vec![],
        }
    }

    /// Last published status.
    pub fn status(&self) -> HistoryStatus {
        self.status
    }

    /// Registers a callback invoked synchronously on every status change.
    /// Callbacks must not call back into the caretaker.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&HistoryStatus) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Captures the current snapshot of the draft and appends it to the
    /// history. Snapshots after the cursor are discarded first, so editing
    /// after an undo abandons the redo branch. A snapshot identical to the
    /// previous one is still recorded.
    pub fn backup(&mut self, originator: &impl Originator) {
        if self.pointer + 1 < self.mementos.len() {
            self.mementos.truncate(self.pointer + 1);
        }

        self.mementos.push(originator.memento());
        self.pointer = self.mementos.len() - 1;

        self.publish();
    }

    /// Moves the cursor back one snapshot and restores it into the draft.
    pub fn undo(&mut self, originator: &mut impl Originator) {
        if self.pointer == 0 {
            return;
        }
        self.pointer -= 1;
        originator.restore(&self.mementos[self.pointer]);

        self.publish();
    }

    /// Moves the cursor forward one snapshot and restores it into the draft.
    pub fn redo(&mut self, originator: &mut impl Originator) {
        if self.pointer + 1 >= self.mementos.len() {
            return;
        }
        self.pointer += 1;
        originator.restore(&self.mementos[self.pointer]);

        self.publish();
    }

    fn publish(&mut self) {
        self.status = HistoryStatus {
            is_empty: self.mementos.len() <= 1,
            is_undo_available: self.pointer > 0,
            is_redo_available: self.pointer + 1 < self.mementos.len(),
        };
        for subscriber in &mut self.subscribers {
            subscriber(&self.status);
        }
    }
}
