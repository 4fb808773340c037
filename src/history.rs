use crate::models::memento::TodoMemento;

pub mod caretaker;
pub mod originator;

/// Snapshot seam between the caretaker and the live draft.
///
/// The caretaker never reaches into draft fields directly; it only captures
/// and restores whole snapshots through this trait.
pub trait Originator {
    /// Snapshot of the current editable fields. Pure, no side effect.
    fn memento(&self) -> TodoMemento;

    /// Overwrites the editable fields from a snapshot.
    fn restore(&mut self, memento: &TodoMemento);
}
