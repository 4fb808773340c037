/// Point-in-time snapshot of a draft's editable fields.
///
/// Captured by the caretaker on every backup; equality is structural and a
/// snapshot is never mutated after capture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoMemento {
    /// Title of the draft
    pub title: String,
    /// Body text of the draft
    pub task: String,
}

impl TodoMemento {
    pub fn new(title: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            task: task.into(),
        }
    }
}
