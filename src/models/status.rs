/// Published state of the undo/redo history.
///
/// Replaced wholesale on every backup/undo/redo; observers use it to
/// enable or disable undo/redo controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStatus {
    /// History holds at most the baseline snapshot
    pub is_empty: bool,
    /// The cursor can move back
    pub is_undo_available: bool,
    /// The cursor can move forward
    pub is_redo_available: bool,
}

impl Default for HistoryStatus {
    fn default() -> Self {
        Self {
            is_empty: true,
            is_undo_available: false,
            is_redo_available: false,
        }
    }
}
