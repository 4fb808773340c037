use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Default, Clone)]
pub struct Todo {
    /// UUID to identify the todo
    pub id: Uuid,
    /// User-facing auto-incremental todo number
    pub number: u64,
    /// Title of the todo
    pub title: String,
    /// Body text of the todo
    pub task: String,
    /// Whether the todo has been completed
    pub completed: bool,
    /// When the todo was created
    pub created_at: Timestamp,
}
