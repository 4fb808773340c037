use jiff::Timestamp;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::todo::Todo;

/// Response envelope of the seed endpoint.
#[derive(Deserialize)]
pub struct TodosScheme {
    pub todos: Vec<TodoScheme>,
}

/// Wire model of a single todo as the seed endpoint serves it.
#[derive(Deserialize)]
pub struct TodoScheme {
    /// Numeric identifier on the remote service
    pub id: u64,
    /// Body text of the todo
    pub todo: String,
    /// Completion status
    pub completed: bool,
}

impl TodoScheme {
    /// Maps the wire model into a domain todo.
    ///
    /// The wire model underspecifies the domain: it has no title, no stable
    /// identifier of our own and no creation time, so those are generated.
    /// The `number` is left at zero for the store to assign.
    pub fn map_to_domain(self) -> Todo {
        Todo {
            id: Uuid::new_v4(),
            number: 0,
            title: format!("Task #{}", self.id),
            task: self.todo,
            completed: self.completed,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_seed_payload() {
        let body = r#"{
            "todos": [
                {"id": 1, "todo": "Do something nice", "completed": true},
                {"id": 2, "todo": "Memorize a poem", "completed": false}
            ],
            "total": 2,
            "skip": 0,
            "limit": 30
        }"#;

        let scheme: TodosScheme = serde_json::from_str(body).unwrap();
        assert_eq!(scheme.todos.len(), 2);
        assert_eq!(scheme.todos[0].todo, "Do something nice");
        assert!(scheme.todos[0].completed);
    }

    #[test]
    fn test_map_to_domain_synthesizes_missing_fields() {
        let scheme = TodoScheme {
            id: 42,
            todo: String::from("Water the garden"),
            completed: false,
        };

        let todo = scheme.map_to_domain();
        assert_eq!(todo.title, "Task #42");
        assert_eq!(todo.task, "Water the garden");
        assert!(!todo.completed);
        assert_eq!(todo.number, 0);
        assert!(!todo.id.is_nil());
    }

    #[test]
    fn test_distinct_schemes_get_distinct_identifiers() {
        let a = TodoScheme {
            id: 1,
            todo: String::new(),
            completed: false,
        }
        .map_to_domain();
        let b = TodoScheme {
            id: 1,
            todo: String::new(),
            completed: false,
        }
        .map_to_domain();

        assert_ne!(a.id, b.id);
    }
}
