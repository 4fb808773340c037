use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::todo::Todo;

/// Current schema version
pub const CURRENT_VERSION: u32 = 2;

#[derive(Serialize, Deserialize)]
pub struct Store {
    pub version: u32,
    /// Whether the store has been seeded from the remote source
    pub seeded: bool,
    /// Highest todo number handed out so far
    pub next_number: u64,
    pub todos: Vec<Todo>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            seeded: false,
            next_number: 0,
            todos: vec![],
        }
    }
}

impl Store {
    /// Adds a todo, assigning the next user-facing number when it has none.
    pub fn add_todo(&mut self, mut todo: Todo) -> Uuid {
        if todo.number == 0 {
            self.next_number += 1;
            todo.number = self.next_number;
        } else if todo.number > self.next_number {
            self.next_number = todo.number;
        }
        let id = todo.id;
        self.todos.push(todo);
        id
    }

    pub fn get_todo(&self, id: Uuid) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn get_todo_mut(&mut self, id: Uuid) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| t.id == id)
    }

    pub fn get_todo_by_number(&self, number: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.number == number)
    }

    pub fn remove_todo(&mut self, id: Uuid) -> Option<Todo> {
        let index = self.todos.iter().position(|t| t.id == id)?;
        Some(self.todos.remove(index))
    }

    /// Case-insensitive containment search over title and body,
    /// ordered by creation time descending. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Todo> {
        let query = query.to_lowercase();
        let mut matches: Vec<&Todo> = self
            .todos
            .iter()
            .filter(|t| {
                query.is_empty()
                    || t.title.to_lowercase().contains(&query)
                    || t.task.to_lowercase().contains(&query)
            })
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    fn todo(title: &str, task: &str, seconds: i64) -> Todo {
        Todo {
            id: Uuid::new_v4(),
            title: String::from(title),
            task: String::from(task),
            created_at: Timestamp::from_second(seconds).unwrap(),
            ..Todo::default()
        }
    }

    #[test]
    fn test_add_todo_assigns_sequential_numbers() {
        let mut store = Store::default();
        store.add_todo(todo("First", "", 1));
        store.add_todo(todo("Second", "", 2));

        assert_eq!(store.get_todo_by_number(1).unwrap().title, "First");
        assert_eq!(store.get_todo_by_number(2).unwrap().title, "Second");
        assert_eq!(store.next_number, 2);
    }

    #[test]
    fn test_add_todo_keeps_existing_number() {
        let mut store = Store::default();
        let mut existing = todo("Imported", "", 1);
        existing.number = 7;
        store.add_todo(existing);

        assert_eq!(store.get_todo_by_number(7).unwrap().title, "Imported");
        assert_eq!(store.next_number, 7);

        store.add_todo(todo("Fresh", "", 2));
        assert_eq!(store.get_todo_by_number(8).unwrap().title, "Fresh");
    }

    #[test]
    fn test_search_matches_title_and_body() {
        let mut store = Store::default();
        store.add_todo(todo("Buy milk", "2% from the corner shop", 1));
        store.add_todo(todo("Call plumber", "kitchen sink leaks milk white foam", 2));
        store.add_todo(todo("Read book", "", 3));

        let matches = store.search("MILK");
        assert_eq!(matches.len(), 2);

        let matches = store.search("plumber");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Call plumber");
    }

    #[test]
    fn test_search_orders_by_recency_descending() {
        let mut store = Store::default();
        store.add_todo(todo("Oldest", "", 10));
        store.add_todo(todo("Newest", "", 30));
        store.add_todo(todo("Middle", "", 20));

        let all = store.search("");
        let titles: Vec<&str> = all.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    }

    #[test]
    fn test_remove_todo() {
        let mut store = Store::default();
        let id = store.add_todo(todo("Gone soon", "", 1));

        let removed = store.remove_todo(id).unwrap();
        assert_eq!(removed.title, "Gone soon");
        assert!(store.get_todo(id).is_none());
        assert!(store.remove_todo(id).is_none());
    }
}
