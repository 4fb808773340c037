use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::{store::Store, todo::Todo},
    storage::{Storage, StorageError},
};

/// Persists a finished todo using the upsert-by-existence policy:
/// an id already present in the store is updated in place, an unknown id
/// is inserted as a new todo (which assigns its number).
pub fn save_todo(
    store: &mut Store,
    storage: &impl Storage,
    todo: Todo,
) -> Result<Todo, StorageError> {
    let id = todo.id;

    match store.get_todo_mut(id) {
        Some(existing) => {
            let number = existing.number;
            *existing = todo;
            existing.number = number;
        }
        None => {
            store.add_todo(todo);
        }
    }

    storage.save(store)?;

    Ok(store.get_todo(id).unwrap().clone())
}

#[derive(Debug, Error)]
pub enum ToggleTodoError {
    #[error("Todo '{0}' not found")]
    TodoNotFound(String),

    #[error("Todo name is ambiguous. Multiple todos found: {}", .0.join(", "))]
    AmbiguousTodoName(Vec<String>),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct ToggleTodoParameters {
    pub number_or_fuzzy_name: String,
}

/// Flips the completion flag of a todo looked up by number or fuzzy title.
pub fn toggle_todo(
    store: &mut Store,
    storage: &impl Storage,
    parameters: ToggleTodoParameters,
) -> Result<Todo, ToggleTodoError> {
    let id = resolve_todo(store, &parameters.number_or_fuzzy_name).map_err(|e| match e {
        ResolveError::NotFound(name) => ToggleTodoError::TodoNotFound(name),
        ResolveError::Ambiguous(titles) => ToggleTodoError::AmbiguousTodoName(titles),
    })?;

    let todo = store.get_todo_mut(id).unwrap();
    todo.completed = !todo.completed;
    let toggled = todo.clone();

    storage.save(store)?;

    Ok(toggled)
}

#[derive(Debug, Error)]
pub enum DeleteTodoError {
    #[error("Todo '{0}' not found")]
    TodoNotFound(String),

    #[error("Todo name is ambiguous. Multiple todos found: {}", .0.join(", "))]
    AmbiguousTodoName(Vec<String>),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct DeleteTodoParameters {
    pub number_or_fuzzy_name: String,
}

/// Removes a todo looked up by number or fuzzy title. Removal is permanent.
pub fn delete_todo(
    store: &mut Store,
    storage: &impl Storage,
    parameters: DeleteTodoParameters,
) -> Result<Todo, DeleteTodoError> {
    let id = resolve_todo(store, &parameters.number_or_fuzzy_name).map_err(|e| match e {
        ResolveError::NotFound(name) => DeleteTodoError::TodoNotFound(name),
        ResolveError::Ambiguous(titles) => DeleteTodoError::AmbiguousTodoName(titles),
    })?;

    let deleted = store.remove_todo(id).unwrap();

    storage.save(store)?;

    Ok(deleted)
}

enum ResolveError {
    NotFound(String),
    Ambiguous(Vec<String>),
}

/// Resolves user input to a todo id: an integer is treated as a todo number,
/// anything else as a case-insensitive title substring.
fn resolve_todo(store: &Store, number_or_fuzzy_name: &str) -> Result<Uuid, ResolveError> {
    if let Ok(number) = number_or_fuzzy_name.parse::<u64>() {
        return store
            .get_todo_by_number(number)
            .map(|t| t.id)
            .ok_or_else(|| ResolveError::NotFound(number_or_fuzzy_name.to_string()));
    }

    let matching: Vec<&Todo> = store
        .todos
        .iter()
        .filter(|t| {
            t.title
                .to_lowercase()
                .contains(&number_or_fuzzy_name.to_lowercase())
        })
        .collect();

    match matching.len() {
        0 => Err(ResolveError::NotFound(number_or_fuzzy_name.to_string())),
        1 => Ok(matching[0].id),
        _ => {
            let titles: Vec<String> = matching.iter().map(|t| t.title.clone()).collect();
            Err(ResolveError::Ambiguous(titles))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::JsonFileStorage;
    use std::path::PathBuf;

    fn storage(name: &str) -> JsonFileStorage {
        JsonFileStorage::new(PathBuf::from(format!("/tmp/tudo_services_{name}.json")))
    }

    fn todo(title: &str) -> Todo {
        Todo {
            id: Uuid::new_v4(),
            title: String::from(title),
            task: String::from("body"),
            ..Todo::default()
        }
    }

    #[test]
    fn test_save_todo_inserts_unknown_id() {
        let mut store = Store::default();
        let storage = storage("insert");

        let saved = save_todo(&mut store, &storage, todo("Fresh")).unwrap();
        assert_eq!(saved.number, 1);
        assert_eq!(store.todos.len(), 1);
    }

    #[test]
    fn test_save_todo_updates_existing_id_and_keeps_number() {
        let mut store = Store::default();
        let storage = storage("update");

        let saved = save_todo(&mut store, &storage, todo("Before")).unwrap();

        let mut edited = saved.clone();
        edited.title = String::from("After");
        edited.number = 0;

        let updated = save_todo(&mut store, &storage, edited).unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.number, saved.number);
        assert_eq!(store.todos.len(), 1);
    }

    #[test]
    fn test_toggle_todo_by_number() {
        let mut store = Store::default();
        let storage = storage("toggle");
        store.add_todo(todo("Flip me"));

        let params = ToggleTodoParameters {
            number_or_fuzzy_name: String::from("1"),
        };
        let toggled = toggle_todo(&mut store, &storage, params).unwrap();
        assert!(toggled.completed);

        let params = ToggleTodoParameters {
            number_or_fuzzy_name: String::from("1"),
        };
        let toggled = toggle_todo(&mut store, &storage, params).unwrap();
        assert!(!toggled.completed);
    }

    #[test]
    fn test_toggle_todo_by_fuzzy_name() {
        let mut store = Store::default();
        let storage = storage("fuzzy");
        store.add_todo(todo("Water the plants"));
        store.add_todo(todo("Call mum"));

        let params = ToggleTodoParameters {
            number_or_fuzzy_name: String::from("plants"),
        };
        let toggled = toggle_todo(&mut store, &storage, params).unwrap();
        assert_eq!(toggled.title, "Water the plants");
    }

    #[test]
    fn test_toggle_todo_ambiguous_name() {
        let mut store = Store::default();
        let storage = storage("ambiguous");
        store.add_todo(todo("Buy milk"));
        store.add_todo(todo("Buy bread"));

        let params = ToggleTodoParameters {
            number_or_fuzzy_name: String::from("buy"),
        };
        match toggle_todo(&mut store, &storage, params) {
            Err(ToggleTodoError::AmbiguousTodoName(titles)) => assert_eq!(titles.len(), 2),
            _ => panic!("Expected AmbiguousTodoName error"),
        }
    }

    #[test]
    fn test_delete_todo_removes_permanently() {
        let mut store = Store::default();
        let storage = storage("delete");
        store.add_todo(todo("Ephemeral"));

        let params = DeleteTodoParameters {
            number_or_fuzzy_name: String::from("1"),
        };
        let deleted = delete_todo(&mut store, &storage, params).unwrap();
        assert_eq!(deleted.title, "Ephemeral");
        assert!(store.todos.is_empty());

        let params = DeleteTodoParameters {
            number_or_fuzzy_name: String::from("1"),
        };
        match delete_todo(&mut store, &storage, params) {
            Err(DeleteTodoError::TodoNotFound(_)) => {}
            _ => panic!("Expected TodoNotFound error"),
        }
    }
}
