use std::{
    fs::{OpenOptions, rename, write},
    path::PathBuf,
};

use fs2::FileExt;
use serde_json::to_string_pretty;
use uuid::Uuid;

use crate::{
    models::store::Store,
    storage::{Storage, StorageError},
};

pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Store, StorageError> {
        use crate::models::store::CURRENT_VERSION;
        use crate::storage::migrations::{apply_migrations, detect_version};

        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let file_version = detect_version(&content)?;

                if file_version > CURRENT_VERSION {
                    return Err(StorageError::FutureVersion(file_version));
                }

                let mut data: serde_json::Value =
                    serde_json::from_str(&content).map_err(|e| StorageError::ParseFailed {
                        path: self.path.clone(),
                        source: e,
                    })?;

                if file_version < CURRENT_VERSION {
                    data = apply_migrations(data, file_version, CURRENT_VERSION)?;
                }

                if let Some(obj) = data.as_object_mut() {
                    obj.insert("version".to_string(), serde_json::json!(CURRENT_VERSION));
                }

                let store: Store =
                    serde_json::from_value(data).map_err(|e| StorageError::ParseFailed {
                        path: self.path.clone(),
                        source: e,
                    })?;
                Ok(store)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Store::default()),
            Err(e) => Err(StorageError::LoadFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn save(&self, store: &Store) -> Result<(), StorageError> {
        let json =
            to_string_pretty(store).map_err(|e| StorageError::SerializeFailed { source: e })?;

        let unique_temp = format!("{}.tmp.{}", self.path.display(), Uuid::new_v4());
        let temp_path = PathBuf::from(&unique_temp);
        write(&temp_path, json).map_err(|e| StorageError::SaveFailed {
            path: temp_path.clone(),
            source: e,
        })?;

        let lock_file_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .open(&lock_file_path)
            .map_err(|e| StorageError::SaveFailed {
                path: lock_file_path.clone(),
                source: e,
            })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| StorageError::SaveFailed {
                path: lock_file_path,
                source: e,
            })?;

        rename(&temp_path, &self.path).map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            source: e,
        })?;

        lock_file.unlock().map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::models::todo::Todo;

    #[test]
    fn test_save_and_load() {
        let mut store = Store::default();
        store.add_todo(Todo {
            id: Uuid::new_v4(),
            title: String::from("Some Todo"),
            task: String::from("With a body"),
            ..Todo::default()
        });

        let storage = JsonFileStorage::new(PathBuf::from("/tmp/tudo_test_store.json"));
        if storage.save(&store).is_err() {
            panic!("Should correctly save the store");
        }
        match storage.load() {
            Ok(loaded_store) => {
                assert_eq!(loaded_store.todos[0].id, store.todos[0].id);
                assert_eq!(loaded_store.todos[0].number, 1);
                assert_eq!(loaded_store.todos[0].title, "Some Todo");
                assert!(!loaded_store.seeded);
            }
            Err(_) => panic!("Should correctly load the saved store"),
        }
    }

    #[test]
    fn test_load_missing_file_yields_default_store() {
        let storage = JsonFileStorage::new(PathBuf::from("/tmp/tudo_does_not_exist.json"));
        let store = storage.load().unwrap();

        assert!(store.todos.is_empty());
        assert!(!store.seeded);
    }

    #[test]
    fn test_load_invalid_json() {
        let path = PathBuf::from("/tmp/tudo_invalid_store.json");

        std::fs::write(&path, "{ this is not valid json }").unwrap();

        let storage = JsonFileStorage::new(path);
        let result = storage.load();

        match result {
            Err(StorageError::ParseFailed { .. }) => {}
            _ => panic!("Expected ParseFailed error, got something else"),
        }
    }

    #[test]
    fn test_load_v1_store_is_migrated() {
        let path = PathBuf::from("/tmp/tudo_v1_store.json");
        let old_json = r#"{
            "version": 1,
            "todos": [
                {
                    "id": "b34b3b1a-8a50-4f9c-a0e4-7c2f3e5d6a90",
                    "number": 3,
                    "title": "Carried over",
                    "task": "from the v1 layout",
                    "completed": false,
                    "created_at": "2024-01-01T00:00:00Z"
                }
            ]
        }"#;

        std::fs::write(&path, old_json).unwrap();

        let storage = JsonFileStorage::new(path);
        let result = storage.load();

        match result {
            Ok(store) => {
                assert_eq!(store.version, crate::models::store::CURRENT_VERSION);
                assert!(!store.seeded);
                assert_eq!(store.next_number, 3);
                assert_eq!(store.todos[0].title, "Carried over");
            }
            Err(e) => panic!("Expected successful load, got error: {:?}", e),
        }
    }

    #[test]
    fn test_load_future_version() {
        let path = PathBuf::from("/tmp/tudo_future_store.json");
        let future_json = r#"{
            "version": 999,
            "todos": []
        }"#;

        std::fs::write(&path, future_json).unwrap();

        let storage = JsonFileStorage::new(path);
        let result = storage.load();

        match result {
            Err(StorageError::FutureVersion(999)) => {
                // Expected: should fail with FutureVersion error
            }
            _ => panic!("Expected FutureVersion(999) error"),
        }
    }
}
