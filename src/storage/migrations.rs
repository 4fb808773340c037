use std::path::PathBuf;

use serde_json::Value;

use crate::storage::StorageError;

type MigrationFn = fn(Value) -> Result<Value, StorageError>;

fn get_migrations() -> Vec<MigrationFn> {
    vec![migrate_v1_to_v2]
}

/// Returns 1 if version field is missing (assumes v1, our first versioned schema)
pub fn detect_version(content: &str) -> Result<u32, StorageError> {
    let value: Value = serde_json::from_str(content).map_err(|e| StorageError::ParseFailed {
        path: PathBuf::from("<unknown>"),
        source: e,
    })?;

    match value.get("version") {
        Some(v) => v.as_u64().map(|n| n as u32).ok_or_else(|| {
            // serde_json::Error has no simple constructor, so synthesize one
            let dummy_err = serde_json::from_str::<Value>("invalid").unwrap_err();
            StorageError::ParseFailed {
                path: PathBuf::from("<unknown>"),
                source: dummy_err,
            }
        }),
        None => Ok(1), // No version field = v1
    }
}

/// Migrations are applied sequentially: v1→v2→v3→...→target
pub fn apply_migrations(
    mut data: Value,
    from_version: u32,
    to_version: u32,
) -> Result<Value, StorageError> {
    if from_version == to_version {
        return Ok(data);
    }

    if from_version > to_version {
        return Err(StorageError::FutureVersion(from_version));
    }

    let migrations = get_migrations();

    for version in from_version..to_version {
        let migration_idx = (version - 1) as usize; // v1→v2 is at index 0

        if migration_idx >= migrations.len() {
            return Err(StorageError::UnsupportedVersion(version));
        }

        data = migrations[migration_idx](data)?;
    }

    Ok(data)
}

/// v1 stores predate remote seeding and stable numbering: they carry neither
/// the `seeded` flag nor a `next_number` counter. Seed state defaults to
/// false; the counter resumes from the highest number already handed out.
fn migrate_v1_to_v2(mut value: Value) -> Result<Value, StorageError> {
    if let Some(obj) = value.as_object_mut() {
        obj.insert("version".to_string(), Value::from(2));

        if !obj.contains_key("seeded") {
            obj.insert("seeded".to_string(), Value::from(false));
        }

        if !obj.contains_key("next_number") {
            let highest = obj
                .get("todos")
                .and_then(|t| t.as_array())
                .map(|todos| {
                    todos
                        .iter()
                        .filter_map(|t| t.get("number").and_then(|n| n.as_u64()))
                        .max()
                        .unwrap_or(0)
                })
                .unwrap_or(0);
            obj.insert("next_number".to_string(), Value::from(highest));
        }
    }

    Ok(value)
}
