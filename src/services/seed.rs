use thiserror::Error;

use crate::{
    models::store::Store,
    remote::{NetworkError, RemoteTodoSource},
    storage::{Storage, StorageError},
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Remote fetch failed: {0}")]
    Remote(#[from] NetworkError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct SeedOutcome {
    /// Number of todos imported from the remote source
    pub imported: usize,
    /// True when seeding was skipped because the store is already seeded
    pub skipped: bool,
}

/// Populates the store from the remote source.
///
/// Seeding happens once: the `seeded` flag gates subsequent runs unless
/// `force` is set. The flag is only persisted after a successful import,
/// so a failed first run retries the next time.
pub fn seed_store(
    store: &mut Store,
    storage: &impl Storage,
    source: &impl RemoteTodoSource,
    force: bool,
) -> Result<SeedOutcome, SeedError> {
    if store.seeded && !force {
        return Ok(SeedOutcome {
            imported: 0,
            skipped: true,
        });
    }

    let todos = source.fetch_todos()?;
    let imported = todos.len();

    for todo in todos {
        store.add_todo(todo);
    }
    store.seeded = true;

    storage.save(store)?;

    Ok(SeedOutcome {
        imported,
        skipped: false,
    })
}

/// Marks the store as seeded without fetching anything, so first-run
/// seeding never triggers again.
pub fn mark_seeded(store: &mut Store, storage: &impl Storage) -> Result<(), StorageError> {
    store.seeded = true;
    storage.save(store)
}
