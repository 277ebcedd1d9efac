//! Key-value persistence for the task list.
//!
//! The whole list lives under a single key as one JSON array and is rewritten
//! in full on every change.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::core::ids::IdScheme;
use crate::core::store::{NoopObserver, TaskListObserver, TaskStore};
use crate::core::task::Task;

/// Key the task list is stored under.
pub const TASKS_KEY: &str = "todos";

/// Key a stored list is moved to when it can't be parsed.
pub const CORRUPT_TASKS_KEY: &str = "todos.corrupt";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("invalid task list JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

/// A persistent string-to-string map.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

fn check_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        check_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(String::from_utf8(bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        // Write beside the target, then rename over it.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        check_key(key)?;
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read the saved task list. A missing key is an empty list. A blob that
/// isn't a task list is copied to [`CORRUPT_TASKS_KEY`] so the next save
/// doesn't destroy it, and also yields an empty list.
///
/// Errors only when the blob can't be read at all; the caller must then not
/// write over it.
pub fn load_tasks(store: &impl KeyValueStore) -> Result<Vec<Task>, StorageError> {
    let Some(blob) = store.get(TASKS_KEY)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<Task>>(&blob) {
        Ok(tasks) => {
            log::info!("Loaded {} tasks", tasks.len());
            Ok(tasks)
        }
        Err(e) => {
            log::warn!("Stored task list is malformed, starting empty: {}", e);
            if let Err(e) = store.set(CORRUPT_TASKS_KEY, &blob) {
                log::error!("Failed to back up malformed task list: {}", e);
            }
            Ok(Vec::new())
        }
    }
}

/// Overwrite the saved list with `tasks`.
pub fn save_tasks(store: &impl KeyValueStore, tasks: &[Task]) -> Result<(), StorageError> {
    let json = serde_json::to_string(tasks)?;
    store.set(TASKS_KEY, &json)
}

/// Writes every list change back to a [`KeyValueStore`].
pub struct PersistenceHook<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceHook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> TaskListObserver for PersistenceHook<S> {
    fn tasks_changed(&mut self, tasks: &[Task]) {
        match save_tasks(&self.store, tasks) {
            Ok(()) => log::debug!("Saved {} tasks", tasks.len()),
            Err(e) => log::error!("Failed to save tasks: {}", e),
        }
    }
}

/// Load the saved list from `kv` and build a store that writes back to it.
/// Fails without touching `kv` if the saved list can't be read.
pub fn open_task_store<S>(kv: S, id_scheme: IdScheme) -> Result<TaskStore, StorageError>
where
    S: KeyValueStore + Send + 'static,
{
    let tasks = load_tasks(&kv)?;
    let ids = id_scheme.generator(&tasks);
    Ok(TaskStore::new(tasks, ids, Box::new(PersistenceHook::new(kv))))
}

/// Store for a session whose saved list is unavailable. Changes are not written anywhere.
pub fn unsaved_task_store(id_scheme: IdScheme) -> TaskStore {
    TaskStore::new(Vec::new(), id_scheme.generator(&[]), Box::new(NoopObserver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::SequentialIds;

    fn sample() -> Vec<Task> {
        let mut done = Task::new("1717000000001", "Pay rent", "", "home");
        done.completed = true;
        vec![Task::new("1717000000000", "Buy milk", "2024-06-01", "errand"), done]
    }

    #[test]
    fn absent_key_loads_empty() {
        let store = MemoryStore::new();
        assert!(load_tasks(&store).unwrap().is_empty());
    }

    #[test]
    fn saved_list_loads_back_in_order() {
        let store = MemoryStore::new();
        let tasks = sample();
        save_tasks(&store, &tasks).unwrap();
        assert_eq!(load_tasks(&store).unwrap(), tasks);
    }

    #[test]
    fn reads_list_written_by_web_version() {
        let store = MemoryStore::new();
        store
            .set(
                TASKS_KEY,
                r#"[{"id":"1717000000000","text":"Buy milk","completed":false,"deadline":"2024-06-01","label":"errand"}]"#,
            )
            .unwrap();
        let tasks = load_tasks(&store).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].label, "errand");
    }

    #[test]
    fn malformed_list_is_backed_up_and_ignored() {
        let store = MemoryStore::new();
        store.set(TASKS_KEY, "{not json").unwrap();

        assert!(load_tasks(&store).unwrap().is_empty());
        assert_eq!(store.get(CORRUPT_TASKS_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn wrong_shape_counts_as_malformed() {
        let store = MemoryStore::new();
        store.set(TASKS_KEY, r#"{"todos":[]}"#).unwrap();
        assert!(load_tasks(&store).unwrap().is_empty());
        assert!(store.get(CORRUPT_TASKS_KEY).unwrap().is_some());
    }

    #[test]
    fn keys_are_validated() {
        let store = MemoryStore::new();
        assert!(matches!(store.set("../etc", "x"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
        assert!(store.set("todos-2", "x").is_ok());
    }

    #[test]
    fn file_store_round_trips_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get(TASKS_KEY).unwrap(), None);
        store.set(TASKS_KEY, "[1]").unwrap();
        store.set(TASKS_KEY, "[2]").unwrap();
        assert_eq!(store.get(TASKS_KEY).unwrap().as_deref(), Some("[2]"));
        assert!(dir.path().join("todos.json").exists());
        assert!(!dir.path().join("todos.json.tmp").exists());
    }

    #[test]
    fn file_store_missing_directory_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("missing"));
        assert!(matches!(store.set(TASKS_KEY, "[]"), Err(StorageError::Io(_))));
    }

    #[test]
    fn hook_persists_every_change() {
        let backing = MemoryStore::new();
        let mut store = TaskStore::new(
            Vec::new(),
            Box::new(SequentialIds::new()),
            Box::new(PersistenceHook::new(backing.clone())),
        );
        assert_eq!(backing.get(TASKS_KEY).unwrap().as_deref(), Some("[]"));

        let id = store.add("Buy milk", "", "").unwrap();
        store.toggle(&id);
        let saved = load_tasks(&backing).unwrap();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].completed);

        store.remove(&id);
        assert!(load_tasks(&backing).unwrap().is_empty());
    }

    #[test]
    fn opened_store_continues_saved_list() {
        let backing = MemoryStore::new();
        save_tasks(&backing, &sample()).unwrap();

        let mut store = open_task_store(backing.clone(), IdScheme::Timestamp).unwrap();
        assert_eq!(store.len(), 2);

        let id = store.add("Walk dog", "", "").unwrap();
        assert!(id.parse::<u64>().unwrap() > 1_717_000_000_001);
        assert_eq!(load_tasks(&backing).unwrap().len(), 3);
    }

    struct BrokenStore {
        writes: Arc<Mutex<usize>>,
    }

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[test]
    fn unreadable_list_is_never_overwritten() {
        let writes = Arc::new(Mutex::new(0));
        let result = open_task_store(BrokenStore { writes: writes.clone() }, IdScheme::Timestamp);

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert_eq!(*writes.lock().unwrap(), 0);
    }

    #[test]
    fn non_utf8_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let bytes = b"[{\"id\":\"1\",\"text\":\"caf\xE9\"}]".to_vec();
        std::fs::write(&path, &bytes).unwrap();

        let result = open_task_store(FileStore::new(dir.path()), IdScheme::Timestamp);

        assert!(matches!(result, Err(StorageError::Encoding(_))));
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn unsaved_store_writes_nothing() {
        let mut store = unsaved_task_store(IdScheme::Uuid);
        assert!(store.is_empty());
        assert!(store.add("Scratch", "", "").is_some());
        assert_eq!(store.len(), 1);
    }
}
