//! Task Store
//!
//! Sole owner of the task collection. Every mutation builds a new collection,
//! writes it through to storage, then notifies the change subscriber.
//!
//! Unknown ids are silent no-ops for `update`, `delete` and `toggle_complete`:
//! the unchanged collection is still committed and the subscriber still
//! fires. The `try_*` variants report `StoreError::NotFound` instead and skip
//! the commit.

use std::cell::{Cell, RefCell};

use crate::error::StoreError;
use crate::hook::Hook;
use crate::models::{Task, TaskId};
use crate::storage::KeyValueStorage;

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Suffix of the key that keeps an unparsable stored value aside
pub const BACKUP_SUFFIX: &str = ".corrupt";

pub struct TaskStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    tasks: RefCell<Vec<Task>>,
    /// Highest id issued or loaded during this store's lifetime
    high_water: Cell<TaskId>,
    on_change: Hook<[Task]>,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Load the collection stored under `key`.
    ///
    /// Missing, unreadable or corrupt content yields an empty list, and the
    /// first mutation overwrites `key`. Corrupt content is copied to
    /// `key` + [`BACKUP_SUFFIX`] first so it is not lost.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let raw = match storage.get(&key) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("[STORE] Ignoring stored collection: {}", e);
                None
            }
        };
        let tasks = match parse_collection(&key, raw.as_deref()) {
            Ok(tasks) => tasks,
            Err(e) => {
                log::warn!("[STORE] Ignoring stored collection: {}", e);
                if let Some(raw) = raw.as_deref() {
                    back_up(&storage, &key, raw);
                }
                Vec::new()
            }
        };
        Self::from_parts(storage, key, tasks)
    }

    /// Like [`TaskStore::load`] but fails on unreadable or corrupt content
    pub fn try_load(storage: S, key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        let raw = storage.get(&key)?;
        let tasks = parse_collection(&key, raw.as_deref())?;
        Ok(Self::from_parts(storage, key, tasks))
    }

    fn from_parts(storage: S, key: String, tasks: Vec<Task>) -> Self {
        log::debug!("[STORE] Loaded {} tasks from `{}`", tasks.len(), key);
        let high_water = max_id(&tasks);
        Self {
            storage,
            key,
            tasks: RefCell::new(tasks),
            high_water: Cell::new(high_water),
            on_change: Hook::default(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Snapshot of the current collection
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Register the change callback, replacing any previous one
    pub fn subscribe_to_changes(&self, callback: impl Fn(&[Task]) + 'static) {
        if self.on_change.set(callback) {
            log::debug!("[STORE] Change subscriber replaced");
        }
    }

    // ========================
    // Mutations
    // ========================

    /// Append a new task. Empty text is accepted.
    ///
    /// Returns `None`, leaving the collection untouched, once the id space
    /// is used up.
    pub fn create(&self, text: &str) -> Option<Task> {
        let task = match self.append(text) {
            Ok(task) => task,
            Err(e) => {
                log::error!("[STORE] {}", e);
                return None;
            }
        };
        log_failure(self.commit());
        Some(task)
    }

    /// Replace the text of task `id`, keeping its completion flag
    pub fn update(&self, id: TaskId, text: &str) {
        log_failure(self.replace_with(|tasks| edited(tasks, id, text)));
    }

    /// Remove task `id`, keeping the order of the rest
    pub fn delete(&self, id: TaskId) {
        log_failure(self.replace_with(|tasks| without(tasks, id)));
    }

    /// Flip the completion flag of task `id`, keeping its text
    pub fn toggle_complete(&self, id: TaskId) {
        log_failure(self.replace_with(|tasks| toggled(tasks, id)));
    }

    // ========================
    // Strict Mutations
    // ========================

    /// `create` that reports id exhaustion and persistence failures
    pub fn try_create(&self, text: &str) -> Result<Task, StoreError> {
        let task = self.append(text)?;
        self.commit().map(|_| task)
    }

    /// `update` that fails on an unknown id
    pub fn try_update(&self, id: TaskId, text: &str) -> Result<(), StoreError> {
        self.ensure_exists(id)?;
        self.replace_with(|tasks| edited(tasks, id, text))
    }

    /// `delete` that fails on an unknown id
    pub fn try_delete(&self, id: TaskId) -> Result<(), StoreError> {
        self.ensure_exists(id)?;
        self.replace_with(|tasks| without(tasks, id))
    }

    /// `toggle_complete` that fails on an unknown id
    pub fn try_toggle_complete(&self, id: TaskId) -> Result<(), StoreError> {
        self.ensure_exists(id)?;
        self.replace_with(|tasks| toggled(tasks, id))
    }

    // ========================
    // Internals
    // ========================

    fn ensure_exists(&self, id: TaskId) -> Result<(), StoreError> {
        if self.tasks.borrow().iter().any(|t| t.id == id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(id))
        }
    }

    fn next_id(&self) -> Result<TaskId, StoreError> {
        let highest = max_id(&self.tasks.borrow()).max(self.high_water.get());
        highest.checked_add(1).ok_or(StoreError::IdsExhausted)
    }

    fn append(&self, text: &str) -> Result<Task, StoreError> {
        let task = Task::new(self.next_id()?, text);
        self.high_water.set(task.id);
        let mut tasks = self.tasks();
        tasks.push(task.clone());
        *self.tasks.borrow_mut() = tasks;
        Ok(task)
    }

    /// Swap in a new collection built from the current one and commit it
    fn replace_with(&self, f: impl FnOnce(&[Task]) -> Vec<Task>) -> Result<(), StoreError> {
        let next = f(&self.tasks.borrow());
        *self.tasks.borrow_mut() = next;
        self.commit()
    }

    /// Write through, then notify. The subscriber fires even if the write failed.
    fn commit(&self) -> Result<(), StoreError> {
        let persisted = self.persist();
        let snapshot = self.tasks();
        self.on_change.fire(&snapshot);
        persisted
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&*self.tasks.borrow()).map_err(StoreError::Serialize)?;
        self.storage.set(&self.key, &json)?;
        log::debug!("[STORE] Persisted {} tasks to `{}`", self.len(), self.key);
        Ok(())
    }
}

fn edited(tasks: &[Task], id: TaskId, text: &str) -> Vec<Task> {
    tasks
        .iter()
        .map(|t| if t.id == id { t.with_text(text) } else { t.clone() })
        .collect()
}

fn without(tasks: &[Task], id: TaskId) -> Vec<Task> {
    tasks.iter().filter(|t| t.id != id).cloned().collect()
}

fn toggled(tasks: &[Task], id: TaskId) -> Vec<Task> {
    tasks
        .iter()
        .map(|t| if t.id == id { t.toggled() } else { t.clone() })
        .collect()
}

fn log_failure(result: Result<(), StoreError>) {
    if let Err(e) = result {
        log::error!("[STORE] {}", e);
    }
}

fn max_id(tasks: &[Task]) -> TaskId {
    tasks.iter().map(|t| t.id).max().unwrap_or(0)
}

/// Absent content and a stored JSON `null` both mean an empty list
fn parse_collection(key: &str, raw: Option<&str>) -> Result<Vec<Task>, StoreError> {
    let Some(raw) = raw else { return Ok(Vec::new()) };
    serde_json::from_str::<Option<Vec<Task>>>(raw)
        .map(Option::unwrap_or_default)
        .map_err(|source| StoreError::Load {
            key: key.to_string(),
            source,
        })
}

fn back_up<S: KeyValueStorage>(storage: &S, key: &str, raw: &str) {
    let backup_key = format!("{}{}", key, BACKUP_SUFFIX);
    match storage.set(&backup_key, raw) {
        Ok(()) => log::warn!("[STORE] Kept unreadable collection under `{}`", backup_key),
        Err(e) => log::error!("[STORE] {}", e),
    }
}
