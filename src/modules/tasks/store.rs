use log::{debug, error, info, warn};

use super::model::{is_valid_text, Task, TaskCollection, TaskId};
use super::storage::{decode_collection, encode_collection, Storage, StorageError};
use crate::modules::utils::logging::{abbreviate_text, log_task_operation};

/// Sole owner of the task collection. Every applied mutation rewrites the whole
/// collection into one storage slot.
///
/// The in-memory update happens first and the write second. If the process dies
/// in between, that one mutation is lost; if the write fails, memory stays ahead
/// of storage until the next successful save. Neither case is retried.
pub struct TaskStore<S: Storage> {
    storage: S,
    key: String,
    tasks: TaskCollection,
    last_save_error: Option<String>,
}

impl<S: Storage> TaskStore<S> {
    /// Read the collection saved under `key`. Missing, unreadable, or
    /// undecodable data all start the store empty.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let tasks = match storage.read(&key) {
            Ok(Some(data)) => match decode_collection(&data) {
                Ok(tasks) => {
                    info!("Loaded {} task(s) from slot {}", tasks.len(), key);
                    tasks
                }
                Err(e) => {
                    error!("Discarding unreadable tasks in slot {}: {}", key, e);
                    TaskCollection::new()
                }
            },
            Ok(None) => {
                info!("No saved tasks in slot {}, starting empty", key);
                TaskCollection::new()
            }
            Err(e) => {
                error!("Failed to read slot {}: {}", key, e);
                TaskCollection::new()
            }
        };

        Self {
            storage,
            key,
            tasks,
            last_save_error: None,
        }
    }

    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Add a new, not yet done task. Empty text is ignored and returns `None`.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        if !is_valid_text(text) {
            debug!("Ignoring add with empty text");
            return None;
        }

        let task = Task::new(text);
        let id = task.id.clone();
        self.tasks.insert(task);

        self.save_after("add", &id, Some(&abbreviate_text(text)));
        Some(id)
    }

    /// Flip `done` on a task. Returns the new value, or `None` if the id is unknown.
    pub fn toggle_done(&mut self, id: &TaskId) -> Option<bool> {
        let done = match self.tasks.get_mut(id) {
            Some(task) => task.toggle_done(),
            None => {
                warn!("Cannot toggle unknown task {}", id);
                return None;
            }
        };

        self.save_after("toggle_done", id, Some(if done { "done" } else { "not done" }));
        Some(done)
    }

    /// Replace a task's text, keeping its id and `done` flag.
    /// Returns `false` without touching anything if the text is empty or the id unknown.
    pub fn edit(&mut self, id: &TaskId, new_text: &str) -> bool {
        if !is_valid_text(new_text) {
            debug!("Ignoring edit of {} with empty text", id);
            return false;
        }

        match self.tasks.get_mut(id) {
            Some(task) => task.text = new_text.to_string(),
            None => {
                warn!("Cannot edit unknown task {}", id);
                return false;
            }
        }

        self.save_after("edit", id, Some(&abbreviate_text(new_text)));
        true
    }

    /// Delete a task. Returns it, or `None` if the id is unknown.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let removed = match self.tasks.remove(id) {
            Some(task) => task,
            None => {
                warn!("Cannot remove unknown task {}", id);
                return None;
            }
        };

        self.save_after("remove", id, None);
        Some(removed)
    }

    /// Write the full collection to storage now
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let result = encode_collection(&self.tasks)
            .and_then(|data| self.storage.write(&self.key, &data));

        self.last_save_error = result.as_ref().err().map(|e| e.to_string());
        result
    }

    /// `true` when the last save succeeded (or nothing has been saved yet)
    pub fn is_synced(&self) -> bool {
        self.last_save_error.is_none()
    }

    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    fn save_after(&mut self, operation: &str, id: &TaskId, details: Option<&str>) {
        match self.persist() {
            Ok(()) => log_task_operation(operation, id.as_str(), true, details),
            Err(e) => log_task_operation(operation, id.as_str(), false, Some(&e.to_string())),
        }
    }
}
