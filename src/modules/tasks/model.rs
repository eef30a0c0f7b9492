use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, unique identifier of a task. Also the key the task is stored under.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh identifier. Random, so two tasks created in the same
    /// clock tick still get different keys.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
}

impl Task {
    /// Create a new, not yet done task with a freshly generated id
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            text: text.into(),
            done: false,
        }
    }

    /// Flip the completion flag and return the new value
    pub fn toggle_done(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }
}

/// Text accepted for a task. Only the empty string is rejected; whitespace-only
/// text counts as non-empty.
pub fn is_valid_text(text: &str) -> bool {
    !text.is_empty()
}

/// Value stored under each id in the persisted map. `done` is omitted when false;
/// older saves call it `checked`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TaskRecord {
    text: String,
    #[serde(default, alias = "checked", skip_serializing_if = "is_false")]
    done: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// All tasks keyed by id, iterated in insertion order.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(
    from = "IndexMap<TaskId, TaskRecord>",
    into = "IndexMap<TaskId, TaskRecord>"
)]
pub struct TaskCollection {
    tasks: IndexMap<TaskId, Task>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }

    /// Insert a task under its own id, appending it to the display order
    pub(crate) fn insert(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    /// Remove a task, keeping the relative order of the remaining ones
    pub(crate) fn remove(&mut self, id: &TaskId) -> Option<Task> {
        self.tasks.shift_remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Id of the task shown at `index` (zero-based) in the list
    pub fn id_at(&self, index: usize) -> Option<&TaskId> {
        self.tasks.get_index(index).map(|(id, _)| id)
    }
}

// Two collections are equal only if they also list their tasks in the same order
impl PartialEq for TaskCollection {
    fn eq(&self, other: &Self) -> bool {
        self.tasks.len() == other.tasks.len() && self.tasks.iter().eq(other.tasks.iter())
    }
}

impl Eq for TaskCollection {}

impl From<IndexMap<TaskId, TaskRecord>> for TaskCollection {
    fn from(records: IndexMap<TaskId, TaskRecord>) -> Self {
        let tasks = records
            .into_iter()
            .map(|(id, record)| {
                let task = Task {
                    id: id.clone(),
                    text: record.text,
                    done: record.done,
                };
                (id, task)
            })
            .collect();
        Self { tasks }
    }
}

impl From<TaskCollection> for IndexMap<TaskId, TaskRecord> {
    fn from(collection: TaskCollection) -> Self {
        collection
            .tasks
            .into_iter()
            .map(|(id, task)| {
                let record = TaskRecord {
                    text: task.text,
                    done: task.done,
                };
                (id, record)
            })
            .collect()
    }
}
