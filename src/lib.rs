// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{config, tasks, utils};

// Re-export commonly used types
pub use modules::config::AppConfig;
pub use modules::tasks::model::{Task, TaskCollection, TaskId};
pub use modules::tasks::storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use modules::tasks::store::TaskStore;

// Constants
pub const APP_NAME: &str = "todolist";
pub const DEFAULT_STORAGE_KEY: &str = "@toDos";
