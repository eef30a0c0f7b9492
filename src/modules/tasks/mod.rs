pub mod model;
pub mod storage;
pub mod store;
pub mod user_interface;

pub use model::{Task, TaskCollection, TaskId};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::TaskStore;
pub use user_interface::run_screen;
