// Declare all modules
pub mod config;
pub mod tasks;
pub mod utils;

// No re-exports here as they're handled in lib.rs
