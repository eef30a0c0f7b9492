use env_logger::{Builder, WriteStyle};
use log::{error, info, warn, LevelFilter};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

const MAX_LOGGED_TEXT_CHARS: usize = 12;

/// Initialize the logging system, appending to `log_path`.
/// If the log file cannot be opened, logs go to stderr instead.
pub fn initialize_logging(level: LevelFilter, log_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .format_timestamp_secs()
        .format_module_path(true);

    match open_log_file(log_path) {
        Ok(file) => {
            builder
                .write_style(WriteStyle::Never)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .try_init()?;
            info!("Logging system initialized: level={}, file={}", level, log_path.display());
        }
        Err(e) => {
            builder
                .write_style(WriteStyle::Auto)
                .target(env_logger::Target::Stderr)
                .try_init()?;
            warn!("Cannot open log file {}: {}; logging to stderr", log_path.display(), e);
        }
    }

    Ok(())
}

/// Create or append to the log file, creating its directory if needed
fn open_log_file(log_path: &Path) -> io::Result<File> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(log_path)
}

/// Shorten task text for log lines. Counts chars, so multi-byte text is never split.
pub fn abbreviate_text(text: &str) -> String {
    if text.chars().count() <= MAX_LOGGED_TEXT_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(MAX_LOGGED_TEXT_CHARS).collect();
    format!("{}...", head)
}

/// Structured log line for a task mutation and its save
pub fn log_task_operation(operation: &str, task_id: &str, success: bool, details: Option<&str>) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if success {
        info!(
            "Task operation: op={}, task={}, success=true, timestamp={}, details={:?}",
            operation, task_id, timestamp, details
        );
    } else {
        error!(
            "Task operation: op={}, task={}, success=false, timestamp={}, details={:?}",
            operation, task_id, timestamp, details
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_text_abbreviation() {
        assert_eq!(abbreviate_text("buy milk"), "buy milk");
        assert_eq!(abbreviate_text(""), "");
        assert_eq!(abbreviate_text("call the plumber today"), "call the plu...");
        // Multi-byte characters are counted as one each
        assert_eq!(abbreviate_text("장보기"), "장보기");
        assert_eq!(
            abbreviate_text("가나다라마바사아자차카타파하"),
            "가나다라마바사아자차카타..."
        );
    }

    #[test]
    fn test_logging_initialization() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("logs").join("application.log");

        let result = initialize_logging(LevelFilter::Info, &log_path);

        // Another test may have installed the global logger first
        assert!(
            result.is_ok()
                || result
                    .unwrap_err()
                    .to_string()
                    .contains("already initialized")
        );
        assert!(log_path.exists());
    }

    #[test]
    fn test_unopenable_log_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let log_path = blocker.join("logs").join("application.log");

        assert!(open_log_file(&log_path).is_err());

        // Falls back to stderr rather than failing
        let result = initialize_logging(LevelFilter::Info, &log_path);
        assert!(
            result.is_ok()
                || result
                    .unwrap_err()
                    .to_string()
                    .contains("already initialized")
        );
    }
}
