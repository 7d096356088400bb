use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::PathBuf;
use chrono::Local;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
}

/// Start a per-run log file under the user cache directory.
pub fn init_logging() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("jira-depgraph")
        .join("logs");

    create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!("depgraph-{}.log", Local::now().format("%Y%m%d-%H%M%S")));

    if let Ok(mut current) = LOG_FILE.lock() {
        *current = Some(log_file.clone());
    }

    log_info(&format!("Logging initialized to: {}", log_file.display()));

    Ok(log_file)
}

pub fn log_error(message: &str) {
    log_with_level("ERROR", message);
}

pub fn log_warn(message: &str) {
    log_with_level("WARN", message);
}

pub fn log_info(message: &str) {
    log_with_level("INFO", message);
}

pub fn log_debug(message: &str) {
    log_with_level("DEBUG", message);
}

fn log_with_level(level: &str, message: &str) {
    let Ok(current) = LOG_FILE.lock() else {
        return;
    };
    if let Some(log_file) = current.as_ref() {
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
        {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(file, "[{}] {} - {}", timestamp, level, message);
        }
    }
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|current| current.clone())
}
