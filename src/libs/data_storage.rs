use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const VENDOR_NAME: &str = "taskdir";
pub const APP_NAME: &str = "taskdir";

/// Platform-specific directory holding the database and `config.json`.
///
/// - **Windows**: `%LOCALAPPDATA%\taskdir\taskdir`
/// - **macOS**: `~/Library/Application Support/taskdir/taskdir`
/// - **Linux**: `~/.local/share/taskdir/taskdir`
#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(VENDOR_NAME).join(APP_NAME);

        Self { base_path }
    }

    /// Resolves `file_name` inside the data directory, creating the directory
    /// on first use. Absolute paths are returned unchanged.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        let path = Path::new(file_name);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
