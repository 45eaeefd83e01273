//! Suite configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::record_store::RecordStore;
use crate::task::Task;
use crate::time_log::Session;

pub const CONFIG_FILE: &str = "desk-kit.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_tasks_file")]
    pub tasks_file: String,

    #[serde(default = "default_sessions_file")]
    pub sessions_file: String,

    /// Extensions (without the dot) that note search will open.
    #[serde(default = "default_note_extensions")]
    pub note_extensions: Vec<String>,

    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_tasks_file() -> String {
    "tasks.json".to_string()
}

fn default_sessions_file() -> String {
    "sessions.json".to_string()
}

fn default_note_extensions() -> Vec<String> {
    vec!["txt".to_string(), "md".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            tasks_file: default_tasks_file(),
            sessions_file: default_sessions_file(),
            note_extensions: default_note_extensions(),
            clear_screen: true,
        }
    }
}

impl Config {
    /// Defaults rooted at `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Read `desk-kit.json` from `dir`. Falls back to defaults rooted at `dir`
    /// when the file is absent or unparsable.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Self::in_dir(dir),
        };

        match serde_json::from_str::<Config>(&content) {
            Ok(mut config) => {
                if config.data_dir.is_relative() {
                    config.data_dir = dir.join(&config.data_dir);
                }
                config
            }
            Err(e) => {
                warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::in_dir(dir)
            }
        }
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(&self.tasks_file)
    }

    pub fn sessions_path(&self) -> PathBuf {
        self.data_dir.join(&self.sessions_file)
    }

    pub fn task_store(&self) -> RecordStore<Task> {
        RecordStore::new(self.tasks_path())
    }

    pub fn session_store(&self) -> RecordStore<Session> {
        RecordStore::new(self.sessions_path())
    }
}
