use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the word count preference lives
    pub fn preferences_path() -> PathBuf {
        ProjectDirs::from("", "", "wordsprint")
            .map(|proj_dirs| proj_dirs.config_dir().join("preferences.json"))
            .unwrap_or_else(|| PathBuf::from("wordsprint_preferences.json"))
    }

    /// Where diagnostics are written while the terminal is taken over
    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("wordsprint")
                .join("wordsprint.log")
        } else {
            ProjectDirs::from("", "", "wordsprint")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("wordsprint.log"))
                .unwrap_or_else(|| PathBuf::from("wordsprint.log"))
        }
    }
}
