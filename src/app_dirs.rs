use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "deepfocus")
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::project().map(|pd| pd.config_dir().join("config.json"))
    }

    /// Key-value settings file holding the reward collection.
    pub fn rewards_path() -> Option<PathBuf> {
        Self::project().map(|pd| pd.data_dir().join("rewards.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("deepfocus");
            Some(state_dir.join("deepfocus.log"))
        } else {
            Self::project().map(|pd| pd.data_local_dir().join("deepfocus.log"))
        }
    }
}
