use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "romatype")
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("romatype_config.json"))
    }

    /// Where trace logs go when the `trace` feature is enabled.
    pub fn log_dir() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_local_dir().join("logs"))
            .unwrap_or_else(std::env::temp_dir)
    }
}
