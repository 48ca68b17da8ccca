use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "letterset")
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("letterset_config.json"))
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("letterset")
        } else {
            ProjectDirs::from("", "", "letterset")
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("letterset_data"))
        }
    }
}

/// Where each kind of cached resource lives below the data directory
#[derive(Debug, Clone, PartialEq)]
pub struct DataLayout {
    pub root: PathBuf,
}

impl DataLayout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn corpora(&self) -> PathBuf {
        self.root.join("corpora")
    }

    pub fn letters(&self) -> PathBuf {
        self.root.join("letters")
    }

    pub fn speakers(&self) -> PathBuf {
        self.root.join("speakers")
    }

    pub fn results(&self) -> PathBuf {
        self.root.join("results")
    }
}
