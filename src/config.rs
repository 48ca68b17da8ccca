use crate::app_dirs::AppDirs;
use crate::error::{Error, Result};
use crate::language::DEFAULT_LANGUAGES;
use crate::script::DEFAULT_SCRIPT_THRESHOLD;
use crate::selection::SelectionParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub languages: Vec<String>,
    pub max_languages: usize,
    pub assumed_text_length: u32,
    pub extra_language_deweight: f64,
    pub use_sentences_count: usize,
    pub script_threshold: f64,
    pub script_sample_lines: usize,
    pub data_dir: Option<PathBuf>,
    /// Fallback speaker counts for languages without a cached count
    pub speakers: BTreeMap<String, u64>,
}

impl Default for Config {
    fn default() -> Self {
        let params = SelectionParams::default();
        Self {
            languages: DEFAULT_LANGUAGES.iter().map(|c| c.to_string()).collect(),
            max_languages: params.max_languages,
            assumed_text_length: params.assumed_text_length,
            extra_language_deweight: params.extra_language_deweight,
            use_sentences_count: 100_000,
            script_threshold: DEFAULT_SCRIPT_THRESHOLD,
            script_sample_lines: 1_000,
            data_dir: None,
            speakers: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn selection_params(&self) -> SelectionParams {
        SelectionParams {
            max_languages: self.max_languages,
            assumed_text_length: self.assumed_text_length,
            extra_language_deweight: self.extra_language_deweight,
        }
    }

    /// Root of the cached corpora, alphabets and speaker counts
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(AppDirs::data_dir)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Result<Config>;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// A missing file means defaults; a file that cannot be read or parsed is an error.
    fn load(&self) -> Result<Config> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice::<Config>(&bytes).map_err(|e| Error::InvalidResource {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
