use crate::cache::{FileCache, KeyedCache};
use crate::error::{Error, ResourceKind, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// On-disk alphabet definition: `{"letters": ["a", "á", ...]}`
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AlphabetFile {
    pub letters: Vec<String>,
}

/// The official letters of one language
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Alphabet {
    letters: BTreeSet<char>,
}

impl Alphabet {
    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().copied()
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            letters: iter.into_iter().collect(),
        }
    }
}

impl From<&AlphabetFile> for Alphabet {
    /// Multi-character entries such as digraphs are not letters we can count, so they are dropped.
    fn from(file: &AlphabetFile) -> Self {
        file.letters
            .iter()
            .map(|entry| entry.to_lowercase())
            .filter_map(|entry| {
                let mut chars = entry.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(ch),
                    _ => {
                        debug!("ignoring multi-character alphabet entry {entry:?}");
                        None
                    }
                }
            })
            .collect()
    }
}

/// Alphabet files keyed by language code, `<dir>/<code>-letters.txt`
#[derive(Debug, Clone)]
pub struct AlphabetStore {
    cache: FileCache,
}

impl AlphabetStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            cache: FileCache::new(dir, "-letters.txt"),
        }
    }

    pub fn path(&self, code: &str) -> PathBuf {
        self.cache.locate(code)
    }

    /// Load the alphabet for `code`; `Ok(None)` when no file has been cached yet
    pub fn get(&self, code: &str) -> Result<Option<Alphabet>> {
        let Some(text) = self.cache.get(code)? else {
            return Ok(None);
        };
        let file: AlphabetFile =
            serde_json::from_str(&text).map_err(|e| Error::InvalidResource {
                path: self.path(code),
                reason: e.to_string(),
            })?;
        Ok(Some(Alphabet::from(&file)))
    }

    /// Like [`AlphabetStore::get`], but a missing file is fatal
    pub fn require(&self, code: &str) -> Result<Alphabet> {
        self.get(code)?.ok_or_else(|| Error::MissingResource {
            language: code.to_string(),
            resource: ResourceKind::Alphabet,
            path: self.path(code),
        })
    }

    pub fn put(&self, code: &str, letters: &[String]) -> Result<()> {
        let file = AlphabetFile {
            letters: letters.iter().map(|l| l.to_lowercase()).collect(),
        };
        self.cache.put(code, &serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}
