use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key-value storage for cached per-language resources
pub trait KeyedCache {
    /// Location the value for `key` is (or would be) stored at
    fn locate(&self, key: &str) -> PathBuf;

    fn get(&self, key: &str) -> io::Result<Option<String>>;

    fn put(&self, key: &str, value: &str) -> io::Result<()>;

    fn contains(&self, key: &str) -> bool {
        self.locate(key).exists()
    }
}

/// Result of a cache lookup that may fall back to computing the value
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Present(T),
    Computed(T),
}

impl<T> Lookup<T> {
    pub fn into_inner(self) -> T {
        match self {
            Lookup::Present(v) | Lookup::Computed(v) => v,
        }
    }
}

/// Return the cached value for `key`, or compute it, store it and return it.
///
/// `parse` turns the cached text into a value; `compute` produces a fresh
/// value and the text to store for it.
pub fn get_or_compute<C, T, E, P, F>(
    cache: &C,
    key: &str,
    parse: P,
    compute: F,
) -> Result<Lookup<T>, E>
where
    C: KeyedCache + ?Sized,
    E: From<io::Error>,
    P: FnOnce(&str) -> Result<T, E>,
    F: FnOnce() -> Result<(T, String), E>,
{
    if let Some(text) = cache.get(key)? {
        return parse(&text).map(Lookup::Present);
    }

    debug!("cache miss for {key}, computing");
    let (value, text) = compute()?;
    cache.put(key, &text)?;
    Ok(Lookup::Computed(value))
}

/// Files in one directory, named `<key><suffix>`
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    suffix: String,
}

impl FileCache {
    pub fn new<P: AsRef<Path>>(dir: P, suffix: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            suffix: suffix.to_string(),
        }
    }
}

impl KeyedCache for FileCache {
    fn locate(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}{}", self.suffix))
    }

    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.locate(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn put(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.locate(key), value)
    }
}
