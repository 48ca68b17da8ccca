use crate::cache::{get_or_compute, FileCache, KeyedCache, Lookup};
use crate::error::{Error, ResourceKind, Result};
use log::info;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Somewhere speaker counts can be looked up when nothing is cached yet
pub trait SpeakerSource {
    fn fetch(&self, code: &str) -> Result<u64>;
}

/// Fixed table of speaker counts, usually the `speakers` section of the config
#[derive(Debug, Clone, Default)]
pub struct StaticSpeakers {
    counts: BTreeMap<String, u64>,
}

impl StaticSpeakers {
    pub fn new(counts: BTreeMap<String, u64>) -> Self {
        Self { counts }
    }
}

impl SpeakerSource for StaticSpeakers {
    fn fetch(&self, code: &str) -> Result<u64> {
        self.counts
            .get(code)
            .copied()
            .ok_or_else(|| Error::ExternalFetch {
                language: code.to_string(),
                resource: ResourceKind::Speakers,
                reason: "no speaker count known; add it to the config or the cache".into(),
            })
    }
}

/// Speaker counts cached as plain integers in `<dir>/<code>.txt`
pub struct SpeakerProvider<S: SpeakerSource> {
    cache: FileCache,
    source: S,
}

impl<S: SpeakerSource> SpeakerProvider<S> {
    pub fn new<P: AsRef<Path>>(dir: P, source: S) -> Self {
        Self {
            cache: FileCache::new(dir, ".txt"),
            source,
        }
    }

    pub fn path(&self, code: &str) -> PathBuf {
        self.cache.locate(code)
    }

    pub fn is_cached(&self, code: &str) -> bool {
        self.cache.contains(code)
    }

    /// Cached count for `code`, fetching and caching it on first use
    pub fn speakers(&self, code: &str) -> Result<u64> {
        let path = self.path(code);
        let lookup = get_or_compute(
            &self.cache,
            code,
            |text| {
                text.trim()
                    .parse::<u64>()
                    .map_err(|e| Error::InvalidResource {
                        path: path.clone(),
                        reason: format!("{e} (content {:?})", text.trim()),
                    })
            },
            || {
                let count = self.source.fetch(code)?;
                Ok((count, count.to_string()))
            },
        )?;

        if let Lookup::Computed(count) = lookup {
            info!("cached {count} speakers for {code}");
        }
        Ok(lookup.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::cell::Cell;
    use tempfile::tempdir;

    struct CountingSource {
        calls: Cell<usize>,
    }

    impl SpeakerSource for CountingSource {
        fn fetch(&self, _code: &str) -> Result<u64> {
            self.calls.set(self.calls.get() + 1);
            Ok(1_000)
        }
    }

    #[test]
    fn fetches_once_then_reads_cache() {
        let dir = tempdir().unwrap();
        let provider = SpeakerProvider::new(
            dir.path(),
            CountingSource {
                calls: Cell::new(0),
            },
        );

        assert_eq!(provider.speakers("glv").unwrap(), 1_000);
        assert_eq!(provider.speakers("glv").unwrap(), 1_000);
        assert_eq!(provider.source.calls.get(), 1);
        assert_eq!(
            std::fs::read_to_string(provider.path("glv")).unwrap(),
            "1000"
        );
    }

    #[test]
    fn cached_value_wins_over_source() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("eng.txt"), "373000000\n").unwrap();
        let source = StaticSpeakers::new(BTreeMap::from([("eng".to_string(), 1)]));
        let provider = SpeakerProvider::new(dir.path(), source);
        assert_eq!(provider.speakers("eng").unwrap(), 373_000_000);
    }

    #[test]
    fn unknown_language_is_fetch_failure() {
        let dir = tempdir().unwrap();
        let provider = SpeakerProvider::new(dir.path(), StaticSpeakers::default());
        assert_matches!(
            provider.speakers("roh"),
            Err(Error::ExternalFetch { resource: ResourceKind::Speakers, .. })
        );
        assert!(!provider.is_cached("roh"));
    }

    #[test]
    fn garbage_cache_is_invalid() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("srd.txt"), "None").unwrap();
        let provider = SpeakerProvider::new(dir.path(), StaticSpeakers::default());
        assert_matches!(provider.speakers("srd"), Err(Error::InvalidResource { .. }));
    }
}
