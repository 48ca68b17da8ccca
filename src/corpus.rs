use crate::error::{Error, ResourceKind, Result};
use crate::script;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Cached sentence files keyed by language code, `<dir>/<code>_sentences.txt`.
///
/// Each file holds one lowercase sentence per line with the source metadata
/// columns already stripped.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    dir: PathBuf,
}

impl CorpusStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self, code: &str) -> PathBuf {
        self.dir.join(format!("{code}_sentences.txt"))
    }

    pub fn exists(&self, code: &str) -> bool {
        self.path(code).exists()
    }

    fn open(&self, code: &str) -> Result<BufReader<File>> {
        let path = self.path(code);
        match File::open(&path) {
            Ok(file) => Ok(BufReader::new(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::MissingResource {
                language: code.to_string(),
                resource: ResourceKind::Corpus,
                path,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Visit the first `limit` sentences of a language's corpus
    pub fn for_each_sentence<F>(&self, code: &str, limit: usize, mut visit: F) -> Result<usize>
    where
        F: FnMut(&str),
    {
        let reader = self.open(code)?;
        let mut seen = 0;
        for line in reader.lines().take(limit) {
            visit(&line?);
            seen += 1;
            if seen % 10_000 == 0 {
                debug!("processed {seen} sentences for {code}");
            }
        }
        Ok(seen)
    }

    /// First `lines` sentences joined into one sample for script detection
    pub fn sample(&self, code: &str, lines: usize) -> Result<String> {
        let mut sample = Vec::with_capacity(lines);
        self.for_each_sentence(code, lines, |s| sample.push(s.to_string()))?;
        Ok(sample.join(" "))
    }

    /// Fail unless the sampled corpus is predominantly latin script
    pub fn check_script(&self, code: &str, sample_lines: usize, threshold: f64) -> Result<f64> {
        let sample = self.sample(code, sample_lines)?;
        let ratio = script::latin_ratio(&sample).unwrap_or(0.0);
        if !script::is_latin_script(&sample, threshold) {
            return Err(Error::ScriptMismatch {
                language: code.to_string(),
                latin_ratio: ratio,
                threshold,
            });
        }
        debug!("{code} is {:.1}% latin", ratio * 100.0);
        Ok(ratio)
    }

    /// Convert a Leipzig `*-sentences.txt` file (`<id>\t<sentence>` per line) into the cached corpus.
    ///
    /// Returns `Ok(None)` when a corpus is already cached and `force` is not set.
    pub fn import_leipzig<P: AsRef<Path>>(
        &self,
        code: &str,
        raw: P,
        force: bool,
    ) -> Result<Option<usize>> {
        let target = self.path(code);
        if target.exists() && !force {
            info!("found sentences file {}, skipping import", target.display());
            return Ok(None);
        }

        let mut reader = BufReader::new(File::open(raw.as_ref())?);
        let mut sentences = Vec::new();
        let mut buf = Vec::new();
        while reader.read_until(b'\n', &mut buf)? > 0 {
            let line = String::from_utf8_lossy(&buf);
            if let Some(sentence) = parse_leipzig_line(&line) {
                sentences.push(sentence);
            }
            buf.clear();
        }

        fs::create_dir_all(&self.dir)?;
        fs::write(&target, sentences.join("\n"))?;
        info!(
            "saved {} sentences for {code} to {}",
            sentences.len(),
            target.display()
        );
        Ok(Some(sentences.len()))
    }
}

/// The lowercased sentence column of a Leipzig line, if it has one
pub fn parse_leipzig_line(line: &str) -> Option<String> {
    let (_id, sentence) = line.split_once('\t')?;
    Some(sentence.trim().to_lowercase())
}
