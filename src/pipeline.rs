use crate::alphabet::AlphabetStore;
use crate::app_dirs::DataLayout;
use crate::config::Config;
use crate::corpus::CorpusStore;
use crate::error::Result;
use crate::frequency::{self, Frequencies};
use crate::language::Language;
use crate::selection::{CoverageModel, ScoredLetter};
use crate::speakers::{SpeakerProvider, StaticSpeakers};
use itertools::Itertools;
use log::{info, warn};

/// Cached resources for a run, all living below one data directory
pub struct Workspace {
    pub layout: DataLayout,
    pub corpora: CorpusStore,
    pub alphabets: AlphabetStore,
    pub speakers: SpeakerProvider<StaticSpeakers>,
}

impl Workspace {
    pub fn new(cfg: &Config) -> Self {
        let layout = DataLayout::new(cfg.resolved_data_dir());
        Self {
            corpora: CorpusStore::new(layout.corpora()),
            alphabets: AlphabetStore::new(layout.letters()),
            speakers: SpeakerProvider::new(
                layout.speakers(),
                StaticSpeakers::new(cfg.speakers.clone()),
            ),
            layout,
        }
    }

    pub fn load_language(&self, code: &str) -> Result<Language> {
        let alphabet = self.alphabets.require(code)?;
        let speakers = self.speakers.speakers(code)?;
        Ok(Language::new(code, speakers, alphabet))
    }

    /// Load every listed language once, keeping the first occurrence of a repeated code
    pub fn load_languages(&self, codes: &[String]) -> Result<Vec<Language>> {
        let unique = codes.iter().unique().collect_vec();
        if unique.len() < codes.len() {
            warn!("ignoring {} repeated language code(s)", codes.len() - unique.len());
        }
        unique.into_iter().map(|code| self.load_language(code)).collect()
    }

    /// Fail on the first language whose corpus is missing or not latin script
    pub fn check_scripts(&self, cfg: &Config) -> Result<()> {
        for code in &cfg.languages {
            self.corpora
                .check_script(code, cfg.script_sample_lines, cfg.script_threshold)?;
        }
        Ok(())
    }

    /// Presence of each cached resource for one language, without fetching anything
    pub fn status(&self, cfg: &Config, code: &str) -> LanguageStatus {
        let script = if self.corpora.exists(code) {
            Some(
                self.corpora
                    .check_script(code, cfg.script_sample_lines, cfg.script_threshold)
                    .map_err(|e| e.to_string()),
            )
        } else {
            None
        };
        LanguageStatus {
            code: code.to_string(),
            corpus: self.corpora.exists(code),
            alphabet: self.alphabets.path(code).exists(),
            speakers: self.speakers.is_cached(code) || cfg.speakers.contains_key(code),
            script,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageStatus {
    pub code: String,
    pub corpus: bool,
    pub alphabet: bool,
    pub speakers: bool,
    /// Latin ratio of the corpus sample, `None` when there is no corpus
    pub script: Option<std::result::Result<f64, String>>,
}

impl LanguageStatus {
    pub fn is_ready(&self) -> bool {
        self.corpus && self.alphabet && self.speakers && matches!(self.script, Some(Ok(_)))
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub languages: Vec<Language>,
    pub frequencies: Frequencies,
    /// Alphabet letters seen in some corpus, before the language-count gate
    pub observed_letters: usize,
    pub ranking: Vec<ScoredLetter>,
}

/// Script gate, frequency aggregation and greedy ranking over the configured languages
pub fn run(cfg: &Config) -> Result<RunOutcome> {
    let workspace = Workspace::new(cfg);
    info!("languages: {}", cfg.languages.join(", "));

    workspace.check_scripts(cfg)?;
    let languages = workspace.load_languages(&cfg.languages)?;
    let frequencies = frequency::aggregate(&languages, &workspace.corpora, cfg.use_sentences_count)?;

    let model = CoverageModel::new(&languages, &frequencies, cfg.selection_params());
    let observed_letters = model.observed_letters().len();
    info!(
        "{} candidate letters out of {observed_letters} observed",
        model.candidates().len()
    );
    let ranking = model.rank();

    Ok(RunOutcome {
        languages,
        frequencies,
        observed_letters,
        ranking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ResourceKind};
    use assert_matches::assert_matches;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::tempdir;

    fn config(dir: &std::path::Path) -> Config {
        Config {
            languages: vec!["aaa".into(), "bbb".into()],
            max_languages: 1,
            data_dir: Some(dir.to_path_buf()),
            speakers: BTreeMap::from([("aaa".into(), 100), ("bbb".into(), 10)]),
            ..Config::default()
        }
    }

    fn seed(workspace: &Workspace, code: &str, letters: &[&str], corpus: &str) {
        let letters: Vec<String> = letters.iter().map(|l| l.to_string()).collect();
        workspace.alphabets.put(code, &letters).unwrap();
        fs::create_dir_all(workspace.layout.corpora()).unwrap();
        fs::write(workspace.corpora.path(code), corpus).unwrap();
    }

    #[test]
    fn run_ranks_exclusive_letters_by_reach() {
        let dir = tempdir().unwrap();
        let cfg = config(dir.path());
        let workspace = Workspace::new(&cfg);
        seed(&workspace, "aaa", &["a", "b"], "aaabb\naaabb\n");
        seed(&workspace, "bbb", &["a", "c"], "ac\nac\n");

        let outcome = run(&cfg).unwrap();
        let letters: Vec<char> = outcome.ranking.iter().map(|s| s.letter).collect();
        assert_eq!(letters, vec!['b', 'c']);
        assert_eq!(outcome.observed_letters, 3);
        assert!((outcome.frequencies.of("aaa", 'b') - 0.4).abs() < 1e-12);

        // speaker counts from the config are now cached
        assert!(workspace.speakers.is_cached("aaa"));
    }

    #[test]
    fn run_counts_repeated_languages_once() {
        let dir = tempdir().unwrap();
        let mut cfg = config(dir.path());
        let workspace = Workspace::new(&cfg);
        seed(&workspace, "aaa", &["a", "b"], "aaabb\naaabb\n");
        seed(&workspace, "bbb", &["a", "c"], "ac\nac\n");
        let once = run(&cfg).unwrap();

        cfg.languages = vec!["aaa".into(), "bbb".into(), "aaa".into()];
        let repeated = run(&cfg).unwrap();
        let codes: Vec<&str> = repeated.languages.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["aaa", "bbb"]);
        assert_eq!(repeated.ranking, once.ranking);
    }

    #[test]
    fn run_rejects_non_latin_corpus() {
        let dir = tempdir().unwrap();
        let cfg = config(dir.path());
        let workspace = Workspace::new(&cfg);
        seed(&workspace, "aaa", &["a"], "aaaa\n");
        seed(&workspace, "bbb", &["a"], "ббббб\n");

        assert_matches!(run(&cfg), Err(Error::ScriptMismatch { ref language, .. }) if language == "bbb");
    }

    #[test]
    fn run_rejects_missing_alphabet() {
        let dir = tempdir().unwrap();
        let cfg = config(dir.path());
        let workspace = Workspace::new(&cfg);
        seed(&workspace, "aaa", &["a"], "aaaa\n");
        fs::write(workspace.corpora.path("bbb"), "bbbb\n").unwrap();

        assert_matches!(
            run(&cfg),
            Err(Error::MissingResource { resource: ResourceKind::Alphabet, .. })
        );
    }

    #[test]
    fn status_reports_each_resource() {
        let dir = tempdir().unwrap();
        let cfg = config(dir.path());
        let workspace = Workspace::new(&cfg);
        seed(&workspace, "aaa", &["a"], "aaaa\n");

        let ready = workspace.status(&cfg, "aaa");
        assert!(ready.is_ready());

        let missing = workspace.status(&cfg, "ccc");
        assert!(!missing.corpus && !missing.alphabet && !missing.speakers);
        assert_eq!(missing.script, None);
        assert!(!missing.is_ready());
    }
}
