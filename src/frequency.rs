use crate::corpus::CorpusStore;
use crate::error::{Error, ResourceKind, Result};
use crate::language::Language;
use crate::script::countable_letters;
use itertools::Itertools;
use log::{info, warn};
use std::collections::BTreeMap;

/// Share of each letter among the counted letters of some text
pub type LetterFrequency = BTreeMap<char, f64>;

#[derive(Debug, Default, Clone)]
struct Counts {
    letters: BTreeMap<char, u64>,
    total: u64,
}

impl Counts {
    fn add(&mut self, letter: char) {
        *self.letters.entry(letter).or_insert(0) += 1;
        self.total += 1;
    }

    fn normalized(&self) -> LetterFrequency {
        if self.total == 0 {
            return LetterFrequency::new();
        }
        self.letters
            .iter()
            .map(|(&letter, &count)| (letter, count as f64 / self.total as f64))
            .collect()
    }
}

/// Running letter counts per language and across all languages
#[derive(Debug, Default, Clone)]
pub struct FrequencyCounter {
    per_language: BTreeMap<String, Counts>,
    global: Counts,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sentence(&mut self, code: &str, sentence: &str) {
        let counts = self.per_language.entry(code.to_string()).or_default();
        for letter in countable_letters(sentence) {
            counts.add(letter);
            self.global.add(letter);
        }
    }

    /// Letters counted so far for `code`
    pub fn letters_counted(&self, code: &str) -> u64 {
        self.per_language.get(code).map_or(0, |c| c.total)
    }

    /// Normalize the counts. Per-language shares are taken over every counted
    /// letter, then anything outside that language's alphabet is dropped.
    pub fn finish(self, languages: &[Language]) -> Frequencies {
        let per_language = languages
            .iter()
            .map(|lang| {
                let counts = self.per_language.get(&lang.code);
                if counts.map_or(true, |c| c.total == 0) {
                    warn!("no letters counted for {}", lang.code);
                }
                let mut freq = counts.map(Counts::normalized).unwrap_or_default();
                freq.retain(|&letter, _| lang.alphabet.contains(letter));
                (lang.code.clone(), freq)
            })
            .collect();

        Frequencies {
            per_language,
            global: self.global.normalized(),
        }
    }
}

/// Letter frequencies for one run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frequencies {
    per_language: BTreeMap<String, LetterFrequency>,
    global: LetterFrequency,
}

impl Frequencies {
    pub fn new(per_language: BTreeMap<String, LetterFrequency>, global: LetterFrequency) -> Self {
        Self {
            per_language,
            global,
        }
    }

    pub fn language(&self, code: &str) -> Option<&LetterFrequency> {
        self.per_language.get(code)
    }

    /// Frequency of `letter` in `code`, zero if it was never seen there
    pub fn of(&self, code: &str, letter: char) -> f64 {
        self.language(code)
            .and_then(|freq| freq.get(&letter))
            .copied()
            .unwrap_or(0.0)
    }

    /// Unfiltered frequency of `letter` across every corpus combined
    pub fn global(&self, letter: char) -> f64 {
        self.global.get(&letter).copied().unwrap_or(0.0)
    }

    pub fn global_letters(&self) -> &LetterFrequency {
        &self.global
    }
}

/// Count the first `sentence_limit` sentences of every language's corpus.
///
/// All corpora must be present before any counting starts.
pub fn aggregate(
    languages: &[Language],
    corpora: &CorpusStore,
    sentence_limit: usize,
) -> Result<Frequencies> {
    if let Some(lang) = languages.iter().find(|lang| !corpora.exists(&lang.code)) {
        return Err(Error::MissingResource {
            language: lang.code.clone(),
            resource: ResourceKind::Corpus,
            path: corpora.path(&lang.code),
        });
    }

    let mut counter = FrequencyCounter::new();
    for lang in languages {
        let sentences = corpora.for_each_sentence(&lang.code, sentence_limit, |sentence| {
            counter.add_sentence(&lang.code, sentence)
        })?;
        info!(
            "finished {} ({sentences} sentences, {} letters), alphabet: {}",
            lang.code,
            counter.letters_counted(&lang.code),
            lang.alphabet.iter().join(" ")
        );
    }

    Ok(counter.finish(languages))
}
