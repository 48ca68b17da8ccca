use crate::frequency::Frequencies;
use crate::language::Language;
use itertools::Itertools;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Tunables of the greedy selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionParams {
    /// Letters in more alphabets than this are treated as already known
    pub max_languages: usize,
    /// Length of the text excerpt used to estimate whether a letter shows up
    pub assumed_text_length: u32,
    /// Base of the exponential discount per extra language sharing a letter
    pub extra_language_deweight: f64,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            max_languages: 4,
            assumed_text_length: 40,
            extra_language_deweight: 1.0,
        }
    }
}

/// One entry of the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLetter {
    pub letter: char,
    pub rank: usize,
    pub score: f64,
    pub languages: Vec<String>,
}

/// Per-language multipliers, all starting at one and only ever shrinking
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageWeights(BTreeMap<String, f64>);

impl LanguageWeights {
    pub fn fresh(languages: &[Language]) -> Self {
        Self(
            languages
                .iter()
                .map(|lang| (lang.code.clone(), 1.0))
                .collect(),
        )
    }

    pub fn get(&self, code: &str) -> f64 {
        self.0.get(code).copied().unwrap_or(1.0)
    }

    fn scale(&mut self, code: &str, factor: f64) {
        let weight = self.0.entry(code.to_string()).or_insert(1.0);
        debug!("deweighting {code} by {factor}: {weight} to {}", *weight * factor);
        *weight *= factor;
    }
}

/// Everything the selector reads: languages, their speakers and letter frequencies
pub struct CoverageModel<'a> {
    languages: &'a [Language],
    frequencies: &'a Frequencies,
    params: SelectionParams,
}

impl<'a> CoverageModel<'a> {
    pub fn new(
        languages: &'a [Language],
        frequencies: &'a Frequencies,
        params: SelectionParams,
    ) -> Self {
        Self {
            languages,
            frequencies,
            params,
        }
    }

    pub fn params(&self) -> SelectionParams {
        self.params
    }

    /// Languages whose alphabet contains `letter`, in run order
    pub fn languages_with_letter(&self, letter: char) -> Vec<&'a Language> {
        self.languages
            .iter()
            .filter(|lang| lang.alphabet.contains(letter))
            .collect()
    }

    /// Total speakers of the languages using `letter`
    pub fn letter_speakers(&self, letter: char) -> u64 {
        self.languages_with_letter(letter)
            .iter()
            .map(|lang| lang.speakers)
            .sum()
    }

    /// Probability of `letter` appearing at least once in an excerpt of `text_length` letters
    pub fn letter_chance(&self, code: &str, letter: char, text_length: u32) -> f64 {
        let freq = self.frequencies.of(code, letter);
        1.0 - (1.0 - freq).powf(f64::from(text_length))
    }

    /// Letters from every alphabet seen at least once across all corpora
    pub fn observed_letters(&self) -> BTreeSet<char> {
        self.languages
            .iter()
            .flat_map(|lang| lang.alphabet.iter())
            .filter(|&letter| self.frequencies.global(letter) > 0.0)
            .collect()
    }

    /// Observed letters shared by at most `max_languages` languages
    pub fn candidates(&self) -> BTreeSet<char> {
        self.observed_letters()
            .into_iter()
            .filter(|&letter| {
                self.languages_with_letter(letter).len() <= self.params.max_languages
            })
            .collect()
    }

    /// Reach-weighted score of `letter` under the current language weights
    pub fn score(&self, letter: char, weights: &LanguageWeights) -> f64 {
        let languages = self.languages_with_letter(letter);
        let letter_speakers = self.letter_speakers(letter);
        if languages.is_empty() || letter_speakers == 0 {
            return 0.0;
        }

        let weighted_freq: f64 = languages
            .iter()
            .map(|lang| {
                let share = lang.speakers as f64 / letter_speakers as f64;
                self.frequencies.of(&lang.code, letter) * share * weights.get(&lang.code)
            })
            .sum();

        let sharing_discount = self
            .params
            .extra_language_deweight
            .powi(languages.len() as i32 - 1);

        letter_speakers as f64 * weighted_freq * sharing_discount
    }

    /// Score as seen by a learner who knows nothing yet
    pub fn undiscounted_score(&self, letter: char) -> f64 {
        self.score(letter, &LanguageWeights::fresh(self.languages))
    }

    /// Rank every candidate letter. Each call owns its own weights and remaining set.
    pub fn rank(&self) -> Vec<ScoredLetter> {
        SelectionRun::new(self).collect()
    }
}

/// Higher score first; equal scores fall back to code point order
fn by_score_then_letter(a: &(char, f64), b: &(char, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// State of one greedy selection. Yields one letter per round until no candidates remain.
pub struct SelectionRun<'m, 'a> {
    model: &'m CoverageModel<'a>,
    weights: LanguageWeights,
    remaining: BTreeSet<char>,
    round: usize,
}

impl<'m, 'a> SelectionRun<'m, 'a> {
    pub fn new(model: &'m CoverageModel<'a>) -> Self {
        Self {
            model,
            weights: LanguageWeights::fresh(model.languages),
            remaining: model.candidates(),
            round: 0,
        }
    }

    pub fn weights(&self) -> &LanguageWeights {
        &self.weights
    }

    pub fn remaining(&self) -> &BTreeSet<char> {
        &self.remaining
    }

    /// Current scores of all remaining letters, best first
    pub fn standings(&self) -> Vec<(char, f64)> {
        self.remaining
            .iter()
            .map(|&letter| (letter, self.model.score(letter, &self.weights)))
            .sorted_by(by_score_then_letter)
            .collect()
    }

    fn step(&mut self) -> Option<ScoredLetter> {
        let standings = self.standings();
        for &(letter, score) in &standings {
            trace!(
                "round {}: {letter} score: {score:.0} population: {} global: {:.6}",
                self.round + 1,
                self.model.letter_speakers(letter),
                self.model.frequencies.global(letter)
            );
        }
        let (chosen, discounted) = standings.into_iter().next()?;
        self.remaining.remove(&chosen);
        self.round += 1;

        let languages = self.model.languages_with_letter(chosen);
        debug!(
            "round {}: chose {chosen} ({discounted:.0}) for {}",
            self.round,
            languages.iter().map(|lang| &lang.name).join(", ")
        );

        let text_length = self.model.params.assumed_text_length;
        for lang in &languages {
            let miss = 1.0 - self.model.letter_chance(&lang.code, chosen, text_length);
            self.weights.scale(&lang.code, miss);
        }

        Some(ScoredLetter {
            letter: chosen,
            rank: self.round,
            score: self.model.undiscounted_score(chosen),
            languages: languages.iter().map(|lang| lang.code.clone()).collect(),
        })
    }
}

impl Iterator for SelectionRun<'_, '_> {
    type Item = ScoredLetter;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}
