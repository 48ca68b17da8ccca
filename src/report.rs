use crate::error::Result;
use crate::language::{display_name, Language};
use crate::selection::ScoredLetter;
use chrono::Local;
use itertools::Itertools;
use log::info;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Which languages a set of learned letters reaches
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coverage {
    pub covered: Vec<String>,
    /// Languages with at least one learned letter no other language uses
    pub distinct: Vec<String>,
    pub missed: Vec<String>,
}

/// Renders a ranking for people and flashcard tools
pub struct Report<'a> {
    ranking: &'a [ScoredLetter],
    languages: &'a [Language],
    observed_letters: usize,
    top: Option<usize>,
}

impl<'a> Report<'a> {
    pub fn new(
        ranking: &'a [ScoredLetter],
        languages: &'a [Language],
        observed_letters: usize,
    ) -> Self {
        Self {
            ranking,
            languages,
            observed_letters,
            top: None,
        }
    }

    /// Only render the first `top` letters
    pub fn truncate(mut self, top: Option<usize>) -> Self {
        self.top = top;
        self
    }

    fn listed(&self) -> &'a [ScoredLetter] {
        match self.top {
            Some(top) => &self.ranking[..top.min(self.ranking.len())],
            None => self.ranking,
        }
    }

    fn name_of(&self, code: &str) -> String {
        self.languages
            .iter()
            .find(|lang| lang.code == code)
            .map(|lang| lang.name.clone())
            .unwrap_or_else(|| display_name(code).to_string())
    }

    fn names<'c, I: IntoIterator<Item = &'c String>>(&self, codes: I) -> String {
        codes.into_iter().map(|code| self.name_of(code)).join(", ")
    }

    pub fn coverage(&self) -> Coverage {
        let mut covered = BTreeSet::new();
        let mut distinct = BTreeSet::new();
        for scored in self.listed() {
            covered.extend(scored.languages.iter().cloned());
            if let [only] = scored.languages.as_slice() {
                distinct.insert(only.clone());
            }
        }

        // keep run order rather than code order
        let in_run_order = |set: &BTreeSet<String>, keep: bool| -> Vec<String> {
            self.languages
                .iter()
                .filter(|lang| set.contains(&lang.code) == keep)
                .map(|lang| lang.code.clone())
                .collect()
        };

        Coverage {
            covered: in_run_order(&covered, true),
            distinct: in_run_order(&distinct, true),
            missed: in_run_order(&covered, false),
        }
    }

    pub fn render_log(&self) -> String {
        let total = self.languages.len();
        let coverage = self.coverage();

        let mut lines = vec!["results:".to_string()];
        lines.extend(self.listed().iter().map(|s| {
            format!(
                "{} score: {:.0} langs: {}",
                s.letter,
                s.score,
                self.names(&s.languages)
            )
        }));
        lines.push(format!(
            "listed {} chars out of {} total chars",
            self.listed().len(),
            self.observed_letters
        ));
        lines.push(format!(
            "covered {}/{total} languages: {}",
            coverage.covered.len(),
            self.names(&coverage.covered)
        ));
        lines.push(format!(
            "with distinct coverage for {}/{total} languages: {}",
            coverage.distinct.len(),
            self.names(&coverage.distinct)
        ));
        lines.push(format!("missed languages: {}", self.names(&coverage.missed)));
        lines.join("\n") + "\n"
    }

    pub fn render_markdown(&self) -> String {
        let mut table = String::from("|Letter|Score|Languages|\n|------|-----|---------|\n");
        for s in self.listed() {
            table.push_str(&format!(
                "|{} {}|{:.0}|{}|\n",
                s.letter.to_uppercase(),
                s.letter,
                s.score,
                self.names(&s.languages)
            ));
        }
        table
    }

    /// Flashcard rows `UPPER;lower;score;languages`, no header
    pub fn write_anki_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .from_writer(out);
        for s in self.listed() {
            writer.write_record([
                s.letter.to_uppercase().to_string(),
                s.letter.to_string(),
                format!("{:.0}", s.score),
                self.names(&s.languages),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn render_anki_csv(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_anki_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write every report into `dir`, returning the paths written
    pub fn write_all<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let ranking = dir.join("ranking.json");
        fs::write(&ranking, serde_json::to_vec_pretty(self.ranking)?)?;

        let log = dir.join("results_log.txt");
        let header = format!("# generated {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"));
        fs::write(&log, header + &self.render_log())?;

        let anki = dir.join("anki_letters.csv");
        self.write_anki_csv(fs::File::create(&anki)?)?;

        let markdown = dir.join("markdown_table.md");
        fs::write(&markdown, self.render_markdown())?;

        let written = vec![ranking, log, anki, markdown];
        for path in &written {
            info!("wrote {}", path.display());
        }
        Ok(written)
    }
}
