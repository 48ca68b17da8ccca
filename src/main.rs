use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use letterset::{
    config::{Config, ConfigStore, FileConfigStore},
    pipeline::{self, Workspace},
    report::Report,
};
use log::info;
use std::{error::Error, fs::OpenOptions, path::PathBuf};

/// rank the letters worth learning across many latin-script languages
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Measures letter frequencies in per-language sentence corpora, restricted to each language's official alphabet, and greedily ranks the letters that add the most speaker-weighted coverage."
)]
pub struct Cli {
    /// config file to read (defaults to the user config directory)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// directory holding corpora, alphabets and speaker counts
    #[clap(long, global = true)]
    data_dir: Option<PathBuf>,

    /// append logs to this file instead of stderr
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// rank letters over the configured languages and write the reports
    Rank(RankArgs),
    /// show which cached resources are present for every language
    Check,
    /// turn a Leipzig `-sentences.txt` file into a cached corpus
    Import {
        /// language code, e.g. `deu`
        language: String,
        /// raw `<id>\t<sentence>` file
        raw: PathBuf,
        /// overwrite an existing cached corpus
        #[clap(long)]
        force: bool,
    },
    /// store the official alphabet of a language
    Letters {
        language: String,
        #[clap(required = true)]
        letters: Vec<String>,
    },
    /// print the effective config as JSON
    Config {
        /// write the effective config back to the config file
        #[clap(long)]
        save: bool,
    },
}

#[derive(Args, Debug, Clone)]
struct RankArgs {
    /// letters used by more languages than this are not ranked
    #[clap(long)]
    max_languages: Option<usize>,

    /// text length used to estimate whether a letter appears
    #[clap(long)]
    assumed_text_length: Option<u32>,

    /// discount base for every extra language sharing a letter
    #[clap(long)]
    extra_language_deweight: Option<f64>,

    /// number of sentences to read per language
    #[clap(long)]
    sentences: Option<usize>,

    /// comma separated language codes to use instead of the configured ones
    #[clap(long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// directory for the reports (defaults to `<data-dir>/results`)
    #[clap(long)]
    out: Option<PathBuf>,

    /// only render the first N letters
    #[clap(long)]
    top: Option<usize>,
}

impl RankArgs {
    /// Overlay command line flags on the loaded config for this run only
    fn apply(&self, cfg: &mut Config) {
        if let Some(v) = self.max_languages {
            cfg.max_languages = v;
        }
        if let Some(v) = self.assumed_text_length {
            cfg.assumed_text_length = v;
        }
        if let Some(v) = self.extra_language_deweight {
            cfg.extra_language_deweight = v;
        }
        if let Some(v) = self.sentences {
            cfg.use_sentences_count = v;
        }
        if let Some(v) = &self.languages {
            cfg.languages = v.clone();
        }
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(file) = log_file {
        let log_output = OpenOptions::new().create(true).append(true).open(file)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_output)));
    }
    builder.init();
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_logging(cli.log_file.as_ref())?;

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let mut cfg = store.load()?;
    if let Some(dir) = &cli.data_dir {
        cfg.data_dir = Some(dir.clone());
    }

    match cli.command {
        Command::Rank(args) => {
            args.apply(&mut cfg);
            let outcome = pipeline::run(&cfg)?;
            let report = Report::new(
                &outcome.ranking,
                &outcome.languages,
                outcome.observed_letters,
            )
            .truncate(args.top);
            let out = args
                .out
                .unwrap_or_else(|| Workspace::new(&cfg).layout.results());
            report.write_all(&out)?;
            print!("{}", report.render_log());
        }
        Command::Check => {
            let workspace = Workspace::new(&cfg);
            println!("data dir: {}", workspace.layout.root.display());
            let statuses = cfg
                .languages
                .iter()
                .map(|code| workspace.status(&cfg, code))
                .collect_vec();
            for s in &statuses {
                let mark = |ok: bool| if ok { "ok" } else { "missing" };
                let script = match &s.script {
                    Some(Ok(ratio)) => format!("{:.1}% latin", ratio * 100.0),
                    Some(Err(e)) => e.clone(),
                    None => "-".to_string(),
                };
                println!(
                    "{:<4} corpus: {:<7} alphabet: {:<7} speakers: {:<7} script: {script}",
                    s.code,
                    mark(s.corpus),
                    mark(s.alphabet),
                    mark(s.speakers),
                );
            }
            let not_ready = statuses.iter().filter(|s| !s.is_ready()).count();
            if not_ready > 0 {
                return Err(format!("{not_ready} language(s) are not ready").into());
            }
        }
        Command::Import {
            language,
            raw,
            force,
        } => {
            let workspace = Workspace::new(&cfg);
            match workspace.corpora.import_leipzig(&language, &raw, force)? {
                Some(count) => println!("imported {count} sentences for {language}"),
                None => println!("corpus for {language} already cached, use --force to replace"),
            }
        }
        Command::Letters { language, letters } => {
            let workspace = Workspace::new(&cfg);
            workspace.alphabets.put(&language, &letters)?;
            info!("wrote {}", workspace.alphabets.path(&language).display());
            println!("stored {} letters for {language}", letters.len());
        }
        Command::Config { save } => {
            println!("{}", serde_json::to_string_pretty(&cfg)?);
            if save {
                store.save(&cfg)?;
                println!("saved to {}", store.path().display());
            }
        }
    }

    Ok(())
}
