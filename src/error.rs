use std::path::PathBuf;

/// Which cached per-language resource a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Corpus,
    Alphabet,
    Speakers,
}

/// Every failure in a run is fatal; there is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing {resource} for {language} (expected at {})", path.display())]
    MissingResource {
        language: String,
        resource: ResourceKind,
        path: PathBuf,
    },

    #[error("language {language} does not use latin script ({:.1}% latin, need {:.1}%)", latin_ratio * 100.0, threshold * 100.0)]
    ScriptMismatch {
        language: String,
        latin_ratio: f64,
        threshold: f64,
    },

    #[error("could not fetch {resource} for {language}: {reason}")]
    ExternalFetch {
        language: String,
        resource: ResourceKind,
        reason: String,
    },

    #[error("invalid cached file {}: {reason}", path.display())]
    InvalidResource { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
