// Library surface for the CLI and integration tests.
pub mod alphabet;
pub mod app_dirs;
pub mod cache;
pub mod config;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod language;
pub mod pipeline;
pub mod report;
pub mod script;
pub mod selection;
pub mod speakers;

pub use error::{Error, Result};
