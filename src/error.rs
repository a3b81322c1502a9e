use std::path::PathBuf;

use thiserror::Error;

/// Failures that can occur while loading words into an index.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open word list {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed reading word list: {0}")]
    Read(#[from] std::io::Error),

    #[error("word on line {line} is {length} bytes long, maximum is {max}")]
    OversizeWord { line: usize, length: usize, max: usize },

    #[error("index already holds {entries} words, unload it before loading again")]
    AlreadyLoaded { entries: usize },
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Failures of a full dictionary-plus-text spelling run.
#[derive(Error, Debug)]
pub enum SpellError {
    #[error(transparent)]
    Dictionary(#[from] LoadError),

    #[error("cannot read text {}: {source}", path.display())]
    Text {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures reading or parsing the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
