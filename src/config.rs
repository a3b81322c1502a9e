use dirs::{config_dir, data_dir};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::index::{IndexOptions, OversizePolicy, DEFAULT_MAX_WORD_LENGTH};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,
    #[serde(default = "default_max_word_length")]
    pub max_word_length: NonZeroUsize,
    #[serde(default)]
    pub oversize: OversizePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            max_word_length: default_max_word_length(),
            oversize: OversizePolicy::default(),
        }
    }
}

impl Config {
    /// Reads the config at `path`, or the default location when `path` is `None`.
    ///
    /// A missing file at the default location yields the defaults. A missing
    /// file that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Config::default()),
            },
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound && !explicit => {
                debug!("no config at {:?}, using defaults", path);
                return Ok(Config::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        info!("reading config from {:?}", path);
        Config::from_json(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn from_json(text: &str) -> Result<Config, serde_json::Error> {
        let mut config: Config = serde_json::from_str(text)?;
        if let Some(expanded) = expand_tilde(&config.dictionary) {
            config.dictionary = expanded;
        }
        Ok(config)
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            max_word_length: self.max_word_length,
            oversize: self.oversize,
        }
    }
}

fn default_max_word_length() -> NonZeroUsize {
    DEFAULT_MAX_WORD_LENGTH
}

fn default_dictionary() -> PathBuf {
    let mut path = data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("wordcheck");
    path.push("dictionaries");
    path.push("large");
    path
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("wordcheck").join("config.json"))
}

pub fn expand_tilde<P: AsRef<Path>>(path_user_input: P) -> Option<PathBuf> {
    let p = path_user_input.as_ref();
    if !p.starts_with("~") {
        return Some(p.to_path_buf());
    }
    if p == Path::new("~") {
        return dirs::home_dir();
    }
    let rest = p.strip_prefix("~").ok()?;
    dirs::home_dir().map(|home| home.join(rest))
}
