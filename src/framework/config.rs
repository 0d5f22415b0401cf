use std::path::PathBuf;

use serde::Deserialize;
use tracing::debug;

use crate::game::{
    words_list::{WordsList, WordsListError},
    GuessPolicy,
};

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub db: DbConfig,

    #[serde(default)]
    pub game: GameConfig,
}

impl Config {
    /// Loads the TOML config, from `./biblewordle.toml` unless
    /// `BIBLEWORDLE_CONFIG` points elsewhere.
    pub fn load() -> Result<Self, Error> {
        let path = std::env::var("BIBLEWORDLE_CONFIG")
            .unwrap_or_else(|_| "./biblewordle.toml".to_owned());

        debug!(%path, "loading config");

        ::config::Config::builder()
            .add_source(::config::File::new(&path, config::FileFormat::Toml))
            .build()
            .map_err(Error::Read)?
            .try_deserialize()
            .map_err(Error::Parse)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct DbConfig {
    pub url: String,

    #[serde(default = "DbConfig::default_database")]
    pub database: String,
}

impl DbConfig {
    fn default_database() -> String {
        "biblewordle".to_owned()
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Replacement vocabulary, one word per line. The built-in list is
    /// used when unset.
    pub words_file: Option<PathBuf>,

    pub guess_policy: GuessPolicy,

    pub cache_dir: Option<PathBuf>,
}

impl GameConfig {
    pub fn words_list(&self) -> Result<WordsList, WordsListError> {
        match &self.words_file {
            Some(path) => WordsList::load(path),
            None => Ok(WordsList::built_in()),
        }
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("./cache"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config: {0}")]
    Read(config::ConfigError),

    #[error("failed to parse config: {0}")]
    Parse(config::ConfigError),
}
