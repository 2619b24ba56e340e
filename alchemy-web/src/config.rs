use crate::error::{AppError, ConfigError, Result};
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

fn default_bind() -> String {
    "127.0.0.1:5000".into()
}

fn default_workers() -> usize {
    4
}

fn default_connection_rate() -> usize {
    256
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/library.sqlite")
}

fn default_cover_url_base() -> String {
    "https://covers.openlibrary.org/b/isbn".into()
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_connection_rate")]
    pub max_connection_rate: usize,

    /// SQLite file holding the catalog, relative to the working directory.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Cover images are served from `<cover_url_base>/<isbn>-M.jpg`.
    #[serde(default = "default_cover_url_base")]
    pub cover_url_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            workers: default_workers(),
            max_connection_rate: default_connection_rate(),
            database_path: default_database_path(),
            cover_url_base: default_cover_url_base(),
        }
    }
}

impl Config {
    pub fn load(settings_file: &Path) -> Result<Config> {
        let contents = read_to_string(settings_file).map_err(|e| ConfigError::ReadFile {
            path: settings_file.display().to_string(),
            source: e,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Config> {
        toml::from_str(contents).map_err(|e| AppError::from(ConfigError::from(e)))
    }

    fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid {
                reason: "workers must be greater than 0".to_string(),
            }
            .into());
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "database_path must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

pub fn load() -> Result<Config> {
    let mut settings = match std::env::var("CONFIG_FILE") {
        Err(_) => {
            if Path::new("settings.toml").exists() {
                Config::load(Path::new("settings.toml"))?
            } else {
                Config::default()
            }
        }
        Ok(settings_file) => Config::load(Path::new(&settings_file))?,
    };

    if let Some(database_path) = std::env::var_os("DATABASE_PATH") {
        settings.database_path = PathBuf::from(database_path);
    }

    settings.validate()?;
    Ok(settings)
}
