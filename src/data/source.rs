//! Contains implementations for different data sources.

#[cfg(feature = "csv")]
mod csv;
#[cfg(feature = "http")]
mod http;
mod json;
#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "csv")]
pub use crate::data::source::csv::{CsvSource, CsvSourceConfig};
#[cfg(feature = "http")]
pub use crate::data::source::http::HttpSource;
pub use crate::data::source::json::JsonSource;
#[cfg(feature = "sqlite")]
pub use crate::data::source::sqlite::{SqliteSource, SqliteSourceConfig};
use crate::data::Card;
use crate::error::{Error, Result};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub trait DataSource<C: Card>: Send {
    fn read(&mut self) -> Result<Box<dyn Iterator<Item = Result<C>> + '_>>;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum SourceType {
    Json,
    #[cfg(feature = "csv")]
    Csv,
    #[cfg(feature = "sqlite")]
    Sqlite,
    #[cfg(feature = "http")]
    Http,
}

impl SourceType {
    /// Guesses the source type from a URL scheme or a file extension.
    pub fn infer(input: &str) -> Option<SourceType> {
        #[cfg(feature = "http")]
        if input.starts_with("http://") || input.starts_with("https://") {
            return Some(SourceType::Http);
        }
        let ext = Path::new(input).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(SourceType::Json),
            #[cfg(feature = "csv")]
            "csv" | "tsv" => Some(SourceType::Csv),
            #[cfg(feature = "sqlite")]
            "db" | "sqlite" | "sqlite3" => Some(SourceType::Sqlite),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            #[cfg(feature = "csv")]
            Self::Csv => write!(f, "csv"),
            #[cfg(feature = "sqlite")]
            Self::Sqlite => write!(f, "sqlite"),
            #[cfg(feature = "http")]
            Self::Http => write!(f, "http"),
        }
    }
}

/// Per-format settings, as found under `[source]` in the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceConfig {
    #[cfg(feature = "csv")]
    pub csv: Option<CsvSourceConfig>,
    #[cfg(feature = "sqlite")]
    pub sqlite: Option<SqliteSourceConfig>,
}

impl SourceConfig {
    /// Opens `input` as a source of `C`, inferring its type when not given.
    pub fn open<C>(
        &self,
        src_type: Option<SourceType>,
        input: &str,
    ) -> Result<Box<dyn DataSource<C>>>
    where
        C: Card + DeserializeOwned + Send + 'static,
    {
        let src_type = src_type
            .or_else(|| SourceType::infer(input))
            .ok_or_else(|| Error::source_infer(input))?;
        match src_type {
            SourceType::Json => {
                JsonSource::open(&input).map(|s| Box::new(s) as Box<dyn DataSource<C>>)
            }
            #[cfg(feature = "csv")]
            SourceType::Csv => {
                let mut config = self.csv.unwrap_or_default();
                if input.to_lowercase().ends_with(".tsv") && self.csv.is_none() {
                    config.delimiter = '\t';
                }
                CsvSource::open(config, &input).map(|s| Box::new(s) as Box<dyn DataSource<C>>)
            }
            #[cfg(feature = "sqlite")]
            SourceType::Sqlite => {
                let config = self.sqlite.clone().unwrap_or_default();
                SqliteSource::open(&config, &input)
                    .map(|s| Box::new(s) as Box<dyn DataSource<C>>)
            }
            #[cfg(feature = "http")]
            SourceType::Http => Ok(Box::new(HttpSource::new(input))),
        }
    }
}
