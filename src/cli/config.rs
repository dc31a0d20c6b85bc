//! Configuration file for the front-end.

use crate::color::{Color, Palette};
use crate::data::source::{SourceConfig, SourceType};
use crate::error::{Error, Result};

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "cardex.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub palette: HashMap<String, Color>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceSection {
    #[serde(rename = "type")]
    pub src_type: Option<SourceType>,
    pub path: Option<String>,
    #[serde(flatten)]
    pub formats: SourceConfig,
}

impl Config {
    /// Finds a named config in the user's config folder, or `./cardex.toml`.
    ///
    /// Without a name, a missing local file just means defaults.
    pub fn find(name: Option<&impl AsRef<str>>) -> Result<Self> {
        match name {
            Some(name) => {
                let mut path = Self::config_folder()?;
                path.push(name.as_ref());
                path.push(FILE_NAME);
                Self::open(&path)
            }
            None => {
                let path = PathBuf::from(".").join(FILE_NAME);
                if path.is_file() {
                    Self::open(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn open(path: &impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::config_open(path, e))?;
        let mut config: Self =
            toml::from_str(&content).map_err(|e| Error::config_deser(path, e))?;
        if let Some(folder) = path.parent() {
            config.source.path = config
                .source
                .path
                .map(|p| Self::prefix_source_path(folder, p));
        }
        Ok(config)
    }

    #[cfg(target_os = "windows")]
    fn config_folder() -> Result<PathBuf> {
        let home = std::env::var("APPDATA").map_err(|_| Error::no_env_variable("APPDATA"))?;
        let mut home = PathBuf::from(home);
        home.push("cardex");
        Ok(home)
    }

    #[cfg(not(target_os = "windows"))]
    fn config_folder() -> Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| Error::no_env_variable("HOME"))?;
        let mut home = PathBuf::from(home);
        home.push(".cardex");
        Ok(home)
    }

    /// Relative file paths in a config are relative to the config's folder.
    fn prefix_source_path(folder: &Path, path: String) -> String {
        let is_url = path.starts_with("http://") || path.starts_with("https://");
        if is_url || Path::new(&path).is_absolute() {
            path
        } else {
            folder.join(path).to_string_lossy().into_owned()
        }
    }

    pub fn palette(&self) -> Palette {
        let mut palette = Palette::default();
        palette.extend(self.palette.iter().map(|(k, v)| (k.clone(), *v)));
        palette
    }
}
