//! Common error types.

use std::fmt;
use std::path::{Path, PathBuf};

/// A shortcut type equivalent to `Result<T, cardex::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error that occurs within the crate.
#[derive(Debug)]
pub enum Error {
    SourceOpen(PathBuf, String),
    SourceInfer(String),
    RecordRead(String),
    Fetch(String, String),
    ConfigOpen(PathBuf, String),
    ConfigDeser(PathBuf, String),
    MissingVariable(&'static str),
    Export(PathBuf, String),
    Scan(String),
    Syntax(String),
    Io(std::io::Error),
}

impl Error {
    pub fn source_open(path: &Path, e: impl ToString) -> Self {
        Self::SourceOpen(path.to_path_buf(), e.to_string())
    }

    pub fn source_infer(input: impl AsRef<str>) -> Self {
        Self::SourceInfer(input.as_ref().to_string())
    }

    pub fn record_read(e: impl ToString) -> Self {
        Self::RecordRead(e.to_string())
    }

    pub fn fetch(url: impl AsRef<str>, e: impl ToString) -> Self {
        Self::Fetch(url.as_ref().to_string(), e.to_string())
    }

    pub fn config_open(path: &Path, e: impl ToString) -> Self {
        Self::ConfigOpen(path.to_path_buf(), e.to_string())
    }

    pub fn config_deser(path: &Path, e: impl ToString) -> Self {
        Self::ConfigDeser(path.to_path_buf(), e.to_string())
    }

    pub fn no_env_variable(var: &'static str) -> Self {
        Self::MissingVariable(var)
    }

    pub fn export(path: &Path, e: impl ToString) -> Self {
        Self::Export(path.to_path_buf(), e.to_string())
    }

    pub fn scan(slice: impl AsRef<str>) -> Self {
        Self::Scan(slice.as_ref().to_string())
    }

    pub fn syntax(msg: impl ToString) -> Self {
        Self::Syntax(msg.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceOpen(path, e) => write!(f, "failed to open {}: {e}", path.display()),
            Self::SourceInfer(input) => {
                write!(f, "could not infer the source type of {input}, use --source")
            }
            Self::RecordRead(e) => write!(f, "failed to read card data: {e}"),
            Self::Fetch(url, e) => write!(f, "failed to fetch {url}: {e}"),
            Self::ConfigOpen(path, e) => {
                write!(f, "failed to open config {}: {e}", path.display())
            }
            Self::ConfigDeser(path, e) => {
                write!(f, "invalid config {}: {e}", path.display())
            }
            Self::MissingVariable(var) => write!(f, "missing environment variable {var}"),
            Self::Export(path, e) => write!(f, "failed to export to {}: {e}", path.display()),
            Self::Scan(slice) => write!(f, "unexpected input {slice:?}"),
            Self::Syntax(msg) => write!(f, "{msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
