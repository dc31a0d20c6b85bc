//! Contains implementation for CSV as card data source.

use crate::data::{Card, DataSource};
use crate::error::{Error, Result};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Copy, Clone)]
pub struct CsvSourceConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_header")]
    pub header: bool,
}

fn default_delimiter() -> char {
    ','
}

fn default_header() -> bool {
    true
}

impl Default for CsvSourceConfig {
    fn default() -> Self {
        CsvSourceConfig {
            delimiter: default_delimiter(),
            header: default_header(),
        }
    }
}

pub struct CsvSource {
    reader: csv::Reader<std::fs::File>,
}

impl CsvSource {
    pub fn open(config: CsvSourceConfig, path: &impl AsRef<Path>) -> Result<CsvSource> {
        let path = path.as_ref();
        let delimiter = u8::try_from(config.delimiter).map_err(|_| {
            Error::source_open(path, format!("delimiter {:?} is not a single byte", config.delimiter))
        })?;
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(config.header)
            .from_path(path)
            .map_err(|e| Error::source_open(path, e))?;
        Ok(Self { reader })
    }
}

impl<C: Card + DeserializeOwned + 'static> DataSource<C> for CsvSource {
    fn read(&mut self) -> Result<Box<dyn Iterator<Item = Result<C>> + '_>> {
        let iterator = self
            .reader
            .deserialize::<C>()
            .map(|r| r.map_err(Error::record_read));
        Ok(Box::new(iterator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CardRecord;
    use std::io::Write;

    fn write_csv(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("cards.csv");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
        path
    }

    #[test]
    fn reads_with_a_custom_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "Name;HP\nBulbasaur;70\n");
        let config = CsvSourceConfig {
            delimiter: ';',
            ..Default::default()
        };
        let mut source = CsvSource::open(config, &path).unwrap();
        let cards: Vec<CardRecord> = DataSource::<CardRecord>::read(&mut source)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(cards[0].name, "Bulbasaur");
        assert_eq!(cards[0].hp(), 70);
    }

    #[test]
    fn rejects_a_multibyte_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "Name；HP\n");
        let config = CsvSourceConfig {
            delimiter: '；',
            ..Default::default()
        };
        assert!(matches!(
            CsvSource::open(config, &path),
            Err(Error::SourceOpen(..))
        ));
    }
}
