//! Contains implementation for a JSON array file as card data source.

use crate::data::{Card, DataSource};
use crate::error::{Error, Result};

use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct JsonSource {
    reader: BufReader<File>,
}

impl JsonSource {
    pub fn open(path: &impl AsRef<Path>) -> Result<JsonSource> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::source_open(path, e))?;
        Ok(Self {
            reader: BufReader::new(file),
        })
    }
}

/// Parses a whole JSON array of cards. A single bad element fails the lot.
pub(crate) fn parse_array<C: DeserializeOwned>(reader: impl Read) -> Result<Vec<C>> {
    serde_json::from_reader(reader).map_err(Error::record_read)
}

impl<C: Card + DeserializeOwned + 'static> DataSource<C> for JsonSource {
    fn read(&mut self) -> Result<Box<dyn Iterator<Item = Result<C>> + '_>> {
        let cards = parse_array::<C>(&mut self.reader)?;
        Ok(Box::new(cards.into_iter().map(Ok)))
    }
}
