//! Contains implementation for a JSON array served over HTTP as card data source.

use crate::data::source::json::parse_array;
use crate::data::{Card, DataSource};
use crate::error::{Error, Result};

use serde::de::DeserializeOwned;

pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl<C: Card + DeserializeOwned + 'static> DataSource<C> for HttpSource {
    fn read(&mut self) -> Result<Box<dyn Iterator<Item = Result<C>> + '_>> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("cardex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::fetch(&self.url, e))?;
        let response = client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::fetch(&self.url, e))?;
        let cards = parse_array::<C>(response)?;
        Ok(Box::new(cards.into_iter().map(Ok)))
    }
}
