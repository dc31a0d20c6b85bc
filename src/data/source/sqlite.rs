//! Contains implementation for SQLite as card data source.

use crate::data::{Card, DataSource};
use crate::error::{Error, Result};

use rusqlite::{Connection, OpenFlags};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct SqliteSourceConfig {
    #[serde(default = "default_query")]
    pub query: String,
}

fn default_query() -> String {
    String::from("SELECT * FROM card_csv ORDER BY id")
}

impl Default for SqliteSourceConfig {
    fn default() -> Self {
        Self {
            query: default_query(),
        }
    }
}

pub struct SqliteSource {
    conn: Connection,
    query: String,
}

impl SqliteSource {
    pub fn open(config: &SqliteSourceConfig, path: &impl AsRef<Path>) -> Result<SqliteSource> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| Error::source_open(path, e))?;
        Ok(Self {
            conn,
            query: config.query.clone(),
        })
    }
}

impl<C: Card + DeserializeOwned + 'static> DataSource<C> for SqliteSource {
    fn read(&mut self) -> Result<Box<dyn Iterator<Item = Result<C>> + '_>> {
        let mut stmt = self.conn.prepare(&self.query).map_err(Error::record_read)?;
        let rows = stmt.query([]).map_err(Error::record_read)?;
        let cards: Vec<Result<C>> = serde_rusqlite::from_rows::<C>(rows)
            .map(|r| r.map_err(Error::record_read))
            .collect();
        Ok(Box::new(cards.into_iter()))
    }
}
