//! Loads the catalog off the main thread while the spinner runs.

use crate::data::source::{SourceConfig, SourceType};
use crate::data::CardRecord;
use crate::error::{Error, Result};
use crate::logs::{Logger, Spinner};
use crate::store::RecordStore;

use std::io::{stderr, Stderr, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Starts the one and only load. The receiver yields exactly one result.
pub fn spawn_load(
    src_type: Option<SourceType>,
    input: String,
    formats: SourceConfig,
) -> Receiver<Result<RecordStore>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let loaded = formats
            .open::<CardRecord>(src_type, &input)
            .and_then(|mut source| RecordStore::load(source.as_mut()));
        // A closed channel only means nobody waits for the result anymore.
        let _ = tx.send(loaded);
    });
    rx
}

fn stopped() -> Error {
    Error::record_read("the loader stopped before finishing")
}

/// Blocks until the load finishes, animating the spinner when stderr is a terminal.
pub fn wait_for_load<L: Write>(
    rx: Receiver<Result<RecordStore>>,
    input: &str,
    logger: &mut Logger<L>,
) -> Result<Result<RecordStore>> {
    if !termion::is_tty(&stderr()) {
        logger.info(format!("Loading cards from {input}"))?;
        return Ok(rx.recv().unwrap_or_else(|_| Err(stopped())));
    }
    let mut spinner = Spinner::new(stderr(), format!("Loading cards from {input}"))?;
    let frame = Duration::from_secs_f64(Spinner::<Stderr>::FRAME_DURATION);
    let loaded = loop {
        match rx.recv_timeout(frame) {
            Ok(loaded) => break loaded,
            Err(RecvTimeoutError::Timeout) => spinner.update()?,
            Err(RecvTimeoutError::Disconnected) => break Err(stopped()),
        }
    };
    spinner.finish()?;
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::Level;

    #[test]
    fn loads_a_json_file_in_the_background() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_cards.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"[{"identifier": "1", "name": "Bulbasaur", "hp": "70"}]"#)
            .unwrap();

        let rx = spawn_load(None, path.to_string_lossy().into_owned(), SourceConfig::default());
        let store = rx.recv().unwrap().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].name, "Bulbasaur");
    }

    #[test]
    fn a_missing_file_comes_back_as_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nowhere.json");
        let rx = spawn_load(None, path.to_string_lossy().into_owned(), SourceConfig::default());
        let mut logger = Logger::new(Vec::new(), Level::Error, false);
        let loaded = wait_for_load(rx, "nowhere.json", &mut logger).unwrap();
        assert!(matches!(loaded, Err(Error::SourceOpen(..))));
    }
}
