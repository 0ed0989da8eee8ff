//! Persisted key-value storage.
//!
//! The browser build kept this state in `localStorage`; here each logical
//! key maps to one JSON file under a data directory. Access is
//! single-threaded in practice, so the only write discipline is last write
//! wins per key.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use mockall::automock;
use thiserror::Error;

/// Key holding the persisted cart contents (a JSON array of lines).
pub const CART_KEY: &str = "tinystepsbd_cart";

/// Key holding in-progress checkout form values.
pub const FORM_KEY: &str = "checkout_form_data";

/// Key holding the receipt of the last successful order.
pub const RECEIPT_KEY: &str = "last_order_details";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure.
    #[error("storage io error")]
    Io(#[from] io::Error),
}

/// Local key-value storage, one JSON document per key.
///
/// Callers treat writes as best effort: a failed save is logged and the
/// session carries on in memory.
#[automock]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw JSON stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store raw JSON under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; absent keys are not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed store: `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`; the directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the store's files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_key_reads_as_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path());

        assert_eq!(store.get("absent")?, None);

        Ok(())
    }

    #[test]
    fn put_then_get_round_trips() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path());

        store.put(CART_KEY, r#"[{"id":"P1"}]"#)?;

        assert_eq!(store.get(CART_KEY)?.as_deref(), Some(r#"[{"id":"P1"}]"#));

        Ok(())
    }

    #[test]
    fn put_overwrites_the_previous_value() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path());

        store.put(FORM_KEY, "{}")?;
        store.put(FORM_KEY, r#"{"customer_name":"A"}"#)?;

        assert_eq!(
            store.get(FORM_KEY)?.as_deref(),
            Some(r#"{"customer_name":"A"}"#)
        );

        Ok(())
    }

    #[test]
    fn remove_deletes_and_tolerates_absent_keys() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path());

        store.put(RECEIPT_KEY, "{}")?;
        store.remove(RECEIPT_KEY)?;
        store.remove(RECEIPT_KEY)?;

        assert_eq!(store.get(RECEIPT_KEY)?, None);

        Ok(())
    }
}
