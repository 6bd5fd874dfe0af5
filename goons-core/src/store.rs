//! Load/save of the rotation record with fail-soft reads.
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};

use crate::RecordStorage;
use crate::constants::LOG_PREFIX;
use crate::error::StateError;
use crate::record::RotationRecord;

/// Typed access to the persisted [`RotationRecord`].
#[derive(Debug, Clone)]
pub struct RotationStateStore<S> {
    storage: S,
}

impl<S> RotationStateStore<S>
where
    S: RecordStorage,
{
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrow the underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the record, surfacing every failure.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Missing`] when nothing has been written yet,
    /// [`StateError::Storage`] when the backend fails and
    /// [`StateError::Serialization`] when the stored text is not a record.
    pub fn try_read(&self) -> Result<RotationRecord, StateError> {
        let raw = self
            .storage
            .load_record()
            .map_err(|err| StateError::Storage(err.to_string()))?
            .ok_or(StateError::Missing)?;
        Ok(RotationRecord::from_json(&raw)?)
    }

    /// Read the record, falling back to [`RotationRecord::default`] on any failure.
    pub fn read(&self) -> RotationRecord {
        match self.try_read() {
            Ok(record) => record,
            Err(StateError::Missing) => {
                info!("{LOG_PREFIX} No rotation data yet, starting from defaults");
                RotationRecord::default()
            }
            Err(err) => {
                warn!("{LOG_PREFIX} Error reading rotation data: {err}");
                RotationRecord::default()
            }
        }
    }

    /// Persist the record. Failures are reported, never retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or the backend
    /// rejects the write.
    pub fn write(&self, record: &RotationRecord) -> Result<(), StateError> {
        let json = record.to_pretty_json()?;
        debug!(
            "{LOG_PREFIX} Writing rotation record: {} until {}",
            record.selected_location, record.next_update_at
        );
        self.storage
            .save_record(&json)
            .map_err(|err| StateError::Storage(err.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MemoryStorageError {
    #[error("write rejected")]
    WriteRejected,
}

/// In-memory [`RecordStorage`], shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Arc<Mutex<Option<String>>>,
    reject_writes: bool,
}

impl MemoryStorage {
    /// Storage pre-populated with raw record text.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(contents.into()))),
            reject_writes: false,
        }
    }

    /// Make every subsequent save fail.
    #[must_use]
    pub fn rejecting_writes(mut self) -> Self {
        self.reject_writes = true;
        self
    }

    /// Raw text currently stored.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RecordStorage for MemoryStorage {
    type Error = MemoryStorageError;

    fn load_record(&self) -> Result<Option<String>, Self::Error> {
        Ok(self.contents())
    }

    fn save_record(&self, contents: &str) -> Result<(), Self::Error> {
        if self.reject_writes {
            return Err(MemoryStorageError::WriteRejected);
        }
        *self
            .contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_roundtrips() {
        let store = RotationStateStore::new(MemoryStorage::default());
        let record = RotationRecord::rotated("tarkovstreets", 1_700_000_000_000, 240);
        store.write(&record).unwrap();
        assert_eq!(store.read(), record);
        assert_eq!(store.try_read().unwrap(), record);
    }

    #[test]
    fn missing_record_falls_back_to_default() {
        let store = RotationStateStore::new(MemoryStorage::default());
        assert!(matches!(store.try_read(), Err(StateError::Missing)));
        assert_eq!(store.read(), RotationRecord::default());
    }

    #[test]
    fn corrupt_record_falls_back_to_default() {
        let store = RotationStateStore::new(MemoryStorage::with_contents("{not json"));
        assert!(matches!(
            store.try_read(),
            Err(StateError::Serialization(_))
        ));
        assert_eq!(store.read(), RotationRecord::default());
    }

    #[test]
    fn rejected_write_is_reported_and_leaves_contents() {
        let storage = MemoryStorage::with_contents("{}").rejecting_writes();
        let store = RotationStateStore::new(storage.clone());
        let err = store.write(&RotationRecord::default()).unwrap_err();
        assert!(matches!(err, StateError::Storage(_)));
        assert_eq!(storage.contents().as_deref(), Some("{}"));
    }
}
