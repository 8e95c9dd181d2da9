use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::bookings::bookings::Booking;
use crate::session::StoredUser;

const USER_KEY: &str = "user_data";
const TOKEN_KEY: &str = "auth_token";
const BOOKINGS_KEY: &str = "my_bookings";

// One JSON document per persisted key, mirroring the storage keys the
// storefront always used. Reads and writes are synchronous; writers in
// other processes are last-write-wins.
#[derive(Clone)]
pub struct LocalStore {
    dir: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl LocalStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!("could not create data dir {}: {e}", dir.display());
        }
        LocalStore {
            dir,
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    // A missing or corrupt document reads as absent data, never an error.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let _guard = self.lock.lock().unwrap();
        let text = fs::read_to_string(self.path(key)).ok()?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("discarding corrupt {key} document: {e}");
                None
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let _guard = self.lock.lock().unwrap();
        fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!(".{key}.{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp, self.path(key))?;
        Ok(())
    }

    fn remove(&self, key: &str) {
        let _guard = self.lock.lock().unwrap();
        let _ = fs::remove_file(self.path(key));
    }

    pub fn read_bookings(&self) -> Vec<Booking> {
        self.read(BOOKINGS_KEY).unwrap_or_default()
    }

    pub fn write_bookings(&self, bookings: &[Booking]) -> anyhow::Result<()> {
        self.write(BOOKINGS_KEY, &bookings)
    }

    pub fn read_user(&self) -> Option<StoredUser> {
        self.read(USER_KEY)
    }

    pub fn write_user(&self, user: &StoredUser) -> anyhow::Result<()> {
        self.write(USER_KEY, user)
    }

    pub fn clear_user(&self) {
        self.remove(USER_KEY);
    }

    pub fn read_token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    pub fn write_token(&self, token: &str) -> anyhow::Result<()> {
        self.write(TOKEN_KEY, &token)
    }

    pub fn clear_token(&self) {
        self.remove(TOKEN_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store() -> LocalStore {
        let dir = std::env::temp_dir().join(format!("wheelio-store-{}", Uuid::new_v4()));
        LocalStore::open(dir)
    }

    #[test]
    fn empty_store_reads_as_defaults() {
        let store = scratch_store();
        assert!(store.read_bookings().is_empty());
        assert!(store.read_user().is_none());
        assert!(store.read_token().is_none());
    }

    #[test]
    fn bookings_survive_a_write_and_read() {
        let store = scratch_store();
        let bookings = crate::fixtures::bookings();
        store.write_bookings(&bookings).unwrap();
        assert_eq!(store.read_bookings(), bookings);
    }

    #[test]
    fn corrupt_document_reads_as_absent() {
        let store = scratch_store();
        store.write_token("t0ken").unwrap();
        fs::write(store.path(BOOKINGS_KEY), b"{ not json").unwrap();
        assert!(store.read_bookings().is_empty());
        // the other keys are untouched
        assert_eq!(store.read_token().as_deref(), Some("t0ken"));
    }

    #[test]
    fn clearing_a_key_removes_it() {
        let store = scratch_store();
        store.write_token("abc").unwrap();
        store.clear_token();
        assert!(store.read_token().is_none());
    }
}
