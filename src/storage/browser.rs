//! Browser `localStorage` backend (WASM only)
//!
//! The JavaScript side lives in `web/studio_storage.js` and is registered as a
//! miniquad plugin. Strings cross the boundary as (pointer, length) pairs;
//! reads are two calls: one for the length, one to copy into a Rust buffer.

use super::{KeyValueStore, StorageError};

extern "C" {
    fn studio_storage_get_len(key_ptr: *const u8, key_len: usize) -> i32;
    fn studio_storage_copy(key_ptr: *const u8, key_len: usize, dest_ptr: *mut u8, max_len: usize) -> usize;
    fn studio_storage_set(key_ptr: *const u8, key_len: usize, data_ptr: *const u8, data_len: usize) -> i32;
}

/// Returned by `studio_storage_get_len` when the key is absent
const KEY_ABSENT: i32 = -1;
/// Returned by `studio_storage_set` on success
const SET_OK: i32 = 1;

#[derive(Debug, Clone, Default)]
pub struct BrowserStore;

impl BrowserStore {
    pub fn new() -> Self {
        Self
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let len = unsafe { studio_storage_get_len(key.as_ptr(), key.len()) };
        if len == KEY_ABSENT {
            return Ok(None);
        }
        if len < 0 {
            return Err(StorageError::Unavailable("localStorage is not accessible".into()));
        }

        let mut buf = vec![0u8; len as usize];
        let copied = unsafe { studio_storage_copy(key.as_ptr(), key.len(), buf.as_mut_ptr(), buf.len()) };
        buf.truncate(copied);
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let status = unsafe { studio_storage_set(key.as_ptr(), key.len(), value.as_ptr(), value.len()) };
        if status == SET_OK {
            Ok(())
        } else {
            Err(StorageError::Unavailable("localStorage write failed (quota exceeded?)".into()))
        }
    }
}
