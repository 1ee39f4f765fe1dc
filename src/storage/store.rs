//! A filesystem backed key-value store.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::Value;

/// Namespace prepended to every key.
const NAMESPACE: &str = "GroceriesStore";

/// A namespaced key-value store of JSON documents, one file per key.
///
/// `set` merges rather than replaces when both the stored and the new
/// value are JSON objects; anything else overwrites. Writes go through a
/// temporary file and a rename so a crash cannot leave a half-written
/// value behind.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Opens a store rooted at the given directory.
    ///
    /// The directory is created on the first write.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{NAMESPACE}.{key}.json"))
    }

    /// Returns the last stored JSON string for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the value exists but cannot be read. A key
    /// that was never set is `Ok(None)`, not an error.
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Stores `value` under `key`.
    ///
    /// When a value already exists and both it and `value` are JSON
    /// objects, `value` is merged into the old one at the top level, new
    /// fields winning. In every other case `value` replaces what was
    /// there, including when the existing value no longer parses.
    ///
    /// # Errors
    ///
    /// Returns an error when the merged value cannot be serialized or the
    /// file cannot be written.
    pub fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let merged = self.get(key)?.map_or_else(
            || value.clone(),
            |old| match serde_json::from_str::<Value>(&old) {
                Ok(Value::Object(mut merged)) if value.is_object() => {
                    if let Value::Object(new) = value {
                        for (k, v) in new {
                            merged.insert(k.clone(), v.clone());
                        }
                    }
                    Value::Object(merged)
                }
                Ok(_) => value.clone(),
                Err(e) => {
                    tracing::debug!("replacing unparseable stored value for '{key}': {e}");
                    value.clone()
                }
            },
        );

        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        let tmp = tmp_path(&path);
        fs::write(&tmp, serde_json::to_string(&merged)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Reasons a store operation can fail.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying file could not be read or written.
    #[error("store io failure: {0}")]
    Io(#[from] io::Error),

    /// The value could not be serialized.
    #[error("store serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}
