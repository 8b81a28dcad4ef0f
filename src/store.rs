use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A collection persisted as one JSON array, rewritten in full on every save.
pub struct JsonStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> JsonStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn load(&self) -> Result<Vec<T>> {
        let data = std::fs::read_to_string(&self.path).map_err(|source| Error::StoreOpen {
            path: self.path.clone(),
            source,
        })?;
        let records: Vec<T> = serde_json::from_str(&data).map_err(|source| Error::StoreFormat {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = records.len(), "loaded collection");
        Ok(records)
    }

    pub fn save(&self, records: &[T]) -> Result<()> {
        let data = to_pretty_json(records)?;
        std::fs::write(&self.path, data).map_err(|source| Error::StoreWrite {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), count = records.len(), "rewrote collection");
        Ok(())
    }
}

/// Four-space indented JSON, the layout the database files are kept in.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Untyped read used by reports: a missing file reads as an empty array.
pub fn read_values(path: &Path) -> Result<Vec<Value>> {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str::<Value>(&data) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(_) => Ok(vec![]),
            Err(source) => Err(Error::StoreFormat {
                path: path.to_path_buf(),
                source,
            }),
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(vec![]),
        Err(source) => Err(Error::StoreOpen {
            path: path.to_path_buf(),
            source,
        }),
    }
}
