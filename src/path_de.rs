use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::de::{IoRead, Read as JsonRead, StrRead};

use crate::error::{Error, Result};

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    deserialize(serde_json::Deserializer::new(StrRead::new(src)))
}

pub fn from_reader_with_path<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    deserialize(serde_json::Deserializer::new(IoRead::new(reader)))
}

/// Decode an already-parsed subtree; the path is relative to `value`.
pub fn from_value_with_path<T: DeserializeOwned>(value: &Value) -> Result<T> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let path = err.path().to_string();
        Error::Parse { path, source: err.into_inner() }
    })
}

fn deserialize<'de, R, T>(mut de: serde_json::Deserializer<R>) -> Result<T>
where
    R: JsonRead<'de>,
    T: DeserializeOwned,
{
    let value = match serde_path_to_error::deserialize::<_, T>(&mut de) {
        Ok(v) => v,
        Err(err) => {
            let path = err.path().to_string();
            return Err(Error::Parse { path, source: err.into_inner() });
        }
    };
    // trailing garbage after the document
    de.end().map_err(|source| Error::Parse { path: ".".into(), source })?;
    Ok(value)
}
