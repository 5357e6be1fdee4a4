//! Recorded operation traces.
//!
//! A trace is an ordered list of [`TraceEntry`] values. JSON traces are arrays of objects:
//!
//! ```json
//! [
//!   { "key": 1, "value": 10, "op": "Put" },
//!   { "key": 1, "value": 0,  "op": "Get" }
//! ]
//! ```
//!
//! `value` may be omitted for operations that ignore it, in which case `V::default()` is used.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::Operation;

/// One recorded cache operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry<K, V> {
    /// Key the operation targets. Ignored by `Clear` and `DeepClear`.
    pub key: K,
    /// Value written by `Put`/`PutAll`.
    #[serde(default)]
    pub value: V,
    /// Operation to replay.
    pub op: Operation,
}

impl<K, V> TraceEntry<K, V> {
    /// Creates an entry.
    pub const fn new(key: K, value: V, op: Operation) -> Self {
        Self { key, value, op }
    }
}

impl<K, V> From<(K, V, Operation)> for TraceEntry<K, V> {
    fn from((key, value, op): (K, V, Operation)) -> Self {
        Self::new(key, value, op)
    }
}

/// Failure loading a trace.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The trace file could not be opened or read.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// The trace was not a valid JSON array of entries.
    #[error("malformed trace: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a JSON trace from a reader.
///
/// # Errors
///
/// Returns `TraceError::Json` if the document is not an array of entries.
pub fn from_reader<K, V, R>(reader: R) -> Result<Vec<TraceEntry<K, V>>, TraceError>
where
    K: DeserializeOwned,
    V: DeserializeOwned + Default,
    R: Read,
{
    Ok(serde_json::from_reader(reader)?)
}

/// Parses a JSON trace file.
///
/// # Errors
///
/// Returns `TraceError::Io` if the file cannot be opened and `TraceError::Json` if it does not
/// contain an array of entries.
pub fn load<K, V>(path: impl AsRef<Path>) -> Result<Vec<TraceEntry<K, V>>, TraceError>
where
    K: DeserializeOwned,
    V: DeserializeOwned + Default,
{
    let file = File::open(path)?;
    from_reader(BufReader::new(file))
}
