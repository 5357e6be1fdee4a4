//! Cache operation tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Public cache operations.
///
/// Policies receive one of these after every operation, and recorded traces tag each entry
/// with the operation to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Operation {
    /// `Cache::put`.
    #[serde(alias = "put", alias = "PUT")]
    Put,
    /// `Cache::get`.
    #[serde(alias = "get", alias = "GET")]
    Get,
    /// `Cache::remove`.
    #[serde(alias = "remove", alias = "REMOVE")]
    Remove,
    /// `Cache::put_all`. When replayed, a batch of one entry.
    #[serde(alias = "put_all", alias = "PUT_ALL")]
    PutAll,
    /// `Cache::clear`.
    #[serde(alias = "clear", alias = "CLEAR")]
    Clear,
    /// `Cache::deep_clear`.
    #[serde(alias = "deep_clear", alias = "DEEP_CLEAR")]
    DeepClear,
    /// `Cache::contains_key`.
    #[serde(alias = "contains_key", alias = "CONTAINS_KEY")]
    ContainsKey,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Put,
        Self::Get,
        Self::Remove,
        Self::PutAll,
        Self::Clear,
        Self::DeepClear,
        Self::ContainsKey,
    ];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Put => "put",
            Self::Get => "get",
            Self::Remove => "remove",
            Self::PutAll => "put_all",
            Self::Clear => "clear",
            Self::DeepClear => "deep_clear",
            Self::ContainsKey => "contains_key",
        };
        f.write_str(name)
    }
}
