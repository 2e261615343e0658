//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant; the mapping is
//! documented on [`Command`](crate::Command).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::convert::serialization;
use crate::Error;

/// One element of a query result, `{"Key": ..., "Record": ...}` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEntry {
    /// Record key (the record name)
    #[serde(rename = "Key")]
    pub key: String,
    /// Stored record, parsed as JSON
    #[serde(rename = "Record")]
    pub record: Value,
}

/// Successful command execution results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (create, transfer, delete)
    Unit,

    /// Stored record bytes, exactly as written
    Record(Vec<u8>),

    /// Fixed-size fingerprint of a stored record
    Hash(Vec<u8>),

    /// Query results in ascending key order
    Entries(Vec<QueryEntry>),
}

impl Output {
    /// Response payload bytes
    ///
    /// Records and hashes are returned verbatim; query results are encoded
    /// as a JSON array.
    pub fn into_payload(self) -> Result<Vec<u8>, Error> {
        match self {
            Output::Unit => Ok(Vec::new()),
            Output::Record(bytes) | Output::Hash(bytes) => Ok(bytes),
            Output::Entries(entries) => serde_json::to_vec(&entries).map_err(serialization),
        }
    }
}
