//! Invocation and response envelopes.
//!
//! An [`Invocation`] is one request: an operation name, positional
//! arguments and the transient map carrying data that must not be written
//! to the ledger as-is. A [`Response`] is what the caller gets back.
//!
//! In JSON form transient values and payloads are base64 strings:
//!
//! ```json
//! {
//!   "function": "create",
//!   "args": [],
//!   "transient": { "asset": "eyJuYW1lIjoiYXNzZXQxIn0=" }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Output};

/// Transient (side-channel) input: logical field name to raw payload
pub type TransientMap = BTreeMap<String, Vec<u8>>;

/// One request to the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Operation name, e.g. `readPublic`
    pub function: String,
    /// Positional arguments
    #[serde(default)]
    pub args: Vec<String>,
    /// Transient map
    #[serde(default, with = "b64_map")]
    pub transient: TransientMap,
}

impl Invocation {
    /// An invocation of `function` with no arguments
    pub fn new(function: impl Into<String>) -> Self {
        Invocation {
            function: function.into(),
            ..Default::default()
        }
    }

    /// Append a positional argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add a raw transient entry
    pub fn transient(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.transient.insert(key.into(), value.into());
        self
    }

    /// Add a transient entry holding serialized JSON
    pub fn transient_json(self, key: impl Into<String>, value: &serde_json::Value) -> Self {
        let bytes = value.to_string().into_bytes();
        self.transient(key, bytes)
    }
}

/// Status code of a successful response
pub const STATUS_OK: u16 = 200;
/// Status code of a failed response
pub const STATUS_ERROR: u16 = 500;

/// Result of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// [`STATUS_OK`] or [`STATUS_ERROR`]
    pub status: u16,
    /// Error message, empty on success
    #[serde(default)]
    pub message: String,
    /// Operation result bytes
    #[serde(default, with = "b64_bytes")]
    pub payload: Vec<u8>,
    /// Structured failure, present iff `status` is [`STATUS_ERROR`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Error>,
}

impl Response {
    /// A successful response carrying `payload`
    pub fn success(payload: Vec<u8>) -> Self {
        Response {
            status: STATUS_OK,
            message: String::new(),
            payload,
            error: None,
        }
    }

    /// A failed response describing `error`
    pub fn failure(error: Error) -> Self {
        Response {
            status: STATUS_ERROR,
            message: error.to_string(),
            payload: Vec::new(),
            error: Some(error),
        }
    }

    /// Build the response for a finished invocation
    pub fn from_result(result: Result<Output, Error>) -> Self {
        match result.and_then(Output::into_payload) {
            Ok(payload) => Response::success(payload),
            Err(e) => Response::failure(e),
        }
    }

    /// Whether the invocation succeeded
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

mod b64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s.as_bytes()).map_err(D::Error::custom)
    }
}

mod b64_map {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::TransientMap;

    pub fn serialize<S: Serializer>(map: &TransientMap, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(map.iter().map(|(k, v)| (k, STANDARD.encode(v))))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TransientMap, D::Error> {
        let raw = std::collections::BTreeMap::<String, String>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(k, v)| {
                STANDARD
                    .decode(v.as_bytes())
                    .map(|bytes| (k.clone(), bytes))
                    .map_err(|e| D::Error::custom(format!("transient value '{}': {}", k, e)))
            })
            .collect()
    }
}
