//! Composite keys for secondary indexes
//!
//! ## Layout
//!
//! ```text
//! U+0000 index_name U+0000 attr_1 U+0000 attr_2 U+0000 ... attr_n U+0000
//! ```
//!
//! ## Contract
//!
//! - Every composite key starts with [`COMPOSITE_NAMESPACE`]; simple keys may
//!   not (see [`validate_simple_key`]), so the two key spaces never overlap
//!   within a collection.
//! - Index names and attributes must not contain `U+0000` (the separator) or
//!   `U+10FFFF` (reserved as the upper bound of prefix ranges).
//! - Encoding is deterministic and injective, and all keys sharing a
//!   prefix of attribute values sort contiguously.

use thiserror::Error;

/// Leading character of every composite key, also the attribute separator
pub const COMPOSITE_NAMESPACE: char = '\u{0}';

/// Highest Unicode scalar value; closes prefix ranges
pub const MAX_UNICODE_RUNE: char = '\u{10FFFF}';

/// Key construction and parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// An index name or attribute contains a reserved character
    #[error("invalid composite key attribute {attribute:?}: contains {reserved}")]
    InvalidAttribute {
        /// Offending attribute value
        attribute: String,
        /// Which reserved character was found
        reserved: &'static str,
    },

    /// A simple key starts with the composite namespace
    #[error("key {key:?} starts with the composite key namespace U+0000")]
    ReservedNamespace {
        /// Offending key
        key: String,
    },

    /// The key is not a well-formed composite key
    #[error("not a composite key: {key:?}")]
    NotComposite {
        /// Offending key
        key: String,
    },
}

fn validate_attribute(attribute: &str) -> Result<(), KeyError> {
    for c in attribute.chars() {
        let reserved = match c {
            COMPOSITE_NAMESPACE => "U+0000",
            MAX_UNICODE_RUNE => "U+10FFFF",
            _ => continue,
        };
        return Err(KeyError::InvalidAttribute {
            attribute: attribute.to_string(),
            reserved,
        });
    }
    Ok(())
}

/// Reject simple keys that would collide with the composite key space
pub fn validate_simple_key(key: &str) -> Result<(), KeyError> {
    if key.starts_with(COMPOSITE_NAMESPACE) {
        return Err(KeyError::ReservedNamespace {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// An index name together with an ordered list of attribute values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeKey {
    /// Index name, e.g. `color~name`
    pub index_name: String,
    /// Attribute values in index order
    pub attributes: Vec<String>,
}

impl CompositeKey {
    /// Build the key for an index entry
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidAttribute`] if the index name or any
    /// attribute contains a reserved character.
    pub fn create<S: AsRef<str>>(index_name: &str, attributes: &[S]) -> Result<String, KeyError> {
        validate_attribute(index_name)?;
        let mut key = String::with_capacity(
            2 + index_name.len() + attributes.iter().map(|a| a.as_ref().len() + 1).sum::<usize>(),
        );
        key.push(COMPOSITE_NAMESPACE);
        key.push_str(index_name);
        key.push(COMPOSITE_NAMESPACE);
        for attribute in attributes {
            let attribute = attribute.as_ref();
            validate_attribute(attribute)?;
            key.push_str(attribute);
            key.push(COMPOSITE_NAMESPACE);
        }
        Ok(key)
    }

    /// Encode this key
    pub fn encode(&self) -> Result<String, KeyError> {
        Self::create(&self.index_name, &self.attributes)
    }

    /// Half-open range `[start, end)` covering every key whose leading
    /// attributes equal `attributes`
    pub fn prefix_range<S: AsRef<str>>(
        index_name: &str,
        attributes: &[S],
    ) -> Result<(String, String), KeyError> {
        let start = Self::create(index_name, attributes)?;
        let mut end = start.clone();
        end.push(MAX_UNICODE_RUNE);
        Ok((start, end))
    }

    /// Parse a composite key
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::NotComposite`] if the key does not start with the
    /// namespace or is not terminated by a separator.
    pub fn split(key: &str) -> Result<CompositeKey, KeyError> {
        let body = key
            .strip_prefix(COMPOSITE_NAMESPACE)
            .and_then(|rest| rest.strip_suffix(COMPOSITE_NAMESPACE))
            .ok_or_else(|| KeyError::NotComposite {
                key: key.to_string(),
            })?;
        let mut parts = body.split(COMPOSITE_NAMESPACE).map(str::to_string);
        let index_name = parts.next().unwrap_or_default();
        Ok(CompositeKey {
            index_name,
            attributes: parts.collect(),
        })
    }

    /// Whether a raw key lies in the composite key space
    pub fn is_composite(key: &str) -> bool {
        key.starts_with(COMPOSITE_NAMESPACE)
    }
}
