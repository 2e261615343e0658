//! Command enum defining all registry operations.
//!
//! Commands are resolved once at the invocation boundary from an operation
//! name and its positional arguments. Data that must stay off the ledger
//! (create, transfer and delete payloads) never appears here; handlers read
//! it from the transient map instead.

use serde::{Deserialize, Serialize};

use crate::Error;

/// A resolved registry operation.
///
/// | Operation name | Positional args | Variant |
/// |----------------|-----------------|---------|
/// | `create` | none | [`Command::Create`] |
/// | `readPublic` | `[name]` | [`Command::ReadPublic`] |
/// | `readPrivateDetail` | `[name]` | [`Command::ReadPrivateDetail`] |
/// | `transfer` | none | [`Command::Transfer`] |
/// | `delete` | none | [`Command::Delete`] |
/// | `rangeQuery` | `[startKey, endKey, ...]` | [`Command::RangeQuery`] |
/// | `hashOfPublic` | `[name]` | [`Command::HashOfPublic`] |
/// | `hashOfPrivateDetail` | `[name]` | [`Command::HashOfPrivateDetail`] |
/// | `queryByColor` | `[color]` | [`Command::QueryByColor`] |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Create the public record, private detail and index entry.
    /// Returns: `Output::Unit`
    Create,

    /// Read a public record.
    /// Returns: `Output::Record`
    ReadPublic { name: String },

    /// Read a private-detail record.
    /// Returns: `Output::Record`
    ReadPrivateDetail { name: String },

    /// Change the owner of a public record.
    /// Returns: `Output::Unit`
    Transfer,

    /// Remove the public record, private detail and index entry.
    /// Returns: `Output::Unit`
    Delete,

    /// Scan public records in `[start_key, end_key)`.
    /// Returns: `Output::Entries`
    RangeQuery { start_key: String, end_key: String },

    /// Fingerprint of a public record.
    /// Returns: `Output::Hash`
    HashOfPublic { name: String },

    /// Fingerprint of a private-detail record.
    /// Returns: `Output::Hash`
    HashOfPrivateDetail { name: String },

    /// Public records whose indexed color equals `color`.
    /// Returns: `Output::Entries`
    QueryByColor { color: String },
}

impl Command {
    /// Operation name of [`Command::Create`]
    pub const CREATE: &'static str = "create";
    /// Operation name of [`Command::ReadPublic`]
    pub const READ_PUBLIC: &'static str = "readPublic";
    /// Operation name of [`Command::ReadPrivateDetail`]
    pub const READ_PRIVATE_DETAIL: &'static str = "readPrivateDetail";
    /// Operation name of [`Command::Transfer`]
    pub const TRANSFER: &'static str = "transfer";
    /// Operation name of [`Command::Delete`]
    pub const DELETE: &'static str = "delete";
    /// Operation name of [`Command::RangeQuery`]
    pub const RANGE_QUERY: &'static str = "rangeQuery";
    /// Operation name of [`Command::HashOfPublic`]
    pub const HASH_OF_PUBLIC: &'static str = "hashOfPublic";
    /// Operation name of [`Command::HashOfPrivateDetail`]
    pub const HASH_OF_PRIVATE_DETAIL: &'static str = "hashOfPrivateDetail";
    /// Operation name of [`Command::QueryByColor`]
    pub const QUERY_BY_COLOR: &'static str = "queryByColor";

    /// Every operation name, in dispatch-table order
    pub const NAMES: [&'static str; 9] = [
        Self::CREATE,
        Self::READ_PUBLIC,
        Self::READ_PRIVATE_DETAIL,
        Self::TRANSFER,
        Self::DELETE,
        Self::RANGE_QUERY,
        Self::HASH_OF_PUBLIC,
        Self::HASH_OF_PRIVATE_DETAIL,
        Self::QUERY_BY_COLOR,
    ];

    /// Resolve an operation name and its positional arguments
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownOperation`] for an unrecognized name
    /// - [`Error::InvalidArguments`] for a wrong argument count; extra
    ///   arguments to `rangeQuery` are ignored
    pub fn parse<S: AsRef<str>>(function: &str, args: &[S]) -> Result<Command, Error> {
        let arg = |i: usize| args[i].as_ref().to_string();
        match function {
            Self::CREATE => {
                expect_none(Self::CREATE, args.len())?;
                Ok(Command::Create)
            }
            Self::TRANSFER => {
                expect_none(Self::TRANSFER, args.len())?;
                Ok(Command::Transfer)
            }
            Self::DELETE => {
                expect_none(Self::DELETE, args.len())?;
                Ok(Command::Delete)
            }
            Self::READ_PUBLIC => {
                expect_one(Self::READ_PUBLIC, "name of the record to query", args.len())?;
                Ok(Command::ReadPublic { name: arg(0) })
            }
            Self::READ_PRIVATE_DETAIL => {
                expect_one(Self::READ_PRIVATE_DETAIL, "name of the record to query", args.len())?;
                Ok(Command::ReadPrivateDetail { name: arg(0) })
            }
            Self::HASH_OF_PUBLIC => {
                expect_one(Self::HASH_OF_PUBLIC, "name of the record to query", args.len())?;
                Ok(Command::HashOfPublic { name: arg(0) })
            }
            Self::HASH_OF_PRIVATE_DETAIL => {
                expect_one(Self::HASH_OF_PRIVATE_DETAIL, "name of the record to query", args.len())?;
                Ok(Command::HashOfPrivateDetail { name: arg(0) })
            }
            Self::QUERY_BY_COLOR => {
                expect_one(Self::QUERY_BY_COLOR, "color to query", args.len())?;
                Ok(Command::QueryByColor { color: arg(0) })
            }
            Self::RANGE_QUERY => {
                if args.len() < 2 {
                    return Err(Error::InvalidArguments {
                        operation: Self::RANGE_QUERY.to_string(),
                        expected: "at least 2 (startKey, endKey)".to_string(),
                        actual: args.len(),
                    });
                }
                Ok(Command::RangeQuery {
                    start_key: arg(0),
                    end_key: arg(1),
                })
            }
            other => Err(Error::UnknownOperation {
                function: other.to_string(),
            }),
        }
    }

    /// Operation name of this command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create => Self::CREATE,
            Command::ReadPublic { .. } => Self::READ_PUBLIC,
            Command::ReadPrivateDetail { .. } => Self::READ_PRIVATE_DETAIL,
            Command::Transfer => Self::TRANSFER,
            Command::Delete => Self::DELETE,
            Command::RangeQuery { .. } => Self::RANGE_QUERY,
            Command::HashOfPublic { .. } => Self::HASH_OF_PUBLIC,
            Command::HashOfPrivateDetail { .. } => Self::HASH_OF_PRIVATE_DETAIL,
            Command::QueryByColor { .. } => Self::QUERY_BY_COLOR,
        }
    }

    /// Whether the command only reads from the store
    pub fn is_read_only(&self) -> bool {
        !matches!(self, Command::Create | Command::Transfer | Command::Delete)
    }
}

fn expect_none(operation: &str, actual: usize) -> Result<(), Error> {
    if actual == 0 {
        return Ok(());
    }
    Err(Error::InvalidArguments {
        operation: operation.to_string(),
        expected: "0 (data must be passed in the transient map)".to_string(),
        actual,
    })
}

fn expect_one(operation: &str, what: &str, actual: usize) -> Result<(), Error> {
    if actual == 1 {
        return Ok(());
    }
    Err(Error::InvalidArguments {
        operation: operation.to_string(),
        expected: format!("1 ({})", what),
        actual,
    })
}
