//! privreg - Private-data record registry for permissioned ledgers
//!
//! Each record is split in two: a public part readable by every member and
//! a private detail kept in a restricted collection. A composite-key index
//! over the public collection answers "records with color X" without a
//! full scan, and hashes of either part can be disclosed for verification.
//!
//! # Quick Start
//!
//! ```ignore
//! use privreg::{Deployment, Invocation, Ledger};
//! use serde_json::json;
//!
//! let ledger = Ledger::new(Deployment::asset());
//! let create = Invocation::new("create").transient_json(
//!     "asset",
//!     &json!({"name": "asset1", "color": "blue", "size": 35, "owner": "tom", "price": 99}),
//! );
//! assert!(ledger.invoke(&create).is_ok());
//!
//! let read = ledger.invoke(&Invocation::new("readPublic").arg("asset1"));
//! ```
//!
//! # Architecture
//!
//! Every invocation goes through the [`Ledger`]: it opens an
//! invocation-scoped transaction, dispatches the [`Command`] through the
//! [`Executor`], and commits all writes atomically or none of them.
//! The key scheme and the store contract come from the core crate; the
//! in-memory store is re-exported for callers that drive an [`Executor`]
//! directly.

pub use privreg_executor::*;

pub use privreg_core::{CollectionStore, CompositeKey, KeyError};
pub use privreg_storage::{MemoryStore, HASH_LEN};
