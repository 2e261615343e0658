//! # privreg Executor
//!
//! The operation layer of the private-data registry.
//!
//! This crate provides:
//! - [`Command`] - the closed set of registry operations
//! - [`Executor`] - dispatches a command to its handler against an
//!   invocation-scoped [`CollectionStore`](privreg_core::CollectionStore)
//! - [`Ledger`] - in-process host: begin, execute, commit or discard
//! - [`Invocation`]/[`Response`] - the request/response envelopes
//! - [`RegistryConfig`]/[`Deployment`] - entity schema and collection names
//!
//! ## Quick Start
//!
//! ```text
//! use privreg_executor::{Deployment, Invocation, Ledger};
//! use serde_json::json;
//!
//! let ledger = Ledger::new(Deployment::asset());
//!
//! let create = Invocation::new("create").transient_json(
//!     "asset",
//!     &json!({"name": "asset1", "color": "blue", "size": 35, "owner": "tom", "price": 99}),
//! );
//! assert!(ledger.invoke(&create).is_ok());
//!
//! let read = ledger.invoke(&Invocation::new("readPublic").arg("asset1"));
//! // {"docType":"asset","name":"asset1","color":"blue","size":35,"owner":"tom"}
//! ```
//!
//! ## Records per entity
//!
//! | Key | Collection | Value |
//! |-----|------------|-------|
//! | `name` | public | public record JSON |
//! | `\0color~name\0<color>\0<name>\0` | public | `0x00` sentinel |
//! | `name` | private | private-detail record JSON |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod config;
mod convert;
mod error;
mod executor;
mod index;
mod invocation;
mod ledger;
mod output;
mod validate;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API
// =============================================================================

pub use command::Command;
pub use config::{Deployment, RegistryConfig, CONFIG_FILE_NAME};
pub use error::Error;
pub use executor::Executor;
pub use index::{IndexManager, INDEX_SENTINEL};
pub use invocation::{Invocation, Response, TransientMap, STATUS_ERROR, STATUS_OK};
pub use ledger::{Ledger, PendingInvocation};
pub use output::{Output, QueryEntry};
pub use validate::{CreateInput, DeleteInput, TransferInput};

pub use privreg_core::EntitySchema;

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
