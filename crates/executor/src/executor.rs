//! Executor: the dispatcher from [`Command`] to handler.
//!
//! The executor owns no store. Each call to [`Executor::execute`] receives
//! the invocation-scoped store and transient map, so one executor can serve
//! any number of concurrent invocations.

use privreg_core::CollectionStore;

use crate::handlers;
use crate::{Command, Deployment, Output, Result, TransientMap};

/// Dispatches commands for one deployment
///
/// # Example
///
/// ```text
/// use privreg_executor::{Command, Deployment, Executor};
/// use privreg_storage::MemoryStore;
///
/// let executor = Executor::new(Deployment::asset());
/// let mut store = MemoryStore::new();
/// let out = executor.execute(
///     Command::ReadPublic { name: "asset1".into() },
///     &mut store,
///     &Default::default(),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    deployment: Deployment,
}

impl Executor {
    /// Create an executor for `deployment`
    pub fn new(deployment: Deployment) -> Self {
        Executor { deployment }
    }

    /// The deployment this executor serves
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Execute a command against an invocation-scoped store
    pub fn execute(
        &self,
        cmd: Command,
        store: &mut dyn CollectionStore,
        transient: &TransientMap,
    ) -> Result<Output> {
        let d = &self.deployment;
        match cmd {
            Command::Create => handlers::record::create(d, store, transient),
            Command::Transfer => handlers::record::transfer(d, store, transient),
            Command::Delete => handlers::record::delete(d, store, transient),
            Command::ReadPublic { name } => handlers::read::read_public(d, store, name),
            Command::ReadPrivateDetail { name } => {
                handlers::read::read_private_detail(d, store, name)
            }
            Command::HashOfPublic { name } => handlers::read::hash_of_public(d, store, name),
            Command::HashOfPrivateDetail { name } => {
                handlers::read::hash_of_private_detail(d, store, name)
            }
            Command::RangeQuery { start_key, end_key } => {
                handlers::query::range_query(d, store, start_key, end_key)
            }
            Command::QueryByColor { color } => handlers::query::query_by_color(d, store, color),
        }
    }
}
