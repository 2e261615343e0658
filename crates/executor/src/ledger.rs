//! In-process ledger: invocation = begin + dispatch + commit.
//!
//! Every invocation executes against its own [`TransactionContext`]. A
//! successful handler result is only final once the commit validates every
//! read against the current store; a failed handler discards all buffered
//! writes. [`Ledger::begin_invocation`] and [`Ledger::commit_invocation`]
//! expose the two halves so concurrent invocations can be interleaved.

use std::sync::Arc;

use privreg_concurrency::{TransactionContext, TransactionManager};
use privreg_storage::MemoryStore;
use uuid::Uuid;

use crate::convert::commit_failure;
use crate::{Command, Deployment, Executor, Invocation, Output, RegistryConfig, Response, Result};

/// An executed invocation awaiting commit
#[derive(Debug)]
pub struct PendingInvocation {
    function: String,
    txn: TransactionContext,
    outcome: Result<Output>,
    span: tracing::Span,
}

impl PendingInvocation {
    /// Transaction id of the invocation
    pub fn txn_id(&self) -> Uuid {
        self.txn.txn_id
    }

    /// Operation name as invoked
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Handler result, before commit
    pub fn outcome(&self) -> &Result<Output> {
        &self.outcome
    }
}

/// Registry over an in-memory store with optimistic commit
pub struct Ledger {
    manager: TransactionManager,
    executor: Executor,
}

impl Ledger {
    /// Ledger for `deployment` over a fresh store
    pub fn new(deployment: Deployment) -> Self {
        Self::with_store(deployment, Arc::new(MemoryStore::new()))
    }

    /// Ledger for `deployment` over an existing store
    pub fn with_store(deployment: Deployment, store: Arc<MemoryStore>) -> Self {
        Ledger {
            manager: TransactionManager::new(store),
            executor: Executor::new(deployment),
        }
    }

    /// Ledger for the deployment described by `config`
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        Ok(Self::new(config.deployment()?))
    }

    /// The executor
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// The deployment served
    pub fn deployment(&self) -> &Deployment {
        self.executor.deployment()
    }

    /// The committed store
    pub fn store(&self) -> &Arc<MemoryStore> {
        self.manager.store()
    }

    /// Run an invocation to completion and wrap the result
    pub fn invoke(&self, invocation: &Invocation) -> Response {
        Response::from_result(self.submit(invocation))
    }

    /// Run an invocation to completion, keeping the typed output
    pub fn submit(&self, invocation: &Invocation) -> Result<Output> {
        let pending = self.begin_invocation(invocation);
        self.commit_invocation(pending)
    }

    /// Execute an invocation without committing it
    pub fn begin_invocation(&self, invocation: &Invocation) -> PendingInvocation {
        let mut txn = self.manager.begin();
        let span = tracing::info_span!(
            "invoke",
            txn = %txn.txn_id,
            operation = %invocation.function
        );
        let outcome = {
            let _enter = span.enter();
            tracing::debug!(args = invocation.args.len(), "invoke is running");
            Command::parse(&invocation.function, &invocation.args)
                .and_then(|cmd| self.executor.execute(cmd, &mut txn, &invocation.transient))
        };
        PendingInvocation {
            function: invocation.function.clone(),
            txn,
            outcome,
            span,
        }
    }

    /// Commit a pending invocation, or discard it if its handler failed
    ///
    /// # Errors
    ///
    /// The handler's own error, or [`Error::Conflict`](crate::Error::Conflict)
    /// when another invocation committed a change to something this one read.
    pub fn commit_invocation(&self, pending: PendingInvocation) -> Result<Output> {
        let PendingInvocation {
            function,
            mut txn,
            outcome,
            span,
        } = pending;
        let _enter = span.enter();

        let output = match outcome {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "invocation rejected");
                self.manager.abort(&mut txn, e.to_string());
                return Err(e);
            }
        };

        match self.manager.commit(&mut txn) {
            Ok(version) => {
                tracing::debug!(version, "invocation committed");
                Ok(output)
            }
            Err(e) => {
                let err = commit_failure(&function, e);
                if err.is_conflict() {
                    tracing::warn!(error = %err, "invocation discarded at commit");
                } else {
                    tracing::error!(error = %err, "commit failed");
                }
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("deployment", self.deployment())
            .field("version", &self.manager.current_version())
            .finish()
    }
}
