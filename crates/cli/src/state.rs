//! Session wrapper around an in-process ledger.
//!
//! Every command line becomes one invocation, committed on success. State
//! lives for the process only.

use privreg_executor::{EntitySchema, Invocation, Ledger, Output, Result};

/// Holds the ledger and counts invocations for the prompt.
pub struct SessionState {
    ledger: Ledger,
    invocations: u64,
}

impl SessionState {
    /// Create a new SessionState over `ledger`.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            invocations: 0,
        }
    }

    /// Entity schema of the deployment, for building transient data.
    pub fn schema(&self) -> &EntitySchema {
        &self.ledger.deployment().schema
    }

    /// Run one invocation to completion.
    pub fn execute(&mut self, invocation: &Invocation) -> Result<Output> {
        self.invocations += 1;
        self.ledger.submit(invocation)
    }

    /// REPL prompt: entity and committed version.
    pub fn prompt(&self) -> String {
        format!(
            "privreg:{}@{}> ",
            self.schema().entity,
            self.ledger.store().current_version()
        )
    }

    /// Invocations run so far, committed or not.
    pub fn invocation_count(&self) -> u64 {
        self.invocations
    }
}
