//! Concurrency Integration Tests
//!
//! Optimistic commit of registry invocations: interleaved invocations that
//! read each other's writes conflict, independent ones both commit, and a
//! discarded invocation leaves no partial state.

#[path = "../common/mod.rs"]
mod common;

mod interleaving;
mod threads;
