//! Operation handlers organized by concern.
//!
//! | Module | Operations |
//! |--------|------------|
//! | `record` | create, transfer, delete |
//! | `read` | readPublic, readPrivateDetail, hashOfPublic, hashOfPrivateDetail |
//! | `query` | rangeQuery, queryByColor |
//!
//! Every handler runs to completion against one invocation-scoped store and
//! never issues compensating writes: on error the host discards whatever
//! was buffered.

pub mod query;
pub mod read;
pub mod record;
