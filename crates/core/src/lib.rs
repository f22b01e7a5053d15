//! Domain primitives shared by the storage and HTTP layers.
//!
//! Nothing in this crate performs I/O: it holds identifier and timestamp
//! types, the error taxonomy, pagination arithmetic, listing filter policy,
//! and the alert resolution rule.

pub mod alert;
pub mod error;
pub mod listing;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod validation;
