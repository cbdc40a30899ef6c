//! encounter-core
//!
//! Pure domain types for encounter pricing: billable codes, their modifiers,
//! and the immutable catalog snapshot they are looked up from.
//! No I/O. This is the shared vocabulary of the pricing engine, the catalog
//! loaders, and the API.

pub mod catalog;
pub mod error;
pub mod models;
