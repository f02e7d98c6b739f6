//! Write coordination and query services for the venture ledger.
//!
//! This crate owns input normalization, validation, and the append
//! discipline, generic over any [`venture_core::store::VentureStore`]
//! backend. HTTP transport, response wrapping, and request timeouts are the
//! caller's responsibility.

pub mod coordinator;
pub mod error;
pub mod query;

mod validate;

pub use coordinator::{NewVenture, WriteCoordinator};
pub use error::{Error, Result};
pub use query::QueryService;

#[cfg(test)]
mod tests;
