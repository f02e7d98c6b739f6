//! Core types and trait definitions for the venture ledger engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing but `serde`.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod fact;
pub mod projection;
pub mod store;
pub mod venture;

pub use fact::{Fact, FactDraft, VentureId};
pub use venture::Venture;
