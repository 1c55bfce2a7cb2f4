//! Shared types and helpers for the action authority suite.
//!
//! This crate provides:
//! - [`fingerprint`]: the 4-byte registry key derived from a target address.
//! - [`FeeConfig`] and the fee-accrual constants used by the fee ledger.
//! - [`ActionAuthorityInterface`]: the narrow surface adapter contracts call,
//!   with a generated [`ActionAuthorityClient`].
//!
//! Adapters depend on this crate instead of the governance contract itself so
//! that only one set of contract exports ends up in each Wasm binary.

#![no_std]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod authority;
pub mod fees;
pub mod fingerprint;

pub use authority::*;
pub use fees::*;
pub use fingerprint::*;
