//! Shared utilities and error types for the ballot ledger contracts.
//!
//! This crate provides:
//! - [`CommonError`]: standardised lifecycle and state error codes.
//! - [`pausable`]: an admin-agnostic pause switch with typed events.
//! - [`ttl`]: storage time-to-live helpers shared by every contract.
//!
//! Contract-specific errors keep their own enums; they map the common codes
//! they care about (for example [`CommonError::Paused`]) into their own set.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod pausable;
pub mod ttl;

pub use pausable::*;
pub use ttl::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by the ledger contracts.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authentication & authorisation |
/// | 20 – 29 | Resource not found             |
/// | 30 – 39 | Validation / input             |
/// | 40 – 49 | Contract state                 |
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    AccessDenied = 10,
    RecordNotFound = 21,
    InvalidInput = 30,
    // ── Contract state (40–49) ───────────────────────────────
    /// The contract is currently paused and cannot process requests.
    Paused = 40,
}
