//! Ballot Types - Identity types shared by the ballot ledger crates.
//!
//! This crate provides:
//! - Addresses (20-byte, Bech32m or hex encoded)
//! - The error type for parsing them

pub mod address;
pub mod error;

#[cfg(feature = "serde")]
mod serialization;

pub use address::Address;
pub use error::TypesError;
