//! # dacp-core
//!
//! Core types and error definitions shared across all DACP crates.
//!
//! This crate provides:
//! - Four-character DMAP tag codes
//! - Touch remote identification (as supplied by service discovery)
//! - Common error types

pub mod error;
pub mod remote;
pub mod tag;

pub use error::{CodecError, DiscoveryError, Error, PairingError, Result};
pub use remote::TouchRemote;
pub use tag::Tag;
