//! # dacp-pairing
//!
//! Pairing with DACP touch remotes such as the iOS Remote app.
//!
//! This crate provides:
//! - The pairing code derived from the remote's passcode and pairing id
//! - A `Transport` seam for the `/pair` request, with a plain HTTP implementation
//! - The pairing workflow returning the remote's login GUID
//!
//! ## Example
//!
//! ```ignore
//! use dacp_pairing::TouchRemotePairing;
//!
//! let pairing = TouchRemotePairing::new();
//! let guid = pairing.pair(&remote, "1234", "0123456789ABCDEF").await?;
//! ```

mod code;
mod http;
mod remote;
mod traits;

pub use code::{compress, pairing_code, parameter_block, BLOCK_LEN};
pub use http::{HttpTransport, DEFAULT_TIMEOUT, MAX_BODY_LEN};
pub use remote::TouchRemotePairing;
pub use traits::Transport;
