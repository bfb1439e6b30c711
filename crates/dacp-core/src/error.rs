//! Error types for the DACP crates.

use crate::tag::Tag;
use thiserror::Error;

/// Primary error type for all DACP operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Pairing error: {0}")]
    Pairing(#[from] PairingError),

    #[error("Operation timed out")]
    Timeout,
}

/// Errors raised while constructing, encoding or decoding DMAP values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Integer outside the bounds of its declared width and signedness.
    #[error("{kind} requires {min} <= value <= {max}, got {value}")]
    Range {
        kind: &'static str,
        value: i128,
        min: i128,
        max: i128,
    },

    /// Input that cannot be interpreted as an integer.
    #[error("{kind} requires a numeric value, got {input}")]
    NotNumeric { kind: &'static str, input: String },

    #[error("Not enough data for {what}: need {needed} bytes, have {available}")]
    Truncated {
        what: String,
        needed: usize,
        available: usize,
    },

    #[error("Malformed node '{tag}': {reason}")]
    Malformed { tag: Tag, reason: String },

    /// Multi-value payload whose length is not a multiple of the element width.
    #[error("{kind} payload of {len} bytes is not a multiple of {width}")]
    Format {
        kind: &'static str,
        len: usize,
        width: usize,
    },

    #[error("Invalid {encoding} text: {reason}")]
    Encoding {
        encoding: &'static str,
        reason: String,
    },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid tag {0:?}: tags are exactly four bytes")]
    InvalidTag(String),

    #[error("Unknown tag '{0}'")]
    UnknownTag(Tag),

    #[error("No child tagged '{0}'")]
    NotFound(Tag),

    #[error("Cannot build {expected} from {found}")]
    LiteralMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid registry configuration: {0}")]
    Config(String),
}

impl CodecError {
    /// Whether this error comes from the byte layout of a buffer rather than from a value.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CodecError::Truncated { .. }
                | CodecError::Malformed { .. }
                | CodecError::Format { .. }
                | CodecError::Encoding { .. }
        )
    }
}

/// Errors during remote pairing.
#[derive(Error, Debug)]
pub enum PairingError {
    #[error("Passcode must be four ASCII digits, got {0:?}")]
    InvalidPasscode(String),

    #[error("Pairing rejected by remote (HTTP {0})")]
    Rejected(u16),

    #[error("Pairing response has no device GUID")]
    MissingGuid,

    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Errors during mDNS service discovery.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("mDNS daemon error: {0}")]
    Daemon(String),

    #[error("Missing TXT property: {0}")]
    MissingProperty(&'static str),

    #[error("No IPv4 address for service {0}")]
    NoAddress(String),
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
