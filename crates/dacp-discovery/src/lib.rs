//! # dacp-discovery
//!
//! mDNS discovery of DACP touch remotes.
//!
//! This crate provides:
//! - TXT record parsing of the `DvNm` and `Pair` properties
//! - Add/remove bookkeeping of advertised remotes
//! - An async browser over `mdns-sd`, behind a trait for testing with mocks
//!
//! ## Example
//!
//! ```ignore
//! use dacp_discovery::{RemoteBrowser, RemoteDiscovery};
//! use std::time::Duration;
//!
//! let browser = RemoteBrowser::new()?;
//! for remote in browser.scan(Duration::from_secs(5)).await? {
//!     println!("Found: {}", remote);
//! }
//! ```

mod browser;
mod listener;
mod parser;
mod traits;

pub use browser::RemoteBrowser;
pub use listener::RemoteListener;
pub use parser::{TxtRecordParser, DEVICE_NAME_KEY, PAIR_ID_KEY};
pub use traits::{RemoteDiscovery, RemoteEvent};

/// Service type advertised by touch remotes waiting to pair.
pub const TOUCH_REMOTE_SERVICE_TYPE: &str = "_touch-remote._tcp.local.";
