//! Trait definitions for remote discovery (enables mocking in tests).

use async_trait::async_trait;
use dacp_core::{Result, TouchRemote};
use std::time::Duration;
use tokio_stream::Stream;

/// Event emitted while browsing for remotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteEvent {
    /// A remote started advertising.
    Added(TouchRemote),
    /// A known remote stopped advertising.
    Removed(TouchRemote),
}

impl RemoteEvent {
    pub fn remote(&self) -> &TouchRemote {
        match self {
            RemoteEvent::Added(r) | RemoteEvent::Removed(r) => r,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, RemoteEvent::Added(_))
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, RemoteEvent::Removed(_))
    }
}

/// Source of touch remotes.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait RemoteDiscovery: Send + Sync {
    /// Start continuous browsing; the stream ends after `stop`.
    async fn browse(&self) -> Result<Box<dyn Stream<Item = RemoteEvent> + Send + Unpin>>;

    /// Browse for `timeout` and return every remote seen.
    async fn scan(&self, timeout: Duration) -> Result<Vec<TouchRemote>>;

    /// Stop all browsing activity.
    async fn stop(&self);

    /// Remotes currently advertising.
    async fn remotes(&self) -> Vec<TouchRemote>;
}
