//! Bookkeeping of advertised remotes.

use crate::traits::RemoteEvent;
use dacp_core::TouchRemote;
use std::collections::HashMap;
use tracing::info;

/// Remotes keyed by mDNS service instance name.
#[derive(Debug, Default)]
pub struct RemoteListener {
    remotes: HashMap<String, TouchRemote>,
}

impl RemoteListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved remote. Re-resolving a known instance replaces it.
    pub fn add_service(&mut self, instance: &str, remote: TouchRemote) -> RemoteEvent {
        info!("New remote found: {}", remote);
        self.remotes.insert(instance.to_string(), remote.clone());
        RemoteEvent::Added(remote)
    }

    /// Forget a remote; unknown instances are ignored.
    pub fn remove_service(&mut self, instance: &str) -> Option<RemoteEvent> {
        let remote = self.remotes.remove(instance)?;
        info!("Remote lost: {}", remote);
        Some(RemoteEvent::Removed(remote))
    }

    pub fn get(&self, instance: &str) -> Option<&TouchRemote> {
        self.remotes.get(instance)
    }

    pub fn remotes(&self) -> Vec<TouchRemote> {
        self.remotes.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn remote(name: &str, pair_id: &str) -> TouchRemote {
        TouchRemote::new(name, Ipv4Addr::new(192, 168, 1, 20), 50123, pair_id)
    }

    #[test]
    fn add_then_remove() {
        let mut listener = RemoteListener::new();
        let event = listener.add_service("A1", remote("iPhone", "1"));
        assert!(event.is_added());
        assert_eq!(listener.len(), 1);
        assert_eq!(listener.get("A1").unwrap().name, "iPhone");

        let event = listener.remove_service("A1").unwrap();
        assert_eq!(event, RemoteEvent::Removed(remote("iPhone", "1")));
        assert!(listener.is_empty());
    }

    #[test]
    fn removing_unknown_instance_is_ignored() {
        let mut listener = RemoteListener::new();
        assert!(listener.remove_service("nope").is_none());
    }

    #[test]
    fn re_adding_replaces_entry() {
        let mut listener = RemoteListener::new();
        listener.add_service("A1", remote("iPhone", "1"));
        listener.add_service("A1", remote("iPhone", "2"));
        assert_eq!(listener.len(), 1);
        assert_eq!(listener.get("A1").unwrap().pair_id, "2");
    }

    #[test]
    fn remotes_lists_everything() {
        let mut listener = RemoteListener::new();
        listener.add_service("A1", remote("iPhone", "1"));
        listener.add_service("B2", remote("iPad", "2"));
        let mut names: Vec<_> = listener.remotes().into_iter().map(|r| r.name).collect();
        names.sort();
        assert_eq!(names, vec!["iPad", "iPhone"]);
    }
}
