//! mDNS browser for touch remotes.

use crate::listener::RemoteListener;
use crate::parser::TxtRecordParser;
use crate::traits::{RemoteDiscovery, RemoteEvent};
use crate::TOUCH_REMOTE_SERVICE_TYPE;
use async_trait::async_trait;
use dacp_core::{DiscoveryError, Result, TouchRemote};
use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_stream::Stream;
use tracing::{debug, trace, warn};

/// Browses `_touch-remote._tcp` and tracks the remotes it sees.
pub struct RemoteBrowser {
    listener: Arc<RwLock<RemoteListener>>,
    daemon: ServiceDaemon,
    running: Arc<AtomicBool>,
}

impl RemoteBrowser {
    pub fn new() -> Result<Self> {
        let daemon = ServiceDaemon::new()
            .map_err(|e| DiscoveryError::Daemon(format!("Failed to create mDNS daemon: {}", e)))?;

        Ok(Self {
            listener: Arc::new(RwLock::new(RemoteListener::new())),
            daemon,
            running: Arc::new(AtomicBool::new(false)),
        })
    }

    fn parse_service(info: &ServiceInfo) -> Option<(String, TouchRemote)> {
        let fullname = info.get_fullname();
        let instance = TxtRecordParser::instance_name(fullname);

        let txt: HashMap<String, String> = info
            .get_properties()
            .iter()
            .map(|prop| (prop.key().to_string(), prop.val_str().to_string()))
            .collect();
        let addresses: Vec<IpAddr> = info.get_addresses().iter().copied().collect();

        match TxtRecordParser::parse_touch_remote(instance, &txt, &addresses, info.get_port()) {
            Ok(remote) => Some((instance.to_string(), remote)),
            Err(e) => {
                warn!("Failed to parse service {}: {}", fullname, e);
                None
            }
        }
    }

    async fn handle_service_event(
        event: ServiceEvent,
        listener: &Arc<RwLock<RemoteListener>>,
    ) -> Option<RemoteEvent> {
        match event {
            ServiceEvent::ServiceResolved(info) => {
                trace!("Service resolved: {}", info.get_fullname());
                let (instance, remote) = Self::parse_service(&info)?;
                Some(listener.write().await.add_service(&instance, remote))
            }
            ServiceEvent::ServiceRemoved(_, fullname) => {
                trace!("Service removed: {}", fullname);
                let instance = TxtRecordParser::instance_name(&fullname);
                listener.write().await.remove_service(instance)
            }
            ServiceEvent::SearchStarted(_) => {
                trace!("Search started");
                None
            }
            ServiceEvent::SearchStopped(_) => {
                trace!("Search stopped");
                None
            }
            _ => None,
        }
    }
}

#[async_trait]
impl RemoteDiscovery for RemoteBrowser {
    async fn browse(&self) -> Result<Box<dyn Stream<Item = RemoteEvent> + Send + Unpin>> {
        self.running.store(true, Ordering::SeqCst);

        let receiver = self
            .daemon
            .browse(TOUCH_REMOTE_SERVICE_TYPE)
            .map_err(|e| DiscoveryError::Daemon(format!("Failed to browse remotes: {}", e)))?;

        let listener = Arc::clone(&self.listener);
        let running = Arc::clone(&self.running);

        let stream = async_stream::stream! {
            while running.load(Ordering::SeqCst) {
                if let Ok(event) = receiver.recv_timeout(Duration::from_millis(100)) {
                    if let Some(remote_event) = Self::handle_service_event(event, &listener).await {
                        yield remote_event;
                    }
                }
            }
        };

        Ok(Box::new(Box::pin(stream)))
    }

    async fn scan(&self, timeout: Duration) -> Result<Vec<TouchRemote>> {
        self.running.store(true, Ordering::SeqCst);

        let receiver = self
            .daemon
            .browse(TOUCH_REMOTE_SERVICE_TYPE)
            .map_err(|e| DiscoveryError::Daemon(format!("Failed to browse remotes: {}", e)))?;

        let start = std::time::Instant::now();
        while start.elapsed() < timeout && self.running.load(Ordering::SeqCst) {
            let remaining = timeout.saturating_sub(start.elapsed());
            if let Ok(event) = receiver.recv_timeout(remaining.min(Duration::from_millis(100))) {
                Self::handle_service_event(event, &self.listener).await;
            }
        }

        let _ = self.daemon.stop_browse(TOUCH_REMOTE_SERVICE_TYPE);
        self.running.store(false, Ordering::SeqCst);

        let remotes = self.remotes().await;
        debug!("Scan finished with {} remote(s)", remotes.len());
        Ok(remotes)
    }

    async fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        let _ = self.daemon.stop_browse(TOUCH_REMOTE_SERVICE_TYPE);
    }

    async fn remotes(&self) -> Vec<TouchRemote> {
        self.listener.read().await.remotes()
    }
}
