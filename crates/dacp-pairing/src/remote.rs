//! Pairing with a touch remote.

use crate::code::pairing_code;
use crate::http::HttpTransport;
use crate::traits::Transport;
use dacp_core::{Error, PairingError, Result, Tag, TouchRemote};
use dacp_dmap::{CodecError, Node, TagRegistry};
use std::sync::Arc;
use tracing::{debug, info, warn};

const PAIRING_GUID: Tag = Tag::new(b"cmpg");

/// Drives the pairing exchange with a remote.
///
/// The remote displays a four digit passcode; once the user enters it here the remote
/// answers with the GUID it will use to log in from then on.
pub struct TouchRemotePairing<T: Transport = HttpTransport> {
    transport: T,
    registry: Arc<TagRegistry>,
}

impl TouchRemotePairing<HttpTransport> {
    /// Pair over HTTP, decoding answers with the standard tag registry.
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new(), Arc::new(TagRegistry::standard()))
    }
}

impl Default for TouchRemotePairing<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> TouchRemotePairing<T> {
    pub fn with_transport(transport: T, registry: Arc<TagRegistry>) -> Self {
        Self {
            transport,
            registry,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Pair `remote` with the library named `service_name`.
    ///
    /// Returns the pairing GUID from the remote's `cmpa` answer.
    pub async fn pair(
        &self,
        remote: &TouchRemote,
        passcode: &str,
        service_name: &str,
    ) -> Result<u64> {
        let code = pairing_code(passcode, &remote.pair_id)?;
        info!(
            "Attempting to pair with {}:{} with code {}",
            remote.address, remote.port, code
        );

        match self.exchange(remote, &code, service_name).await {
            Ok(guid) => {
                info!("Pairing successful with GUID {:016X}", guid);
                Ok(guid)
            }
            Err(e) => {
                warn!("Pairing failed: {}", e);
                Err(e)
            }
        }
    }

    async fn exchange(&self, remote: &TouchRemote, code: &str, service_name: &str) -> Result<u64> {
        let body = self
            .transport
            .get_pair(remote.socket_addr(), code, service_name)
            .await?;
        debug!("Pairing answer: {} bytes", body.len());

        let (answer, _) = Node::decode(&body, &self.registry)?;
        debug!("Pairing answer:\n{}", answer.pretty(&self.registry));

        match answer.first_child(PAIRING_GUID) {
            Ok(child) => child.as_u64().ok_or_else(|| {
                PairingError::Protocol(format!("'{}' is not an integer", PAIRING_GUID)).into()
            }),
            Err(CodecError::NotFound(_)) => Err(PairingError::MissingGuid.into()),
            Err(e) => Err(Error::Codec(e)),
        }
    }
}
