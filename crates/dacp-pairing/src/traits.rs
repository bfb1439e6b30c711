//! Transport seam for the pairing request.

use async_trait::async_trait;
use dacp_core::Result;
use std::net::SocketAddr;

/// Sends the pairing request to a remote.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    /// `GET /pair?pairingcode=<code>&servicename=<name>` against `addr`.
    ///
    /// Returns the response body on HTTP 200.
    async fn get_pair(
        &self,
        addr: SocketAddr,
        pairing_code: &str,
        service_name: &str,
    ) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use dacp_core::{Error, PairingError};
    use std::net::{Ipv4Addr, SocketAddrV4};

    fn addr() -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(192, 168, 1, 20), 1024))
    }

    #[tokio::test]
    async fn mock_get_pair_returns_configured_body() {
        let mut mock = MockTransport::new();

        let expected = b"cmpa\x00\x00\x00\x00".to_vec();
        let expected_clone = expected.clone();

        mock.expect_get_pair()
            .times(1)
            .returning(move |_, _, _| {
                let body = expected_clone.clone();
                Box::pin(async move { Ok(body) })
            });

        let body = mock
            .get_pair(addr(), "690E6FF61E0D7C747654A42AED17047D", "0123456789ABCDEF")
            .await
            .unwrap();
        assert_eq!(body, expected);
    }

    #[tokio::test]
    async fn mock_get_pair_propagates_rejection() {
        let mut mock = MockTransport::new();

        mock.expect_get_pair()
            .returning(|_, _, _| Box::pin(async { Err(PairingError::Rejected(404).into()) }));

        let err = mock.get_pair(addr(), "X", "Y").await.unwrap_err();
        assert!(matches!(err, Error::Pairing(PairingError::Rejected(404))));
    }
}
