//! Touch remote representation.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// A DACP remote control (e.g. the iOS Remote app) found by service discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchRemote {
    /// Display name from the `DvNm` TXT property.
    pub name: String,
    pub address: Ipv4Addr,
    pub port: u16,
    /// Pairing identifier from the `Pair` TXT property.
    pub pair_id: String,
}

impl TouchRemote {
    pub fn new(
        name: impl Into<String>,
        address: Ipv4Addr,
        port: u16,
        pair_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            port,
            pair_id: pair_id.into(),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.address, self.port))
    }
}

impl fmt::Display for TouchRemote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}:{}", self.name, self.address, self.port)
    }
}
