//! Dotted-quad protocol version numbers.

use crate::value::DmapValue;
use dacp_core::CodecError;
use std::fmt;

/// Four-component version such as `3.0.1.0`.
///
/// On the wire this is two little-endian 16-bit halves, so the bytes are
/// `(minor, major, build, point)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub point: u8,
    pub build: u8,
}

impl Version {
    pub const fn new(major: u8, minor: u8, point: u8, build: u8) -> Self {
        Self {
            major,
            minor,
            point,
            build,
        }
    }

    pub fn components(&self) -> [u8; 4] {
        [self.major, self.minor, self.point, self.build]
    }

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        match data {
            [minor, major, build, point, ..] => Ok(Self::new(*major, *minor, *point, *build)),
            _ => Err(CodecError::Truncated {
                what: "Version".to_string(),
                needed: 4,
                available: data.len(),
            }),
        }
    }
}

impl From<[u8; 4]> for Version {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl DmapValue for Version {
    fn encoded_len(&self) -> usize {
        4
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.minor, self.major, self.build, self.point]);
    }

    fn pretty(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.point, self.build)
    }
}
