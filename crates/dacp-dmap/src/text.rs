//! String values and their character encodings.

use crate::value::DmapValue;
use dacp_core::CodecError;
use std::fmt;

/// Character encoding used for DMAP string payloads.
///
/// iTunes and the Remote app both use UTF-8; other encodings are accepted for
/// peers that need them, with no guarantee the receiver will understand them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    /// ISO-8859-1
    Latin1,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf-16-le",
            TextEncoding::Utf16Be => "utf-16-be",
            TextEncoding::Latin1 => "iso-8859-1",
        }
    }

    pub fn encode(self, value: &str) -> Result<Vec<u8>, CodecError> {
        match self {
            TextEncoding::Utf8 => Ok(value.as_bytes().to_vec()),
            TextEncoding::Utf16Le => Ok(value.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            TextEncoding::Utf16Be => Ok(value.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            TextEncoding::Latin1 => value
                .chars()
                .map(|c| {
                    u8::try_from(c).map_err(|_| CodecError::Encoding {
                        encoding: self.name(),
                        reason: format!("character {:?} is not representable", c),
                    })
                })
                .collect(),
        }
    }

    pub fn decode(self, data: &[u8]) -> Result<String, CodecError> {
        let invalid = |reason: String| CodecError::Encoding {
            encoding: self.name(),
            reason,
        };

        match self {
            TextEncoding::Utf8 => {
                String::from_utf8(data.to_vec()).map_err(|e| invalid(e.to_string()))
            }
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
                if data.len() % 2 != 0 {
                    return Err(invalid(format!("odd byte count {}", data.len())));
                }
                let units: Vec<u16> = data
                    .chunks_exact(2)
                    .map(|pair| {
                        let pair = [pair[0], pair[1]];
                        if self == TextEncoding::Utf16Le {
                            u16::from_le_bytes(pair)
                        } else {
                            u16::from_be_bytes(pair)
                        }
                    })
                    .collect();
                String::from_utf16(&units).map_err(|e| invalid(e.to_string()))
            }
            TextEncoding::Latin1 => Ok(data.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

/// A Unicode string, serialized without length prefix or terminator.
///
/// Equality compares the text only, not the encoding.
#[derive(Debug, Clone)]
pub struct Text {
    value: String,
    encoding: TextEncoding,
    bytes: Vec<u8>,
}

impl Text {
    /// UTF-8 text.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let bytes = value.as_bytes().to_vec();
        Self {
            value,
            encoding: TextEncoding::Utf8,
            bytes,
        }
    }

    pub fn with_encoding(
        value: impl Into<String>,
        encoding: TextEncoding,
    ) -> Result<Self, CodecError> {
        let value = value.into();
        let bytes = encoding.encode(&value)?;
        Ok(Self {
            value,
            encoding,
            bytes,
        })
    }

    pub fn decode(data: &[u8], encoding: TextEncoding) -> Result<Self, CodecError> {
        let value = encoding.decode(data)?;
        Ok(Self {
            value,
            encoding,
            bytes: data.to_vec(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Text {}

impl DmapValue for Text {
    fn encoded_len(&self) -> usize {
        self.bytes.len()
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.bytes);
    }

    fn pretty(&self) -> String {
        self.value.clone()
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.value)
    }
}
