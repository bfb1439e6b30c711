//! The value capability shared by every DMAP type, and the closed set of value kinds.

use crate::binary::Binary;
use crate::multi::MultiScalar;
use crate::node::Container;
use crate::registry::TagRegistry;
use crate::scalar::{Scalar, ScalarKind};
use crate::text::Text;
use crate::timestamp::Timestamp;
use crate::version::Version;
use dacp_core::CodecError;

/// Serialization capability implemented by all leaf and container types.
pub trait DmapValue {
    /// Number of bytes `encode` produces.
    fn encoded_len(&self) -> usize;

    /// Append the wire representation to `out`.
    fn encode_into(&self, out: &mut Vec<u8>);

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }

    /// Human-readable rendering used by the tree printer.
    fn pretty(&self) -> String;
}

/// Type of the value a tag carries, as listed in the tag registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar(ScalarKind),
    Multi(ScalarKind),
    Timestamp,
    Version,
    Text,
    Binary,
    Container,
}

impl ValueKind {
    /// Registry type name, e.g. `UInt`, `MultiInt`, `DateTime`, `String`.
    pub fn type_name(self) -> &'static str {
        match self {
            ValueKind::Scalar(kind) => kind.name(),
            ValueKind::Multi(kind) => match kind {
                ScalarKind::UByte => "MultiUByte",
                ScalarKind::Byte => "MultiByte",
                ScalarKind::UShort => "MultiUShort",
                ScalarKind::Short => "MultiShort",
                ScalarKind::UInt => "MultiUInt",
                ScalarKind::Int => "MultiInt",
                ScalarKind::ULong => "MultiULong",
                ScalarKind::Long => "MultiLong",
            },
            ValueKind::Timestamp => "DateTime",
            ValueKind::Version => "Version",
            ValueKind::Text => "String",
            ValueKind::Binary => "Binary",
            ValueKind::Container => "Container",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        if let Some(kind) = ScalarKind::from_name(name) {
            return Some(ValueKind::Scalar(kind));
        }
        if let Some(kind) = name.strip_prefix("Multi").and_then(ScalarKind::from_name) {
            return Some(ValueKind::Multi(kind));
        }
        Some(match name {
            "DateTime" => ValueKind::Timestamp,
            "Version" => ValueKind::Version,
            "String" => ValueKind::Text,
            "Binary" => ValueKind::Binary,
            "Container" => ValueKind::Container,
            _ => return None,
        })
    }
}

/// A decoded or constructed DMAP value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(Scalar),
    Multi(MultiScalar),
    Timestamp(Timestamp),
    Version(Version),
    Text(Text),
    Binary(Binary),
    Container(Container),
}

impl Value {
    /// Decode `data` (exactly one node payload) as a value of `kind`.
    pub fn decode(
        kind: ValueKind,
        data: &[u8],
        registry: &TagRegistry,
    ) -> Result<Self, CodecError> {
        Ok(match kind {
            ValueKind::Scalar(kind) => Value::Scalar(Scalar::decode(kind, data)?),
            ValueKind::Multi(kind) => Value::Multi(MultiScalar::decode(kind, data)?),
            ValueKind::Timestamp => Value::Timestamp(Timestamp::decode(data)?),
            ValueKind::Version => Value::Version(Version::decode(data)?),
            ValueKind::Text => Value::Text(Text::decode(data, registry.text_encoding())?),
            ValueKind::Binary => Value::Binary(Binary::decode(data)),
            ValueKind::Container => Value::Container(Container::decode(data, registry)?),
        })
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(s) => ValueKind::Scalar(s.kind()),
            Value::Multi(m) => ValueKind::Multi(m.kind()),
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::Version(_) => ValueKind::Version,
            Value::Text(_) => ValueKind::Text,
            Value::Binary(_) => ValueKind::Binary,
            Value::Container(_) => ValueKind::Container,
        }
    }

    /// Integer value of a scalar.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Scalar(s) => Some(s.value()),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Scalar(s) => s.as_u64(),
            _ => None,
        }
    }

    /// String content of a text leaf or of a text-form container.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(t) | Value::Container(Container::Text(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(b) => Some(b.as_bytes()),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Value::Container(c) => Some(c),
            _ => None,
        }
    }

    fn as_dyn(&self) -> &dyn DmapValue {
        match self {
            Value::Scalar(v) => v,
            Value::Multi(v) => v,
            Value::Timestamp(v) => v,
            Value::Version(v) => v,
            Value::Text(v) => v,
            Value::Binary(v) => v,
            Value::Container(v) => v,
        }
    }
}

impl DmapValue for Value {
    fn encoded_len(&self) -> usize {
        self.as_dyn().encoded_len()
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        self.as_dyn().encode_into(out)
    }

    fn pretty(&self) -> String {
        self.as_dyn().pretty()
    }
}

impl From<Scalar> for Value {
    fn from(v: Scalar) -> Self {
        Value::Scalar(v)
    }
}

impl From<MultiScalar> for Value {
    fn from(v: MultiScalar) -> Self {
        Value::Multi(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Version> for Value {
    fn from(v: Version) -> Self {
        Value::Version(v)
    }
}

impl From<Text> for Value {
    fn from(v: Text) -> Self {
        Value::Text(v)
    }
}

impl From<Binary> for Value {
    fn from(v: Binary) -> Self {
        Value::Binary(v)
    }
}

impl From<Container> for Value {
    fn from(v: Container) -> Self {
        Value::Container(v)
    }
}
