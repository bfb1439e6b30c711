//! Arrays of same-kind integers, serialized back to back.

use crate::scalar::{Scalar, ScalarKind};
use crate::value::DmapValue;
use dacp_core::CodecError;

/// Ordered sequence of scalars sharing one `ScalarKind`.
///
/// DMAP uses signed and unsigned 32-bit elements (`MultiInt`, `MultiUInt`), e.g. the
/// `canp` now-playing identifier, but any element kind is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiScalar {
    kind: ScalarKind,
    values: Vec<Scalar>,
}

impl MultiScalar {
    /// Build from raw integers, range-checking every element against `kind`.
    pub fn new<I, V>(kind: ScalarKind, values: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = V>,
        V: Into<i128>,
    {
        let values = values
            .into_iter()
            .map(|v| Scalar::new(kind, v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { kind, values })
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Decode a payload whose length must be an exact multiple of the element width.
    pub fn decode(kind: ScalarKind, data: &[u8]) -> Result<Self, CodecError> {
        let width = kind.width();
        if data.len() % width != 0 {
            return Err(CodecError::Format {
                kind: kind.name(),
                len: data.len(),
                width,
            });
        }

        let values = data
            .chunks_exact(width)
            .map(|chunk| Scalar::decode(kind, chunk))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { kind, values })
    }
}

impl DmapValue for MultiScalar {
    fn encoded_len(&self) -> usize {
        self.values.len() * self.kind.width()
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        for value in &self.values {
            value.encode_into(out);
        }
    }

    fn pretty(&self) -> String {
        let items: Vec<String> = self.values.iter().map(|v| v.pretty()).collect();
        format!("({})", items.join(", "))
    }
}
