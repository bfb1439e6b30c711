//! Fixed-width integer values.
//!
//! All eight integer kinds share one `Scalar` type; width, signedness and bounds come
//! from the `ScalarKind` table. Values are stored as `i128`, which holds both the full
//! `u64` and `i64` ranges.

use crate::value::DmapValue;
use dacp_core::CodecError;
use std::fmt;

/// Width and signedness of an integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    UByte,
    Byte,
    UShort,
    Short,
    UInt,
    Int,
    ULong,
    Long,
}

impl ScalarKind {
    /// Encoded width in bytes.
    pub const fn width(self) -> usize {
        match self {
            ScalarKind::UByte | ScalarKind::Byte => 1,
            ScalarKind::UShort | ScalarKind::Short => 2,
            ScalarKind::UInt | ScalarKind::Int => 4,
            ScalarKind::ULong | ScalarKind::Long => 8,
        }
    }

    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            ScalarKind::Byte | ScalarKind::Short | ScalarKind::Int | ScalarKind::Long
        )
    }

    pub const fn min_value(self) -> i128 {
        if self.is_signed() {
            -(1i128 << (self.width() * 8 - 1))
        } else {
            0
        }
    }

    pub const fn max_value(self) -> i128 {
        if self.is_signed() {
            (1i128 << (self.width() * 8 - 1)) - 1
        } else {
            (1i128 << (self.width() * 8)) - 1
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::UByte => "UByte",
            ScalarKind::Byte => "Byte",
            ScalarKind::UShort => "UShort",
            ScalarKind::Short => "Short",
            ScalarKind::UInt => "UInt",
            ScalarKind::Int => "Int",
            ScalarKind::ULong => "ULong",
            ScalarKind::Long => "Long",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "UByte" => ScalarKind::UByte,
            "Byte" => ScalarKind::Byte,
            "UShort" => ScalarKind::UShort,
            "Short" => ScalarKind::Short,
            "UInt" => ScalarKind::UInt,
            "Int" => ScalarKind::Int,
            "ULong" => ScalarKind::ULong,
            "Long" => ScalarKind::Long,
            _ => return None,
        })
    }
}

/// A range-checked integer of a given `ScalarKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scalar {
    kind: ScalarKind,
    value: i128,
}

impl Scalar {
    /// Create a scalar, failing with `CodecError::Range` when `value` does not fit `kind`.
    pub fn new(kind: ScalarKind, value: impl Into<i128>) -> Result<Self, CodecError> {
        let value = value.into();
        if value < kind.min_value() || value > kind.max_value() {
            return Err(CodecError::Range {
                kind: kind.name(),
                value,
                min: kind.min_value(),
                max: kind.max_value(),
            });
        }
        Ok(Self { kind, value })
    }

    /// Parse a decimal integer (surrounding whitespace allowed).
    pub fn parse(kind: ScalarKind, input: &str) -> Result<Self, CodecError> {
        let value = input
            .trim()
            .parse::<i128>()
            .map_err(|_| CodecError::NotNumeric {
                kind: kind.name(),
                input: input.to_string(),
            })?;
        Self::new(kind, value)
    }

    pub fn ubyte(value: u8) -> Self {
        Self { kind: ScalarKind::UByte, value: value.into() }
    }

    pub fn byte(value: i8) -> Self {
        Self { kind: ScalarKind::Byte, value: value.into() }
    }

    pub fn ushort(value: u16) -> Self {
        Self { kind: ScalarKind::UShort, value: value.into() }
    }

    pub fn short(value: i16) -> Self {
        Self { kind: ScalarKind::Short, value: value.into() }
    }

    pub fn uint(value: u32) -> Self {
        Self { kind: ScalarKind::UInt, value: value.into() }
    }

    pub fn int(value: i32) -> Self {
        Self { kind: ScalarKind::Int, value: value.into() }
    }

    pub fn ulong(value: u64) -> Self {
        Self { kind: ScalarKind::ULong, value: value.into() }
    }

    pub fn long(value: i64) -> Self {
        Self { kind: ScalarKind::Long, value: value.into() }
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn value(&self) -> i128 {
        self.value
    }

    pub fn as_u64(&self) -> Option<u64> {
        u64::try_from(self.value).ok()
    }

    pub fn as_i64(&self) -> Option<i64> {
        i64::try_from(self.value).ok()
    }

    /// Decode from the first `kind.width()` bytes of `data`; trailing bytes are ignored.
    pub fn decode(kind: ScalarKind, data: &[u8]) -> Result<Self, CodecError> {
        let width = kind.width();
        if data.len() < width {
            return Err(CodecError::Truncated {
                what: kind.name().to_string(),
                needed: width,
                available: data.len(),
            });
        }

        let mut buf = [0u8; 8];
        buf[8 - width..].copy_from_slice(&data[..width]);
        let raw = u64::from_be_bytes(buf);

        let value = if kind.is_signed() {
            // Sign-extend from the top bit of the encoded width
            let shift = 64 - width * 8;
            (((raw << shift) as i64) >> shift) as i128
        } else {
            raw as i128
        };

        Ok(Self { kind, value })
    }

    /// Two's complement bit pattern, truncated to the encoded width.
    fn raw_bits(&self) -> u64 {
        let bits = if self.kind.is_signed() {
            self.value as i64 as u64
        } else {
            self.value as u64
        };
        match self.kind.width() {
            8 => bits,
            width => bits & ((1u64 << (width * 8)) - 1),
        }
    }
}

impl DmapValue for Scalar {
    fn encoded_len(&self) -> usize {
        self.kind.width()
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        let width = self.kind.width();
        out.extend_from_slice(&self.raw_bits().to_be_bytes()[8 - width..]);
    }

    fn pretty(&self) -> String {
        format!(
            "0x{:0width$X} == {}",
            self.raw_bits(),
            self.value,
            width = self.kind.width() * 2
        )
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ScalarKind; 8] = [
        ScalarKind::UByte,
        ScalarKind::Byte,
        ScalarKind::UShort,
        ScalarKind::Short,
        ScalarKind::UInt,
        ScalarKind::Int,
        ScalarKind::ULong,
        ScalarKind::Long,
    ];

    mod bounds {
        use super::*;

        #[test]
        fn bounds_follow_width_and_signedness() {
            assert_eq!(ScalarKind::UByte.max_value(), 255);
            assert_eq!(ScalarKind::Byte.min_value(), -128);
            assert_eq!(ScalarKind::Byte.max_value(), 127);
            assert_eq!(ScalarKind::UShort.max_value(), 65535);
            assert_eq!(ScalarKind::Int.min_value(), i32::MIN as i128);
            assert_eq!(ScalarKind::ULong.max_value(), u64::MAX as i128);
            assert_eq!(ScalarKind::Long.min_value(), i64::MIN as i128);
        }

        #[test]
        fn unsigned_big_value_is_rejected() {
            assert!(matches!(
                Scalar::new(ScalarKind::UByte, 256),
                Err(CodecError::Range { value: 256, max: 255, .. })
            ));
        }

        #[test]
        fn signed_big_value_is_rejected() {
            assert!(Scalar::new(ScalarKind::Byte, 128).is_err());
        }

        #[test]
        fn unsigned_negative_value_is_rejected() {
            assert!(Scalar::new(ScalarKind::UByte, -1).is_err());
        }

        #[test]
        fn signed_small_value_is_rejected() {
            assert!(Scalar::new(ScalarKind::Byte, -129).is_err());
        }

        #[test]
        fn every_kind_rejects_one_past_each_bound() {
            for kind in ALL_KINDS {
                assert!(Scalar::new(kind, kind.max_value() + 1).is_err(), "{:?}", kind);
                assert!(Scalar::new(kind, kind.min_value() - 1).is_err(), "{:?}", kind);
            }
        }

        #[test]
        fn non_numeric_input_is_a_type_error() {
            assert!(matches!(
                Scalar::parse(ScalarKind::UByte, "s"),
                Err(CodecError::NotNumeric { kind: "UByte", .. })
            ));
            assert_eq!(Scalar::parse(ScalarKind::UInt, " 42 ").unwrap(), Scalar::uint(42));
        }
    }

    mod codec {
        use super::*;

        #[test]
        fn serialize_ubyte() {
            assert_eq!(Scalar::ubyte(255).encode(), vec![0xff]);
        }

        #[test]
        fn deserialize_ubyte() {
            assert_eq!(Scalar::decode(ScalarKind::UByte, &[0xff]).unwrap().value(), 255);
        }

        #[test]
        fn negative_values_use_twos_complement() {
            assert_eq!(Scalar::short(-2).encode(), vec![0xff, 0xfe]);
            assert_eq!(Scalar::decode(ScalarKind::Short, &[0xff, 0xfe]).unwrap().value(), -2);
            assert_eq!(Scalar::int(-1).encode(), vec![0xff; 4]);
        }

        #[test]
        fn decode_ignores_trailing_bytes() {
            let s = Scalar::decode(ScalarKind::UShort, &[0x01, 0x02, 0x03]).unwrap();
            assert_eq!(s.value(), 0x0102);
        }

        #[test]
        fn decode_short_buffer_is_truncated() {
            assert!(matches!(
                Scalar::decode(ScalarKind::UInt, &[0x00, 0x01]),
                Err(CodecError::Truncated { needed: 4, available: 2, .. })
            ));
        }

        #[test]
        fn bounds_survive_roundtrip() {
            for kind in ALL_KINDS {
                for v in [kind.min_value(), 0, 1, kind.max_value()] {
                    let s = Scalar::new(kind, v).unwrap();
                    let bytes = s.encode();
                    assert_eq!(bytes.len(), kind.width());
                    assert_eq!(Scalar::decode(kind, &bytes).unwrap(), s);
                }
            }
        }
    }

    mod display {
        use super::*;

        #[test]
        fn pretty_prints_hex_and_decimal() {
            let n = Scalar::uint(42);
            assert_eq!(n.to_string(), "42");
            assert_eq!(n.pretty(), "0x0000002A == 42");
            assert_eq!(Scalar::int(-1).pretty(), "0xFFFFFFFF == -1");
            assert_eq!(Scalar::ubyte(1).pretty(), "0x01 == 1");
        }

        #[test]
        fn equality_includes_kind() {
            assert_eq!(Scalar::uint(42), Scalar::uint(42));
            assert_ne!(Scalar::uint(42), Scalar::uint(43));
            assert_ne!(Scalar::uint(42), Scalar::ushort(42));
        }
    }
}
