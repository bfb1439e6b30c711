//! Building trees from literal descriptions.
//!
//! ```ignore
//! let node = build_node(&registry, Tag::new(b"msrv"), Literal::list([
//!     (b"mstt", Literal::from(200)),
//!     (b"mpro", Literal::from((2, 0, 6, 0))),
//!     (b"minm", Literal::from("Zem's Library")),
//! ]))?;
//! ```
//!
//! Unlike decoding, building never falls back to binary: every tag must be in the
//! registry so its value kind is known.

use crate::binary::Binary;
use crate::multi::MultiScalar;
use crate::node::{Container, Node};
use crate::registry::TagRegistry;
use crate::scalar::Scalar;
use crate::text::Text;
use crate::timestamp::Timestamp;
use crate::value::{Value, ValueKind};
use crate::version::Version;
use chrono::NaiveDateTime;
use dacp_core::{CodecError, Tag};
use std::fmt;

/// Untyped description of a node value; the registry decides what it becomes.
pub enum Literal {
    Int(i128),
    Bool(bool),
    Str(String),
    Tuple(Vec<i128>),
    Time(Option<NaiveDateTime>),
    Bytes(Vec<u8>),
    /// Children of a container, in order.
    List(Vec<(Tag, Literal)>),
    /// An already constructed value, converted to the tag's kind if needed.
    Value(Value),
    /// Produces the literal at build time, e.g. the current time.
    Deferred(Box<dyn FnOnce() -> Literal + Send>),
}

impl Literal {
    pub fn deferred<F>(f: F) -> Self
    where
        F: FnOnce() -> Literal + Send + 'static,
    {
        Literal::Deferred(Box::new(f))
    }

    pub fn list<I, T>(children: I) -> Self
    where
        I: IntoIterator<Item = (T, Literal)>,
        T: Into<Tag>,
    {
        Literal::List(children.into_iter().map(|(tag, lit)| (tag.into(), lit)).collect())
    }

    fn describe(&self) -> &'static str {
        match self {
            Literal::Int(_) => "integer",
            Literal::Bool(_) => "bool",
            Literal::Str(_) => "string",
            Literal::Tuple(_) => "tuple",
            Literal::Time(_) => "datetime",
            Literal::Bytes(_) => "bytes",
            Literal::List(_) => "list",
            Literal::Value(_) => "value",
            Literal::Deferred(_) => "deferred",
        }
    }

    /// Text form used when a non-list literal fills a container.
    fn into_display_string(self) -> Result<String, Literal> {
        match self {
            Literal::Str(s) => Ok(s),
            Literal::Int(v) => Ok(v.to_string()),
            Literal::Bool(v) => Ok(v.to_string()),
            Literal::Tuple(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                Ok(format!("({})", parts.join(", ")))
            }
            Literal::Time(Some(instant)) => Ok(instant.to_string()),
            Literal::Value(Value::Scalar(s)) => Ok(s.value().to_string()),
            other => Err(other),
        }
    }

    /// Resolve deferred literals until a concrete one remains.
    fn force(self) -> Literal {
        let mut literal = self;
        while let Literal::Deferred(f) = literal {
            literal = f();
        }
        literal
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Literal::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Literal::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Literal::Tuple(v) => f.debug_tuple("Tuple").field(v).finish(),
            Literal::Time(v) => f.debug_tuple("Time").field(v).finish(),
            Literal::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            Literal::List(v) => f.debug_tuple("List").field(v).finish(),
            Literal::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Literal::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

macro_rules! int_literal {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Literal {
                fn from(v: $t) -> Self {
                    Literal::Int(v.into())
                }
            }
        )*
    };
}

int_literal!(u8, i8, u16, i16, u32, i32, u64, i64, i128);

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Bool(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::Str(v.to_string())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::Str(v)
    }
}

impl From<(u8, u8, u8, u8)> for Literal {
    fn from((a, b, c, d): (u8, u8, u8, u8)) -> Self {
        Literal::Tuple(vec![a.into(), b.into(), c.into(), d.into()])
    }
}

impl From<Vec<i128>> for Literal {
    fn from(v: Vec<i128>) -> Self {
        Literal::Tuple(v)
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(v: NaiveDateTime) -> Self {
        Literal::Time(Some(v))
    }
}

impl From<Option<NaiveDateTime>> for Literal {
    fn from(v: Option<NaiveDateTime>) -> Self {
        Literal::Time(v)
    }
}

impl From<Vec<u8>> for Literal {
    fn from(v: Vec<u8>) -> Self {
        Literal::Bytes(v)
    }
}

impl From<Value> for Literal {
    fn from(v: Value) -> Self {
        Literal::Value(v)
    }
}

impl From<Scalar> for Literal {
    fn from(v: Scalar) -> Self {
        Literal::Value(Value::Scalar(v))
    }
}

/// Build a node for `tag`, converting `literal` to the kind the registry lists for it.
pub fn build_node(
    registry: &TagRegistry,
    tag: Tag,
    literal: impl Into<Literal>,
) -> Result<Node, CodecError> {
    let kind = registry.resolve(tag)?.kind;
    let value = build_value(registry, kind, literal.into().force())?;
    Ok(Node::new(tag, value))
}

impl TagRegistry {
    /// Shorthand for `build_node(self, tag, literal)`.
    pub fn build(&self, tag: Tag, literal: impl Into<Literal>) -> Result<Node, CodecError> {
        build_node(self, tag, literal)
    }
}

fn build_value(
    registry: &TagRegistry,
    kind: ValueKind,
    literal: Literal,
) -> Result<Value, CodecError> {
    let mismatch = |literal: &Literal| CodecError::LiteralMismatch {
        expected: kind.type_name(),
        found: literal.describe(),
    };

    Ok(match (kind, literal) {
        (ValueKind::Container, Literal::List(children)) => {
            let nodes = children
                .into_iter()
                .map(|(tag, child)| build_node(registry, tag, child))
                .collect::<Result<Vec<_>, _>>()?;
            Value::Container(Container::Nodes(nodes))
        }
        (ValueKind::Container, Literal::Value(Value::Container(c))) => Value::Container(c),
        (ValueKind::Container, Literal::Value(Value::Text(t))) => {
            Value::Container(Container::Text(t))
        }
        (ValueKind::Container, literal) => match literal.into_display_string() {
            Ok(s) => {
                let text = Text::with_encoding(s, registry.text_encoding())?;
                Value::Container(Container::Text(text))
            }
            Err(literal) => return Err(mismatch(&literal)),
        },

        (ValueKind::Scalar(kind), literal) => Value::Scalar(match literal {
            Literal::Int(v) => Scalar::new(kind, v)?,
            Literal::Bool(v) => Scalar::new(kind, v as i128)?,
            Literal::Str(s) => Scalar::parse(kind, &s)?,
            Literal::Value(Value::Scalar(s)) => Scalar::new(kind, s.value())?,
            other => {
                return Err(CodecError::NotNumeric {
                    kind: kind.name(),
                    input: other.describe().to_string(),
                })
            }
        }),

        (ValueKind::Multi(kind), Literal::Tuple(values)) => {
            Value::Multi(MultiScalar::new(kind, values)?)
        }
        (ValueKind::Multi(kind), Literal::Int(v)) => Value::Multi(MultiScalar::new(kind, [v])?),
        (ValueKind::Multi(kind), Literal::Value(Value::Multi(m))) => {
            Value::Multi(MultiScalar::new(kind, m.values().iter().map(|s| s.value()))?)
        }

        (ValueKind::Timestamp, Literal::Time(instant)) => {
            Value::Timestamp(Timestamp::new(instant)?)
        }
        (ValueKind::Timestamp, Literal::Int(seconds)) => {
            let seconds = i32::try_from(seconds).map_err(|_| CodecError::Range {
                kind: "DateTime",
                value: seconds,
                min: i32::MIN.into(),
                max: i32::MAX.into(),
            })?;
            Value::Timestamp(Timestamp::from_epoch_seconds(seconds)?)
        }
        (ValueKind::Timestamp, Literal::Value(Value::Timestamp(t))) => Value::Timestamp(t),

        (ValueKind::Version, Literal::Tuple(parts)) => Value::Version(version_from_parts(&parts)?),
        (ValueKind::Version, Literal::Value(Value::Version(v))) => Value::Version(v),

        (ValueKind::Text, Literal::Str(s)) => {
            Value::Text(Text::with_encoding(s, registry.text_encoding())?)
        }
        (ValueKind::Text, Literal::Value(Value::Text(t))) => Value::Text(t),

        (ValueKind::Binary, Literal::Bytes(b)) => Value::Binary(Binary::new(b)),
        (ValueKind::Binary, Literal::Str(s)) => Value::Binary(Binary::new(s.into_bytes())),
        (ValueKind::Binary, Literal::Value(Value::Binary(b))) => Value::Binary(b),

        (_, literal) => return Err(mismatch(&literal)),
    })
}

fn version_from_parts(parts: &[i128]) -> Result<Version, CodecError> {
    let [major, minor, point, build] = parts else {
        return Err(CodecError::LiteralMismatch {
            expected: "Version",
            found: "tuple of wrong length",
        });
    };
    let component = |v: i128| {
        u8::try_from(v).map_err(|_| CodecError::Range {
            kind: "Version",
            value: v,
            min: 0,
            max: u8::MAX.into(),
        })
    };
    Ok(Version::new(
        component(*major)?,
        component(*minor)?,
        component(*point)?,
        component(*build)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::ScalarKind;
    use crate::text::TextEncoding;
    use crate::value::DmapValue;
    use chrono::NaiveDate;

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn tag(code: &[u8; 4]) -> Tag {
        Tag::new(code)
    }

    mod leaves {
        use super::*;

        #[test]
        fn integer_becomes_registry_kind() {
            let registry = TagRegistry::standard();
            let node = build_node(&registry, tag(b"mstt"), 200).unwrap();
            assert_eq!(node, Node::new(tag(b"mstt"), Scalar::uint(200)));
            assert_eq!(node.encode(), b"mstt\x00\x00\x00\x04\x00\x00\x00\xc8".to_vec());
        }

        #[test]
        fn bool_becomes_zero_or_one() {
            let registry = TagRegistry::standard();
            assert_eq!(
                registry.build(tag(b"mslr"), true).unwrap(),
                Node::new(tag(b"mslr"), Scalar::ubyte(1))
            );
            assert_eq!(
                registry.build(tag(b"mslr"), false).unwrap(),
                Node::new(tag(b"mslr"), Scalar::ubyte(0))
            );
        }

        #[test]
        fn numeric_string_is_parsed() {
            let registry = TagRegistry::standard();
            assert_eq!(
                registry.build(tag(b"mstt"), "200").unwrap().value().as_i128(),
                Some(200)
            );
            assert!(matches!(
                registry.build(tag(b"mstt"), "two hundred"),
                Err(CodecError::NotNumeric { kind: "UInt", .. })
            ));
        }

        #[test]
        fn out_of_range_integer_fails() {
            let registry = TagRegistry::standard();
            assert!(matches!(
                registry.build(tag(b"msup"), 256),
                Err(CodecError::Range { kind: "UByte", .. })
            ));
        }

        #[test]
        fn existing_scalar_is_rekinded() {
            let registry = TagRegistry::standard();
            let node = registry.build(tag(b"musr"), Scalar::ushort(64)).unwrap();
            assert_eq!(node.value(), &Value::Scalar(Scalar::uint(64)));
        }

        #[test]
        fn tuple_becomes_version() {
            let registry = TagRegistry::standard();
            let node = registry.build(tag(b"mpro"), (2, 0, 6, 0)).unwrap();
            assert_eq!(node.value(), &Value::Version(Version::new(2, 0, 6, 0)));
            assert!(registry.build(tag(b"mpro"), vec![1i128, 2]).is_err());
            assert!(matches!(
                registry.build(tag(b"mpro"), vec![1i128, 2, 3, 300]),
                Err(CodecError::Range { kind: "Version", .. })
            ));
        }

        #[test]
        fn tuple_becomes_multi() {
            let registry = TagRegistry::standard();
            let node = registry.build(tag(b"canp"), vec![1i128, 2, 3, 4]).unwrap();
            assert_eq!(node.encoded_len(), 8 + 16);
        }

        #[test]
        fn datetime_and_absent_time() {
            let registry = TagRegistry::standard();
            let instant = datetime(2010, 3, 12, 12, 46, 10);
            let node = registry.build(tag(b"mstc"), instant).unwrap();
            assert_eq!(node.value(), &Value::Timestamp(Timestamp::new(Some(instant)).unwrap()));

            let node = registry.build(tag(b"mstc"), Literal::Time(None)).unwrap();
            assert_eq!(node.encode()[8..], b"\xff\xff\x9d\x90"[..]);
        }

        #[test]
        fn string_becomes_binary_for_binary_tags() {
            let registry = TagRegistry::standard();
            let node = registry.build(tag(b"ceWM"), "").unwrap();
            assert_eq!(node.value(), &Value::Binary(Binary::default()));
        }

        #[test]
        fn mismatched_literal_is_rejected() {
            let registry = TagRegistry::standard();
            assert!(matches!(
                registry.build(tag(b"minm"), 5),
                Err(CodecError::LiteralMismatch { expected: "String", found: "integer" })
            ));
            assert!(matches!(
                registry.build(tag(b"mstt"), Literal::Bytes(vec![1])),
                Err(CodecError::NotNumeric { .. })
            ));
        }

        #[test]
        fn unknown_tag_fails() {
            let registry = TagRegistry::standard();
            assert_eq!(
                registry.build(tag(b"zzzz"), 1).unwrap_err(),
                CodecError::UnknownTag(tag(b"zzzz"))
            );
        }
    }

    mod containers {
        use super::*;

        #[test]
        fn deferred_values_are_invoked() {
            let registry = TagRegistry::standard();
            let node = registry
                .build(tag(b"mstt"), Literal::deferred(|| Literal::from(200)))
                .unwrap();
            assert_eq!(node.value().as_i128(), Some(200));

            let nested = Literal::deferred(|| Literal::deferred(|| Literal::from("Foo")));
            assert_eq!(registry.build(tag(b"minm"), nested).unwrap().value().as_str(), Some("Foo"));
        }

        #[test]
        fn non_list_container_holds_text() {
            let registry = TagRegistry::standard();
            let node = registry.build(tag(b"mlit"), "Foo").unwrap();
            assert_eq!(node, Node::new(tag(b"mlit"), Container::Text(Text::new("Foo"))));
            assert_eq!(node.encode(), b"mlit\x00\x00\x00\x03Foo".to_vec());
        }

        #[test]
        fn non_list_literals_fill_containers_as_text() {
            let registry = TagRegistry::standard();

            let node = registry.build(tag(b"mlit"), 5).unwrap();
            assert_eq!(node.value().as_str(), Some("5"));
            assert_eq!(node.encode(), b"mlit\x00\x00\x00\x015".to_vec());

            assert_eq!(registry.build(tag(b"mlit"), true).unwrap().value().as_str(), Some("true"));
            assert_eq!(
                registry.build(tag(b"mlit"), vec![1i128, 2]).unwrap().value().as_str(),
                Some("(1, 2)")
            );
            assert!(matches!(
                registry.build(tag(b"mlit"), Literal::Bytes(vec![1])),
                Err(CodecError::LiteralMismatch { expected: "Container", found: "bytes" })
            ));
        }

        #[test]
        fn container_text_uses_registry_encoding() {
            let registry = TagRegistry::standard().with_text_encoding(TextEncoding::Utf16Le);
            let node = registry.build(tag(b"mlit"), "Foo").unwrap();
            assert_eq!(node.encode(), b"mlit\x00\x00\x00\x06F\x00o\x00o\x00".to_vec());

            let registry = TagRegistry::standard().with_text_encoding(TextEncoding::Latin1);
            assert!(matches!(
                registry.build(tag(b"mlit"), "\u{263a}"),
                Err(CodecError::Encoding { .. })
            ));
        }

        #[test]
        fn unknown_tag_inside_list_fails() {
            let registry = TagRegistry::standard();
            let result = registry.build(
                tag(b"msrv"),
                Literal::list([(b"mstt", Literal::from(200)), (b"zzzz", Literal::from(1))]),
            );
            assert_eq!(result.unwrap_err(), CodecError::UnknownTag(tag(b"zzzz")));
        }

        #[test]
        fn builder_matches_manual_construction() {
            let registry = TagRegistry::standard();
            let instant = datetime(2010, 3, 12, 12, 46, 10);

            let built = registry
                .build(
                    tag(b"msrv"),
                    Literal::list([
                        (b"mstt", Literal::deferred(|| Literal::from(200))),
                        (b"mpro", Literal::from((2, 0, 6, 0))),
                        (b"musr", Literal::from(Scalar::ushort(64))),
                        (b"msed", Literal::from(true)),
                        (
                            b"msml",
                            Literal::list([
                                (b"msma", Literal::from(71359108752128u64)),
                                (b"msma", Literal::from(1102738509824u64)),
                                (b"msma", Literal::from(8799319904256u64)),
                            ]),
                        ),
                        (b"mlit", Literal::from("Foo")),
                        (b"ceWM", Literal::from("")),
                        (b"minm", Literal::from("Zem's Library")),
                        (b"mstm", Literal::from(1800)),
                        (b"mstc", Literal::from(instant)),
                    ]),
                )
                .unwrap();

            let manual = Node::new(
                tag(b"msrv"),
                Container::Nodes(vec![
                    Node::new(tag(b"mstt"), Scalar::uint(200)),
                    Node::new(tag(b"mpro"), Version::new(2, 0, 6, 0)),
                    Node::new(tag(b"musr"), Scalar::uint(64)),
                    Node::new(tag(b"msed"), Scalar::ubyte(1)),
                    Node::new(
                        tag(b"msml"),
                        Container::Nodes(vec![
                            Node::new(tag(b"msma"), Scalar::ulong(71359108752128)),
                            Node::new(tag(b"msma"), Scalar::ulong(1102738509824)),
                            Node::new(tag(b"msma"), Scalar::ulong(8799319904256)),
                        ]),
                    ),
                    Node::new(tag(b"mlit"), Container::Text(Text::new("Foo"))),
                    Node::new(tag(b"ceWM"), Binary::default()),
                    Node::new(tag(b"minm"), Text::new("Zem's Library")),
                    Node::new(tag(b"mstm"), Scalar::uint(1800)),
                    Node::new(tag(b"mstc"), Timestamp::new(Some(instant)).unwrap()),
                ]),
            );

            assert_eq!(built, manual);
            assert_eq!(built.encode(), manual.encode());
            assert_eq!(
                built.value().kind(),
                ValueKind::Container,
            );
            assert_eq!(
                registry.resolve(tag(b"msma")).unwrap().kind,
                ValueKind::Scalar(ScalarKind::ULong)
            );
        }
    }
}
