//! DMAP object model shared by DAAP and DACP.
//!
//! A DMAP message is a tree of nodes. Each node is a four-byte tag, a big-endian
//! length and a payload whose type is looked up in a `TagRegistry`.
//!
//! ```ignore
//! use dacp_dmap::{Node, TagRegistry};
//!
//! let registry = TagRegistry::standard();
//! let (node, _) = Node::decode(&body, &registry)?;
//! let guid = node.first_child("cmpg".parse()?)?.as_u64();
//! ```

mod binary;
mod builder;
mod multi;
mod node;
mod registry;
mod scalar;
mod tags;
mod text;
mod timestamp;
mod value;
mod version;

pub use binary::Binary;
pub use builder::{build_node, Literal};
pub use multi::MultiScalar;
pub use node::{Child, Container, Node, HEADER_LEN};
pub use registry::{TagInfo, TagRegistry};
pub use scalar::{Scalar, ScalarKind};
pub use tags::STANDARD_TAGS;
pub use text::{Text, TextEncoding};
pub use timestamp::{Timestamp, ABSENT_SECONDS};
pub use value::{DmapValue, Value, ValueKind};
pub use version::Version;

pub use dacp_core::{CodecError, Tag};
