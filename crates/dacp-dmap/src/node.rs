//! The recursive tag/length/value tree.
//!
//! Wire grammar:
//!
//! ```text
//! Node      := tag (4 bytes) || length (i32, big-endian) || value (length bytes)
//! Container := Node* | Text
//! ```
//!
//! A container payload is either a list of nodes or a single string, never a mix. The
//! decoder tries the node form first and falls back to text when the very first node
//! header cannot be parsed.
//!
//! Nesting depth is bounded only by the buffer, so decoding, encoding, printing and
//! dropping walk the tree with explicit stacks instead of recursing.

use crate::binary::Binary;
use crate::registry::TagRegistry;
use crate::text::Text;
use crate::value::{DmapValue, Value, ValueKind};
use dacp_core::{CodecError, Tag};
use std::mem;
use tracing::{debug, trace};

/// Size of the tag plus length header preceding every node payload.
pub const HEADER_LEN: usize = 8;

/// A tag-value pair, the fundamental building block of a DMAP message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: Tag,
    value: Value,
}

/// Value of a container tag: nested nodes or a single string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    Text(Text),
    Nodes(Vec<Node>),
}

/// One entry returned by `Node::children_with_tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child<'a> {
    /// A leaf child, exposed by its value.
    Leaf(&'a Value),
    /// A container child, exposed as the node itself so lookups can continue.
    Branch(&'a Node),
}

impl Node {
    pub fn new(tag: Tag, value: impl Into<Value>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Decode one node from the front of `data`.
    ///
    /// Returns the node and the number of bytes it occupied. Tags missing from the
    /// registry decode as `Binary`.
    pub fn decode(data: &[u8], registry: &TagRegistry) -> Result<(Self, usize), CodecError> {
        let (tag, payload) = read_header(data)?;
        let value = match registry.resolve(tag) {
            Ok(info) => Value::decode(info.kind, payload, registry)?,
            Err(_) => unknown_value(tag, payload),
        };
        Ok((Self { tag, value }, HEADER_LEN + payload.len()))
    }

    /// Whether this node is a container with an immediate child tagged `tag`.
    pub fn contains(&self, tag: Tag) -> bool {
        self.value.as_container().is_some_and(|c| c.contains(tag))
    }

    /// Ordered values of the immediate children tagged `tag`.
    ///
    /// Fails with `CodecError::NotFound` when there is no such child, including when
    /// this node is not a list container.
    pub fn children_with_tag(&self, tag: Tag) -> Result<Vec<Child<'_>>, CodecError> {
        let children: Vec<Child<'_>> = self
            .value
            .as_container()
            .map(|c| c.children())
            .unwrap_or_default()
            .iter()
            .filter(|node| node.tag == tag)
            .map(|node| match &node.value {
                Value::Container(_) => Child::Branch(node),
                value => Child::Leaf(value),
            })
            .collect();

        if children.is_empty() {
            return Err(CodecError::NotFound(tag));
        }
        Ok(children)
    }

    /// First child tagged `tag`.
    pub fn first_child(&self, tag: Tag) -> Result<Child<'_>, CodecError> {
        self.children_with_tag(tag).map(|children| children[0])
    }

    /// Render the tree with registry display names, one node per line.
    pub fn pretty(&self, registry: &TagRegistry) -> String {
        let mut out = String::new();
        write_pretty(std::slice::from_ref(self), registry, 0, &mut out);
        out
    }

    fn label(&self, registry: &TagRegistry) -> String {
        match registry.display_name(self.tag) {
            Some(name) if !name.is_empty() => format!("{} ({})", self.tag, name),
            _ => self.tag.to_string(),
        }
    }
}

impl DmapValue for Node {
    fn encoded_len(&self) -> usize {
        nodes_len(std::slice::from_ref(self))
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        encode_nodes(std::slice::from_ref(self), out);
    }

    fn pretty(&self) -> String {
        self.pretty(&TagRegistry::new())
    }
}

impl Container {
    /// Decode a container payload.
    ///
    /// Nodes are read front to back until the buffer is consumed. If the first node
    /// fails to parse, the whole buffer is read as text instead; a failure after at
    /// least one node has been read is handed to the enclosing list, which applies
    /// the same rule.
    pub fn decode(data: &[u8], registry: &TagRegistry) -> Result<Self, CodecError> {
        // Enclosing lists, each with the tag of the child list being read
        let mut open: Vec<(Frame<'_>, Tag)> = Vec::new();
        let mut frame = Frame::new(data);

        loop {
            let mut closed = if frame.is_complete() {
                Ok(Container::Nodes(mem::take(&mut frame.nodes)))
            } else {
                match decode_child(frame.remaining(), registry) {
                    Ok(Decoded::Leaf(node, consumed)) => {
                        frame.push(node, consumed);
                        continue;
                    }
                    Ok(Decoded::List(tag, payload)) => {
                        let parent = mem::replace(&mut frame, Frame::new(payload));
                        open.push((parent, tag));
                        continue;
                    }
                    Err(e) => frame.fall_back(e, registry),
                }
            };

            // Hand the finished list to its parent, unwinding while errors propagate
            loop {
                let Some((parent, tag)) = open.pop() else {
                    return closed;
                };
                let child = mem::replace(&mut frame, parent);
                match closed {
                    Ok(container) => {
                        let node = Node {
                            tag,
                            value: Value::Container(container),
                        };
                        frame.push(node, HEADER_LEN + child.payload.len());
                        break;
                    }
                    Err(e) => closed = frame.fall_back(e, registry),
                }
            }
        }
    }

    /// Immediate child nodes; empty for the text form.
    pub fn children(&self) -> &[Node] {
        match self {
            Container::Nodes(nodes) => nodes,
            Container::Text(_) => &[],
        }
    }

    /// Whether an immediate child is tagged `tag`. Always false for the text form.
    pub fn contains(&self, tag: Tag) -> bool {
        self.children().iter().any(|node| node.tag == tag)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children().iter()
    }

    /// Render every child with registry display names, indented by `depth` levels.
    pub fn pretty_with(&self, registry: &TagRegistry, depth: usize) -> String {
        let mut out = String::new();
        match self {
            Container::Text(text) => write_text(text, depth, &mut out),
            Container::Nodes(nodes) => write_pretty(nodes, registry, depth, &mut out),
        }
        out
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        let Container::Nodes(nodes) = self else {
            return;
        };
        let mut pending = mem::take(nodes);
        while let Some(mut node) = pending.pop() {
            if let Value::Container(Container::Nodes(children)) = &mut node.value {
                pending.append(children);
            }
        }
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Node>> for Container {
    fn from(nodes: Vec<Node>) -> Self {
        Container::Nodes(nodes)
    }
}

impl DmapValue for Container {
    fn encoded_len(&self) -> usize {
        match self {
            Container::Text(text) => text.encoded_len(),
            Container::Nodes(nodes) => nodes_len(nodes),
        }
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            Container::Text(text) => text.encode_into(out),
            Container::Nodes(nodes) => encode_nodes(nodes, out),
        }
    }

    fn pretty(&self) -> String {
        self.pretty_with(&TagRegistry::new(), 0)
    }
}

impl<'a> Child<'a> {
    pub fn as_node(&self) -> Option<&'a Node> {
        match self {
            Child::Branch(node) => Some(node),
            Child::Leaf(_) => None,
        }
    }

    pub fn value(&self) -> &'a Value {
        match self {
            Child::Leaf(value) => value,
            Child::Branch(node) => &node.value,
        }
    }

    pub fn as_i128(&self) -> Option<i128> {
        self.value().as_i128()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.value().as_u64()
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.value().as_str()
    }
}

/// A list container being decoded.
struct Frame<'a> {
    payload: &'a [u8],
    pos: usize,
    nodes: Vec<Node>,
}

impl<'a> Frame<'a> {
    fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            pos: 0,
            nodes: Vec::new(),
        }
    }

    fn is_complete(&self) -> bool {
        self.pos == self.payload.len()
    }

    fn remaining(&self) -> &'a [u8] {
        &self.payload[self.pos..]
    }

    fn push(&mut self, node: Node, consumed: usize) {
        self.nodes.push(node);
        self.pos += consumed;
    }

    /// Read the payload as text if `err` hit the very first child.
    fn fall_back(&self, err: CodecError, registry: &TagRegistry) -> Result<Container, CodecError> {
        if self.pos == 0 && err.is_structural() {
            trace!("Container payload is not a node list ({}), reading as text", err);
            Ok(Container::Text(Text::decode(self.payload, registry.text_encoding())?))
        } else {
            Err(err)
        }
    }
}

enum Decoded<'a> {
    Leaf(Node, usize),
    /// A list container header; its payload is decoded next.
    List(Tag, &'a [u8]),
}

fn read_header(data: &[u8]) -> Result<(Tag, &[u8]), CodecError> {
    if data.len() < HEADER_LEN {
        return Err(CodecError::Truncated {
            what: "tag header".to_string(),
            needed: HEADER_LEN,
            available: data.len(),
        });
    }

    let tag = Tag::from_bytes([data[0], data[1], data[2], data[3]]);
    let length = i32::from_be_bytes([data[4], data[5], data[6], data[7]]);
    let length = usize::try_from(length).map_err(|_| CodecError::Malformed {
        tag,
        reason: format!("negative length {}", length),
    })?;

    let payload = &data[HEADER_LEN..];
    if payload.len() < length {
        return Err(CodecError::Truncated {
            what: format!("'{}' payload", tag),
            needed: length,
            available: payload.len(),
        });
    }
    Ok((tag, &payload[..length]))
}

fn decode_child<'a>(data: &'a [u8], registry: &TagRegistry) -> Result<Decoded<'a>, CodecError> {
    let (tag, payload) = read_header(data)?;
    let value = match registry.resolve(tag) {
        Ok(info) if info.kind == ValueKind::Container => return Ok(Decoded::List(tag, payload)),
        Ok(info) => Value::decode(info.kind, payload, registry)?,
        Err(_) => unknown_value(tag, payload),
    };
    Ok(Decoded::Leaf(Node { tag, value }, HEADER_LEN + payload.len()))
}

fn unknown_value(tag: Tag, payload: &[u8]) -> Value {
    debug!("Unknown tag '{}', keeping {} bytes as binary", tag, payload.len());
    Value::Binary(Binary::decode(payload))
}

fn nodes_len(nodes: &[Node]) -> usize {
    let mut total = 0;
    let mut pending: Vec<&Node> = nodes.iter().collect();
    while let Some(node) = pending.pop() {
        total += HEADER_LEN;
        match &node.value {
            Value::Container(Container::Nodes(children)) => pending.extend(children),
            value => total += value.encoded_len(),
        }
    }
    total
}

fn encode_nodes(nodes: &[Node], out: &mut Vec<u8>) {
    enum Step<'a> {
        Open(&'a Node),
        /// Backfill the length field at this offset.
        Close(usize),
    }

    let mut pending: Vec<Step<'_>> = nodes.iter().rev().map(Step::Open).collect();
    while let Some(step) = pending.pop() {
        match step {
            Step::Open(node) => {
                out.extend_from_slice(node.tag.as_bytes());
                let length_at = out.len();
                out.extend_from_slice(&[0; 4]);
                match &node.value {
                    Value::Container(Container::Nodes(children)) => {
                        pending.push(Step::Close(length_at));
                        pending.extend(children.iter().rev().map(Step::Open));
                    }
                    value => {
                        value.encode_into(out);
                        patch_length(out, length_at);
                    }
                }
            }
            Step::Close(length_at) => patch_length(out, length_at),
        }
    }
}

fn patch_length(out: &mut [u8], length_at: usize) {
    // Lengths above i32::MAX are not representable on the wire
    let length = (out.len() - length_at - 4) as u32;
    out[length_at..length_at + 4].copy_from_slice(&length.to_be_bytes());
}

fn write_pretty(nodes: &[Node], registry: &TagRegistry, depth: usize, out: &mut String) {
    let mut pending: Vec<(&Node, usize)> = nodes.iter().rev().map(|n| (n, depth)).collect();
    while let Some((node, depth)) = pending.pop() {
        out.push_str(&" ".repeat(depth * 4));
        out.push_str(&node.label(registry));
        match &node.value {
            Value::Container(Container::Text(text)) => {
                out.push_str(" --+\n");
                write_text(text, depth + 1, out);
            }
            Value::Container(Container::Nodes(children)) => {
                out.push_str(" --+\n");
                pending.extend(children.iter().rev().map(|c| (c, depth + 1)));
            }
            value => {
                out.push_str(" = ");
                out.push_str(&value.pretty());
                out.push('\n');
            }
        }
    }
}

fn write_text(text: &Text, depth: usize, out: &mut String) {
    out.push_str(&" ".repeat(depth * 4));
    out.push_str(&text.to_string());
    out.push('\n');
}
