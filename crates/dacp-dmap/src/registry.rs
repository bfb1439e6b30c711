//! Tag to (display name, value kind) lookup.
//!
//! The registry is plain data handed to the decoder and builder. Build one from the
//! standard table, extend it tag by tag, or load extra tags from JSON:
//!
//! ```json
//! { "msrv": ["dmap.serverinforesponse", "Container"], "mstt": ["dmap.status", "UInt"] }
//! ```

use crate::tags::STANDARD_TAGS;
use crate::text::TextEncoding;
use crate::value::ValueKind;
use dacp_core::{CodecError, Tag};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

/// Registry entry for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    /// Dotted display name such as `dmap.status`; may be empty.
    pub name: String,
    pub kind: ValueKind,
}

#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: HashMap<Tag, TagInfo>,
    text_encoding: TextEncoding,
}

/// `["display name", "Kind"]` as it appears in registry JSON.
#[derive(Deserialize)]
struct TagEntry(String, String);

impl TagRegistry {
    /// Empty registry decoding text as UTF-8.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in DMAP, DAAP and DACP tags.
    pub fn standard() -> Self {
        let tags = STANDARD_TAGS
            .iter()
            .map(|(tag, name, kind)| {
                (
                    Tag::new(tag),
                    TagInfo {
                        name: name.to_string(),
                        kind: *kind,
                    },
                )
            })
            .collect();
        Self {
            tags,
            text_encoding: TextEncoding::Utf8,
        }
    }

    /// Parse a registry from JSON.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let mut registry = Self::new();
        registry.extend_from_json(json)?;
        Ok(registry)
    }

    /// Add or replace tags from JSON. On error the registry is left unchanged.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, CodecError> {
        let entries: HashMap<String, TagEntry> =
            serde_json::from_str(json).map_err(|e| CodecError::Config(e.to_string()))?;

        let parsed = entries
            .into_iter()
            .map(|(tag, TagEntry(name, kind_name))| -> Result<(Tag, TagInfo), CodecError> {
                let tag = Tag::from_str(&tag)?;
                let kind = ValueKind::from_type_name(&kind_name).ok_or_else(|| {
                    CodecError::Config(format!(
                        "unknown value type {:?} for tag '{}'",
                        kind_name, tag
                    ))
                })?;
                Ok((tag, TagInfo { name, kind }))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let count = parsed.len();
        self.tags.extend(parsed);
        debug!("Loaded {} tags into registry ({} total)", count, self.tags.len());
        Ok(count)
    }

    pub fn with_tag(mut self, tag: Tag, name: impl Into<String>, kind: ValueKind) -> Self {
        self.insert(tag, name, kind);
        self
    }

    pub fn insert(
        &mut self,
        tag: Tag,
        name: impl Into<String>,
        kind: ValueKind,
    ) -> Option<TagInfo> {
        self.tags.insert(
            tag,
            TagInfo {
                name: name.into(),
                kind,
            },
        )
    }

    /// Encoding used for text leaves and text-form containers when decoding.
    pub fn with_text_encoding(mut self, encoding: TextEncoding) -> Self {
        self.text_encoding = encoding;
        self
    }

    pub fn text_encoding(&self) -> TextEncoding {
        self.text_encoding
    }

    pub fn resolve(&self, tag: Tag) -> Result<&TagInfo, CodecError> {
        self.tags.get(&tag).ok_or(CodecError::UnknownTag(tag))
    }

    pub fn display_name(&self, tag: Tag) -> Option<&str> {
        self.tags.get(&tag).map(|info| info.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
