//! # The document model
//!
//! This module mirrors the JSON serialization of the editor's nodes and marks.
//! Parsing is total: every JSON value maps to some [`Node`], and whatever the
//! model does not understand degrades to an empty or unknown value instead of
//! an error.
pub mod de;
mod text;

pub use text::{character_count, plain_text, word_count};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Type-specific attributes of a node or mark
pub type Attrs = Map<String, Value>;

/// An ordered sequence of child nodes
pub type Fragment = Vec<Node>;

/// The heading level used when a heading has none (or an invalid one)
pub const DEFAULT_HEADING_LEVEL: u8 = 2;

/// The kind of a node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeType {
    Doc,
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    Blockquote,
    CodeBlock,
    Image,
    Text,
    HardBreak,
    /// A node type from a newer editor, kept by name
    Unknown(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Doc => "doc",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::BulletList => "bulletList",
            Self::OrderedList => "orderedList",
            Self::ListItem => "listItem",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "codeBlock",
            Self::Image => "image",
            Self::Text => "text",
            Self::HardBreak => "hardBreak",
            Self::Unknown(name) => name,
        }
    }

    /// Leaf kinds never carry `content`
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Text | Self::Image | Self::HardBreak)
    }

    /// Blocks whose children are inline content
    pub fn is_textblock(&self) -> bool {
        matches!(self, Self::Paragraph | Self::Heading | Self::CodeBlock)
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Text | Self::HardBreak)
    }
}

impl From<&str> for NodeType {
    fn from(name: &str) -> Self {
        match name {
            "doc" | "document" => Self::Doc,
            "paragraph" => Self::Paragraph,
            "heading" => Self::Heading,
            "bulletList" => Self::BulletList,
            "orderedList" => Self::OrderedList,
            "listItem" => Self::ListItem,
            "blockquote" => Self::Blockquote,
            "codeBlock" => Self::CodeBlock,
            "image" => Self::Image,
            "text" => Self::Text,
            "hardBreak" => Self::HardBreak,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a mark
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkType {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    Link,
    Unknown(String),
}

impl MarkType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strike => "strike",
            Self::Code => "code",
            Self::Link => "link",
            Self::Unknown(name) => name,
        }
    }
}

impl From<&str> for MarkType {
    fn from(name: &str) -> Self {
        match name {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "strike" => Self::Strike,
            "code" => Self::Code,
            "link" => Self::Link,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl fmt::Display for MarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes of an `image` node
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImageAttrs {
    #[serde(deserialize_with = "de::string_or_default")]
    pub src: String,
    #[serde(deserialize_with = "de::string_or_none")]
    pub alt: Option<String>,
    #[serde(deserialize_with = "de::string_or_none")]
    pub title: Option<String>,
}

impl ImageAttrs {
    pub fn new<S: Into<String>>(src: S) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    pub fn from_attrs(attrs: &Attrs) -> Self {
        serde_json::from_value(Value::Object(attrs.clone())).unwrap_or_default()
    }

    pub fn to_attrs(&self) -> Attrs {
        let mut attrs = Attrs::new();
        attrs.insert("src".into(), Value::from(self.src.as_str()));
        if let Some(alt) = &self.alt {
            attrs.insert("alt".into(), Value::from(alt.as_str()));
        }
        if let Some(title) = &self.title {
            attrs.insert("title".into(), Value::from(title.as_str()));
        }
        attrs
    }
}

/// Attributes of a `link` mark
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinkAttrs {
    #[serde(deserialize_with = "de::string_or_default")]
    pub href: String,
    #[serde(deserialize_with = "de::string_or_none")]
    pub target: Option<String>,
    #[serde(deserialize_with = "de::string_or_none")]
    pub rel: Option<String>,
}

impl LinkAttrs {
    pub fn new<S: Into<String>>(href: S) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }

    pub fn from_attrs(attrs: &Attrs) -> Self {
        serde_json::from_value(Value::Object(attrs.clone())).unwrap_or_default()
    }

    pub fn to_attrs(&self) -> Attrs {
        let mut attrs = Attrs::new();
        attrs.insert("href".into(), Value::from(self.href.as_str()));
        if let Some(target) = &self.target {
            attrs.insert("target".into(), Value::from(target.as_str()));
        }
        if let Some(rel) = &self.rel {
            attrs.insert("rel".into(), Value::from(rel.as_str()));
        }
        attrs
    }

    /// Whether `rel` asks search engines not to follow the link
    pub fn is_nofollow(&self) -> bool {
        self.rel
            .as_deref()
            .map_or(false, |rel| rel.split_whitespace().any(|t| t == "nofollow"))
    }
}

/// An inline formatting annotation on a text node
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub kind: MarkType,
    pub attrs: Attrs,
}

impl Mark {
    pub fn new(kind: MarkType) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
        }
    }

    pub fn link(attrs: &LinkAttrs) -> Self {
        Self {
            kind: MarkType::Link,
            attrs: attrs.to_attrs(),
        }
    }

    pub fn link_attrs(&self) -> LinkAttrs {
        LinkAttrs::from_attrs(&self.attrs)
    }

    /// Anything that is not an object is not a mark
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            kind: MarkType::from(de::str_field(map, "type").unwrap_or_default()),
            attrs: de::object_field(map, "attrs"),
        })
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::from(self.kind.as_str()));
        if !self.attrs.is_empty() {
            map.insert("attrs".into(), Value::Object(self.attrs.clone()));
        }
        Value::Object(map)
    }
}

/// One element of the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeType,
    pub attrs: Attrs,
    pub content: Fragment,
    /// Only set on text nodes
    pub text: Option<String>,
    /// Only set on text nodes, applied in order
    pub marks: Vec<Mark>,
}

impl Default for Node {
    fn default() -> Self {
        Self::empty_doc()
    }
}

impl Node {
    pub fn new(kind: NodeType) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
            content: Fragment::new(),
            text: None,
            marks: Vec::new(),
        }
    }

    /// The tree every editing session starts with
    pub fn empty_doc() -> Self {
        Self::new(NodeType::Doc)
    }

    pub fn with_content(kind: NodeType, content: Fragment) -> Self {
        Self {
            content,
            ..Self::new(kind)
        }
    }

    pub fn doc(content: Fragment) -> Self {
        Self::with_content(NodeType::Doc, content)
    }

    pub fn paragraph(content: Fragment) -> Self {
        Self::with_content(NodeType::Paragraph, content)
    }

    pub fn heading(level: u8, content: Fragment) -> Self {
        let mut node = Self::with_content(NodeType::Heading, content);
        node.attrs.insert("level".into(), Value::from(level));
        node
    }

    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::marked_text(text, Vec::new())
    }

    pub fn marked_text<S: Into<String>>(text: S, marks: Vec<Mark>) -> Self {
        Self {
            text: Some(text.into()),
            marks,
            ..Self::new(NodeType::Text)
        }
    }

    pub fn image(attrs: &ImageAttrs) -> Self {
        Self {
            attrs: attrs.to_attrs(),
            ..Self::new(NodeType::Image)
        }
    }

    pub fn hard_break() -> Self {
        Self::new(NodeType::HardBreak)
    }

    /// The heading level, if it is present and within `1..=6`
    pub fn heading_level(&self) -> Option<u8> {
        de::int_field(&self.attrs, "level")
            .filter(|level| (1..=6).contains(level))
            .map(|level| level as u8)
    }

    pub fn image_attrs(&self) -> ImageAttrs {
        ImageAttrs::from_attrs(&self.attrs)
    }

    pub fn text_str(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Size of this node when counted as inline content of a textblock
    pub fn inline_len(&self) -> usize {
        match self.kind {
            NodeType::Text => self.text_str().chars().count(),
            _ => 1,
        }
    }

    pub fn has_mark(&self, kind: &MarkType) -> bool {
        self.marks.iter().any(|m| &m.kind == kind)
    }

    /// Parse a node from loosely typed JSON; never fails
    pub fn from_value(value: &Value) -> Self {
        let map = match value.as_object() {
            Some(map) => map,
            None => return Self::new(NodeType::Unknown(String::new())),
        };
        let kind = NodeType::from(de::str_field(map, "type").unwrap_or_default());
        let mut node = Self {
            attrs: de::object_field(map, "attrs"),
            ..Self::new(kind)
        };
        if !node.kind.is_leaf() {
            node.content = de::array_field(map, "content")
                .iter()
                .filter(|child| child.is_object())
                .map(Self::from_value)
                .collect();
        }
        if node.kind == NodeType::Text {
            node.text = Some(de::str_field(map, "text").unwrap_or_default().to_owned());
            node.marks = de::array_field(map, "marks")
                .iter()
                .filter_map(Mark::from_value)
                .collect();
        }
        node
    }

    /// The canonical JSON form; absent and empty fields are omitted
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::from(self.kind.as_str()));
        if !self.attrs.is_empty() {
            map.insert("attrs".into(), Value::Object(self.attrs.clone()));
        }
        if !self.content.is_empty() {
            let content = self.content.iter().map(Self::to_value).collect();
            map.insert("content".into(), Value::Array(content));
        }
        if let Some(text) = &self.text {
            map.insert("text".into(), Value::from(text.as_str()));
        }
        if !self.marks.is_empty() {
            let marks = self.marks.iter().map(Mark::to_value).collect();
            map.insert("marks".into(), Value::Array(marks));
        }
        Value::Object(map)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
