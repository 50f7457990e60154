use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_create_time")]
    pub create_time: Option<RawTimestamp>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_node_mapping")]
    pub mapping: NodeMapping,
}

impl Conversation {
    /// Identifier assigned by the exporter, if any
    pub fn export_id(&self) -> Option<&str> {
        self.conversation_id.as_deref().or(self.id.as_deref())
    }
}

/// A `create_time` value as it appeared in the archive.
///
/// `raw` keeps the textual JSON form because the fingerprint hashes it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTimestamp {
    pub raw: String,
    pub seconds: f64,
}

impl RawTimestamp {
    pub fn from_seconds(seconds: f64) -> Self {
        let number = serde_json::Number::from_f64(seconds);
        let raw = number.map(|n| n.to_string()).unwrap_or_else(|| seconds.to_string());
        Self { raw, seconds }
    }

    /// Converts to a UTC datetime. Zero, negative and non-finite values count as missing.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if !self.seconds.is_finite() || self.seconds <= 0.0 {
            return None;
        }
        let secs = self.seconds.trunc() as i64;
        let nanos = (self.seconds.fract() * 1_000_000_000.0) as u32;
        DateTime::from_timestamp(secs, nanos)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Node {
    /// Filled from the mapping key during deserialization
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub message: Option<Message>,
}

impl Node {
    pub fn new(id: impl Into<String>, parent: Option<&str>) -> Self {
        Self { id: id.into(), parent: parent.map(str::to_string), ..Self::default() }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Node tree keyed by identifier, remembering the order nodes appeared in the archive.
#[derive(Debug, Clone, Default)]
pub struct NodeMapping {
    nodes: HashMap<String, Node>,
    order: Vec<String>,
}

impl NodeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node keyed by its `id`. A repeated id replaces the earlier node in place.
    pub fn insert(&mut self, node: Node) {
        if !self.nodes.contains_key(&node.id) {
            self.order.push(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in archive order
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// First node in archive order without a parent
    pub fn root_id(&self) -> Option<&str> {
        self.iter().find(|node| node.is_root()).map(|node| node.id.as_str())
    }
}

impl FromIterator<Node> for NodeMapping {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut mapping = NodeMapping::new();
        for node in iter {
            mapping.insert(node);
        }
        mapping
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageContent {
    #[serde(default)]
    pub parts: Option<Vec<ContentPart>>,
}

/// One entry of `content.parts`: a bare string, an object carrying `text`, or anything else.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text(String),
    Fragment { text: String },
    Other(serde_json::Value),
}

impl ContentPart {
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentPart::Text(text) | ContentPart::Fragment { text } => Some(text.as_str()),
            ContentPart::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub author: Author,
    #[serde(default)]
    pub content: Option<MessageContent>,
}

impl Message {
    pub fn role(&self) -> Role {
        self.author.role
    }

    pub fn tool_name(&self) -> Option<&str> {
        self.author.name.as_deref()
    }

    /// Plain text of every part that carries text, in order
    pub fn part_texts(&self) -> impl Iterator<Item = &str> {
        self.content
            .iter()
            .filter_map(|content| content.parts.as_ref())
            .flatten()
            .filter_map(ContentPart::text)
    }

    /// All part texts concatenated without separators
    pub fn joined_text(&self) -> String {
        self.part_texts().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_part_texts_mixed_parts() {
        let json = r#"{
            "author": {"role": "assistant"},
            "content": {"content_type": "multimodal_text", "parts": [
                "Hello ",
                {"content_type": "text", "text": "world"},
                {"content_type": "image_asset_pointer", "asset_pointer": "file-service://x"}
            ]}
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.role(), Role::Assistant);
        assert_eq!(message.part_texts().collect::<Vec<_>>(), vec!["Hello ", "world"]);
        assert_eq!(message.joined_text(), "Hello world");
    }

    #[test]
    fn test_message_unknown_role_is_other() {
        let json = r#"{"author": {"role": "system"}, "content": {"parts": [""]}}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.role(), Role::Other);
    }

    #[test]
    fn test_message_without_parts() {
        let json = r#"{"author": {"role": "tool", "name": "browser"}, "content": {"content_type": "code", "text": "x"}}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.tool_name(), Some("browser"));
        assert_eq!(message.part_texts().count(), 0);
    }

    #[test]
    fn test_node_mapping_root_is_first_parentless_node() {
        let mapping: NodeMapping = [
            Node::new("child", Some("root")),
            Node::new("root", None),
            Node::new("orphan", None),
        ]
        .into_iter()
        .collect();

        assert_eq!(mapping.root_id(), Some("root"));
        assert_eq!(mapping.len(), 3);
    }

    #[test]
    fn test_node_mapping_reinsert_keeps_position() {
        let mut mapping = NodeMapping::new();
        mapping.insert(Node::new("a", None));
        mapping.insert(Node::new("b", Some("a")));
        mapping.insert(Node::new("a", Some("b")));

        let ids: Vec<&str> = mapping.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(mapping.root_id(), None);
    }

    #[test]
    fn test_raw_timestamp_to_datetime() {
        let ts = RawTimestamp::from_seconds(1_700_000_000.0);
        let dt = ts.to_datetime().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_raw_timestamp_zero_is_missing() {
        assert!(RawTimestamp::from_seconds(0.0).to_datetime().is_none());
    }
}
