use std::fmt;

use serde::de::{Error, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{Node, NodeMapping, RawTimestamp};

/// Custom deserializer for `create_time` that accepts numbers, numeric strings and null
///
/// The original text of the value is kept in [`RawTimestamp::raw`].
pub fn deserialize_create_time<'de, D>(deserializer: D) -> Result<Option<RawTimestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let seconds = n.as_f64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            Ok(Some(RawTimestamp { raw: n.to_string(), seconds }))
        }
        Value::String(s) => {
            let seconds = s
                .trim()
                .parse::<f64>()
                .map_err(|e| Error::custom(format!("invalid numeric timestamp: {}", e)))?;
            Ok(Some(RawTimestamp { raw: s, seconds }))
        }
        _ => Err(Error::custom("timestamp must be a number, string or null")),
    }
}

/// Custom deserializer for the `mapping` object that keeps node order and
/// treats each key as the authoritative node id
pub fn deserialize_node_mapping<'de, D>(deserializer: D) -> Result<NodeMapping, D::Error>
where
    D: Deserializer<'de>,
{
    struct MappingVisitor;

    impl<'de> Visitor<'de> for MappingVisitor {
        type Value = NodeMapping;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an object of node id to node")
        }

        fn visit_map<A>(self, mut map: A) -> Result<NodeMapping, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut mapping = NodeMapping::new();
            while let Some((id, mut node)) = map.next_entry::<String, Node>()? {
                node.id = id;
                mapping.insert(node);
            }
            Ok(mapping)
        }

        fn visit_unit<E: Error>(self) -> Result<NodeMapping, E> {
            Ok(NodeMapping::new())
        }
    }

    deserializer.deserialize_any(MappingVisitor)
}
