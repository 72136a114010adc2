//! # CZML Documents
//!
//! A document is the ordered list of packets that makes up one CZML stream.
//! Order is significant: later packets with the same id refine earlier ones.
//! Merging is left to the consumer; this type only preserves order.

use crate::config::OutputConfig;
use crate::error::{describe, CzmlError, Result};
use crate::packet::Packet;
use serde_json::{Map, Value};

/// An ordered sequence of [`Packet`]s.
///
/// # Example
/// ```
/// use czml::document::Document;
/// use czml::packet::Packet;
///
/// let mut doc = Document::new();
/// assert_eq!(doc.dumps().unwrap(), "[]");
///
/// doc.append(Packet::document());
/// doc.append(Packet::new("abc"));
/// assert_eq!(doc.dumps().unwrap(), r#"[{"id":"document"},{"id":"abc"}]"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    packets: Vec<Packet>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, packet: Packet) {
        self.packets.push(packet);
    }

    /// Append a packet given as JSON. Anything but an object is rejected
    /// with [`CzmlError::InvalidPacketType`].
    pub fn append_value(&mut self, value: &Value) -> Result<()> {
        let packet = Packet::from_value(value)?;
        self.packets.push(packet);
        Ok(())
    }

    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn packets_mut(&mut self) -> &mut Vec<Packet> {
        &mut self.packets
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Packet> {
        self.packets.iter()
    }

    /// The document packet, if one has been appended.
    pub fn document_packet(&self) -> Option<&Packet> {
        self.packets.iter().find(|packet| packet.is_document())
    }

    /// Each packet's `data()`, produced lazily in append order.
    ///
    /// Calling this again starts a fresh pass over the packets.
    pub fn data(&self) -> impl Iterator<Item = Map<String, Value>> + '_ {
        self.packets.iter().map(Packet::data)
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.data().map(Value::Object).collect())
    }

    pub fn dumps(&self) -> Result<String> {
        self.dumps_with(&OutputConfig::default())
    }

    /// Serialize with the given output settings.
    pub fn dumps_with(&self, output: &OutputConfig) -> Result<String> {
        let value = self.to_value();
        let text = if output.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }

    /// Replace the packets with those in `value`, which must be an array of
    /// packet objects. On error the document is left as it was.
    pub fn load(&mut self, value: &Value) -> Result<()> {
        let items = match value {
            Value::Array(items) => items,
            other => return Err(CzmlError::InvalidPacketType(describe(other))),
        };
        let packets = items
            .iter()
            .map(Packet::from_value)
            .collect::<Result<Vec<_>>>()?;
        log::debug!("loaded {} packets", packets.len());
        self.packets = packets;
        Ok(())
    }

    pub fn loads(&mut self, text: &str) -> Result<()> {
        let value: Value = serde_json::from_str(text)?;
        self.load(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let mut doc = Document::new();
        doc.load(value)?;
        Ok(doc)
    }
}

impl std::str::FromStr for Document {
    type Err = CzmlError;

    fn from_str(text: &str) -> Result<Self> {
        let mut doc = Document::new();
        doc.loads(text)?;
        Ok(doc)
    }
}

impl FromIterator<Packet> for Document {
    fn from_iter<I: IntoIterator<Item = Packet>>(iter: I) -> Self {
        Document {
            packets: iter.into_iter().collect(),
        }
    }
}

impl Extend<Packet> for Document {
    fn extend<I: IntoIterator<Item = Packet>>(&mut self, iter: I) {
        self.packets.extend(iter);
    }
}

impl IntoIterator for Document {
    type Item = Packet;
    type IntoIter = std::vec::IntoIter<Packet>;

    fn into_iter(self) -> Self::IntoIter {
        self.packets.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Packet;
    type IntoIter = std::slice::Iter<'a, Packet>;

    fn into_iter(self) -> Self::IntoIter {
        self.packets.iter()
    }
}

impl serde::Serialize for Document {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.data())
    }
}

impl<'de> serde::Deserialize<'de> for Document {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Document::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_is_empty_array() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.dumps().unwrap(), "[]");
        assert_eq!(serde_json::to_string(&doc).unwrap(), "[]");
    }

    #[test]
    fn test_append_preserves_order_and_duplicates() {
        let mut doc = Document::new();
        doc.append(Packet::new("a"));
        doc.append(Packet::new("b"));
        doc.append(Packet::new("a"));
        let ids: Vec<_> = doc.iter().filter_map(Packet::id).collect();
        assert_eq!(ids, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_data_is_restartable() {
        let doc: Document = vec![Packet::new("a"), Packet::new("b")].into_iter().collect();
        let first: Vec<_> = doc.data().collect();
        let second: Vec<_> = doc.data().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_append_value_rejects_non_objects() {
        let mut doc = Document::new();
        for bad in [json!(1), json!("packet"), json!([{"id": "a"}]), json!(null)] {
            let err = doc.append_value(&bad).unwrap_err();
            assert!(matches!(err, CzmlError::InvalidPacketType(_)));
        }
        assert!(doc.is_empty());
        doc.append_value(&json!({"id": "ok"})).unwrap();
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_loads_round_trip() {
        let text = r#"[{"id":"document","version":"1.0"},{"id":"abc","point":{"pixelSize":5.0}}]"#;
        let doc: Document = text.parse().unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.document_packet().and_then(Packet::version), Some("1.0"));
        assert_eq!(doc.dumps().unwrap(), text);
    }

    #[test]
    fn test_failed_load_keeps_previous_packets() {
        let mut doc: Document = std::iter::once(Packet::new("keep")).collect();
        assert!(matches!(
            doc.load(&json!({"id": "x"})),
            Err(CzmlError::InvalidPacketType(_))
        ));
        assert!(doc.load(&json!([{"id": "x"}, {"id": "y", "version": "1.0"}])).is_err());
        assert_eq!(doc.packets(), &[Packet::new("keep")]);
    }

    #[test]
    fn test_pretty_output() {
        let doc: Document = std::iter::once(Packet::new("abc")).collect();
        let text = doc.dumps_with(&OutputConfig { pretty: true }).unwrap();
        assert_eq!(text, "[\n  {\n    \"id\": \"abc\"\n  }\n]");
    }

    #[test]
    fn test_serde_round_trip() {
        let doc: Document = serde_json::from_str(r#"[{"id":"a"},{"id":"b"}]"#).unwrap();
        assert_eq!(serde_json::to_string(&doc).unwrap(), doc.dumps().unwrap());
        assert!(serde_json::from_str::<Document>("[3]").is_err());
    }
}
