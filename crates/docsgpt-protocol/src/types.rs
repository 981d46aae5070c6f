use serde::{Deserialize, Serialize};

/// Server-assigned conversation identifier.
///
/// Opaque to the client: never parsed, only compared and echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ConversationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ConversationId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConversationId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Where a document index lives.
///
/// Only `Local` indexes were built by this user and may be deleted.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentLocation {
    Local,
    Remote,
}

impl DocumentLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentLocation::Local => "local",
            DocumentLocation::Remote => "remote",
        }
    }
}

impl std::fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_id_is_transparent_on_the_wire() {
        let id = ConversationId::new("65a1f0c2");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""65a1f0c2""#);

        let parsed: ConversationId = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(parsed, "abc");
    }

    #[test]
    fn test_document_location_wire_format() {
        assert_eq!(
            serde_json::to_string(&DocumentLocation::Local).unwrap(),
            r#""local""#
        );
        let parsed: DocumentLocation = serde_json::from_str(r#""remote""#).unwrap();
        assert_eq!(parsed, DocumentLocation::Remote);
    }

    #[test]
    fn test_document_location_rejects_unknown() {
        assert!(serde_json::from_str::<DocumentLocation>(r#""cloud""#).is_err());
    }

    #[test]
    fn test_document_location_display() {
        assert_eq!(DocumentLocation::Local.to_string(), "local");
        assert_eq!(DocumentLocation::Remote.to_string(), "remote");
    }
}
