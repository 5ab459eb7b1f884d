//! Catalog (index) document.
//!
//! The catalog lists the topics of a collection and where their documents
//! live. Two shapes are in circulation: a bare array of entries, and the
//! generated form that wraps the entries with totals. Both parse.

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Pointer to one topic document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    /// Document path, relative to the data directory.
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(rename = "hasGame", default)]
    pub has_game: bool,
    #[serde(rename = "hasCover", default)]
    pub has_cover: bool,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file: file.into(),
            topic: None,
            has_game: false,
            has_cover: false,
        }
    }
}

/// An ordered list of catalog entries plus derived totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub topics: Vec<CatalogEntry>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub with_game: usize,
    #[serde(default)]
    pub with_cover: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Entries(Vec<CatalogEntry>),
    Wrapped { topics: Vec<CatalogEntry> },
}

impl Catalog {
    /// Builds a catalog and computes its totals.
    pub fn new(topics: Vec<CatalogEntry>) -> Self {
        let with_game = topics.iter().filter(|t| t.has_game).count();
        let with_cover = topics.iter().filter(|t| t.has_cover).count();
        Self {
            total: topics.len(),
            with_game,
            with_cover,
            topics,
        }
    }

    /// Parses either catalog shape. Totals are recomputed from the entries.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let topics = match serde_json::from_str(json)? {
            CatalogDocument::Entries(topics) => topics,
            CatalogDocument::Wrapped { topics } => topics,
        };
        Ok(Self::new(topics))
    }

    /// Serializes the wrapped shape as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {"id": "apollo", "file": "apollo/new_event.json"},
            {"id": "berlin", "file": "berlin/new_event.json", "hasGame": true}
        ]"#;

        let catalog = Catalog::from_json_str(json).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].id, "apollo");
        assert_eq!(catalog.total, 2);
        assert_eq!(catalog.with_game, 1);
        assert_eq!(catalog.with_cover, 0);
    }

    #[test]
    fn test_parse_wrapped_form() {
        let json = r#"{
            "topics": [
                {"id": "apollo", "topic": "Apollo 11", "file": "apollo/new_event.json",
                 "hasGame": true, "hasCover": true}
            ],
            "total": 1, "with_game": 1, "with_cover": 1
        }"#;

        let catalog = Catalog::from_json_str(json).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].topic.as_deref(), Some("Apollo 11"));
        assert!(catalog.entries()[0].has_cover);
        assert_eq!(catalog.with_cover, 1);
    }

    #[test]
    fn test_totals_are_recomputed() {
        let json = r#"{"topics": [{"id": "a", "file": "a.json"}], "total": 99}"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.total, 1);
    }

    #[test]
    fn test_wrapped_serialization_uses_camel_flags() {
        let mut entry = CatalogEntry::new("apollo", "apollo/new_event.json");
        entry.has_game = true;
        let json = Catalog::new(vec![entry]).to_json_pretty().unwrap();

        assert!(json.contains(r#""hasGame": true"#));
        assert!(json.contains(r#""with_game": 1"#));
        assert!(json.contains(r#""total": 1"#));
    }

    #[test]
    fn test_rejects_unrelated_json() {
        assert!(Catalog::from_json_str(r#"{"items": []}"#).is_err());
    }
}
