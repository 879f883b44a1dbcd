//! Input paper records.
//!
//! A record is one entry of the garden document. Only `id` is mandatory;
//! every other field falls back to an empty value so partially written
//! documents still load. Explicit `null`s count as missing.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::id::PaperId;

/// One paper of the input document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperRecord {
    /// Unique identifier.
    pub id: PaperId,
    /// Parent paper (ignored for roots).
    pub parent: Option<PaperId>,
    /// Whether this paper starts a new plant.
    #[serde(rename = "root_node", deserialize_with = "null_as_default")]
    pub is_root: bool,
    /// Plant display name, meaningful only on roots. May contain `\n`.
    #[serde(rename = "root_name")]
    pub plant_name: Option<String>,
    /// Plant base color (`#RRGGBB`), meaningful only on roots.
    #[serde(rename = "root_color")]
    pub plant_color: Option<String>,
    /// Short title drawn next to the flower. May contain `\n`.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Long title shown in the detail view.
    pub full_title: Option<String>,
    pub venue: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub coauthors: Vec<String>,
    /// Papers related outside of the lineage.
    #[serde(deserialize_with = "null_as_default")]
    pub indirect_connections: Vec<PaperId>,
    pub summary: Option<String>,
    pub url: Option<String>,
    /// Extra links keyed by their display label.
    #[serde(deserialize_with = "null_as_default")]
    pub additional_links: BTreeMap<String, String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PaperRecord {
    /// Create a root record that starts a plant.
    pub fn root(id: impl Into<PaperId>, plant_name: &str, plant_color: &str) -> Self {
        Self {
            id: id.into(),
            is_root: true,
            plant_name: Some(plant_name.to_owned()),
            plant_color: Some(plant_color.to_owned()),
            ..Default::default()
        }
    }

    /// Create a non-root record attached to `parent`.
    pub fn child(id: impl Into<PaperId>, parent: impl Into<PaperId>, title: &str) -> Self {
        Self {
            id: id.into(),
            parent: Some(parent.into()),
            title: title.to_owned(),
            ..Default::default()
        }
    }

    /// Builder-style helper adding indirect connection targets.
    pub fn with_connections<I, T>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PaperId>,
    {
        self.indirect_connections
            .extend(targets.into_iter().map(Into::into));
        self
    }

    /// Lines drawn next to the flower: the title lines, then the venue.
    pub fn label_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.title.split('\n').map(str::to_owned).collect();
        if let Some(venue) = self.venue.as_deref().filter(|v| !v.is_empty()) {
            lines.push(venue.to_owned());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_document_record() {
        let json = r##"{
            "id": 1,
            "root_node": true,
            "root_name": "Vision\nModels",
            "root_color": "#3366cc",
            "title": "AlexNet",
            "coauthors": ["Sutskever", "Hinton"],
            "additional_links": {"code": "https://example.org/code"}
        }"##;
        let record: PaperRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, PaperId::from(1u32));
        assert!(record.is_root);
        assert_eq!(record.plant_name.as_deref(), Some("Vision\nModels"));
        assert_eq!(record.plant_color.as_deref(), Some("#3366cc"));
        assert_eq!(record.coauthors.len(), 2);
        assert!(record.parent.is_none());
        assert!(record.indirect_connections.is_empty());
        assert_eq!(record.additional_links.len(), 1);
    }

    #[test]
    fn test_null_parent_is_absent() {
        let record: PaperRecord = serde_json::from_str(r#"{"id": "a", "parent": null}"#).unwrap();
        assert!(record.parent.is_none());
        assert!(!record.is_root);
    }

    #[test]
    fn test_label_lines_append_venue() {
        let mut record = PaperRecord::child(2u32, 1u32, "Deep Residual\nLearning");
        assert_eq!(record.label_lines(), vec!["Deep Residual", "Learning"]);

        record.venue = Some("CVPR 2016".into());
        assert_eq!(
            record.label_lines(),
            vec!["Deep Residual", "Learning", "CVPR 2016"]
        );
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let json = r##"[
            {"id": 1, "root_node": true, "root_name": "A", "root_color": "#3366cc"},
            {"id": 2, "parent": 1, "title": "Kept", "coauthors": ["Ada"]},
            {"id": 3, "parent": 1, "title": null, "coauthors": null,
             "indirect_connections": null, "root_node": null,
             "additional_links": null, "venue": null}
        ]"##;
        let records: Vec<PaperRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records.len(), 3);
        let nulls = &records[2];
        assert_eq!(nulls.id, PaperId::from(3u32));
        assert_eq!(nulls.parent, Some(PaperId::from(1u32)));
        assert!(!nulls.is_root);
        assert!(nulls.title.is_empty());
        assert!(nulls.coauthors.is_empty());
        assert!(nulls.indirect_connections.is_empty());
        assert!(nulls.additional_links.is_empty());
        assert_eq!(nulls.label_lines(), vec![""]);
        assert_eq!(records[1].coauthors, vec!["Ada"]);
    }
}
