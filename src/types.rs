//! Result types for the essay aggregation tool
//!
//! The single-resource tools pass upstream JSON through untouched; only
//! the essay tool condenses results into these types.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Condensed view of one upstream image record
///
/// Every field is presence-checked only; absent or non-string values fall
/// back to an empty string, except `creator` which falls back to "Unknown".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSummary {
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub creator: String,
    pub license: String,
    pub attribution: String,
    pub source: String,
}

impl ImageSummary {
    /// Condense an upstream result object, defaulting absent fields
    pub fn from_upstream(img: &Value) -> Self {
        let text = |key: &str| {
            img.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            id: text("id"),
            title: text("title"),
            url: text("url"),
            thumbnail: text("thumbnail"),
            creator: img
                .get("creator")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string(),
            license: text("license"),
            attribution: text("attribution"),
            source: text("source"),
        }
    }
}

/// Aggregated output of the essay tool
///
/// Built fresh per invocation and discarded after serialization. The
/// concept buckets keep their insertion order (the order concepts were
/// supplied in), hence the vec-of-pairs representation serialized as a
/// JSON object.
#[derive(Debug, Clone, Serialize)]
pub struct EssayImageSet {
    pub topic: String,
    #[serde(serialize_with = "serialize_concept_map")]
    pub images_by_concept: Vec<(String, Vec<ImageSummary>)>,
    pub featured_images: Vec<ImageSummary>,
    pub total_images: usize,
}

impl EssayImageSet {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            images_by_concept: Vec::new(),
            featured_images: Vec::new(),
            total_images: 0,
        }
    }
}

fn serialize_concept_map<S: Serializer>(
    entries: &[(String, Vec<ImageSummary>)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (concept, images) in entries {
        map.serialize_entry(concept, images)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_record_maps_every_field() {
        let img = json!({
            "id": "abc-123",
            "title": "Glacier",
            "url": "https://example.org/glacier.jpg",
            "thumbnail": "https://example.org/glacier_t.jpg",
            "creator": "Ada",
            "license": "by",
            "attribution": "Glacier by Ada (CC BY)",
            "source": "flickr"
        });

        let summary = ImageSummary::from_upstream(&img);
        assert_eq!(summary.id, "abc-123");
        assert_eq!(summary.title, "Glacier");
        assert_eq!(summary.creator, "Ada");
        assert_eq!(summary.source, "flickr");
    }

    #[test]
    fn missing_fields_get_documented_defaults() {
        let img = json!({ "id": "abc-123", "url": "https://example.org/x.jpg" });

        let summary = ImageSummary::from_upstream(&img);
        assert_eq!(summary.title, "");
        assert_eq!(summary.thumbnail, "");
        assert_eq!(summary.creator, "Unknown");
        assert_eq!(summary.license, "");
        assert_eq!(summary.attribution, "");
        assert_eq!(summary.source, "");
    }

    #[test]
    fn non_string_fields_are_treated_as_absent() {
        let img = json!({ "id": 42, "title": null, "creator": ["x"] });

        let summary = ImageSummary::from_upstream(&img);
        assert_eq!(summary.id, "");
        assert_eq!(summary.title, "");
        assert_eq!(summary.creator, "Unknown");
    }

    #[test]
    fn concept_map_serializes_in_insertion_order() {
        let mut set = EssayImageSet::new("Climate");
        set.images_by_concept
            .push(("zebra".to_string(), Vec::new()));
        set.images_by_concept
            .push(("apple".to_string(), Vec::new()));

        let json = serde_json::to_string(&set).unwrap();
        let zebra = json.find("zebra").unwrap();
        let apple = json.find("apple").unwrap();
        assert!(zebra < apple, "insertion order not preserved: {json}");
    }

    #[test]
    fn empty_set_serializes_expected_shape() {
        let set = EssayImageSet::new("Climate");
        let value = serde_json::to_value(&set).unwrap();

        assert_eq!(value["topic"], "Climate");
        assert!(value["images_by_concept"].as_object().unwrap().is_empty());
        assert!(value["featured_images"].as_array().unwrap().is_empty());
        assert_eq!(value["total_images"], 0);
    }
}
