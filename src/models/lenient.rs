//! Forgiving field deserializers for catalog and preference records.
//!
//! Source records carry `null` lists, comma-joined strings and tags outside
//! the known vocabulary. One bad value must not discard the whole record, so
//! these helpers keep what parses and log what they drop.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::models::tags::UnknownTag;

/// Raw list elements: `null` is empty, a string is a comma-joined list,
/// non-string array elements are ignored.
fn raw_items(value: Option<Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => {
                    warn!("Dropping non-text list element {}", other);
                    None
                }
            })
            .collect(),
        Some(other) => {
            warn!("Expected a list, dropping {}", other);
            Vec::new()
        }
    }
}

/// A list of categorical tags. Unknown tags are dropped with a warning.
pub fn tag_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = UnknownTag>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(raw_items(value)
        .iter()
        .filter_map(|raw| match raw.parse::<T>() {
            Ok(tag) => Some(tag),
            Err(e) => {
                warn!("Dropping {}", e);
                None
            }
        })
        .collect())
}

/// A single categorical tag. Unknown or non-text values read as missing.
pub fn tag<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = UnknownTag>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(None),
        Some(Value::String(raw)) => match raw.parse::<T>() {
            Ok(tag) => Ok(Some(tag)),
            Err(e) => {
                warn!("Treating as missing: {}", e);
                Ok(None)
            }
        },
        Some(other) => {
            warn!("Expected a tag, treating {} as missing", other);
            Ok(None)
        }
    }
}

/// A list of free-text values; `null` reads as empty.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw_items(Option::<Value>::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tags::{GeographicFeature, TemperatureBand};

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Record {
        #[serde(deserialize_with = "tag_list")]
        features: Vec<GeographicFeature>,
        #[serde(deserialize_with = "tag")]
        summer: Option<TemperatureBand>,
        #[serde(deserialize_with = "string_list")]
        water: Vec<String>,
    }

    fn parse(json: &str) -> Record {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_null_lists_are_empty() {
        let record = parse(r#"{"features": null, "summer": null, "water": null}"#);
        assert!(record.features.is_empty());
        assert!(record.summer.is_none());
        assert!(record.water.is_empty());
    }

    #[test]
    fn test_unknown_tags_dropped() {
        let record = parse(r#"{"features": ["continental", "Mountains", 3, null]}"#);
        assert_eq!(record.features, vec![GeographicFeature::Mountain]);
    }

    #[test]
    fn test_comma_joined_string() {
        let record = parse(r#"{"features": "coastal, volcanic, lake", "water": "Lake Chapala, "}"#);
        assert_eq!(record.features, vec![GeographicFeature::Coastal, GeographicFeature::Lake]);
        assert_eq!(record.water, vec!["Lake Chapala".to_string()]);
    }

    #[test]
    fn test_unknown_single_tag_is_missing() {
        assert!(parse(r#"{"summer": "scorching"}"#).summer.is_none());
        assert!(parse(r#"{"summer": 31}"#).summer.is_none());
        assert_eq!(parse(r#"{"summer": "Warm"}"#).summer, Some(TemperatureBand::Warm));
    }

    #[test]
    fn test_missing_fields_default() {
        let record = parse("{}");
        assert!(record.features.is_empty() && record.summer.is_none() && record.water.is_empty());
    }
}
