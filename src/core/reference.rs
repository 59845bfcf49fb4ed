//! Declarative reference data shared by the scorers.
//!
//! Country memberships (continents, alliances, seas), universal hobbies and
//! compound hobby tags live in a TOML table instead of inline control flow.
//! The table is parsed once, normalized, and treated as immutable.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

use crate::core::normalize::normalize;

/// Reference table compiled into the binary
pub const EMBEDDED_REFERENCE: &str = include_str!("../../data/reference.toml");

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Reference data parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Reference data I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReference {
    universal_hobbies: Vec<String>,
    compound_hobbies: HashMap<String, Vec<String>>,
    memberships: HashMap<String, Vec<String>>,
}

/// Normalized, read-only reference data
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    memberships: HashMap<String, HashSet<String>>,
    universal_hobbies: HashSet<String>,
    compound_hobbies: HashMap<String, Vec<String>>,
}

impl ReferenceData {
    /// Parse a TOML reference table
    pub fn from_toml_str(source: &str) -> Result<Self, ReferenceError> {
        let raw: RawReference = toml::from_str(source)?;

        let memberships = raw
            .memberships
            .into_iter()
            .map(|(country, tags)| (normalize(&country), tags.iter().map(|t| normalize(t)).collect()))
            .collect();

        let compound_hobbies = raw
            .compound_hobbies
            .into_iter()
            .map(|(tag, members)| (normalize(&tag), members.iter().map(|m| normalize(m)).collect()))
            .collect();

        Ok(Self {
            memberships,
            universal_hobbies: raw.universal_hobbies.iter().map(|h| normalize(h)).collect(),
            compound_hobbies,
        })
    }

    /// The compiled-in table. A broken table degrades to empty reference
    /// data rather than aborting scoring.
    pub fn embedded() -> Self {
        match Self::from_toml_str(EMBEDDED_REFERENCE) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Embedded reference data is invalid, continuing without it: {}", e);
                Self::default()
            }
        }
    }

    /// Membership tags of a country, normalized
    pub fn memberships_of(&self, country: &str) -> Option<&HashSet<String>> {
        self.memberships.get(&normalize(country))
    }

    /// Whether a normalized hobby tag is available everywhere
    pub fn is_universal_hobby(&self, normalized_tag: &str) -> bool {
        self.universal_hobbies.contains(normalized_tag)
    }

    /// Member tags of a normalized compound hobby tag
    pub fn compound_members(&self, normalized_tag: &str) -> Option<&[String]> {
        self.compound_hobbies.get(normalized_tag).map(Vec::as_slice)
    }

    pub fn country_count(&self) -> usize {
        self.memberships.len()
    }
}
