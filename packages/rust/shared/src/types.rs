//! Core domain types for the dinosaur directory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel stored in [`DetailRecord::meaning`] when a page carried no detail data.
pub const NO_DATA: &str = "N/A";

// ---------------------------------------------------------------------------
// EntityReference
// ---------------------------------------------------------------------------

/// One directory entry: a display name plus the relative link of its detail page.
///
/// Two references are the same entry when their `link` matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityReference {
    /// Display name (cleaned).
    pub name: String,
    /// Detail-page link as it appears in the index document.
    pub link: String,
}

impl EntityReference {
    /// Create a reference from a display name and its detail-page link.
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }
}

/// Body of the listing endpoint: `{ "results": n, "data": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceList {
    #[serde(rename = "results")]
    pub count: usize,
    #[serde(rename = "data")]
    pub references: Vec<EntityReference>,
}

impl From<Vec<EntityReference>> for ReferenceList {
    fn from(references: Vec<EntityReference>) -> Self {
        Self {
            count: references.len(),
            references,
        }
    }
}

// ---------------------------------------------------------------------------
// DetailRecord
// ---------------------------------------------------------------------------

/// Normalized fields scraped from one entity's detail page.
///
/// The five core fields are always present. Everything else the page exposes
/// (period, diet, length, ...) lands in `attributes`, keyed by the camel-cased
/// label. Serializes as one flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub name: String,
    pub pronunciation: String,
    /// Name meaning, or [`NO_DATA`] when the page had none.
    pub meaning: String,
    pub picture: String,
    pub content: String,
    /// Set by the orchestrator from the directory reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Open set of extra fields discovered on the page.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl DetailRecord {
    /// The degraded record returned when a page signals it has no data.
    pub fn no_data(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meaning: NO_DATA.to_string(),
            ..Default::default()
        }
    }

    /// Whether this record carries the no-data sentinel.
    pub fn is_no_data(&self) -> bool {
        self.meaning == NO_DATA
    }

    /// Set a field by key. Core keys go to their struct field; anything else is
    /// an attribute. Later writes to the same key win.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "name" => self.name = value,
            "pronunciation" => self.pronunciation = value,
            "meaning" => self.meaning = value,
            "picture" => self.picture = value,
            "content" => self.content = value,
            "link" => self.link = Some(value),
            _ => {
                self.attributes.insert(key, value);
            }
        }
    }

    /// Look up a field by key, core or attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(&self.name),
            "pronunciation" => Some(&self.pronunciation),
            "meaning" => Some(&self.meaning),
            "picture" => Some(&self.picture),
            "content" => Some(&self.content),
            "link" => self.link.as_deref(),
            _ => self.attributes.get(key).map(String::as_str),
        }
    }
}

// ---------------------------------------------------------------------------
// AggregateResult
// ---------------------------------------------------------------------------

/// Outcome of one list-plus-enrich run.
///
/// `records` is in completion order. Records carrying the sentinel are
/// included and also counted in `no_data_count`, so `no_data_count <= count`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateResult {
    #[serde(rename = "results")]
    pub count: usize,
    #[serde(rename = "data")]
    pub records: Vec<DetailRecord>,
    #[serde(rename = "noData")]
    pub no_data_count: usize,
}

impl AggregateResult {
    /// Build an aggregate, deriving `count` and `no_data_count` from the records.
    pub fn from_records(records: Vec<DetailRecord>) -> Self {
        let no_data_count = records.iter().filter(|r| r.is_no_data()).count();
        Self {
            count: records.len(),
            records,
            no_data_count,
        }
    }
}
