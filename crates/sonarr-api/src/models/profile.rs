// Profiles: quality profiles, quality definitions, release profiles, custom formats

use serde::{Deserialize, Serialize};

use super::provider::CustomFormatSpecificationResource;

// ── Quality ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quality {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub resolution: i64,
}

/// An entry of a quality profile's `items`: either a single quality or a
/// named group of qualities (`items` non-empty, `quality` absent).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfileItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    #[serde(default)]
    pub items: Vec<QualityProfileItem>,
    #[serde(default)]
    pub allowed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFormatItem {
    #[serde(default)]
    pub format: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub score: i64,
}

/// `qualityprofile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfileResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub upgrade_allowed: bool,
    #[serde(default)]
    pub cutoff: i64,
    #[serde(default)]
    pub items: Vec<QualityProfileItem>,
    #[serde(default)]
    pub min_format_score: i64,
    #[serde(default)]
    pub cutoff_format_score: i64,
    #[serde(default)]
    pub format_items: Vec<ProfileFormatItem>,
}

/// `qualitydefinition` -- the whole list is the singleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityDefinitionResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub quality: Quality,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub weight: i64,
    #[serde(default)]
    pub min_size: f64,
    #[serde(default)]
    pub max_size: Option<f64>,
    #[serde(default)]
    pub preferred_size: Option<f64>,
}

// ── Release profiles ─────────────────────────────────────────────────

/// `releaseprofile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseProfileResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub ignored: Vec<String>,
    #[serde(default)]
    pub indexer_id: i64,
    #[serde(default)]
    pub tags: Vec<i64>,
}

// ── Custom formats ───────────────────────────────────────────────────

/// `customformat`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFormatResource {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub include_custom_format_when_renaming: bool,
    #[serde(default)]
    pub specifications: Vec<CustomFormatSpecificationResource>,
}
