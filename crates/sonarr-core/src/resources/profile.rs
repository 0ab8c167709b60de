// Release profiles, quality profiles, custom formats

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sonarr_api::endpoint;
use sonarr_api::models::{
    CustomFormatResource, ProfileFormatItem, Quality, QualityProfileItem, QualityProfileResource,
    ReleaseProfileResource,
};

use crate::engine::ManagedResource;
use crate::error::CoreError;
use crate::family::custom_format_condition::CustomFormatCondition;
use crate::generic::{FamilyItem, GenericItem};

/// Replace `fresh` with `baseline` when both hold the same elements in a
/// different order.
pub(crate) fn keep_baseline_order<T: Clone + PartialEq>(baseline: &[T], fresh: &mut Vec<T>) {
    if baseline.len() != fresh.len() || baseline == fresh.as_slice() {
        return;
    }
    let mut unmatched: Vec<&T> = fresh.iter().collect();
    for wanted in baseline {
        let Some(pos) = unmatched.iter().position(|f| *f == wanted) else {
            return;
        };
        unmatched.swap_remove(pos);
    }
    *fresh = baseline.to_vec();
}

// ── Release profile ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseProfile {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub required: BTreeSet<String>,
    #[serde(default)]
    pub ignored: BTreeSet<String>,
    #[serde(default)]
    pub indexer_id: i64,
    #[serde(default)]
    pub tags: BTreeSet<i64>,
}

impl ManagedResource for ReleaseProfile {
    type State = Self;
    type Wire = ReleaseProfileResource;

    const TYPE_NAME: &'static str = "release_profile";
    const ENDPOINT: &'static str = endpoint::RELEASE_PROFILE;
    const IMPORT_KEY: Option<&'static str> = Some("name");

    fn build_wire(state: &Self) -> Result<ReleaseProfileResource, CoreError> {
        Ok(ReleaseProfileResource {
            id: state.id,
            name: state.name.clone(),
            enabled: state.enabled,
            required: state.required.iter().cloned().collect(),
            ignored: state.ignored.iter().cloned().collect(),
            indexer_id: state.indexer_id,
            tags: state.tags.iter().copied().collect(),
        })
    }

    fn apply_wire(wire: ReleaseProfileResource) -> Result<Self, CoreError> {
        Ok(Self {
            id: wire.id,
            name: wire.name,
            enabled: wire.enabled,
            required: wire.required.into_iter().collect(),
            ignored: wire.ignored.into_iter().collect(),
            indexer_id: wire.indexer_id,
            tags: wire.tags.into_iter().collect(),
        })
    }

    fn identifier(state: &Self) -> i64 {
        state.id
    }

    fn set_identifier(state: &mut Self, id: i64) {
        state.id = id;
    }
}

// ── Quality profile ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// An allowed quality group. A group of one is sent as a plain quality
/// and reads back named after it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityGroup {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub qualities: Vec<QualityRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatItem {
    pub format: i64,
    pub score: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityProfile {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub upgrade_allowed: bool,
    #[serde(default)]
    pub cutoff: i64,
    #[serde(default)]
    pub min_format_score: i64,
    #[serde(default)]
    pub cutoff_format_score: i64,
    #[serde(default)]
    pub quality_groups: Vec<QualityGroup>,
    #[serde(default)]
    pub format_items: Vec<FormatItem>,
}

fn quality_item(quality: &QualityRef) -> QualityProfileItem {
    QualityProfileItem {
        quality: Some(Quality {
            id: quality.id,
            name: quality.name.clone(),
            ..Default::default()
        }),
        allowed: true,
        ..Default::default()
    }
}

fn quality_ref(quality: &Quality) -> QualityRef {
    QualityRef {
        id: quality.id,
        name: quality.name.clone(),
    }
}

impl QualityGroup {
    fn to_item(&self) -> QualityProfileItem {
        match self.qualities.as_slice() {
            [single] => quality_item(single),
            qualities => QualityProfileItem {
                id: Some(self.id),
                name: Some(self.name.clone()),
                items: qualities.iter().map(quality_item).collect(),
                allowed: true,
                ..Default::default()
            },
        }
    }

    /// `None` for disallowed entries.
    fn from_item(item: &QualityProfileItem) -> Option<Self> {
        if !item.allowed {
            return None;
        }
        if let Some(ref quality) = item.quality {
            return Some(Self {
                id: 0,
                name: quality.name.clone(),
                qualities: vec![quality_ref(quality)],
            });
        }
        Some(Self {
            id: item.id.unwrap_or_default(),
            name: item.name.clone().unwrap_or_default(),
            qualities: item
                .items
                .iter()
                .filter_map(|i| i.quality.as_ref().map(quality_ref))
                .collect(),
        })
    }
}

impl ManagedResource for QualityProfile {
    type State = Self;
    type Wire = QualityProfileResource;

    const TYPE_NAME: &'static str = "quality_profile";
    const ENDPOINT: &'static str = endpoint::QUALITY_PROFILE;
    const IMPORT_KEY: Option<&'static str> = Some("name");

    fn build_wire(state: &Self) -> Result<QualityProfileResource, CoreError> {
        Ok(QualityProfileResource {
            id: state.id,
            name: state.name.clone(),
            upgrade_allowed: state.upgrade_allowed,
            cutoff: state.cutoff,
            items: state.quality_groups.iter().map(QualityGroup::to_item).collect(),
            min_format_score: state.min_format_score,
            cutoff_format_score: state.cutoff_format_score,
            format_items: state
                .format_items
                .iter()
                .map(|f| ProfileFormatItem {
                    format: f.format,
                    name: String::new(),
                    score: f.score,
                })
                .collect(),
        })
    }

    fn apply_wire(wire: QualityProfileResource) -> Result<Self, CoreError> {
        Ok(Self {
            id: wire.id,
            name: wire.name,
            upgrade_allowed: wire.upgrade_allowed,
            cutoff: wire.cutoff,
            min_format_score: wire.min_format_score,
            cutoff_format_score: wire.cutoff_format_score,
            quality_groups: wire.items.iter().filter_map(QualityGroup::from_item).collect(),
            format_items: wire
                .format_items
                .into_iter()
                .map(|f| FormatItem {
                    format: f.format,
                    score: f.score,
                })
                .collect(),
        })
    }

    fn identifier(state: &Self) -> i64 {
        state.id
    }

    fn set_identifier(state: &mut Self, id: i64) {
        state.id = id;
    }

    fn reconcile(baseline: &Self, fresh: &mut Self) {
        // Single-quality groups carry no name of their own on the server.
        for group in &mut fresh.quality_groups {
            if let [single] = group.qualities.as_slice() {
                let declared = baseline.quality_groups.iter().find(|g| {
                    matches!(g.qualities.as_slice(), [q] if q.id == single.id)
                });
                if let Some(declared) = declared {
                    group.clone_from(declared);
                }
            }
        }
        keep_baseline_order(&baseline.quality_groups, &mut fresh.quality_groups);
        keep_baseline_order(&baseline.format_items, &mut fresh.format_items);
    }
}

// ── Custom format ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFormat {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub include_custom_format_when_renaming: bool,
    #[serde(default)]
    pub specifications: Vec<CustomFormatCondition>,
}

impl ManagedResource for CustomFormat {
    type State = Self;
    type Wire = CustomFormatResource;

    const TYPE_NAME: &'static str = "custom_format";
    const ENDPOINT: &'static str = endpoint::CUSTOM_FORMAT;
    const IMPORT_KEY: Option<&'static str> = Some("name");

    fn build_wire(state: &Self) -> Result<CustomFormatResource, CoreError> {
        Ok(CustomFormatResource {
            id: state.id,
            name: state.name.clone(),
            include_custom_format_when_renaming: state.include_custom_format_when_renaming,
            specifications: state
                .specifications
                .iter()
                .map(|c| c.to_generic().encode())
                .collect(),
        })
    }

    fn apply_wire(wire: CustomFormatResource) -> Result<Self, CoreError> {
        let specifications = wire
            .specifications
            .into_iter()
            .map(|s| GenericItem::decode(s).map(|item| CustomFormatCondition::from_generic(&item)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id: wire.id,
            name: wire.name,
            include_custom_format_when_renaming: wire.include_custom_format_when_renaming,
            specifications,
        })
    }

    fn identifier(state: &Self) -> i64 {
        state.id
    }

    fn set_identifier(state: &mut Self, id: i64) {
        state.id = id;
    }

    /// Conditions are a set; the server may reorder them.
    fn reconcile(baseline: &Self, fresh: &mut Self) {
        keep_baseline_order(&baseline.specifications, &mut fresh.specifications);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::family::custom_format_condition::{ConditionFields, ConditionValue};

    fn hd_profile() -> QualityProfile {
        QualityProfile {
            id: 2,
            name: "HD".into(),
            upgrade_allowed: true,
            cutoff: 1001,
            quality_groups: vec![
                QualityGroup {
                    id: 0,
                    name: "HDTV-720p".into(),
                    qualities: vec![QualityRef {
                        id: 4,
                        name: "HDTV-720p".into(),
                    }],
                },
                QualityGroup {
                    id: 1001,
                    name: "WEB 720p".into(),
                    qualities: vec![
                        QualityRef {
                            id: 5,
                            name: "WEBDL-720p".into(),
                        },
                        QualityRef {
                            id: 14,
                            name: "WEBRip-720p".into(),
                        },
                    ],
                },
            ],
            format_items: vec![FormatItem {
                format: 3,
                score: 10,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn single_quality_group_is_sent_flat() {
        let wire = QualityProfile::build_wire(&hd_profile()).unwrap();
        let value = serde_json::to_value(&wire).unwrap();

        assert_eq!(value["items"][0]["quality"]["id"], json!(4));
        assert!(value["items"][0].get("name").is_none());
        assert_eq!(value["items"][1]["name"], json!("WEB 720p"));
        assert_eq!(value["items"][1]["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn only_allowed_items_are_read() {
        let mut wire = QualityProfile::build_wire(&hd_profile()).unwrap();
        wire.items.push(QualityProfileItem {
            quality: Some(Quality {
                id: 1,
                name: "SDTV".into(),
                ..Default::default()
            }),
            allowed: false,
            ..Default::default()
        });
        wire.items.reverse();

        let plan = hd_profile();
        let mut state = QualityProfile::apply_wire(wire).unwrap();
        QualityProfile::reconcile(&plan, &mut state);
        assert_eq!(state, plan);
    }

    #[test]
    fn reordered_conditions_are_not_drift() {
        let title = CustomFormatCondition {
            name: "x265".into(),
            implementation: "ReleaseTitleSpecification".into(),
            fields: ConditionFields {
                value: Some(ConditionValue::Text("x265".into())),
                ..Default::default()
            },
            ..Default::default()
        };
        let language = CustomFormatCondition {
            name: "english".into(),
            implementation: "LanguageSpecification".into(),
            required: true,
            fields: ConditionFields {
                value: Some(ConditionValue::Id(1)),
                ..Default::default()
            },
            ..Default::default()
        };
        let plan = CustomFormat {
            name: "x265".into(),
            specifications: vec![title.clone(), language.clone()],
            ..Default::default()
        };

        let mut wire = CustomFormat::build_wire(&plan).unwrap();
        wire.id = 9;
        wire.specifications.reverse();
        let mut state = CustomFormat::apply_wire(wire).unwrap();
        assert_eq!(state.specifications, vec![language, title]);

        CustomFormat::reconcile(&plan, &mut state);
        assert_eq!(state.specifications, plan.specifications);
        assert_eq!(state.id, 9);
    }

    #[test]
    fn release_profile_terms_are_sets() {
        let wire = ReleaseProfileResource {
            id: 1,
            name: "x".into(),
            required: vec!["b".into(), "a".into(), "a".into()],
            tags: vec![2, 1],
            ..Default::default()
        };
        let state = ReleaseProfile::apply_wire(wire).unwrap();
        assert_eq!(state.required, BTreeSet::from(["a".into(), "b".into()]));
        assert_eq!(state.tags, BTreeSet::from([1, 2]));
    }
}
