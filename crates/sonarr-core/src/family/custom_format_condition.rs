// Custom-format conditions (server: "specifications")
//
// Nested inside a custom format rather than stored at their own endpoint.
// Their bag is hand-written: `value` is an integer id for enum-backed
// conditions and free text for the rest, so the registry carries two
// scoped entries under the same wire name.

use serde::{Deserialize, Serialize};
use sonarr_api::endpoint;
use sonarr_api::models::CustomFormatConditionHeader;

use crate::field::{FieldBag, FieldKind, FieldSpec, FieldValue, Scope};
use crate::generic::{FamilyItem, GenericItem, ProviderFamily};

/// Implementations whose `value` is an enum id.
pub const ID_VALUED: &[&str] = &[
    "LanguageSpecification",
    "SourceSpecification",
    "ResolutionSpecification",
    "ReleaseTypeSpecification",
    "IndexerFlagSpecification",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomFormatConditions;

impl ProviderFamily for CustomFormatConditions {
    type Header = CustomFormatConditionHeader;
    type Fields = ConditionFields;

    const ENDPOINT: &'static str = endpoint::CUSTOM_FORMAT;
    const TYPE_NAME: &'static str = "custom_format_condition";
    const PLURAL: &'static str = "custom_format_conditions";
    const TAGGED: bool = false;
    const SENSITIVE: &'static [&'static str] = &[];
}

// ── Field bag ────────────────────────────────────────────────────────

/// A condition value: enum id or text pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Id(i64),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConditionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FieldBag for ConditionFields {
    const REGISTRY: &'static [FieldSpec<Self>] = &[
        FieldSpec {
            name: "value",
            kind: FieldKind::Int,
            scope: Scope::Only(ID_VALUED),
            get: |bag: &Self| match bag.value {
                Some(ConditionValue::Id(id)) => Some(FieldValue::Int(id)),
                _ => None,
            },
            set: |bag: &mut Self, value| {
                if let FieldValue::Int(id) = value {
                    bag.value = Some(ConditionValue::Id(id));
                }
            },
            clear: |bag: &mut Self| bag.value = None,
        },
        FieldSpec {
            name: "value",
            kind: FieldKind::String,
            scope: Scope::Except(ID_VALUED),
            get: |bag: &Self| match bag.value {
                Some(ConditionValue::Text(ref text)) => Some(FieldValue::String(text.clone())),
                _ => None,
            },
            set: |bag: &mut Self, value| {
                if let FieldValue::String(text) = value {
                    bag.value = Some(ConditionValue::Text(text));
                }
            },
            clear: |bag: &mut Self| bag.value = None,
        },
        FieldSpec {
            name: "min",
            kind: FieldKind::Float,
            scope: Scope::Any,
            get: |bag: &Self| bag.min.map(FieldValue::Float),
            set: |bag: &mut Self, value| {
                if let FieldValue::Float(min) = value {
                    bag.min = Some(min);
                }
            },
            clear: |bag: &mut Self| bag.min = None,
        },
        FieldSpec {
            name: "max",
            kind: FieldKind::Float,
            scope: Scope::Any,
            get: |bag: &Self| bag.max.map(FieldValue::Float),
            set: |bag: &mut Self, value| {
                if let FieldValue::Float(max) = value {
                    bag.max = Some(max);
                }
            },
            clear: |bag: &mut Self| bag.max = None,
        },
    ];
}

// ── Condition ────────────────────────────────────────────────────────

/// One condition of a custom format, as declared by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFormatCondition {
    pub name: String,
    pub implementation: String,
    #[serde(default)]
    pub negate: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub fields: ConditionFields,
}

impl FamilyItem for CustomFormatCondition {
    type Family = CustomFormatConditions;

    const TYPE_NAME: &'static str = "custom_format_condition";
    const SENSITIVE: &'static [&'static str] = &[];
    const NORMALIZED: &'static [&'static str] = &[];
    const ALIASES: &'static [(&'static str, &'static str)] = &[];

    /// Conditions have no identity of their own.
    fn id(&self) -> i64 {
        0
    }

    fn set_id(&mut self, _id: i64) {}

    fn to_generic(&self) -> GenericItem<CustomFormatConditions> {
        GenericItem {
            name: self.name.clone(),
            implementation: self.implementation.clone(),
            header: CustomFormatConditionHeader {
                negate: self.negate,
                required: self.required,
            },
            fields: self.fields.clone(),
            ..Default::default()
        }
    }

    fn from_generic(item: &GenericItem<CustomFormatConditions>) -> Self {
        Self {
            name: item.name.clone(),
            implementation: item.implementation.clone(),
            negate: item.header.negate,
            required: item.header.required,
            fields: item.fields.clone(),
        }
    }
}
