// ── Generic provider items ──
//
// One `GenericItem<F>` per family holds the family header plus the union of
// every implementation's fields. Concrete desired-state records reach the
// wire only through it: record -> generic -> wire on the way out, and
// wire -> generic -> record on the way back.

use std::collections::BTreeSet;
use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sonarr_api::models::ProviderResource;

use crate::field::{self, FieldBag, FieldError};

// ── Family ───────────────────────────────────────────────────────────

/// A server plugin category sharing one wire shape.
pub trait ProviderFamily: Debug + Clone + Default + PartialEq + Send + Sync + 'static {
    /// Fixed wire attributes (`enable`, `priority`, trigger flags, ...).
    type Header: Debug
        + Clone
        + Default
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;
    /// Union of every implementation's fields.
    type Fields: FieldBag
        + Debug
        + Clone
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync;

    /// Collection path under `/api/v3/`.
    const ENDPOINT: &'static str;
    /// Host type name of the generic resource, e.g. `download_client`.
    const TYPE_NAME: &'static str;
    /// Host type name of the list data source, e.g. `download_clients`.
    const PLURAL: &'static str;
    /// Whether the wire resource carries `tags`.
    const TAGGED: bool;
    /// Wire names of every field the server redacts, across implementations.
    const SENSITIVE: &'static [&'static str];
    /// Deprecated host attribute names accepted by the generic resource.
    const ALIASES: &'static [(&'static str, &'static str)] = &[];
}

/// A field union that belongs to exactly one family.
pub trait UnionBag: FieldBag {
    type Family: ProviderFamily<Fields = Self>;
}

// ── Generic item ─────────────────────────────────────────────────────

/// Engine-internal superset record for one provider item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericItem<F: ProviderFamily> {
    pub id: i64,
    pub name: String,
    pub implementation: String,
    pub config_contract: String,
    pub tags: BTreeSet<i64>,
    pub header: F::Header,
    pub fields: F::Fields,
}

impl<F: ProviderFamily> GenericItem<F> {
    /// Wire resource to generic item. Fails only on field kind mismatch.
    pub fn decode(resource: ProviderResource<F::Header>) -> Result<Self, FieldError> {
        let fields = field::decode_fields(&resource.fields, &resource.implementation)?;
        Ok(Self {
            id: resource.id,
            name: resource.name,
            implementation: resource.implementation,
            config_contract: resource.config_contract,
            tags: resource.tags.unwrap_or_default().into_iter().collect(),
            header: resource.header,
            fields,
        })
    }

    /// Generic item to wire resource. Tagged families always send a list.
    pub fn encode(&self) -> ProviderResource<F::Header> {
        ProviderResource {
            id: self.id,
            name: self.name.clone(),
            implementation: self.implementation.clone(),
            config_contract: self.config_contract.clone(),
            tags: F::TAGGED.then(|| self.tags.iter().copied().collect()),
            fields: field::encode_fields(&self.fields, &self.implementation),
            header: self.header.clone(),
        }
    }
}

// ── Settings ─────────────────────────────────────────────────────────

/// The constants a concrete implementation injects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub implementation: String,
    pub config_contract: String,
    /// Family discriminator: `protocol` for download clients and indexers,
    /// `listType` for import lists.
    pub discriminator: Option<String>,
}

impl Identity {
    /// Identity as carried by a generic item; an empty discriminator is none.
    pub fn of<F: ProviderFamily>(item: &GenericItem<F>, discriminator: &str) -> Self {
        Self {
            implementation: item.implementation.clone(),
            config_contract: item.config_contract.clone(),
            discriminator: (!discriminator.is_empty()).then(|| discriminator.to_owned()),
        }
    }
}

/// The implementation-specific half of a desired-state record.
pub trait Settings:
    Debug + Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Family: ProviderFamily;

    /// Host type name without the provider prefix.
    const TYPE_NAME: &'static str;
    /// Wire names of fields the server redacts.
    const SENSITIVE: &'static [&'static str];
    /// Wire names of fields the server rewrites (trimming, slash cleanup).
    const NORMALIZED: &'static [&'static str] = &[];
    /// Deprecated host attribute names, `(old, current)`.
    const ALIASES: &'static [(&'static str, &'static str)] = &[];

    fn identity(&self) -> Identity;
    fn to_union(&self, implementation: &str) -> <Self::Family as ProviderFamily>::Fields;
    fn from_union(identity: &Identity, union: &<Self::Family as ProviderFamily>::Fields) -> Self;
}

/// Declare a concrete implementation: its slot subset (a `field_bag!`) plus
/// the constants it injects.
#[macro_export]
macro_rules! concrete_settings {
    (
        $name:ident for $family:ty {
            type_name: $type_name:literal,
            implementation: $implementation:literal,
            config_contract: $contract:literal,
            discriminator: $discriminator:expr,
            sensitive: [$($sensitive:literal),* $(,)?],
            $( normalized: [$($normalized:literal),* $(,)?], )?
            $( aliases: [$(($old:literal, $new:literal)),* $(,)?], )?
        }
    ) => {
        impl $crate::generic::Settings for $name {
            type Family = $family;

            const TYPE_NAME: &'static str = $type_name;
            const SENSITIVE: &'static [&'static str] = &[$($sensitive),*];
            $( const NORMALIZED: &'static [&'static str] = &[$($normalized),*]; )?
            $( const ALIASES: &'static [(&'static str, &'static str)] = &[$(($old, $new)),*]; )?

            fn identity(&self) -> $crate::generic::Identity {
                $crate::generic::Identity {
                    implementation: $implementation.to_owned(),
                    config_contract: $contract.to_owned(),
                    discriminator: Option::<&str>::map($discriminator, str::to_owned),
                }
            }

            fn to_union(
                &self,
                implementation: &str,
            ) -> <$family as $crate::generic::ProviderFamily>::Fields {
                $crate::field::transfer(self, implementation)
            }

            fn from_union(
                _identity: &$crate::generic::Identity,
                union: &<$family as $crate::generic::ProviderFamily>::Fields,
            ) -> Self {
                $crate::field::transfer(union, $implementation)
            }
        }
    };
}

/// Settings of the generic resource: the user picks the implementation and
/// may set any field of the family union.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericSettings<U> {
    pub implementation: String,
    pub config_contract: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(flatten)]
    pub fields: U,
}

impl<U> Settings for GenericSettings<U>
where
    U: UnionBag + Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync,
{
    type Family = U::Family;

    const TYPE_NAME: &'static str = <U::Family as ProviderFamily>::TYPE_NAME;
    const SENSITIVE: &'static [&'static str] = <U::Family as ProviderFamily>::SENSITIVE;
    const ALIASES: &'static [(&'static str, &'static str)] =
        <U::Family as ProviderFamily>::ALIASES;

    fn identity(&self) -> Identity {
        Identity {
            implementation: self.implementation.clone(),
            config_contract: self.config_contract.clone(),
            discriminator: self.protocol.clone(),
        }
    }

    fn to_union(&self, _implementation: &str) -> U {
        self.fields.clone()
    }

    fn from_union(identity: &Identity, union: &U) -> Self {
        Self {
            implementation: identity.implementation.clone(),
            config_contract: identity.config_contract.clone(),
            protocol: identity.discriminator.clone(),
            fields: union.clone(),
        }
    }
}

// ── Family items ─────────────────────────────────────────────────────

/// A desired-state record that projects through a family's generic item.
pub trait FamilyItem:
    Debug + Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Family: ProviderFamily;

    const TYPE_NAME: &'static str;
    const SENSITIVE: &'static [&'static str];
    const NORMALIZED: &'static [&'static str];
    const ALIASES: &'static [(&'static str, &'static str)];

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn to_generic(&self) -> GenericItem<Self::Family>;
    fn from_generic(item: &GenericItem<Self::Family>) -> Self;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sonarr_api::models::{DownloadClientHeader, Field};

    use super::*;
    use crate::family::download_client::{DownloadClientFields, DownloadClients};

    #[test]
    fn decode_copies_header_and_fields() {
        let resource = ProviderResource {
            id: 7,
            name: "qb".into(),
            implementation: "QBittorrent".into(),
            config_contract: "QBittorrentSettings".into(),
            tags: Some(vec![3, 1, 3]),
            fields: vec![Field::new("host", json!("qb.lan"))],
            header: DownloadClientHeader {
                enable: true,
                protocol: "torrent".into(),
                ..Default::default()
            },
        };
        let item = GenericItem::<DownloadClients>::decode(resource).unwrap();

        assert_eq!(item.tags, BTreeSet::from([1, 3]));
        assert_eq!(item.fields.host.as_deref(), Some("qb.lan"));
        assert!(item.header.enable);
    }

    #[test]
    fn encode_sends_empty_tag_list() {
        let item = GenericItem::<DownloadClients> {
            name: "qb".into(),
            implementation: "QBittorrent".into(),
            fields: DownloadClientFields {
                port: Some(8080),
                ..Default::default()
            },
            ..Default::default()
        };
        let wire = item.encode();

        assert_eq!(wire.tags, Some(Vec::new()));
        assert_eq!(wire.fields, vec![Field::new("port", json!(8080))]);
    }
}
