// ── Field codec ──
//
// Translates the server's polymorphic `fields: [{name, value}]` list into
// typed slots and back. Every bag of slots (a family union or one concrete
// implementation's subset) carries a static registry mapping wire name to
// kind and accessors; decode, encode and bag-to-bag transfer are driven by
// that registry alone.

mod macros;

use serde_json::Value;
use sonarr_api::models::Field;
use thiserror::Error;

// ── Kinds and values ─────────────────────────────────────────────────

/// The six value kinds a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FieldKind {
    String,
    Int,
    Float,
    Bool,
    IntSeq,
    StringSeq,
}

/// A decoded field value. Always agrees with the registry kind it was
/// decoded against.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    IntSeq(Vec<i64>),
    StringSeq(Vec<String>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::String(_) => FieldKind::String,
            Self::Int(_) => FieldKind::Int,
            Self::Float(_) => FieldKind::Float,
            Self::Bool(_) => FieldKind::Bool,
            Self::IntSeq(_) => FieldKind::IntSeq,
            Self::StringSeq(_) => FieldKind::StringSeq,
        }
    }

    /// Coerce a JSON value to `kind`. `None` means the JSON type does not fit.
    pub fn from_json(kind: FieldKind, value: &Value) -> Option<Self> {
        match kind {
            FieldKind::String => value.as_str().map(|s| Self::String(s.to_owned())),
            FieldKind::Bool => value.as_bool().map(Self::Bool),
            FieldKind::Int => json_int(value).map(Self::Int),
            FieldKind::Float => value.as_f64().map(Self::Float),
            FieldKind::IntSeq => value
                .as_array()?
                .iter()
                .map(json_int)
                .collect::<Option<Vec<_>>>()
                .map(Self::IntSeq),
            FieldKind::StringSeq => value
                .as_array()?
                .iter()
                .map(|v| v.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(Self::StringSeq),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::from(s.as_str()),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
            Self::Bool(b) => Value::from(*b),
            Self::IntSeq(v) => Value::from(v.clone()),
            Self::StringSeq(v) => Value::from(v.clone()),
        }
    }
}

/// Integers arrive as JSON numbers, sometimes written with a zero fraction
/// (`8080.0`). Anything with a real fractional part is rejected.
#[allow(
    clippy::as_conversions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
fn json_int(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    let whole = f.fract().abs() < f64::EPSILON;
    let in_range = f >= i64::MIN as f64 && f <= i64::MAX as f64;
    (whole && in_range).then_some(f as i64)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

// ── Slot types ───────────────────────────────────────────────────────

/// A Rust type that can sit in a field slot.
pub trait FieldType: Sized {
    const KIND: FieldKind;
    fn to_value(&self) -> FieldValue;
    fn from_value(value: FieldValue) -> Option<Self>;
}

macro_rules! impl_field_type {
    ($ty:ty, $variant:ident) => {
        impl FieldType for $ty {
            const KIND: FieldKind = FieldKind::$variant;

            fn to_value(&self) -> FieldValue {
                FieldValue::$variant(self.clone())
            }

            fn from_value(value: FieldValue) -> Option<Self> {
                match value {
                    FieldValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_field_type!(String, String);
impl_field_type!(Vec<i64>, IntSeq);
impl_field_type!(Vec<String>, StringSeq);

macro_rules! impl_copy_field_type {
    ($ty:ty, $variant:ident) => {
        impl FieldType for $ty {
            const KIND: FieldKind = FieldKind::$variant;

            fn to_value(&self) -> FieldValue {
                FieldValue::$variant(*self)
            }

            fn from_value(value: FieldValue) -> Option<Self> {
                match value {
                    FieldValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_copy_field_type!(i64, Int);
impl_copy_field_type!(f64, Float);
impl_copy_field_type!(bool, Bool);

// ── Registry ─────────────────────────────────────────────────────────

/// Which implementations a registry entry applies to.
#[derive(Debug, Clone, Copy)]
pub enum Scope {
    Any,
    Only(&'static [&'static str]),
    Except(&'static [&'static str]),
}

impl Scope {
    pub fn admits(self, implementation: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(list) => list.contains(&implementation),
            Self::Except(list) => !list.contains(&implementation),
        }
    }
}

/// One registry entry: a wire name bound to a typed slot of bag `B`.
pub struct FieldSpec<B> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub scope: Scope,
    pub get: fn(&B) -> Option<FieldValue>,
    /// Only called with values of `kind`.
    pub set: fn(&mut B, FieldValue),
    pub clear: fn(&mut B),
}

/// A struct of optional field slots plus its registry.
///
/// Declared with [`field_bag!`](crate::field_bag); hand-written bags build
/// the same registry.
pub trait FieldBag: Default + Sized + 'static {
    const REGISTRY: &'static [FieldSpec<Self>];

    /// Registry entry for `name` that applies to `implementation`.
    fn spec(name: &str, implementation: &str) -> Option<&'static FieldSpec<Self>> {
        Self::REGISTRY
            .iter()
            .find(|s| s.name == name && s.scope.admits(implementation))
    }

    /// Every wire name the bag can carry, in registry order.
    fn wire_names() -> impl Iterator<Item = &'static str> {
        Self::REGISTRY.iter().map(|s| s.name)
    }
}

// ── Errors ───────────────────────────────────────────────────────────

/// The server sent a value whose JSON type does not match the registry.
///
/// Names the field but never carries the value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "field `{name}` should be {expected} but the server sent {found}; \
     the provider may be out of date with the server, try upgrading it"
)]
pub struct FieldError {
    pub name: String,
    pub expected: FieldKind,
    pub found: &'static str,
}

// ── Decode / encode ──────────────────────────────────────────────────

/// Decode a wire field list into a bag.
///
/// Unknown names and names scoped away from `implementation` are skipped.
/// `null` leaves the slot unset.
pub fn decode_fields<B: FieldBag>(fields: &[Field], implementation: &str) -> Result<B, FieldError> {
    let mut bag = B::default();
    for field in fields {
        if field.value.is_null() {
            continue;
        }
        let Some(spec) = B::spec(&field.name, implementation) else {
            continue;
        };
        let value = FieldValue::from_json(spec.kind, &field.value).ok_or_else(|| FieldError {
            name: field.name.clone(),
            expected: spec.kind,
            found: json_type_name(&field.value),
        })?;
        (spec.set)(&mut bag, value);
    }
    Ok(bag)
}

/// Encode every set slot admitted for `implementation`, in registry order.
pub fn encode_fields<B: FieldBag>(bag: &B, implementation: &str) -> Vec<Field> {
    B::REGISTRY
        .iter()
        .filter(|s| s.scope.admits(implementation))
        .filter_map(|s| (s.get)(bag).map(|v| Field::new(s.name, v.to_json())))
        .collect()
}

/// Copy every set slot of `from` into a fresh `Dst`, matching entries by
/// wire name and kind. Slots `Dst` does not declare are dropped.
pub fn transfer<Src: FieldBag, Dst: FieldBag>(from: &Src, implementation: &str) -> Dst {
    let mut to = Dst::default();
    for spec in Src::REGISTRY
        .iter()
        .filter(|s| s.scope.admits(implementation))
    {
        let Some(value) = (spec.get)(from) else {
            continue;
        };
        if let Some(target) = Dst::spec(spec.name, implementation).filter(|t| t.kind == spec.kind) {
            (target.set)(&mut to, value);
        }
    }
    to
}

/// Read one slot by wire name.
pub fn read_slot<B: FieldBag>(bag: &B, name: &str, implementation: &str) -> Option<FieldValue> {
    B::spec(name, implementation).and_then(|s| (s.get)(bag))
}

/// Write (or clear, on `None`) one slot by wire name. Kind mismatches and
/// unknown names are ignored.
pub fn write_slot<B: FieldBag>(
    bag: &mut B,
    name: &str,
    implementation: &str,
    value: Option<FieldValue>,
) {
    let Some(spec) = B::spec(name, implementation) else {
        return;
    };
    match value {
        Some(v) if v.kind() == spec.kind => (spec.set)(bag, v),
        Some(_) => {}
        None => (spec.clear)(bag),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    crate::field_bag! {
        struct Sample {
            host: String = "host",
            port: i64 = "port",
            ratio: f64 = "seedCriteria.seedRatio",
            use_ssl: bool = "useSsl",
            categories: Vec<i64> = "categories",
            labels: Vec<String> = "labels",
            initial_state: i64 = "initialState" => Scope::Except(&["UTorrent"]),
        }
        aliases {
            initial_state: i64 = "intialState" => Scope::Only(&["UTorrent"]),
        }
    }

    crate::field_bag! {
        struct Narrow {
            host: String = "host",
            port: i64 = "port",
        }
    }

    fn wire(pairs: &[(&str, Value)]) -> Vec<Field> {
        pairs
            .iter()
            .map(|(n, v)| Field::new(*n, v.clone()))
            .collect()
    }

    #[test]
    fn decode_assigns_known_and_skips_unknown() {
        let fields = wire(&[
            ("host", json!("qb.lan")),
            ("port", json!(8080)),
            ("somethingNew", json!({"a": 1})),
            ("useSsl", json!(true)),
        ]);
        let bag: Sample = decode_fields(&fields, "QBittorrent").unwrap();

        assert_eq!(bag.host.as_deref(), Some("qb.lan"));
        assert_eq!(bag.port, Some(8080));
        assert_eq!(bag.use_ssl, Some(true));
        assert_eq!(bag.ratio, None);
    }

    #[test]
    fn null_leaves_slot_unset() {
        let fields = wire(&[("host", Value::Null)]);
        let bag: Sample = decode_fields(&fields, "QBittorrent").unwrap();
        assert_eq!(bag.host, None);
    }

    #[test]
    fn int_accepts_zero_fraction_only() {
        let ok: Sample = decode_fields(&wire(&[("port", json!(8080.0))]), "X").unwrap();
        assert_eq!(ok.port, Some(8080));

        let err = decode_fields::<Sample>(&wire(&[("port", json!(80.5))]), "X").unwrap_err();
        assert_eq!(err.expected, FieldKind::Int);
        assert_eq!(err.found, "float");
    }

    #[test]
    fn float_accepts_integers() {
        let bag: Sample =
            decode_fields(&wire(&[("seedCriteria.seedRatio", json!(2))]), "X").unwrap();
        assert_eq!(bag.ratio, Some(2.0));
    }

    #[test]
    fn kind_mismatch_names_field_not_value() {
        let fields = wire(&[("port", json!("eight-thousand"))]);
        let err = decode_fields::<Sample>(&fields, "Sabnzbd").unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("`port`"));
        assert!(!msg.contains("eight-thousand"));
    }

    #[test]
    fn sequences_coerce_elementwise() {
        let bag: Sample = decode_fields(
            &wire(&[("categories", json!([5030])), ("labels", json!(["a", "b"]))]),
            "X",
        )
        .unwrap();
        assert_eq!(bag.categories, Some(vec![5030]));
        assert_eq!(bag.labels, Some(vec!["a".to_owned(), "b".to_owned()]));

        let err = decode_fields::<Sample>(&wire(&[("categories", json!([1, "2"]))]), "X");
        assert!(err.is_err());
    }

    #[test]
    fn encode_emits_set_slots_in_registry_order() {
        let bag = Sample {
            use_ssl: Some(false),
            host: Some("qb.lan".into()),
            port: Some(8080),
            ..Default::default()
        };
        let fields = encode_fields(&bag, "QBittorrent");
        assert_eq!(
            fields,
            wire(&[
                ("host", json!("qb.lan")),
                ("port", json!(8080)),
                ("useSsl", json!(false)),
            ])
        );
    }

    #[test]
    fn one_element_sequence_stays_a_sequence() {
        let bag = Sample {
            categories: Some(vec![5040]),
            ..Default::default()
        };
        let fields = encode_fields(&bag, "X");
        assert_eq!(fields[0].value, json!([5040]));

        let back: Sample = decode_fields(&fields, "X").unwrap();
        assert_eq!(back.categories, Some(vec![5040]));
    }

    #[test]
    fn scoped_alias_picks_wire_name_per_implementation() {
        let bag = Sample {
            initial_state: Some(1),
            ..Default::default()
        };
        assert_eq!(encode_fields(&bag, "UTorrent")[0].name, "intialState");
        assert_eq!(encode_fields(&bag, "Deluge")[0].name, "initialState");

        let decoded: Sample =
            decode_fields(&wire(&[("intialState", json!(2))]), "UTorrent").unwrap();
        assert_eq!(decoded.initial_state, Some(2));

        // The typo'd name is unknown for everyone else.
        let ignored: Sample =
            decode_fields(&wire(&[("intialState", json!(2))]), "Deluge").unwrap();
        assert_eq!(ignored.initial_state, None);
    }

    #[test]
    fn transfer_keeps_shared_slots_only() {
        let wide = Sample {
            host: Some("h".into()),
            port: Some(1),
            use_ssl: Some(true),
            ..Default::default()
        };
        let narrow: Narrow = transfer(&wide, "X");
        assert_eq!(
            narrow,
            Narrow {
                host: Some("h".into()),
                port: Some(1),
            }
        );

        let back: Sample = transfer(&narrow, "X");
        assert_eq!(back.use_ssl, None);
        assert_eq!(back.port, Some(1));
    }

    #[test]
    fn write_slot_clears_on_none() {
        let mut bag = Sample {
            host: Some("h".into()),
            ..Default::default()
        };
        write_slot(&mut bag, "host", "X", None);
        assert_eq!(bag.host, None);

        write_slot(&mut bag, "port", "X", Some(FieldValue::String("nope".into())));
        assert_eq!(bag.port, None);
    }
}
