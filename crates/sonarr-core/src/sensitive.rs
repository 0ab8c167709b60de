// ── Sensitive-value preservation ──
//
// The server hands secrets back blank, masked or fingerprinted. Before each
// server call the engine snapshots the plaintext the user wrote (plan on
// create/update, prior state on read) and writes it back over whatever the
// server returned. A sensitive slot in state is therefore either the user's
// last value or unset, never the server's redacted form.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};

use crate::field::{self, FieldBag, FieldValue};

/// Last known plaintext per sensitive attribute.
#[derive(Debug, Clone, Default)]
pub struct SensitiveRegister {
    values: BTreeMap<&'static str, SecretString>,
}

impl SensitiveRegister {
    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.values.insert(name, SecretString::from(value.into()));
    }

    /// Record `value` under `name` when present.
    pub fn capture(&mut self, name: &'static str, value: Option<&str>) {
        if let Some(v) = value {
            self.insert(name, v);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(ExposeSecret::expose_secret)
    }

    /// Owned copy for writing back into a state slot.
    pub fn restore(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_owned)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    /// Every non-empty plaintext, for scrubbing messages.
    pub fn secrets(&self) -> impl Iterator<Item = &str> {
        self.values
            .values()
            .map(ExposeSecret::expose_secret)
            .filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ── Field bags ───────────────────────────────────────────────────────

/// Snapshot the string slots named in `names`.
pub fn capture_fields<B: FieldBag>(
    bag: &B,
    names: &'static [&'static str],
    implementation: &str,
) -> SensitiveRegister {
    let mut register = SensitiveRegister::default();
    for &name in names {
        if let Some(FieldValue::String(value)) = field::read_slot(bag, name, implementation) {
            register.insert(name, value);
        }
    }
    register
}

/// Overwrite every slot named in `names` with the snapshot, clearing slots
/// the snapshot has no value for.
pub fn restore_fields<B: FieldBag>(
    bag: &mut B,
    names: &'static [&'static str],
    implementation: &str,
    register: &SensitiveRegister,
) {
    for &name in names {
        let value = register.restore(name).map(FieldValue::String);
        field::write_slot(bag, name, implementation, value);
    }
}
