// Provider-family items as managed resources
//
// Every download client, indexer, import list, notification and metadata
// adapter runs through this one impl: desired state -> generic item -> wire
// and back, with secrets and server-normalised slots handled by name.

use std::marker::PhantomData;

use sonarr_api::models::ProviderResource;

use super::ManagedResource;
use crate::error::CoreError;
use crate::field::{self, FieldValue};
use crate::generic::{FamilyItem, GenericItem, ProviderFamily};
use crate::sensitive::{self, SensitiveRegister};

/// `ManagedResource` for any family item `T`.
#[derive(Debug, Default)]
pub struct Family<T>(PhantomData<fn() -> T>);

type HeaderOf<T> = <<T as FamilyItem>::Family as ProviderFamily>::Header;

impl<T: FamilyItem> ManagedResource for Family<T> {
    type State = T;
    type Wire = ProviderResource<HeaderOf<T>>;

    const TYPE_NAME: &'static str = T::TYPE_NAME;
    const ENDPOINT: &'static str = <T::Family as ProviderFamily>::ENDPOINT;
    const ALIASES: &'static [(&'static str, &'static str)] = T::ALIASES;
    const IMPORT_KEY: Option<&'static str> = Some("name");

    fn build_wire(state: &T) -> Result<Self::Wire, CoreError> {
        Ok(state.to_generic().encode())
    }

    fn apply_wire(wire: Self::Wire) -> Result<T, CoreError> {
        let item = GenericItem::decode(wire)?;
        Ok(T::from_generic(&item))
    }

    fn identifier(state: &T) -> i64 {
        state.id()
    }

    fn set_identifier(state: &mut T, id: i64) {
        state.set_id(id);
    }

    fn capture_sensitive(state: &T) -> SensitiveRegister {
        let item = state.to_generic();
        sensitive::capture_fields(&item.fields, T::SENSITIVE, &item.implementation)
    }

    fn restore_sensitive(state: &mut T, register: &SensitiveRegister) {
        if T::SENSITIVE.is_empty() {
            return;
        }
        let mut item = state.to_generic();
        sensitive::restore_fields(&mut item.fields, T::SENSITIVE, &item.implementation, register);
        *state = T::from_generic(&item);
    }

    /// Keep the baseline's spelling of normalised slots when the server's
    /// form is equivalent or missing.
    fn reconcile(baseline: &T, fresh: &mut T) {
        if T::NORMALIZED.is_empty() {
            return;
        }
        let before = baseline.to_generic();
        let mut after = fresh.to_generic();
        let mut changed = false;

        for &name in T::NORMALIZED {
            let Some(wanted) = field::read_slot(&before.fields, name, &before.implementation)
            else {
                continue;
            };
            let got = field::read_slot(&after.fields, name, &after.implementation);
            let keep = got
                .as_ref()
                .is_none_or(|got| got != &wanted && normalized_eq(got, &wanted));
            if keep {
                field::write_slot(&mut after.fields, name, &after.implementation, Some(wanted));
                changed = true;
            }
        }

        if changed {
            *fresh = T::from_generic(&after);
        }
    }
}

/// Equal after trimming whitespace and surrounding slashes.
fn normalized_eq(a: &FieldValue, b: &FieldValue) -> bool {
    match (a, b) {
        (FieldValue::String(a), FieldValue::String(b)) => {
            a.trim().trim_matches('/') == b.trim().trim_matches('/')
        }
        _ => a == b,
    }
}
