/// Declare a bag of optional field slots together with its registry.
///
/// Each slot names its Rust type and wire name, and may be scoped to a set
/// of implementations. An `aliases` block adds extra registry entries for an
/// existing slot, typically the same value under a second wire name.
///
/// ```ignore
/// field_bag! {
///     pub struct DelugeFields {
///         host: String = "host",
///         port: i64 = "port",
///         seed_time: i64 = "seedCriteria.seedTime",
///         initial_state: i64 = "initialState" => Scope::Except(&["UTorrent"]),
///     }
///     aliases {
///         initial_state: i64 = "intialState" => Scope::Only(&["UTorrent"]),
///     }
/// }
/// ```
#[macro_export]
macro_rules! field_bag {
    (@spec $name:ident, $slot:ident, $ty:ty, $wire:literal) => {
        $crate::field_bag!(@spec $name, $slot, $ty, $wire, $crate::field::Scope::Any)
    };

    (@spec $name:ident, $slot:ident, $ty:ty, $wire:literal, $scope:expr) => {
        $crate::field::FieldSpec {
            name: $wire,
            kind: <$ty as $crate::field::FieldType>::KIND,
            scope: $scope,
            get: |bag: &$name| {
                bag.$slot
                    .as_ref()
                    .map(<$ty as $crate::field::FieldType>::to_value)
            },
            set: |bag: &mut $name, value| {
                if let Some(v) = <$ty as $crate::field::FieldType>::from_value(value) {
                    bag.$slot = Some(v);
                }
            },
            clear: |bag: &mut $name| bag.$slot = None,
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $slot:ident : $ty:ty = $wire:literal $(=> $scope:expr)?
            ),* $(,)?
        }
        $(
            aliases {
                $( $aslot:ident : $aty:ty = $awire:literal => $ascope:expr ),* $(,)?
            }
        )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $slot: Option<$ty>,
            )*
        }

        impl $crate::field::FieldBag for $name {
            const REGISTRY: &'static [$crate::field::FieldSpec<Self>] = &[
                $( $crate::field_bag!(@spec $name, $slot, $ty, $wire $(, $scope)?), )*
                $($( $crate::field_bag!(@spec $name, $aslot, $aty, $awire, $ascope), )*)?
            ];
        }
    };
}
