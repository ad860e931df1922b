//! Typed atom variants, the type registry,
//! and the decoders that populate them.

/// Declares a typed atom: a struct with one public field per schema
/// entry, its `SCHEMA` table, and its `TypedAtom` impl.
///
/// ```ignore
/// typed_atom! {
///     pub struct Smhd for [Smhd] {
///         version: u8 = FieldKind::U8,
///         flags: Vec<u8> = FieldKind::Bytes(3),
///         balance: u16 = FieldKind::U16,
///     }
/// }
/// ```
macro_rules! typed_atom {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident for [$($kind:ident),+ $(,)?] {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $ty:ty = $field_kind:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $name {
            /// Field layout, in stream order.
            pub const SCHEMA: &'static [$crate::atom_types::FieldSpec] = &[
                $(
                    $crate::atom_types::FieldSpec {
                        name: stringify!($field),
                        kind: $field_kind,
                    },
                )*
            ];
        }

        impl $crate::atom_types::TypedAtom for $name {
            fn schema() -> &'static [$crate::atom_types::FieldSpec] {
                Self::SCHEMA
            }

            fn accepts(kind: $crate::atom_types::AtomKind) -> bool {
                matches!(kind, $($crate::atom_types::AtomKind::$kind)|+)
            }

            fn from_fields(fields: &$crate::atom_types::Fields) -> Option<Self> {
                Some(Self {
                    $(
                        $field: $crate::atom_types::FromField::from_field(
                            fields.get(stringify!($field))?
                        )?,
                    )*
                })
            }
        }
    };
}

mod schema;
mod trailing;
mod types;

mod dref;
mod elst;
mod ftyp;
mod hdlr;
mod mdhd;
mod mvhd;
mod smhd;
mod stbl;
mod tkhd;
mod vmhd;

pub use schema::{FieldKind, FieldSpec, FieldValue, Fields, FromField, VERSION_FIELD};
pub use trailing::{EditListEntry, Payload};
pub use types::{AtomKind, Layout, RegistryEntry, Trailing, REGISTRY};

pub(crate) use schema::decode as decode_fields;
pub(crate) use trailing::decode as decode_trailing;

pub use dref::{Alis, Dref, Url};
pub use elst::Elst;
pub use ftyp::Ftyp;
pub use hdlr::{ComponentType, Hdlr};
pub use mdhd::Mdhd;
pub use mvhd::Mvhd;
pub use smhd::Smhd;
pub use stbl::{SampleDependencies, SampleSizes, SampleTable};
pub use tkhd::Tkhd;
pub use vmhd::Vmhd;

/// A typed view over the decoded fields of an atom.
pub trait TypedAtom: Sized {
    /// Field layout, in stream order.
    fn schema() -> &'static [FieldSpec];

    /// `true` if atoms of `kind` decode into `Self`.
    fn accepts(kind: AtomKind) -> bool;

    /// Builds `Self` from decoded fields.
    /// `None` if a field is missing, e.g. for a truncated atom.
    fn from_fields(fields: &Fields) -> Option<Self>;
}
