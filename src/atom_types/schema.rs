//! Table driven field decoding.
//!
//! Each typed atom declares its leading fields as a static list of
//! `FieldSpec`. The decoder walks that list in order, reading exactly
//! the width of each field from the atom's span. Anything left in the
//! span after the last field belongs to the caller
//! (children, trailing data, or bytes to discard).

use std::{fmt, io::Read};

use crate::{
    fixed,
    reader::{AtomReader, Span},
    QtError,
};

/// Semantic kind and width of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single byte.
    U8,
    /// Big Endian `u16`.
    U16,
    /// Big Endian `u32`.
    U32,
    /// Raw bytes of the given length, e.g. 3 byte flags.
    Bytes(usize),
    /// Fixed-point number. Width 2 is 8.8, width 4 is 16.16.
    Fixed(usize),
    /// `u32` if the preceding `version` field is 0, `u64` otherwise.
    /// Used for timestamps and durations in `mvhd`, `tkhd`, `mdhd`.
    Versioned,
}

impl FieldKind {
    /// Width in bytes, given the atom version decoded so far.
    /// `None` if the kind can not be interpreted.
    pub fn width(&self, version: Option<u8>) -> Option<usize> {
        match *self {
            FieldKind::U8 => Some(1),
            FieldKind::U16 => Some(2),
            FieldKind::U32 => Some(4),
            FieldKind::Bytes(n) => Some(n),
            FieldKind::Fixed(n @ (2 | 4)) => Some(n),
            FieldKind::Fixed(_) => None,
            FieldKind::Versioned => match version? {
                0 => Some(4),
                _ => Some(8),
            },
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::U8 => write!(f, "u8"),
            FieldKind::U16 => write!(f, "u16"),
            FieldKind::U32 => write!(f, "u32"),
            FieldKind::Bytes(n) => write!(f, "{n} bytes"),
            FieldKind::Fixed(n) => write!(f, "{n} byte fixed-point"),
            FieldKind::Versioned => write!(f, "versioned u32/u64"),
        }
    }
}

/// Named field in a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Name of the field that selects the width of `FieldKind::Versioned`.
pub const VERSION_FIELD: &str = "version";

/// Decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Bytes(Vec<u8>),
    Fixed(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::U8(v) => write!(f, "{v}"),
            FieldValue::U16(v) => write!(f, "{v}"),
            FieldValue::U32(v) => write!(f, "{v}"),
            FieldValue::U64(v) => write!(f, "{v}"),
            FieldValue::Fixed(v) => write!(f, "{v:.4}"),
            FieldValue::Bytes(v) => {
                for b in v.iter() {
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// Decoded fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(&'static str, FieldValue)>);

impl Fields {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.0.iter().map(|(n, v)| (*n, v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convenience for integer fields (`u8`, `u16`, `u32`, `u64`).
    pub fn uint(&self, name: &str) -> Option<u64> {
        match self.get(name)? {
            FieldValue::U8(v) => Some(*v as u64),
            FieldValue::U16(v) => Some(*v as u64),
            FieldValue::U32(v) => Some(*v as u64),
            FieldValue::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// The atom version, if the schema has one.
    pub fn version(&self) -> Option<u8> {
        match self.get(VERSION_FIELD)? {
            FieldValue::U8(v) => Some(*v),
            _ => None,
        }
    }

    fn push(&mut self, name: &'static str, value: FieldValue) {
        self.0.push((name, value))
    }
}

/// Conversion from a decoded value into the Rust type
/// of a typed atom field.
pub trait FromField: Sized {
    fn from_field(value: &FieldValue) -> Option<Self>;
}

impl FromField for u8 {
    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::U8(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromField for u16 {
    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::U16(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromField for u32 {
    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::U32(v) => Some(*v),
            _ => None,
        }
    }
}

/// Accepts both widths of `FieldKind::Versioned`.
impl FromField for u64 {
    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::U32(v) => Some(*v as u64),
            FieldValue::U64(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromField for f64 {
    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Fixed(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromField for Vec<u8> {
    fn from_field(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bytes(v) => Some(v.to_owned()),
            _ => None,
        }
    }
}

/// Decodes `schema` in order from `span`, appending to `fields`.
///
/// Fields decoded before a failure are kept in `fields`,
/// so that a partially decoded atom can still be inspected.
pub(crate) fn decode<R: Read>(
    reader: &mut AtomReader<R>,
    span: Span,
    schema: &[FieldSpec],
    fields: &mut Fields,
) -> Result<(), QtError> {
    for spec in schema.iter() {
        let width = spec.kind.width(fields.version())
            .ok_or_else(|| QtError::UnsupportedLayout {
                field: spec.name,
                kind: spec.kind.to_string(),
            })?;

        let value = match spec.kind {
            FieldKind::U8 => FieldValue::U8(reader.read_array::<1>(span)?[0]),
            FieldKind::U16 => FieldValue::U16(u16::from_be_bytes(reader.read_array::<2>(span)?)),
            FieldKind::U32 => FieldValue::U32(reader.read_u32(span)?),
            FieldKind::Versioned => match width {
                4 => FieldValue::U32(reader.read_u32(span)?),
                _ => FieldValue::U64(reader.read_u64(span)?),
            },
            FieldKind::Bytes(_) | FieldKind::Fixed(_) => {
                let mut buf = vec![0_u8; width];
                reader.read_exact(span, &mut buf)?;
                match spec.kind {
                    // width already checked to be 2 or 4
                    FieldKind::Fixed(_) => FieldValue::Fixed(fixed::fixed(&buf).unwrap_or_default()),
                    _ => FieldValue::Bytes(buf),
                }
            }
        };

        fields.push(spec.name, value);
    }

    Ok(())
}
