//! Handler reference atom (`hdlr`).
//!
//! > Note: Distinguish from 'Metadata handler atom' with the same FourCC.
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/handler_reference_atom>

use super::FieldKind;
use crate::FourCC;

typed_atom! {
    /// Handler reference atom (`hdlr`)
    ///
    /// The component name follows the fixed fields and is
    /// found in the atom payload (`Payload::ComponentName`).
    pub struct Hdlr for [Hdlr] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
        /// Possible values:
        /// - `mhlr`: media handler
        /// - `dhlr`: data handler
        /// - `[0, 0, 0, 0]` (MP4, DJI Osmo)
        component_type: Vec<u8> = FieldKind::Bytes(4),
        /// Four CC for the type of media or data handler,
        /// e.g. `vide`, `soun`, `tmcd`, `meta`.
        component_sub_type: Vec<u8> = FieldKind::Bytes(4),
        /// Reserved, should be set to 0.
        component_manufacturer: u32 = FieldKind::U32,
        /// Reserved, should be set to 0.
        component_flags: u32 = FieldKind::U32,
        /// Reserved, should be set to 0.
        component_flags_mask: u32 = FieldKind::U32,
    }
}

impl Hdlr {
    pub fn component_type(&self) -> Option<FourCC> {
        <[u8; 4]>::try_from(self.component_type.as_slice()).ok().map(FourCC)
    }

    pub fn component_sub_type(&self) -> Option<FourCC> {
        <[u8; 4]>::try_from(self.component_sub_type.as_slice()).ok().map(FourCC)
    }

    pub fn handler(&self) -> ComponentType {
        match self.component_sub_type.as_slice() {
            b"vide" => ComponentType::Video,
            b"soun" => ComponentType::Sound,
            b"tmcd" => ComponentType::TimeCode,
            b"meta" => ComponentType::Meta,
            _ => ComponentType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentType {
    Video,
    Sound,
    TimeCode,
    Meta,
    #[default]
    Unknown,
}
