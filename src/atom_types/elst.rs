//! Edit list atom (`elst`).
//!
//! Location: `moov/trak[multiple]/edts/elst`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/edit_list_atom>

use super::FieldKind;

typed_atom! {
    /// Edit list atom (`elst`).
    ///
    /// The entries themselves are decoded as
    /// `Payload::EditList`, `num_edits` entries of 12 bytes each.
    pub struct Elst for [Elst] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
        num_edits: u32 = FieldKind::U32,
    }
}
