//! Sound media information header atom ('smhd')
//!
//! Location: `moov/trak[multiple]/mdia/minf/smhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/sound_media_information_header_atom>

use super::FieldKind;

typed_atom! {
    /// Sound media information header atom ('smhd')
    pub struct Smhd for [Smhd] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
        balance: u16 = FieldKind::U16,
        reserved: u16 = FieldKind::U16,
    }
}
