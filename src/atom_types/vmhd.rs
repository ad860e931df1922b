//! Video media information header atom (`vmhd`).
//!
//! Location: `moov/trak[multiple]/mdia/minf/vmhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/video_media_information_header_atom>

use super::FieldKind;

typed_atom! {
    /// Video media information header atom (`vmhd`).
    ///
    /// Location: `moov/trak[multiple]/mdia/minf/vmhd`
    pub struct Vmhd for [Vmhd] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
        /// Specified transfer mode.
        graphics_mode: u16 = FieldKind::U16,
        /// Red, green, and blue colours
        /// for the transfer mode operation.
        op_color: Vec<u8> = FieldKind::Bytes(6),
    }
}

impl Vmhd {
    /// `op_color` as `[red, green, blue]`.
    pub fn rgb(&self) -> Option<[u16; 3]> {
        match self.op_color.as_slice() {
            [r0, r1, g0, g1, b0, b1] => Some([
                u16::from_be_bytes([*r0, *r1]),
                u16::from_be_bytes([*g0, *g1]),
                u16::from_be_bytes([*b0, *b1]),
            ]),
            _ => None,
        }
    }
}
