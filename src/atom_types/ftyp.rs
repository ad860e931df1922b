//! File type compatibility atom (`ftyp`).
//!
//! Location: `ftyp` (the very first atom in an MP4 file)
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/file_type_compatibility_atom>

use super::FieldKind;
use crate::FourCC;

typed_atom! {
    /// File type compatibility atom (`ftyp`).
    ///
    /// Compatible brands follow the fixed fields and are
    /// found in the atom payload (`Payload::Brands`).
    pub struct Ftyp for [Ftyp] {
        major_brand: u32 = FieldKind::U32,
        /// MP4: seems to be set to 0.
        /// QuickTime: Four binary-coded decimal values, indicating the century, year, and month of format spec.
        minor_version: u32 = FieldKind::U32,
    }
}

impl Ftyp {
    /// Major brand as FourCC, e.g. `qt  ` or `isom`.
    pub fn major_brand(&self) -> FourCC {
        FourCC::from_u32(self.major_brand)
    }
}
