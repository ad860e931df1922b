//! Sample table leaves (`moov/trak/mdia/minf/stbl/*`).
//!
//! Only the leading version, flags and entry count are decoded.
//! The tables themselves are skipped.

use super::FieldKind;

typed_atom! {
    /// Header shared by `stsd`, `stts`, `ctts`, `stss`, `stsc`, `stco`, `co64`.
    pub struct SampleTable for [Stsd, Stts, Ctts, Stss, Stsc, Stco, Co64] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
        entry_count: u32 = FieldKind::U32,
    }
}

typed_atom! {
    /// Sample size atom (`stsz`) header.
    pub struct SampleSizes for [Stsz] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
        /// If non-zero, all samples have this size
        /// and no table follows.
        sample_size: u32 = FieldKind::U32,
        entry_count: u32 = FieldKind::U32,
    }
}

typed_atom! {
    /// Sample dependency flags atom (`sdtp`) header.
    /// One byte per sample follows, count given by `stsz`.
    pub struct SampleDependencies for [Sdtp] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
    }
}
