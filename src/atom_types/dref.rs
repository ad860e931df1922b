//! Data reference atom (`dref`) and its entries.
//! Declares source(s) of media data in track.
//!
//! Location: `moov/trak[multiple]/mdia/minf/dinf/dref`
//!
//! `dref` is a container: after its fixed fields follow
//! `num_entries` data reference atoms, usually `url ` or `alis`.
//! A flag value of `1` on an entry means the media data
//! is in the same file as the movie, in which case
//! the entry has no data.

use super::FieldKind;

typed_atom! {
    /// Data reference atom (`dref`).
    pub struct Dref for [Dref] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
        num_entries: u32 = FieldKind::U32,
    }
}

typed_atom! {
    /// Macintosh alias data reference (`alis`).
    /// Alias record bytes are kept opaque (`Payload::Alias`).
    pub struct Alis for [Alis] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
    }
}

typed_atom! {
    /// URL data reference (`url `).
    /// The URL is found in `Payload::Url`.
    pub struct Url for [Url] {
        version: u8 = FieldKind::U8,
        flags: Vec<u8> = FieldKind::Bytes(3),
    }
}

impl Alis {
    /// Media data is in the same file as the movie.
    pub fn is_self_reference(&self) -> bool {
        self.flags.last().is_some_and(|f| f & 1 == 1)
    }
}

impl Url {
    /// Media data is in the same file as the movie.
    pub fn is_self_reference(&self) -> bool {
        self.flags.last().is_some_and(|f| f & 1 == 1)
    }
}
