//! Atom type registry.
//! Maps a FourCC to its variant, its container/leaf classification,
//! its field schema, and the decoder for any data that follows the
//! fixed fields.
//!
//! See atom types in <https://developer.apple.com/documentation/quicktime-file-format/atoms>.

use std::fmt;

use crate::FourCC;

use super::{
    Alis, Dref, Elst, FieldSpec, Ftyp, Hdlr, Mdhd, Mvhd, SampleDependencies, SampleSizes,
    SampleTable, Smhd, Tkhd, Url, Vmhd,
};

/// Atom variant. One closed set, resolved once per atom
/// from its FourCC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// File type compatibility
    Ftyp,
    /// Movie
    Moov,
    /// Movie header
    Mvhd,
    /// Track
    Trak,
    /// Track header
    Tkhd,
    /// Track references
    Tref,
    /// Edit
    Edts,
    /// Edit list
    Elst,
    /// Media
    Mdia,
    /// Media header
    Mdhd,
    /// Handler reference
    Hdlr,
    /// Media information
    Minf,
    /// Video media information header
    Vmhd,
    /// Sound media information header
    Smhd,
    /// Base media information header
    Gmhd,
    /// Data information
    Dinf,
    /// Data reference
    Dref,
    /// Data reference, alias entry
    Alis,
    /// Data reference, URL entry
    Url,
    /// Sample table
    Stbl,
    Stsd,
    Stts,
    Ctts,
    Stss,
    Stsc,
    Stsz,
    Stco,
    Co64,
    Sdtp,
    /// User data
    Udta,
    /// Media data
    Mdat,
    Free,
    Skip,
    Wide,
    /// Any FourCC not in the registry.
    Generic,
}

/// Whether an atom body is a sequence of atoms or opaque data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Container,
    Leaf,
}

/// Decoder for data following a leaf's fixed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trailing {
    /// `elst` entries, count given by `num_edits`.
    EditList,
    /// Opaque `alis` record.
    Alias,
    /// `url ` blob and the string before its first zero byte.
    Url,
    /// `ftyp` compatible brands.
    Brands,
    /// `hdlr` component name.
    ComponentName,
}

/// One row of the registry.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub code: FourCC,
    pub kind: AtomKind,
    pub layout: Layout,
    pub schema: &'static [FieldSpec],
    pub trailing: Option<Trailing>,
}

const fn container(code: &[u8; 4], kind: AtomKind) -> RegistryEntry {
    RegistryEntry {
        code: FourCC::new(code),
        kind,
        layout: Layout::Container,
        schema: &[],
        trailing: None,
    }
}

const fn leaf(
    code: &[u8; 4],
    kind: AtomKind,
    schema: &'static [FieldSpec],
    trailing: Option<Trailing>,
) -> RegistryEntry {
    RegistryEntry {
        code: FourCC::new(code),
        kind,
        layout: Layout::Leaf,
        schema,
        trailing,
    }
}

/// Known atoms. Anything not listed resolves to `AtomKind::Generic`.
pub static REGISTRY: &[RegistryEntry] = &[
    leaf(b"ftyp", AtomKind::Ftyp, Ftyp::SCHEMA, Some(Trailing::Brands)),
    container(b"moov", AtomKind::Moov),
    leaf(b"mvhd", AtomKind::Mvhd, Mvhd::SCHEMA, None),
    container(b"trak", AtomKind::Trak),
    leaf(b"tkhd", AtomKind::Tkhd, Tkhd::SCHEMA, None),
    container(b"tref", AtomKind::Tref),
    container(b"edts", AtomKind::Edts),
    leaf(b"elst", AtomKind::Elst, Elst::SCHEMA, Some(Trailing::EditList)),
    container(b"mdia", AtomKind::Mdia),
    leaf(b"mdhd", AtomKind::Mdhd, Mdhd::SCHEMA, None),
    leaf(b"hdlr", AtomKind::Hdlr, Hdlr::SCHEMA, Some(Trailing::ComponentName)),
    container(b"minf", AtomKind::Minf),
    leaf(b"vmhd", AtomKind::Vmhd, Vmhd::SCHEMA, None),
    leaf(b"smhd", AtomKind::Smhd, Smhd::SCHEMA, None),
    container(b"gmhd", AtomKind::Gmhd),
    container(b"dinf", AtomKind::Dinf),
    RegistryEntry {
        code: FourCC::new(b"dref"),
        kind: AtomKind::Dref,
        layout: Layout::Container,
        schema: Dref::SCHEMA,
        trailing: None,
    },
    leaf(b"alis", AtomKind::Alis, Alis::SCHEMA, Some(Trailing::Alias)),
    leaf(b"url ", AtomKind::Url, Url::SCHEMA, Some(Trailing::Url)),
    container(b"stbl", AtomKind::Stbl),
    leaf(b"stsd", AtomKind::Stsd, SampleTable::SCHEMA, None),
    leaf(b"stts", AtomKind::Stts, SampleTable::SCHEMA, None),
    leaf(b"ctts", AtomKind::Ctts, SampleTable::SCHEMA, None),
    leaf(b"stss", AtomKind::Stss, SampleTable::SCHEMA, None),
    leaf(b"stsc", AtomKind::Stsc, SampleTable::SCHEMA, None),
    leaf(b"stsz", AtomKind::Stsz, SampleSizes::SCHEMA, None),
    leaf(b"stco", AtomKind::Stco, SampleTable::SCHEMA, None),
    leaf(b"co64", AtomKind::Co64, SampleTable::SCHEMA, None),
    leaf(b"sdtp", AtomKind::Sdtp, SampleDependencies::SCHEMA, None),
    container(b"udta", AtomKind::Udta),
    leaf(b"mdat", AtomKind::Mdat, &[], None),
    leaf(b"free", AtomKind::Free, &[], None),
    leaf(b"skip", AtomKind::Skip, &[], None),
    leaf(b"wide", AtomKind::Wide, &[], None),
];

impl RegistryEntry {
    /// Looks up `code` in the registry.
    pub fn lookup(code: &FourCC) -> Option<&'static RegistryEntry> {
        REGISTRY.iter().find(|entry| &entry.code == code)
    }

    /// Entry for codes missing from the registry.
    pub(crate) const fn generic(code: FourCC, layout: Layout) -> RegistryEntry {
        RegistryEntry {
            code,
            kind: AtomKind::Generic,
            layout,
            schema: &[],
            trailing: None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.layout == Layout::Container
    }
}

impl AtomKind {
    /// Registry entry for this kind. `None` for `AtomKind::Generic`.
    pub fn entry(&self) -> Option<&'static RegistryEntry> {
        REGISTRY.iter().find(|entry| &entry.kind == self)
    }

    /// Field schema for this kind. Empty for kinds without fixed fields.
    pub fn schema(&self) -> &'static [FieldSpec] {
        self.entry().map(|e| e.schema).unwrap_or(&[])
    }
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entry() {
            Some(entry) => write!(f, "{}", entry.code),
            None => write!(f, "<generic>"),
        }
    }
}
