//! Decoded atom node.

use std::fmt;

use crate::{
    atom_types::{AtomKind, EditListEntry, Fields, Payload, TypedAtom},
    FourCC,
};

use super::AtomHeader;

/// Decoded atom.
///
/// Containers hold their child atoms in stream order.
/// Leaves hold decoded fields and, for some kinds,
/// a trailing payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub(crate) header: AtomHeader,
    pub(crate) kind: AtomKind,
    pub(crate) container: bool,
    /// Bytes consumed from the stream, header included.
    pub(crate) consumed: u64,
    pub(crate) fields: Fields,
    pub(crate) payload: Payload,
    pub(crate) children: Vec<Atom>,
}

impl Atom {
    pub(crate) fn new(header: AtomHeader, kind: AtomKind, container: bool) -> Self {
        Self {
            consumed: header.header_size() as u64,
            header,
            kind,
            container,
            fields: Fields::default(),
            payload: Payload::None,
            children: Vec::new(),
        }
    }

    pub fn header(&self) -> &AtomHeader {
        &self.header
    }

    pub fn name(&self) -> &FourCC {
        &self.header.name
    }

    pub fn kind(&self) -> AtomKind {
        self.kind
    }

    pub fn is_container(&self) -> bool {
        self.container
    }

    /// Declared size in bytes, header included.
    /// `0` for an atom extending to the end of its enclosing span,
    /// see `consumed()` for its actual size.
    pub fn size(&self) -> u64 {
        self.header.atom_size
    }

    /// Header size in bytes. 8 or 16.
    pub fn header_size(&self) -> u8 {
        self.header.header_size()
    }

    /// Absolute byte offset of the atom's header in the stream.
    pub fn offset(&self) -> u64 {
        self.header.offset
    }

    /// Number of bytes this atom took up in the stream,
    /// header included. Equals `size()` for complete atoms
    /// that are not open ended.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Child atoms in stream order. Empty for leaves.
    pub fn children(&self) -> &[Atom] {
        &self.children
    }

    /// Fixed fields decoded from the atom's schema.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Typed view of this atom, e.g. `atom.get::<Mvhd>()`.
    /// `None` if the atom is of another kind,
    /// or was only partially decoded.
    pub fn get<T: TypedAtom>(&self) -> Option<T> {
        match T::accepts(self.kind) {
            true => T::from_fields(&self.fields),
            false => None,
        }
    }

    /// Edit list entries if this is an `elst` atom.
    pub fn edit_list(&self) -> Option<&[EditListEntry]> {
        match &self.payload {
            Payload::EditList(entries) => Some(entries),
            _ => None,
        }
    }

    /// Alias record if this is an `alis` atom.
    pub fn alias(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Alias(data) => Some(data),
            _ => None,
        }
    }

    /// URL string if this is a `url ` atom.
    pub fn url(&self) -> Option<&str> {
        match &self.payload {
            Payload::Url { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Compatible brands if this is an `ftyp` atom.
    pub fn brands(&self) -> Option<&[FourCC]> {
        match &self.payload {
            Payload::Brands(brands) => Some(brands),
            _ => None,
        }
    }

    /// Component name if this is an `hdlr` atom.
    pub fn component_name(&self) -> Option<&str> {
        match &self.payload {
            Payload::ComponentName(name) => Some(name),
            _ => None,
        }
    }

    /// Depth-first, pre-order iterator over this atom
    /// and all of its descendants.
    pub fn iter(&self) -> AtomIter<'_> {
        AtomIter { stack: vec![self] }
    }

    /// First atom named `name` in this subtree (depth-first),
    /// including `self`.
    pub fn find(&self, name: &FourCC) -> Option<&Atom> {
        self.iter().find(|a| a.name() == name)
    }

    /// Descends through direct children along a `/` separated
    /// path relative to this atom, e.g. `"trak/mdia/mdhd"` from `moov`.
    /// Takes the first match at each level.
    pub fn find_path(&self, path: &str) -> Option<&Atom> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |atom, name| {
                atom.children.iter().find(|c| c.name() == &name)
            })
    }

    /// All direct children named `name`, e.g. all `trak` in `moov`.
    pub fn children_named<'a>(&'a self, name: &'a FourCC) -> impl Iterator<Item = &'a Atom> + 'a {
        self.children.iter().filter(move |c| c.name() == name)
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(
            f,
            "{}{} @{} size: {}",
            "    ".repeat(depth),
            self.name(),
            self.offset(),
            self.consumed,
        )?;
        if self.kind == AtomKind::Generic {
            write!(f, " <generic>")?;
        }
        for (name, value) in self.fields.iter() {
            write!(f, " {name}={value}")?;
        }
        match &self.payload {
            Payload::None => (),
            Payload::EditList(entries) => write!(f, " edits={}", entries.len())?,
            Payload::Alias(data) => write!(f, " alias={} bytes", data.len())?,
            Payload::Url { url, .. } => write!(f, " url={url:?}")?,
            Payload::Brands(brands) => {
                let brands: Vec<String> = brands.iter().map(|b| b.to_string()).collect();
                write!(f, " brands={}", brands.join(","))?
            }
            Payload::ComponentName(name) => write!(f, " name={name:?}")?,
        }
        writeln!(f)?;
        for child in self.children.iter() {
            child.fmt_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Renders the subtree as an indented listing, one atom per line.
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// See `Atom::iter()`.
pub struct AtomIter<'a> {
    stack: Vec<&'a Atom>,
}

impl<'a> Iterator for AtomIter<'a> {
    type Item = &'a Atom;

    fn next(&mut self) -> Option<Self::Item> {
        let atom = self.stack.pop()?;
        self.stack.extend(atom.children.iter().rev());
        Some(atom)
    }
}
