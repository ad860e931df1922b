use std::io::{Cursor, Read};

use binrw::{BinRead, BinReaderExt};

use crate::{
    consts::{HEADER_SIZE, HEADER_SIZE_EXTENDED},
    reader::{AtomReader, Span},
    FourCC, QtError,
};

/// Atom header.
/// 8 or 16 bytes, depending on whether
/// 32 or 64-bit sized.
///
/// ```ignore
/// | [X X X X] [Y Y Y Y] [Z Z Z Z Z Z Z Z] |
///    |         |         |
///    |         |         64bit size (optional, only if 32 bit size == 1)
///    |         FourCC
///    32bit size
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AtomHeader {
    /// Declared atom size in bytes including the 8/16 byte header.
    /// `0` means the atom extends to the end of its enclosing span.
    pub(crate) atom_size: u64,
    /// FourCC
    pub(crate) name: FourCC,
    /// Absolute byte offset for start of atom,
    /// i.e. byte offset for its header,
    /// starting with 32-bit size.
    pub(crate) offset: u64,
    /// Set to `true` if atom size is specified
    /// in the 64 bit area following the FourCC.
    pub(crate) size_64bit: bool,
}

/// The 8 bytes every header starts with.
#[derive(Debug, BinRead)]
#[br(big)]
struct RawHeader {
    size: u32,
    name: [u8; 4],
}

impl AtomHeader {
    /// Reads a header within `span`.
    ///
    /// Returns `Ok(None)` if no bytes at all are left,
    /// i.e. the enclosing sequence ended cleanly on an atom boundary.
    /// Any other shortfall is `QtError::Truncated`.
    ///
    /// On disk the order is 32-bit size, FourCC, then the optional
    /// 64-bit size (only present if the 32-bit size is `1`).
    pub(crate) fn read<R: Read>(
        reader: &mut AtomReader<R>,
        span: Span,
    ) -> Result<Option<Self>, QtError> {
        let offset = reader.pos();

        let mut buf = [0_u8; HEADER_SIZE as usize];
        let read = reader.fill(span, &mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        if read < buf.len() {
            return Err(QtError::Truncated {
                offset,
                needed: HEADER_SIZE as u64,
                available: read as u64,
            });
        }

        let raw = Cursor::new(buf).read_be::<RawHeader>()?;

        let mut hdr = Self {
            atom_size: raw.size as u64,
            name: FourCC(raw.name),
            offset,
            size_64bit: false,
        };

        // 64-bit size follows directly after the FourCC
        if raw.size == 1 {
            hdr.atom_size = reader.read_u64(span)?;
            hdr.size_64bit = true;
        }

        Ok(Some(hdr))
    }

    pub fn name(&self) -> &FourCC {
        &self.name
    }

    /// Declared total size, including the header.
    pub fn atom_size(&self) -> u64 {
        self.atom_size
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// `true` if the atom extends to the end of the enclosing span.
    pub fn is_open_ended(&self) -> bool {
        self.atom_size == 0
    }

    /// Header size in bytes. Returns 8 or 16.
    /// Derived from how the size was stored rather than
    /// the size value, since some devices write a 64-bit
    /// size for every atom regardless of actual size.
    pub fn header_size(&self) -> u8 {
        match self.size_64bit {
            true => HEADER_SIZE_EXTENDED,
            false => HEADER_SIZE,
        }
    }

    /// Data load absolute offset,
    /// i.e. position after header.
    pub fn data_offset(&self) -> u64 {
        self.offset + self.header_size() as u64
    }

    /// Size of data load (excludes header size).
    /// `None` for open ended atoms, or if the declared
    /// size is smaller than the header itself.
    pub fn data_size(&self) -> Option<u64> {
        match self.atom_size {
            0 => None,
            size => size.checked_sub(self.header_size() as u64),
        }
    }

    /// Absolute end offset as declared. `None` for open ended atoms,
    /// sizes smaller than the header, or an end past `u64::MAX`.
    pub(crate) fn declared_end(&self) -> Option<u64> {
        self.data_size()
            .and_then(|size| self.data_offset().checked_add(size))
    }
}
