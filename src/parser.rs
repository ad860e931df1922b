//! Recursive descent over an atom stream.
//!
//! Each atom is parsed within a span bounded by its declared size:
//!
//! 1. Read header (clean end of input if no bytes are left).
//! 2. Bound the span: declared size minus header size,
//!    or the rest of the enclosing span for size `0`.
//! 3. Resolve the FourCC in the registry.
//! 4. Decode the fixed fields, if any.
//! 5. Containers: parse child atoms until the span is exhausted.
//!    Leaves: run the trailing decoder, if any.
//! 6. Discard whatever is left of the span, so that the next
//!    sibling starts at the correct offset.
//!
//! ```rs
//! use qtatoms::Parser;
//! use std::fs::File;
//!
//! fn main() -> std::io::Result<()> {
//!     let file = File::open("VIDEO.MOV")?;
//!     for atom in Parser::new(file).parse_sequence()? {
//!         print!("{atom}");
//!     }
//!     Ok(())
//! }
//! ```

use std::io::Read;

use log::{debug, trace, warn};

use crate::{
    atom_types::{decode_fields, decode_trailing, Layout, RegistryEntry},
    reader::{AtomReader, Span},
    Atom, AtomHeader, ParseError, ParseOptions, QtError,
};

/// Atom stream parser over a sequential, non-seekable byte source.
#[derive(Debug)]
pub struct Parser<R> {
    reader: AtomReader<R>,
    options: ParseOptions,
    /// Set after the first failure or end of input,
    /// to fuse iteration.
    done: bool,
}

impl<R: Read> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParseOptions::default())
    }

    pub fn with_options(reader: R, options: ParseOptions) -> Self {
        Self {
            reader: AtomReader::new(reader),
            options,
            done: false,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Number of bytes consumed from the stream so far.
    pub fn position(&self) -> u64 {
        self.reader.pos()
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Parses the next top-level atom, including its subtree.
    ///
    /// Returns `Ok(None)` if the stream ended exactly on an atom boundary.
    pub fn parse_one(&mut self) -> Result<Option<Atom>, ParseError> {
        self.parse_atom(Span::UNBOUNDED, 0)
    }

    /// Parses top-level atoms until end of input.
    ///
    /// On failure, the returned error holds the atoms decoded
    /// before the failure, as well as the partially decoded one.
    pub fn parse_sequence(&mut self) -> Result<Vec<Atom>, ParseError> {
        let mut atoms = Vec::new();
        loop {
            match self.parse_one() {
                Ok(Some(atom)) => atoms.push(atom),
                Ok(None) => return Ok(atoms),
                Err(mut err) => {
                    err.atoms = atoms;
                    return Err(err);
                }
            }
        }
    }

    fn parse_atom(&mut self, parent: Span, depth: usize) -> Result<Option<Atom>, ParseError> {
        let header = match AtomHeader::read(&mut self.reader, parent) {
            Ok(Some(header)) => header,
            Ok(None) => return Ok(None),
            Err(err) => return Err(self.fail(err, None)),
        };

        let entry = RegistryEntry::lookup(&header.name)
            .copied()
            .unwrap_or_else(|| {
                let layout = match self.options.unknown_as_container {
                    true => Layout::Container,
                    false => Layout::Leaf,
                };
                RegistryEntry::generic(header.name, layout)
            });

        trace!(
            "{}{} @{} size: {} [{:?}]",
            "    ".repeat(depth),
            header.name,
            header.offset,
            header.atom_size,
            entry.kind,
        );

        let mut atom = Atom::new(header, entry.kind, entry.is_container());

        if depth > self.options.max_depth {
            let err = QtError::DepthExceeded {
                depth,
                max: self.options.max_depth,
            };
            return Err(self.fail(err, Some(atom)));
        }

        let declared_end = atom.header.declared_end();
        let span = match (atom.header.atom_size, declared_end) {
            (0, _) => parent,
            (_, Some(end)) => {
                let span = parent.narrow(end);
                if span.end != Some(end) {
                    debug!("'{}' @{} clamped to enclosing span end {:?}", atom.name(), atom.offset(), span.end);
                }
                span
            }
            (size, None) => {
                let err = QtError::InvalidSize {
                    offset: atom.offset(),
                    size,
                    header_size: atom.header_size(),
                };
                return Err(self.fail(err, Some(atom)));
            }
        };

        if let Err(mut err) = self.parse_body(&mut atom, &entry, span, depth) {
            if let Some(child) = err.partial.take() {
                atom.children.push(*child);
            }
            atom.consumed = self.reader.pos() - atom.offset();
            err.partial = Some(Box::new(atom));
            return Err(err);
        }

        match self.reader.discard(span) {
            Ok(0) => (),
            Ok(n) => debug!("Discarded {n} unread bytes in '{}' @{}", atom.name(), atom.offset()),
            Err(err) => return Err(self.fail(err, Some(atom))),
        }

        atom.consumed = self.reader.pos() - atom.offset();

        // Declared end lies beyond the enclosing span.
        if let (Some(end), Some(bound)) = (declared_end, span.end) {
            if end > bound {
                let err = QtError::Truncated {
                    offset: bound,
                    needed: end - bound,
                    available: 0,
                };
                return Err(self.fail(err, Some(atom)));
            }
        }

        Ok(Some(atom))
    }

    /// Fields, then children or trailing data.
    /// A failing child is returned as the error's `partial`.
    fn parse_body(
        &mut self,
        atom: &mut Atom,
        entry: &RegistryEntry,
        span: Span,
        depth: usize,
    ) -> Result<(), ParseError> {
        if !entry.schema.is_empty() {
            decode_fields(&mut self.reader, span, entry.schema, &mut atom.fields)
                .map_err(|err| self.fail(err, None))?;
        }

        match entry.layout {
            Layout::Container => {
                while let Some(child) = self.parse_atom(span, depth + 1)? {
                    atom.children.push(child);
                }
            }
            Layout::Leaf => {
                if let Some(trailing) = entry.trailing {
                    decode_trailing(&mut self.reader, span, trailing, &atom.fields, &mut atom.payload)
                        .map_err(|err| self.fail(err, None))?;
                }
            }
        }

        Ok(())
    }

    fn fail(&mut self, error: QtError, partial: Option<Atom>) -> ParseError {
        match &partial {
            Some(atom) => warn!("Failed to parse '{}' @{}: {error}", atom.name(), atom.offset()),
            None => warn!("Failed to parse atom @{}: {error}", self.reader.pos()),
        }
        self.done = true;
        ParseError::new(error, partial)
    }
}

/// Iterates over top-level atoms.
/// Stops after end of input or the first failure.
impl<R: Read> Iterator for Parser<R> {
    type Item = Result<Atom, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.parse_one() {
            Ok(Some(atom)) => Some(Ok(atom)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => Some(Err(err)),
        }
    }
}

impl<R: Read> std::iter::FusedIterator for Parser<R> {}

/// Parses all top-level atoms in `reader`.
pub fn parse<R: Read>(reader: R) -> Result<Vec<Atom>, ParseError> {
    Parser::new(reader).parse_sequence()
}

/// Parses a single atom (and its subtree) from `reader`.
/// `Ok(None)` if `reader` is already at end of input.
pub fn parse_one<R: Read>(reader: R) -> Result<Option<Atom>, ParseError> {
    Parser::new(reader).parse_one()
}
