//! Structural decoder for QuickTime / ISO base media ("MP4") files.
//! Reads the nested atom tree (movie, tracks, timing, sample table
//! headers) from any sequential `std::io::Read` without seeking.
//! Does not and will not decode audio or video.
//!
//! The implementation was mostly done with help from
//! <https://developer.apple.com/documentation/quicktime-file-format>.
//!
//! ```rs
//! use qtatoms::{FourCC, Mvhd, Parser};
//! use std::fs::File;
//!
//! fn main() -> std::io::Result<()> {
//!     let file = File::open("VIDEO.MOV")?;
//!     let atoms = Parser::new(file).parse_sequence()?;
//!
//!     for atom in atoms.iter() {
//!         print!("{atom}")
//!     }
//!
//!     let mvhd = atoms.iter()
//!         .find_map(|a| a.find(&FourCC::new(b"mvhd")))
//!         .and_then(|a| a.get::<Mvhd>());
//!     println!("{:?}", mvhd.and_then(|m| m.duration()));
//!
//!     Ok(())
//! }
//! ```

pub mod atom;
pub mod atom_types;
pub mod consts;
pub mod errors;
pub mod fixed;
pub mod fourcc;
pub mod options;
pub mod parser;
pub(crate) mod reader;
pub(crate) mod support;

#[cfg(test)]
mod tests;

pub use atom::{Atom, AtomHeader, AtomIter};
pub use atom_types::{
    Alis,
    AtomKind,
    ComponentType,
    Dref,
    EditListEntry,
    Elst,
    FieldKind,
    FieldSpec,
    FieldValue,
    Fields,
    Ftyp,
    Hdlr,
    Layout,
    Mdhd,
    Mvhd,
    Payload,
    RegistryEntry,
    SampleDependencies,
    SampleSizes,
    SampleTable,
    Smhd,
    Tkhd,
    Trailing,
    TypedAtom,
    Url,
    Vmhd,
};
pub use consts::mp4_time_zero;
pub use errors::{ParseError, QtError};
pub use fourcc::FourCC;
pub use options::ParseOptions;
pub use parser::{parse, parse_one, Parser};
