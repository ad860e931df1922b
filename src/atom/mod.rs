//! Atom header and decoded atom tree.

mod atom;
mod header;

pub use atom::{Atom, AtomIter};
pub use header::AtomHeader;
