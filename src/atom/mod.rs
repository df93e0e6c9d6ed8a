//! Atom header and the behaviour shared by all atom types.

mod atom_header;
mod atom;

pub use atom_header::AtomHeader;
pub use atom::{Mp4Box, RawAtom};
