//! Read, write, and query the MP4 composition offset atom (`ctts`).
//! Does not and will not support any kind of video de/encoding.
//!
//! The `ctts` atom maps decode order to presentation order, via
//! a run-length encoded table of composition offsets. Other atoms
//! are passed through as raw data.
//!
//! The implementation was mostly done with help from
//! <https://developer.apple.com/documentation/quicktime-file-format/composition_offset_atom>.
//!
//! ```rs
//! use mp4ctts::{read_atom, Ctts, InfoLevels};
//! use std::io::Cursor;
//!
//! fn main() -> Result<(), mp4ctts::Mp4Error> {
//!     let mut ctts = Ctts::new(0, 0);
//!     ctts.push(3, 100);
//!     ctts.push(2, -50);
//!
//!     let bytes = ctts.to_bytes()?;
//!     assert_eq!(bytes.len() as u64, ctts.size());
//!
//!     let atom = read_atom(&mut Cursor::new(bytes))?;
//!     let ctts = atom.ctts().unwrap();
//!
//!     // Sample numbers are 1-based
//!     assert_eq!(ctts.composition_offset(4)?, -50);
//!
//!     let levels: InfoLevels = "ctts:1".parse()?;
//!     ctts.info(&mut std::io::stdout(), &levels, "", "  ")?;
//!
//!     Ok(())
//! }
//! ```

pub mod fourcc;
pub mod atom;
pub mod atom_types;
pub mod consts;
pub mod errors;
pub mod info;
pub mod reader;

pub use fourcc::FourCC;
pub use atom::{AtomHeader, Mp4Box, RawAtom};
pub use atom_types::{
    decoder,
    AtomType,
    Ctts,
    DecodeFn,
    OffsetTableEntry,
};
pub use info::InfoLevels;
pub use reader::{read_atom, AtomReader};
pub use errors::Mp4Error;
