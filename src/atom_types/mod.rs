//! Decoded MP4 atom types.

mod ctts;
mod types;

pub use ctts::{Ctts, OffsetTableEntry};
pub use types::{decoder, AtomType, DecodeFn};
