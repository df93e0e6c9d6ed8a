//! MP4 atom.

use std::io::{Cursor, Write};

use crate::{info::InfoDumper, AtomHeader, FourCC, InfoLevels, Mp4Error};

/// Common behaviour for all decoded atoms.
pub trait Mp4Box {
    /// Atom type.
    fn name(&self) -> FourCC;

    /// Total encoded size in bytes, including header.
    fn size(&self) -> u64;

    /// Encodes the full atom, including header.
    fn encode(&self, writer: &mut dyn Write) -> Result<(), Mp4Error>;

    /// Writes a listing of the atom, with detail set via `levels`.
    fn info(
        &self,
        writer: &mut dyn Write,
        levels: &InfoLevels,
        indent: &str,
        indent_step: &str,
    ) -> Result<(), Mp4Error>;

    /// Decodes the atom data load following `header`.
    fn from_body(header: &AtomHeader, body: &[u8]) -> Result<Self, Mp4Error>
    where
        Self: Sized;
}

/// Atom without a registered decoder.
/// The data load is kept as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAtom {
    pub(crate) name: FourCC,
    pub(crate) data: Vec<u8>,
}

impl RawAtom {
    pub fn new(name: FourCC, data: Vec<u8>) -> Self {
        Self { name, data }
    }

    /// Atom data load, excluding header.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn header(&self) -> AtomHeader {
        AtomHeader::new(self.name, self.data.len() as u64)
    }
}

impl Mp4Box for RawAtom {
    fn name(&self) -> FourCC {
        self.name
    }

    fn size(&self) -> u64 {
        self.header().atom_size()
    }

    fn encode(&self, writer: &mut dyn Write) -> Result<(), Mp4Error> {
        let mut cursor = Cursor::new(Vec::with_capacity(self.size() as usize));
        self.header().write(&mut cursor)?;
        cursor.write_all(&self.data).map_err(Mp4Error::WriteFailure)?;
        writer.write_all(cursor.get_ref()).map_err(Mp4Error::WriteFailure)
    }

    fn info(
        &self,
        writer: &mut dyn Write,
        _levels: &InfoLevels,
        indent: &str,
        indent_step: &str,
    ) -> Result<(), Mp4Error> {
        let mut bd = InfoDumper::new(writer, indent, indent_step, &self.name, self.size(), None)?;
        bd.write(format_args!(" - dataSize: {}", self.data.len()))
    }

    fn from_body(header: &AtomHeader, body: &[u8]) -> Result<Self, Mp4Error> {
        Ok(Self::new(header.name, body.to_vec()))
    }
}
