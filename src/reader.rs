//! Sequential reads of sibling atoms from a stream.
//!
//! Nested atoms are not traversed, a container atom
//! is returned as `AtomType::Other` with its children as raw data.

use std::io::{Read, Seek, SeekFrom};

use crate::{AtomHeader, AtomType, Mp4Box, Mp4Error};

/// Reads the atom at current position, header included.
/// Reader position is at the start of the next atom afterwards.
///
/// Fails with `Mp4Error::TruncatedData` if the stream ends
/// before the size specified in the header.
pub fn read_atom<R: Read + Seek>(reader: &mut R) -> Result<AtomType, Mp4Error> {
    let header = AtomHeader::read(reader)?;
    let body = read_body(reader, &header)?;
    AtomType::from_body(&header, &body)
}

/// Reads the data load for `header`.
/// Assumes reader position is directly after the header.
pub(crate) fn read_body<R: Read>(reader: &mut R, header: &AtomHeader) -> Result<Vec<u8>, Mp4Error> {
    let len = header.data_size();
    // size comes from the file, so no pre-allocation
    let mut body = Vec::new();
    let read_len = reader.by_ref().take(len).read_to_end(&mut body)? as u64;

    if read_len != len {
        return Err(Mp4Error::TruncatedData { expected: len, got: read_len })
    }

    Ok(body)
}

/// Iterator over sibling atoms, starting at the reader's current position.
/// Stops after the first error.
#[derive(Debug)]
pub struct AtomReader<R: Read + Seek> {
    reader: R,
    /// Stream size.
    len: u64,
    done: bool,
}

impl<R: Read + Seek> AtomReader<R> {
    pub fn new(mut reader: R) -> Result<Self, Mp4Error> {
        let pos = reader.stream_position()?;
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(pos))?;
        Ok(Self { reader, len, done: false })
    }

    /// Returns the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> Iterator for AtomReader<R> {
    type Item = Result<AtomType, Mp4Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let pos = match self.reader.stream_position() {
            Ok(p) => p,
            Err(e) => {
                self.done = true;
                return Some(Err(e.into()));
            }
        };

        if pos >= self.len {
            self.done = true;
            return None;
        }

        let result = read_atom(&mut self.reader);
        if result.is_err() {
            self.done = true;
        }

        Some(result)
    }
}
