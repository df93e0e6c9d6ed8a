use std::io::{Read, Seek, Write};

use binrw::BinReaderExt;
use binrw::BinWriterExt;

use crate::consts::{HEADER_SIZE, LARGE_HEADER_SIZE};
use crate::{FourCC, Mp4Error};

/// Atom header.
/// 8 or 16 bytes in MP4, depending on whether
/// 32 or 64-bit sized.
///
/// ```ignore
/// | [X X X X] [Y Y Y Y] [Z Z Z Z Z Z Z Z] |
///    |         |         |
///    |         |         64bit size (optional, only if 32 bit size == 1)
///    |         FourCC
///    32bit size
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomHeader {
    /// Total atom size in bytes including 8/16 byte header.
    pub(crate) atom_size: u64,
    /// FourCC
    pub(crate) name: FourCC,
    /// Absolute byte offset for start of atom,
    /// i.e. byte offset for its header,
    /// starting with 32-bit size.
    /// Always 0 for headers that were not read from a stream.
    pub(crate) offset: u64,
    /// Set to `true` if atom size is specified
    /// in the 64 bit area, i.e. the 32bit size is set to `1`.
    pub(crate) size_64bit: bool,
}

impl AtomHeader {
    /// Header for an atom with a data load of `data_size` bytes.
    /// Uses a 64-bit size only if the total size does not fit in 32 bits.
    pub fn new(name: FourCC, data_size: u64) -> Self {
        let size_64bit = data_size + HEADER_SIZE > u32::MAX as u64;
        let header_size = match size_64bit {
            true => LARGE_HEADER_SIZE,
            false => HEADER_SIZE,
        };
        Self {
            atom_size: data_size + header_size,
            name,
            offset: 0,
            size_64bit,
        }
    }

    /// Reads header at current position.
    /// Reader position is at the atom data load afterwards.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self, Mp4Error> {
        let offset = reader.stream_position()?;

        // Read 32bit total atom size
        let mut atom_size = reader.read_be::<u32>()? as u64;

        // Can not read fourcc name as utf-8 since some
        // manufacturers use single-byte extended ascii/ISO8859-1
        let name = FourCC::from_bytes(reader.read_be::<[u8; 4]>()?);

        // 64-bit size follows directly after FourCC
        let size_64bit = atom_size == 1;
        if size_64bit {
            atom_size = reader.read_be::<u64>()?;
        }

        let hdr = Self { atom_size, name, offset, size_64bit };

        // 0 means "until end of file", not supported
        if atom_size < hdr.header_size() {
            return Err(Mp4Error::UnexpectedAtomSize { len: atom_size, offset });
        }

        Ok(hdr)
    }

    /// Writes header at current position.
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<(), Mp4Error> {
        match self.size_64bit {
            true => {
                writer.write_be(&1_u32).map_err(Mp4Error::write)?;
                writer.write_be(&self.name.as_bytes()).map_err(Mp4Error::write)?;
                writer.write_be(&self.atom_size).map_err(Mp4Error::write)?;
            }
            false => {
                // `new()` guarantees size fits when not 64-bit
                let size = u32::try_from(self.atom_size)
                    .map_err(|e| Mp4Error::InvalidArgument(e.to_string()))?;
                writer.write_be(&size).map_err(Mp4Error::write)?;
                writer.write_be(&self.name.as_bytes()).map_err(Mp4Error::write)?;
            }
        }
        Ok(())
    }

    pub fn atom_size(&self) -> u64 {
        self.atom_size
    }

    pub fn name(&self) -> &FourCC {
        &self.name
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Header size in bytes, 8 or 16.
    pub fn header_size(&self) -> u64 {
        match self.size_64bit {
            true => LARGE_HEADER_SIZE,
            false => HEADER_SIZE,
        }
    }

    /// Data load absolute offset,
    /// i.e. position after header
    /// adjusted for optional 64bit size value.
    pub fn data_offset(&self) -> u64 {
        self.offset + self.header_size()
    }

    /// Size of data load (excludes header size).
    pub fn data_size(&self) -> u64 {
        self.atom_size - self.header_size()
    }

    /// Absolute offset to next atom.
    pub fn offset_next_abs(&self) -> u64 {
        self.offset + self.atom_size
    }

    /// Ensures `name` matches that of this header.
    pub(crate) fn match_name(&self, name: &FourCC) -> Result<(), Mp4Error> {
        if &self.name != name {
            return Err(Mp4Error::AtomMismatch {
                got: self.name.to_string(),
                expected: name.to_string(),
            });
        }
        Ok(())
    }
}
