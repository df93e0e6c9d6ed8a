//! Composition offset atom (`ctts`).
//!
//! Location: `moov/trak[multiple]/mdia/minf/stbl/ctts`
//!
//! Maps decode order to presentation order. Each sample's presentation time
//! is its decode time (via `stts`) plus its composition offset.
//! The table is run-length encoded, i.e. each entry specifies
//! an offset shared by a number of consecutive samples.
//!
//! Version 0 historically specifies unsigned offsets,
//! version 1 signed offsets. Offsets are always stored as
//! `i32` with the raw bit pattern preserved, regardless of version.
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/composition_offset_atom>

use std::io::{Cursor, Seek, Write};

use binrw::{binrw, BinRead, BinReaderExt, BinWrite, BinWriterExt};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use time::{ext::NumericalDuration, Duration};
use tracing::{debug, trace};

use crate::{
    consts::{CTTS_ENTRY_SIZE, CTTS_FIXED_SIZE, FLAGS_MASK},
    info::InfoDumper,
    AtomHeader,
    FourCC,
    InfoLevels,
    Mp4Box,
    Mp4Error,
};

/// Composition offset atom (`ctts`).
///
/// Path: `moov/trak[multiple]/mdia/minf/stbl/ctts`
///
/// See: <https://developer.apple.com/documentation/quicktime-file-format/composition_offset_atom>
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ctts {
    pub(crate) version: u8,
    pub(crate) flags: [u8; 3],
    #[br(temp)]
    #[bw(calc = offset_table.len() as u32)]
    entry_count: u32,
    #[br(count = entry_count)]
    pub(crate) offset_table: Vec<OffsetTableEntry>,
}

/// Composition offset table entry.
/// `sample_count` consecutive samples share `sample_offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BinRead, BinWrite)]
#[brw(big)]
pub struct OffsetTableEntry {
    pub sample_count: u32,
    /// Unscaled composition offset.
    /// Raw bit pattern, may be negative for version 0 as well.
    pub sample_offset: i32,
}

impl OffsetTableEntry {
    pub fn new(sample_count: u32, sample_offset: i32) -> Self {
        Self { sample_count, sample_offset }
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn sample_offset(&self) -> i32 {
        self.sample_offset
    }
}

impl Ctts {
    /// Empty composition offset table.
    /// Only the low 24 bits of `flags` are kept.
    pub fn new(version: u8, flags: u32) -> Self {
        let f = (flags & FLAGS_MASK).to_be_bytes();
        Self {
            version,
            flags: [f[1], f[2], f[3]],
            offset_table: Vec::new(),
        }
    }

    /// Composition offset table from entries.
    pub fn with_entries(version: u8, flags: u32, entries: Vec<OffsetTableEntry>) -> Self {
        Self {
            offset_table: entries,
            ..Self::new(version, flags)
        }
    }

    /// Run-length encodes a list of per-sample offsets,
    /// with the first value for sample 1.
    ///
    /// Version is set to 1 if any offset is negative, otherwise 0.
    pub fn from_offsets(offsets: &[i32]) -> Self {
        let version = match offsets.iter().any(|o| *o < 0) {
            true => 1,
            false => 0,
        };
        let mut ctts = Self::new(version, 0);
        for offset in offsets.iter() {
            ctts.push(1, *offset);
        }
        ctts
    }

    /// Appends `sample_count` samples with offset `sample_offset`.
    /// Extends the last entry instead if it has the same offset
    /// and the sample count does not overflow.
    pub fn push(&mut self, sample_count: u32, sample_offset: i32) {
        if let Some(last) = self.offset_table.last_mut() {
            if last.sample_offset == sample_offset {
                if let Some(n) = last.sample_count.checked_add(sample_count) {
                    last.sample_count = n;
                    return
                }
            }
        }
        self.offset_table.push(OffsetTableEntry::new(sample_count, sample_offset))
    }

    /// Decodes the atom data load (i.e. excluding the header).
    /// `body` must contain the full data load.
    ///
    /// Fails with `Mp4Error::TruncatedData` if `body` is shorter
    /// than the entry count requires. Trailing bytes are ignored.
    pub fn decode(body: &[u8]) -> Result<Self, Mp4Error> {
        let got = body.len() as u64;

        let entry_count = body.get(4..8)
            .and_then(|b| <[u8; 4]>::try_from(b).ok())
            .map(u32::from_be_bytes)
            .ok_or(Mp4Error::TruncatedData { expected: CTTS_FIXED_SIZE, got })?;

        // full table must be present before reading
        let expected = Self::data_size_for(entry_count as u64);
        if got < expected {
            return Err(Mp4Error::TruncatedData { expected, got });
        }

        let ctts = Cursor::new(body).read_be::<Self>()?;

        debug!("ctts: {} entries (version {})", ctts.len(), ctts.version);

        Ok(ctts)
    }

    /// Atom name, always `ctts`.
    pub fn name(&self) -> FourCC {
        FourCC::Ctts
    }

    /// Data load size in bytes for `entry_count` entries.
    fn data_size_for(entry_count: u64) -> u64 {
        CTTS_FIXED_SIZE + CTTS_ENTRY_SIZE * entry_count
    }

    /// Data load size in bytes (excludes header).
    pub fn data_size(&self) -> u64 {
        Self::data_size_for(self.offset_table.len() as u64)
    }

    /// Header for the encoded atom.
    pub fn header(&self) -> AtomHeader {
        AtomHeader::new(FourCC::Ctts, self.data_size())
    }

    /// Total encoded size in bytes, including header.
    pub fn size(&self) -> u64 {
        self.header().atom_size()
    }

    /// Writes header and data load at current position.
    fn write_atom<W: Write + Seek>(&self, writer: &mut W) -> Result<(), Mp4Error> {
        if u32::try_from(self.offset_table.len()).is_err() {
            return Err(Mp4Error::InvalidArgument(format!(
                "{} entries exceed maximum entry count {}", self.offset_table.len(), u32::MAX
            )));
        }
        self.header().write(writer)?;
        writer.write_be(self).map_err(Mp4Error::write)
    }

    /// Encodes the full atom, including header, to `writer`.
    ///
    /// The atom is first encoded to a buffer of exactly `size()` bytes,
    /// then written in one go.
    pub fn encode<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), Mp4Error> {
        let buf = self.to_bytes()?;
        writer.write_all(&buf).map_err(Mp4Error::WriteFailure)
    }

    /// Encodes the full atom, including header, into `buf`.
    /// Returns number of bytes written, i.e. `size()`.
    ///
    /// Fails with `Mp4Error::WriteFailure` if `buf` is too small.
    pub fn encode_into(&self, buf: &mut [u8]) -> Result<usize, Mp4Error> {
        let size = self.size();
        if (buf.len() as u64) < size {
            return Err(Mp4Error::WriteFailure(std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                format!("buffer of {} bytes can not hold {size} bytes", buf.len())
            )));
        }
        let mut cursor = Cursor::new(buf);
        self.write_atom(&mut cursor)?;
        Ok(cursor.position() as usize)
    }

    /// Encodes the full atom, including header.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Mp4Error> {
        let size = usize::try_from(self.size())
            .map_err(|e| Mp4Error::InvalidArgument(e.to_string()))?;
        let mut cursor = Cursor::new(Vec::with_capacity(size));
        self.write_atom(&mut cursor)?;
        trace!("ctts: encoded {} entries, {size} bytes", self.len());
        Ok(cursor.into_inner())
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the 24-bit flags.
    pub fn flags(&self) -> u32 {
        u32::from_be_bytes([0, self.flags[0], self.flags[1], self.flags[2]])
    }

    /// Returns `true` if offsets should be interpreted as signed,
    /// i.e. version is 1 or above.
    pub fn is_signed(&self) -> bool {
        self.version >= 1
    }

    /// Returns the composition offset table.
    pub fn offsets(&self) -> &[OffsetTableEntry] {
        &self.offset_table
    }

    /// Returns the composition offset table as tuples,
    /// `(SAMPLE_COUNT, SAMPLE_OFFSET)`.
    pub fn table(&self) -> Vec<(u32, i32)> {
        self.offset_table.iter()
            .map(|e| (e.sample_count, e.sample_offset))
            .collect()
    }

    /// Number of entries in the composition offset table.
    pub fn len(&self) -> usize {
        self.offset_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offset_table.is_empty()
    }

    /// Returns total number of samples covered by the table.
    ///
    /// If an entry lists an offset for four samples,
    /// it counts as four samples towards the total.
    pub fn sample_count(&self) -> u64 {
        self.offset_table.iter()
            .map(|e| e.sample_count as u64)
            .sum()
    }

    /// Returns unscaled composition offsets,
    /// one per sample, starting with sample 1.
    /// Lazy, the total sample count is not bounded by the table size.
    pub fn expand(&self) -> impl Iterator<Item = i32> + '_ {
        self.offset_table.iter()
            .flat_map(|e| std::iter::repeat(e.sample_offset).take(e.sample_count as usize))
    }

    /// Returns the unscaled composition offset for specified sample.
    ///
    /// > Important: `sample` is a 1-based index,
    /// > as for all sample tables in MP4.
    ///
    /// Returns `0` if `sample` is beyond the samples
    /// covered by the table.
    /// Fails with `Mp4Error::InvalidArgument` if `sample` is `0`.
    pub fn composition_offset(&self, sample: u32) -> Result<i32, Mp4Error> {
        if sample == 0 {
            return Err(Mp4Error::InvalidArgument(
                "sample number is 1-based, got 0".to_owned()
            ));
        }

        let mut remaining = sample - 1;
        for entry in self.offset_table.iter() {
            if remaining >= entry.sample_count {
                remaining -= entry.sample_count;
            } else {
                return Ok(entry.sample_offset)
            }
        }

        Ok(0)
    }

    /// Returns unscaled composition offsets for multiple samples,
    /// resolved in parallel. Order corresponds to `samples`.
    pub fn composition_offsets(&self, samples: &[u32]) -> Result<Vec<i32>, Mp4Error> {
        samples.par_iter()
            .map(|s| self.composition_offset(*s))
            .collect()
    }

    /// Composition offset for specified sample as `Duration`,
    /// scaled with `time_scale` from the track's media header (`mdhd`).
    pub fn composition_time(&self, sample: u32, time_scale: u32) -> Result<Duration, Mp4Error> {
        if time_scale == 0 {
            return Err(Mp4Error::InvalidArgument("time scale is 0".to_owned()));
        }
        let offset = self.composition_offset(sample)?;
        Ok((offset as f64 / time_scale as f64).seconds())
    }

    /// Writes a listing of the atom to `writer`.
    /// Entries are listed if the level for `ctts` is 1 or higher.
    pub fn info(
        &self,
        writer: &mut dyn Write,
        levels: &InfoLevels,
        indent: &str,
        indent_step: &str,
    ) -> Result<(), Mp4Error> {
        let mut bd = InfoDumper::new(
            writer,
            indent,
            indent_step,
            &FourCC::Ctts,
            self.size(),
            Some((self.version, self.flags())),
        )?;
        bd.write(format_args!(" - sampleCount: {}", self.len()))?;
        if levels.level(&FourCC::Ctts) > 0 {
            for (i, entry) in self.offset_table.iter().enumerate() {
                bd.write(format_args!(
                    " - entry[{}]: sampleCount={} sampleOffset={}",
                    i + 1,
                    entry.sample_count,
                    entry.sample_offset
                ))?;
            }
        }
        Ok(())
    }
}

impl Mp4Box for Ctts {
    fn name(&self) -> FourCC {
        FourCC::Ctts
    }

    fn size(&self) -> u64 {
        Ctts::size(self)
    }

    fn encode(&self, writer: &mut dyn Write) -> Result<(), Mp4Error> {
        Ctts::encode(self, writer)
    }

    fn info(
        &self,
        writer: &mut dyn Write,
        levels: &InfoLevels,
        indent: &str,
        indent_step: &str,
    ) -> Result<(), Mp4Error> {
        Ctts::info(self, writer, levels, indent, indent_step)
    }

    fn from_body(header: &AtomHeader, body: &[u8]) -> Result<Self, Mp4Error> {
        header.match_name(&FourCC::Ctts)?;
        Ctts::decode(body)
    }
}
