//! Decoded atoms, selected via FourCC.
//!
//! Decoders are registered in `DECODERS`. Atoms without
//! a registered decoder are kept as `AtomType::Other`.

use std::io::Write;

use tracing::trace;

use crate::{AtomHeader, FourCC, InfoLevels, Mp4Box, Mp4Error, RawAtom};

use super::Ctts;

/// Decodes an atom data load into an `AtomType`.
pub type DecodeFn = fn(&AtomHeader, &[u8]) -> Result<AtomType, Mp4Error>;

/// Registered decoders.
const DECODERS: &[(FourCC, DecodeFn)] = &[
    (FourCC::Ctts, decode_ctts),
];

fn decode_ctts(header: &AtomHeader, body: &[u8]) -> Result<AtomType, Mp4Error> {
    Ctts::from_body(header, body).map(AtomType::Ctts)
}

/// Returns registered decoder for `name`, if any.
pub fn decoder(name: &FourCC) -> Option<DecodeFn> {
    DECODERS.iter()
        .find(|(fourcc, _)| fourcc == name)
        .map(|(_, decode)| *decode)
}

/// Decoded MP4 atom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomType {
    /// Composition offset atom
    Ctts(Ctts),
    /// Any atom without a registered decoder
    Other(RawAtom),
}

impl AtomType {
    pub fn ctts(&self) -> Option<&Ctts> {
        match self {
            Self::Ctts(ctts) => Some(ctts),
            Self::Other(_) => None,
        }
    }

    fn as_box(&self) -> &dyn Mp4Box {
        match self {
            Self::Ctts(ctts) => ctts,
            Self::Other(raw) => raw,
        }
    }
}

impl Mp4Box for AtomType {
    fn name(&self) -> FourCC {
        self.as_box().name()
    }

    fn size(&self) -> u64 {
        self.as_box().size()
    }

    fn encode(&self, writer: &mut dyn Write) -> Result<(), Mp4Error> {
        self.as_box().encode(writer)
    }

    fn info(
        &self,
        writer: &mut dyn Write,
        levels: &InfoLevels,
        indent: &str,
        indent_step: &str,
    ) -> Result<(), Mp4Error> {
        self.as_box().info(writer, levels, indent, indent_step)
    }

    fn from_body(header: &AtomHeader, body: &[u8]) -> Result<Self, Mp4Error> {
        match decoder(header.name()) {
            Some(decode) => {
                trace!("decoding '{}' ({} bytes)", header.name(), body.len());
                decode(header, body)
            },
            None => RawAtom::from_body(header, body).map(AtomType::Other),
        }
    }
}
