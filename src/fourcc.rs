//! MP4 atom FourCC.
//! See atom type in <https://developer.apple.com/documentation/quicktime-file-format/atoms>.

use std::fmt;

/// MP4 atom Four CC.
///
/// Only atoms with a registered decoder get a named variant,
/// everything else is kept as raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FourCC {
    /// Composition offset atom
    Ctts,
    /// Any other atom type. Bytes may exceed ASCII range.
    Custom([u8; 4]),
}

impl FourCC {
    pub fn from_bytes(fourcc: [u8; 4]) -> Self {
        match &fourcc {
            b"ctts" => Self::Ctts,
            _ => Self::Custom(fourcc),
        }
    }

    pub fn from_u32(value: u32) -> Self {
        Self::from_bytes(value.to_be_bytes())
    }

    pub fn as_bytes(&self) -> [u8; 4] {
        match self {
            Self::Ctts => *b"ctts",
            Self::Custom(b) => *b,
        }
    }

    pub fn to_u32(&self) -> u32 {
        u32::from_be_bytes(self.as_bytes())
    }
}

/// Strings that are not exactly four single-byte characters
/// are padded with spaces or truncated.
impl From<&str> for FourCC {
    fn from(fourcc: &str) -> Self {
        let mut bytes = [b' '; 4];
        // ISO8859-1, chars above 255 can not be represented
        fourcc.chars()
            .take(4)
            .enumerate()
            .for_each(|(i, c)| bytes[i] = u8::try_from(c).unwrap_or(b'?'));
        Self::from_bytes(bytes)
    }
}

/// UTF-8 does not work for single-byte chars above 127,
/// but ISO8859-1 mapping works for range 128-255.
impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.as_bytes().iter().map(|b| *b as char).collect();
        write!(f, "{s}")
    }
}

impl Default for FourCC {
    fn default() -> Self {
        Self::Custom([0; 4])
    }
}
