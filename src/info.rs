//! Verbosity levels for atom info listings.
//!
//! Levels are set per atom type as a comma separated list of
//! `box:level` items, where `all` applies to every atom type
//! not listed explicitly:
//!
//! ```rs
//! use mp4ctts::InfoLevels;
//!
//! let levels: InfoLevels = "all:0,ctts:1".parse()?;
//! ```

use std::{collections::HashMap, io::Write, str::FromStr};

use crate::{FourCC, Mp4Error};

/// Per atom type verbosity for `Mp4Box::info()`.
/// Any atom type without a level set uses level `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoLevels {
    all: Option<u32>,
    specific: HashMap<FourCC, u32>,
}

impl InfoLevels {
    /// Sets level for all atom types without a specific level.
    pub fn with_all(mut self, level: u32) -> Self {
        self.all = Some(level);
        self
    }

    /// Sets level for specified atom type.
    pub fn with(mut self, name: FourCC, level: u32) -> Self {
        self.specific.insert(name, level);
        self
    }

    /// Returns level for specified atom type.
    /// A specific level takes precedence over `all`.
    pub fn level(&self, name: &FourCC) -> u32 {
        self.specific.get(name)
            .copied()
            .or(self.all)
            .unwrap_or(0)
    }
}

impl FromStr for InfoLevels {
    type Err = Mp4Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut levels = Self::default();
        for item in s.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            let (name, level) = item.split_once(':')
                .ok_or_else(|| Mp4Error::InvalidInfoLevel(item.to_owned()))?;
            let level = level.trim().parse::<u32>()
                .map_err(|_| Mp4Error::InvalidInfoLevel(item.to_owned()))?;
            levels = match name.trim() {
                "all" => levels.with_all(level),
                n if n.chars().count() == 4 => levels.with(FourCC::from(n), level),
                _ => return Err(Mp4Error::InvalidInfoLevel(item.to_owned())),
            };
        }
        Ok(levels)
    }
}

/// Writes indented info lines for a single atom.
pub(crate) struct InfoDumper<'a> {
    writer: &'a mut dyn Write,
    indent: String,
}

impl<'a> InfoDumper<'a> {
    /// Writes the first line, `[name] size=...`,
    /// followed by ` version=... flags=...` for "full" atoms.
    pub(crate) fn new(
        writer: &'a mut dyn Write,
        indent: &str,
        indent_step: &str,
        name: &FourCC,
        size: u64,
        version_flags: Option<(u8, u32)>,
    ) -> Result<Self, Mp4Error> {
        match version_flags {
            Some((version, flags)) => writeln!(writer,
                "{indent}[{name}] size={size} version={version} flags={flags:06x}"
            ),
            None => writeln!(writer, "{indent}[{name}] size={size}"),
        }.map_err(Mp4Error::WriteFailure)?;
        Ok(Self {
            writer,
            indent: format!("{indent}{indent_step}"),
        })
    }

    pub(crate) fn write(&mut self, line: std::fmt::Arguments) -> Result<(), Mp4Error> {
        writeln!(self.writer, "{}{line}", self.indent)
            .map_err(Mp4Error::WriteFailure)
    }
}
