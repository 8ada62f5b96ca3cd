use std::fmt::{self, Display};

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    cursor::ByteCursor,
    error::{Error, Result},
    record::TableKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    MacOsX,
    Windows,
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Linux => "Linux",
            Platform::MacOsX => "MacOS X",
            Platform::Windows => "Windows",
        })
    }
}

/// Game releases, in release order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameVersion {
    V4_01,
    V4_03,
    V4_04,
}

impl Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameVersion::V4_01 => "4.01",
            GameVersion::V4_03 => "4.03",
            GameVersion::V4_04 => "4.04",
        })
    }
}

/// One build of the game: the platform it was compiled for and its release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DominionsVersion {
    pub platform: Platform,
    pub version: GameVersion,
}

const SIGNATURE_LENGTH: usize = 12;

/// Where each known build keeps its "version x.yy" banner.
const SIGNATURES: [(usize, &str, DominionsVersion); 3] = [
    (
        0x255686,
        "version 4.01",
        DominionsVersion::new(Platform::Linux, GameVersion::V4_01),
    ),
    (
        0x256372,
        "version 4.03",
        DominionsVersion::new(Platform::Linux, GameVersion::V4_03),
    ),
    (
        0x2336A5,
        "version 4.04",
        DominionsVersion::new(Platform::Linux, GameVersion::V4_04),
    ),
];

impl DominionsVersion {
    pub const fn new(platform: Platform, version: GameVersion) -> Self {
        DominionsVersion { platform, version }
    }

    /// Identifies the build a program image came from by looking for its version banner.
    pub fn detect(image: &[u8]) -> Result<Self> {
        let cursor = ByteCursor::new(image);

        for (offset, banner, version) in SIGNATURES {
            match cursor.read_fixed_string(offset, SIGNATURE_LENGTH) {
                Ok((text, _)) if text == banner => return Ok(version),
                Ok(_) => {}
                Err(e) => debug!("no {banner:?} banner: {e}"),
            }
        }

        Err(Error::UnrecognizedImage)
    }
}

impl Display for DominionsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.platform, self.version)
    }
}

/// The region of the image a table occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLocation {
    pub base: usize,
    pub stride: usize,
}

/// Knows where each table lives in each build of the game, and how wide its records are.
///
/// Base offsets depend on the platform and the release; record strides only on the release.
/// Entries can be added with [`VersionLocator::with_base_offset`] and
/// [`VersionLocator::with_stride`] to support new builds without touching any decoder.
#[derive(Debug, Clone, Default)]
pub struct VersionLocator {
    base_offsets: IndexMap<(Platform, GameVersion, TableKind), usize>,
    strides: IndexMap<(GameVersion, TableKind), usize>,
}

impl VersionLocator {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Offsets and strides for the builds this crate ships support for.
    ///
    /// 4.01 has base offsets but no known record layout, so every table lookup for it fails.
    pub fn builtin() -> Self {
        use GameVersion::*;
        use Platform::Linux;
        use TableKind::*;

        let mut locator = Self::empty();

        for (table, version, base) in [
            (Armor, V4_01, 0x9988E0),
            (Armor, V4_03, 0x9A5340),
            (Armor, V4_04, 0x98BFE0),
            (Weapon, V4_01, 0x961DA0),
            (Weapon, V4_03, 0x96E800),
            (Weapon, V4_04, 0x9B3260),
            (Nation, V4_03, 0x6739A0),
            (Nation, V4_04, 0x82CEA0),
            (Spell, V4_03, 0x6BBAE0),
            (Spell, V4_04, 0x8A7560),
        ] {
            locator = locator.with_base_offset(Linux, version, table, base);
        }

        for version in [V4_03, V4_04] {
            locator = locator
                .with_stride(version, Armor, 96)
                .with_stride(version, Weapon, 112)
                .with_stride(version, Nation, 1108)
                .with_stride(version, Spell, 200);
        }

        locator
    }

    pub fn with_base_offset(
        mut self,
        platform: Platform,
        version: GameVersion,
        table: TableKind,
        base: usize,
    ) -> Self {
        self.base_offsets.insert((platform, version, table), base);
        self
    }

    pub fn with_stride(mut self, version: GameVersion, table: TableKind, stride: usize) -> Self {
        self.strides.insert((version, table), stride);
        self
    }

    pub fn base_offset(&self, build: DominionsVersion, table: TableKind) -> Result<usize> {
        self.base_offsets
            .get(&(build.platform, build.version, table))
            .copied()
            .ok_or_else(|| unsupported(build, table))
    }

    pub fn stride(&self, build: DominionsVersion, table: TableKind) -> Result<usize> {
        self.strides
            .get(&(build.version, table))
            .copied()
            .ok_or_else(|| unsupported(build, table))
    }

    /// Resolves both the base offset and the stride, failing if either is missing.
    pub fn locate(&self, build: DominionsVersion, table: TableKind) -> Result<TableLocation> {
        Ok(TableLocation {
            base: self.base_offset(build, table)?,
            stride: self.stride(build, table)?,
        })
    }
}

fn unsupported(build: DominionsVersion, table: TableKind) -> Error {
    Error::UnsupportedVersion {
        platform: build.platform,
        version: build.version,
        table,
    }
}
