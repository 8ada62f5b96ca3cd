//! Reads the built-in data tables of Dominions straight out of a game executable.
//!
//! The game keeps its armors, weapons, nations and spells as arrays of fixed-size records at
//! known offsets in the program image. Each record mixes plain fields with attribute slots
//! and, for weapons and spells, a packed effect. This crate decodes those records into plain
//! values.
//!
//! ```no_run
//! use dominions::{
//!     Extractor, Registries,
//!     record::{Record, Spell},
//! };
//!
//! let image = std::fs::read("dom4_amd64")?;
//! let registries = Registries::builtin();
//! let extractor = Extractor::detect(&image, &registries)?;
//!
//! for spell in extractor.extract::<Spell>()? {
//!     println!("{}: {}", spell.number(), spell.name());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod attribute;
pub mod cursor;
pub mod effect;
pub mod error;
pub mod record;
pub mod table;
pub mod version;

use std::{panic, thread};

use crate::{
    attribute::AttributeCodec,
    effect::EffectCodec,
    record::{Armor, Codecs, Nation, Record, Spell, TableKind, Weapon},
    table::{DEFAULT_MAX_RECORDS, TableWalker},
    version::{TableLocation, VersionLocator},
};

pub use cursor::ByteCursor;
pub use error::{Error, Result};
pub use record::{EntityRef, UnknownField};
pub use version::{DominionsVersion, GameVersion, Platform};

/// Everything extraction consults besides the image itself.
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub locator: VersionLocator,
    pub attributes: AttributeCodec,
    pub effects: EffectCodec,
}

impl Registries {
    pub fn builtin() -> Self {
        Registries {
            locator: VersionLocator::builtin(),
            attributes: AttributeCodec::builtin(),
            effects: EffectCodec::builtin(),
        }
    }

    fn codecs(&self) -> Codecs<'_> {
        Codecs {
            attributes: &self.attributes,
            effects: &self.effects,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// A table without an end marker within this many records is treated as corrupt.
    pub max_records: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

/// All four tables of one program image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub armors: Vec<Armor>,
    pub weapons: Vec<Weapon>,
    pub nations: Vec<Nation>,
    pub spells: Vec<Spell>,
}

/// Decodes tables from one program image of a known game build.
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'a> {
    image: &'a [u8],
    version: DominionsVersion,
    registries: &'a Registries,
    options: ExtractOptions,
}

impl<'a> Extractor<'a> {
    pub fn new(image: &'a [u8], version: DominionsVersion, registries: &'a Registries) -> Self {
        Extractor {
            image,
            version,
            registries,
            options: ExtractOptions::default(),
        }
    }

    /// Creates an extractor for whichever known build `image` turns out to be.
    pub fn detect(image: &'a [u8], registries: &'a Registries) -> Result<Self> {
        let version = DominionsVersion::detect(image)?;
        Ok(Self::new(image, version, registries))
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn version(&self) -> DominionsVersion {
        self.version
    }

    pub fn locate(&self, table: TableKind) -> Result<TableLocation> {
        self.registries.locator.locate(self.version, table)
    }

    fn walker(&self) -> TableWalker<'a> {
        TableWalker::new(self.image, self.registries.codecs())
            .with_max_records(self.options.max_records)
    }

    /// Returns every record of the table holding `R`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dominions::{DominionsVersion, Extractor, GameVersion, Platform, Registries};
    /// use dominions::record::Weapon;
    ///
    /// let image = std::fs::read("dom4_amd64")?;
    /// let registries = Registries::builtin();
    /// let build = DominionsVersion::new(Platform::Linux, GameVersion::V4_04);
    /// let weapons = Extractor::new(&image, build, &registries).extract::<Weapon>()?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn extract<R: Record>(&self) -> Result<Vec<R>> {
        let location = self.locate(R::TABLE)?;
        self.walker().walk(location)
    }

    /// Returns all four tables, one after the other.
    ///
    /// Every table is located before any is decoded, so an unsupported build fails without
    /// doing any decode work.
    pub fn extract_all(&self) -> Result<Tables> {
        let [armor, weapon, nation, spell] = self.locate_all()?;
        let walker = self.walker();

        Ok(Tables {
            armors: walker.walk(armor)?,
            weapons: walker.walk(weapon)?,
            nations: walker.walk(nation)?,
            spells: walker.walk(spell)?,
        })
    }

    /// Like [`Extractor::extract_all`], but walks the four tables on their own threads.
    pub fn extract_all_parallel(&self) -> Result<Tables> {
        let [armor, weapon, nation, spell] = self.locate_all()?;
        let walker = self.walker();

        thread::scope(|s| {
            let armors = s.spawn(move || walker.walk::<Armor>(armor));
            let weapons = s.spawn(move || walker.walk::<Weapon>(weapon));
            let nations = s.spawn(move || walker.walk::<Nation>(nation));
            let spells = s.spawn(move || walker.walk::<Spell>(spell));

            Ok(Tables {
                armors: join(armors)?,
                weapons: join(weapons)?,
                nations: join(nations)?,
                spells: join(spells)?,
            })
        })
    }

    fn locate_all(&self) -> Result<[TableLocation; 4]> {
        Ok([
            self.locate(TableKind::Armor)?,
            self.locate(TableKind::Weapon)?,
            self.locate(TableKind::Nation)?,
            self.locate(TableKind::Spell)?,
        ])
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle.join().unwrap_or_else(|e| panic::resume_unwind(e))
}
