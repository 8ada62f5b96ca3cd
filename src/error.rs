use crate::{
    record::TableKind,
    version::{GameVersion, Platform},
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A read of `width` bytes at `offset` would run past the end of the image.
    #[error("read of {width} bytes at {offset:#x} exceeds image length {len:#x}")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },

    /// No base offset or stride is configured for the table on this build of the game.
    #[error("no {table} table location configured for {platform} {version}")]
    UnsupportedVersion {
        platform: Platform,
        version: GameVersion,
        table: TableKind,
    },

    /// None of the known version signatures were found in the image.
    #[error("image does not match any known game version")]
    UnrecognizedImage,

    #[error("{table} table has no end marker within {limit} records")]
    UnterminatedTable { table: TableKind, limit: usize },

    /// A structural failure while decoding one record of a table.
    #[error("{table} #{number} at {offset:#x}: {source}")]
    Record {
        table: TableKind,
        number: usize,
        offset: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// The image offset the failure is attributed to, when there is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::OutOfBounds { offset, .. } | Error::Record { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// The table being decoded when the failure happened, when there is one.
    pub fn table(&self) -> Option<TableKind> {
        match self {
            Error::UnsupportedVersion { table, .. }
            | Error::UnterminatedTable { table, .. }
            | Error::Record { table, .. } => Some(*table),
            _ => None,
        }
    }
}
