use tracing::{debug, info};

use crate::{
    cursor::ByteCursor,
    error::{Error, Result},
    record::{Codecs, Record},
    version::TableLocation,
};

/// Stop a walk that has not met the end marker after this many records.
pub const DEFAULT_MAX_RECORDS: usize = 4096;

/// Decodes a table record by record until its end marker.
#[derive(Debug, Clone, Copy)]
pub struct TableWalker<'a> {
    cursor: ByteCursor<'a>,
    codecs: Codecs<'a>,
    max_records: usize,
}

impl<'a> TableWalker<'a> {
    pub fn new(image: &'a [u8], codecs: Codecs<'a>) -> Self {
        TableWalker {
            cursor: ByteCursor::new(image),
            codecs,
            max_records: DEFAULT_MAX_RECORDS,
        }
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Decodes every record of the table at `location`, numbered from 0 in image order.
    ///
    /// # Errors
    /// Fails if a record runs past the end of the image, or if no end marker turns up within
    /// the record limit. Failures inside a record are wrapped in [`Error::Record`].
    pub fn walk<R: Record>(&self, location: TableLocation) -> Result<Vec<R>> {
        debug!(
            "walking {} table at {:#x}, stride {}",
            R::TABLE,
            location.base,
            location.stride
        );

        let mut records = Vec::new();

        for number in 0..self.max_records {
            let offset = location.base + number * location.stride;

            let record = R::decode(self.cursor, self.codecs, offset, number).map_err(|e| {
                Error::Record {
                    table: R::TABLE,
                    number,
                    offset,
                    source: Box::new(e),
                }
            })?;

            match record {
                Some(r) => records.push(r),
                None => {
                    info!("decoded {} {} records", records.len(), R::TABLE);
                    return Ok(records);
                }
            }
        }

        Err(Error::UnterminatedTable {
            table: R::TABLE,
            limit: self.max_records,
        })
    }
}
