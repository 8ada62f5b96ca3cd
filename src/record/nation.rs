use std::collections::HashSet;

use num_enum::TryFromPrimitive;
use tracing::warn;

use crate::{
    attribute::AttributeInstance,
    cursor::ByteCursor,
    error::Result,
    record::{Codecs, EntityRef, FieldReader, Record, TableKind, UnknownField, signed_value},
};

const EPITHET_LENGTH: usize = 36;
const ABBREVIATION_LENGTH: usize = 5;
const FILE_NAME_BASE_LENGTH: usize = 63;
const UNKNOWN_HEADER_SLOTS: usize = 16;
const ATTRIBUTE_SLOTS: usize = 64;
const TROOP_SLOTS: usize = 90;

/// Which list a nation's monster entry belongs to. Lists appear in the troop slots in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TroopCategory {
    FortTroop,
    FortLeader,
    NonfortTroop,
    NonfortLeader,
    Pretender,
    /// A pretender this nation may not choose.
    Unpretender,
}

/// Negative troop slot values that start a new list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(i32)]
enum SlotMarker {
    Pretenders = -1,
    FortLeaders = -2,
    NonfortTroops = -3,
    NonfortLeaders = -4,
}

impl SlotMarker {
    fn opens(self) -> TroopCategory {
        match self {
            SlotMarker::Pretenders => TroopCategory::Pretender,
            SlotMarker::FortLeaders => TroopCategory::FortLeader,
            SlotMarker::NonfortTroops => TroopCategory::NonfortTroop,
            SlotMarker::NonfortLeaders => TroopCategory::NonfortLeader,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NationTroop {
    pub owner: EntityRef,
    pub category: TroopCategory,
    pub monster: u32,
}

/// Result of scanning the troop slots.
#[derive(Debug, Default)]
struct TroopScan {
    troops: Vec<(TroopCategory, u32)>,
    /// Index of the first slot the scan did not consume.
    end: usize,
    duplicate_pretenders: usize,
}

/// Splits the troop slots into their lists.
///
/// Each list runs until a value that is not positive. If that value is the marker of a later
/// list, the scan carries on into it, otherwise it stops. Pretender slots hold pretenders as
/// positive numbers and forbidden pretenders as negated ones, and end at a second -1. A
/// pretender number already seen in the scan is skipped and counted.
fn scan_troops(slots: &[i32]) -> TroopScan {
    let mut scan = TroopScan::default();
    let mut category = TroopCategory::FortTroop;
    let mut i = 0;

    while category != TroopCategory::Pretender {
        let mut marker = None;
        while let Some(&value) = slots.get(i) {
            i += 1;
            if value > 0 {
                scan.troops.push((category, value.unsigned_abs()));
            } else {
                marker = Some(value);
                break;
            }
        }

        match marker.and_then(|v| SlotMarker::try_from(v).ok()) {
            Some(next) if next.opens() > category => category = next.opens(),
            _ => {
                scan.end = i;
                return scan;
            }
        }
    }

    let mut seen = HashSet::new();
    while let Some(&value) = slots.get(i) {
        i += 1;
        match value {
            -1 => break,
            0 => {}
            v if !seen.insert(v) => scan.duplicate_pretenders += 1,
            v if v > 0 => scan.troops.push((TroopCategory::Pretender, v.unsigned_abs())),
            v => scan.troops.push((TroopCategory::Unpretender, v.unsigned_abs())),
        }
    }

    scan.end = i;
    scan
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nation {
    number: usize,
    name: String,
    epithet: String,
    abbreviation: String,
    file_name_base: String,
    troops: Vec<NationTroop>,
    duplicate_pretender_slots: usize,
    attributes: Vec<AttributeInstance>,
    unknowns: Vec<UnknownField>,
}

impl Nation {
    pub fn epithet(&self) -> &str {
        &self.epithet
    }

    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// Base name of the nation's flag and banner files.
    pub fn file_name_base(&self) -> &str {
        &self.file_name_base
    }

    /// Every troop entry, in slot order.
    pub fn troops(&self) -> &[NationTroop] {
        &self.troops
    }

    pub fn troops_in(&self, category: TroopCategory) -> impl Iterator<Item = u32> + '_ {
        self.troops
            .iter()
            .filter(move |t| t.category == category)
            .map(|t| t.monster)
    }

    /// How many pretender slots repeated a number already listed and were skipped.
    pub fn duplicate_pretender_slots(&self) -> usize {
        self.duplicate_pretender_slots
    }

    pub fn attributes(&self) -> &[AttributeInstance] {
        &self.attributes
    }

    pub fn unknowns(&self) -> &[UnknownField] {
        &self.unknowns
    }
}

impl Record for Nation {
    const TABLE: TableKind = TableKind::Nation;

    fn decode(
        cursor: ByteCursor<'_>,
        codecs: Codecs<'_>,
        offset: usize,
        number: usize,
    ) -> Result<Option<Self>> {
        let owner = EntityRef::new(Self::TABLE, number);
        let mut r = FieldReader::new(cursor, offset, owner);

        let Some(name) = r.name()? else {
            return Ok(None);
        };
        let epithet = r.string(EPITHET_LENGTH)?;
        let abbreviation = r.string(ABBREVIATION_LENGTH)?;
        let file_name_base = r.string(FILE_NAME_BASE_LENGTH)?;

        for _ in 0..UNKNOWN_HEADER_SLOTS {
            r.unknown_u16()?;
        }

        let attributes = r.attributes(codecs.attributes, ATTRIBUTE_SLOTS, signed_value)?;

        let troops_start = r.position();
        let slots = (0..TROOP_SLOTS)
            .map(|_| r.i32())
            .collect::<Result<Vec<_>>>()?;

        let scan = scan_troops(&slots);
        if scan.duplicate_pretenders > 0 {
            warn!(
                "{owner} ({name}): skipped {} repeated pretender slots",
                scan.duplicate_pretenders
            );
        }

        for (i, &value) in slots.iter().enumerate().skip(scan.end) {
            r.unknown_at(troops_start + i * size_of::<i32>(), value.into());
        }

        let troops = scan
            .troops
            .into_iter()
            .map(|(category, monster)| NationTroop {
                owner,
                category,
                monster,
            })
            .collect();

        Ok(Some(Nation {
            number,
            name,
            epithet,
            abbreviation,
            file_name_base,
            troops,
            duplicate_pretender_slots: scan.duplicate_pretenders,
            attributes,
            unknowns: r.finish(),
        }))
    }

    fn number(&self) -> usize {
        self.number
    }

    fn name(&self) -> &str {
        &self.name
    }
}
