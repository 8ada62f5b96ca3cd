use std::fmt::{self, Display};

use crate::{
    attribute::{AttributeCodec, AttributeInstance},
    cursor::ByteCursor,
    effect::EffectCodec,
    error::Result,
};

pub mod armor;
pub mod nation;
pub mod spell;
pub mod weapon;

pub use armor::{Armor, ArmorProtection};
pub use nation::{Nation, NationTroop, TroopCategory};
pub use spell::{MagicPathRequirement, Spell};
pub use weapon::{SecondaryEffect, Weapon};

/// Every record table starts with a name field of this width.
pub const NAME_LENGTH: usize = 36;

/// A record whose name is this marks the end of its table.
pub const END_MARKER: &str = "end";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Armor,
    Weapon,
    Nation,
    Spell,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Armor,
        TableKind::Weapon,
        TableKind::Nation,
        TableKind::Spell,
    ];
}

impl Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TableKind::Armor => "armor",
            TableKind::Weapon => "weapon",
            TableKind::Nation => "nation",
            TableKind::Spell => "spell",
        })
    }
}

/// Identifies the record that owns a nested value: its table and its position in that table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub table: TableKind,
    pub number: usize,
}

impl EntityRef {
    pub const fn new(table: TableKind, number: usize) -> Self {
        EntityRef { table, number }
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.table, self.number)
    }
}

/// A field whose meaning is not known, kept because its value was nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownField {
    pub owner: EntityRef,
    /// Byte offset from the start of the owning record.
    pub offset: usize,
    pub value: i64,
}

/// The registries a record consults while decoding its attribute slots and effect.
#[derive(Debug, Clone, Copy)]
pub struct Codecs<'r> {
    pub attributes: &'r AttributeCodec,
    pub effects: &'r EffectCodec,
}

/// One entry in a table of fixed-size records.
pub trait Record: Sized {
    const TABLE: TableKind;

    /// Decodes the record starting at `offset`.
    ///
    /// Returns `Ok(None)` when the record is the end-of-table marker.
    fn decode(
        cursor: ByteCursor<'_>,
        codecs: Codecs<'_>,
        offset: usize,
        number: usize,
    ) -> Result<Option<Self>>;

    fn number(&self) -> usize;

    fn name(&self) -> &str;

    fn entity(&self) -> EntityRef {
        EntityRef::new(Self::TABLE, self.number())
    }
}

/// Walks the fields of one record in order, keeping track of fields without a known meaning.
pub(crate) struct FieldReader<'a> {
    cursor: ByteCursor<'a>,
    start: usize,
    offset: usize,
    owner: EntityRef,
    unknowns: Vec<UnknownField>,
}

macro_rules! field {
    ($name:ident, $read:ident, $ty:ty) => {
        pub(crate) fn $name(&mut self) -> Result<$ty> {
            let (value, next) = self.cursor.$read(self.offset)?;
            self.offset = next;
            Ok(value)
        }
    };
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(cursor: ByteCursor<'a>, start: usize, owner: EntityRef) -> Self {
        FieldReader {
            cursor,
            start,
            offset: start,
            owner,
            unknowns: Vec::new(),
        }
    }

    /// Offset of the next field, relative to the start of the record.
    pub(crate) fn position(&self) -> usize {
        self.offset - self.start
    }

    field!(u8, read_u8, u8);
    field!(i8, read_i8, i8);
    field!(u16, read_u16, u16);
    field!(i16, read_i16, i16);
    field!(u32, read_u32, u32);
    field!(i32, read_i32, i32);
    field!(i64, read_i64, i64);

    /// Reads a string field that always occupies `width` bytes, however short its contents.
    pub(crate) fn string(&mut self, width: usize) -> Result<String> {
        let (text, _) = self.cursor.read_fixed_string(self.offset, width)?;
        self.offset += width;
        Ok(text)
    }

    /// Reads the record's name, or `None` if the record is the end-of-table marker.
    pub(crate) fn name(&mut self) -> Result<Option<String>> {
        let name = self.string(NAME_LENGTH)?;
        Ok((name != END_MARKER).then_some(name))
    }

    /// Notes a value read from a field with no known meaning.
    pub(crate) fn unknown_at(&mut self, position: usize, value: i64) {
        if value != 0 {
            self.unknowns.push(UnknownField {
                owner: self.owner,
                offset: position,
                value,
            });
        }
    }

    pub(crate) fn unknown_u16(&mut self) -> Result<()> {
        let position = self.position();
        let value = self.u16()?;
        self.unknown_at(position, value.into());
        Ok(())
    }

    pub(crate) fn unknown_u32(&mut self) -> Result<()> {
        let position = self.position();
        let value = self.u32()?;
        self.unknown_at(position, value.into());
        Ok(())
    }

    /// Reads `count` attribute codes followed by `count` values read with `value`, and decodes
    /// every pair with a nonzero code. Both arrays are always read in full.
    pub(crate) fn attributes(
        &mut self,
        codec: &AttributeCodec,
        count: usize,
        value: fn(&mut Self) -> Result<i64>,
    ) -> Result<Vec<AttributeInstance>> {
        let codes = (0..count).map(|_| self.u32()).collect::<Result<Vec<_>>>()?;
        let values = (0..count).map(|_| value(self)).collect::<Result<Vec<_>>>()?;

        Ok(codes
            .into_iter()
            .zip(values)
            .filter(|&(code, _)| code != 0)
            .map(|(code, raw)| codec.decode(self.owner, code, raw))
            .collect())
    }

    pub(crate) fn finish(self) -> Vec<UnknownField> {
        self.unknowns
    }
}

/// Attribute value slots stored as unsigned 32-bit integers.
pub(crate) fn unsigned_value(reader: &mut FieldReader<'_>) -> Result<i64> {
    reader.u32().map(i64::from)
}

/// Attribute value slots stored as signed 32-bit integers.
pub(crate) fn signed_value(reader: &mut FieldReader<'_>) -> Result<i64> {
    reader.i32().map(i64::from)
}

#[cfg(test)]
pub(crate) mod testing {
    use byteorder::{NativeEndian, WriteBytesExt};

    use super::{Codecs, NAME_LENGTH};
    use crate::{attribute::AttributeCodec, effect::EffectCodec};

    /// Runs `f` with the built-in registries.
    pub(crate) fn with_builtin_codecs<T>(f: impl FnOnce(Codecs<'_>) -> T) -> T {
        let attributes = AttributeCodec::builtin();
        let effects = EffectCodec::builtin();
        f(Codecs {
            attributes: &attributes,
            effects: &effects,
        })
    }

    /// Builds one record's bytes field by field, the same way the game lays them out.
    #[derive(Debug, Default)]
    pub(crate) struct RecordBuilder {
        bytes: Vec<u8>,
    }

    impl RecordBuilder {
        pub(crate) fn named(name: &str) -> Self {
            RecordBuilder::default().string(name, NAME_LENGTH)
        }

        pub(crate) fn string(mut self, text: &str, width: usize) -> Self {
            let mut field = vec![0u8; width];
            field[..text.len()].copy_from_slice(text.as_bytes());
            self.bytes.extend(field);
            self
        }

        pub(crate) fn u8(mut self, v: u8) -> Self {
            self.bytes.write_u8(v).unwrap();
            self
        }

        pub(crate) fn i8(mut self, v: i8) -> Self {
            self.bytes.write_i8(v).unwrap();
            self
        }

        pub(crate) fn u16(mut self, v: u16) -> Self {
            self.bytes.write_u16::<NativeEndian>(v).unwrap();
            self
        }

        pub(crate) fn i16(mut self, v: i16) -> Self {
            self.bytes.write_i16::<NativeEndian>(v).unwrap();
            self
        }

        pub(crate) fn u32(mut self, v: u32) -> Self {
            self.bytes.write_u32::<NativeEndian>(v).unwrap();
            self
        }

        pub(crate) fn i32(mut self, v: i32) -> Self {
            self.bytes.write_i32::<NativeEndian>(v).unwrap();
            self
        }

        pub(crate) fn i64(mut self, v: i64) -> Self {
            self.bytes.write_i64::<NativeEndian>(v).unwrap();
            self
        }

        pub(crate) fn u32s(self, values: &[u32]) -> Self {
            values.iter().fold(self, |b, &v| b.u32(v))
        }

        pub(crate) fn i32s(self, values: &[i32]) -> Self {
            values.iter().fold(self, |b, &v| b.i32(v))
        }

        /// Zero-fills up to `width` bytes.
        pub(crate) fn pad_to(mut self, width: usize) -> Self {
            assert!(self.bytes.len() <= width, "record overflows {width} bytes");
            self.bytes.resize(width, 0);
            self
        }

        pub(crate) fn len(&self) -> usize {
            self.bytes.len()
        }

        pub(crate) fn build(self) -> Vec<u8> {
            self.bytes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordBuilder;
    use super::*;

    use crate::attribute::AttributeValue;

    const OWNER: EntityRef = EntityRef::new(TableKind::Armor, 4);

    #[test]
    fn zero_codes_are_dropped_regardless_of_value() {
        let bytes = RecordBuilder::default()
            .u32s(&[0, 7, 0])
            .u32s(&[99, 55, 11])
            .build();
        let codec = AttributeCodec::builtin();
        let mut reader = FieldReader::new(ByteCursor::new(&bytes), 0, OWNER);

        let attributes = reader.attributes(&codec, 3, unsigned_value).unwrap();

        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].code(), 7);
        assert_eq!(attributes[0].value(), &AttributeValue::Generic(55));
        assert_eq!(attributes[0].owner(), OWNER);
        assert_eq!(reader.position(), 24);
    }

    #[test]
    fn signed_slot_values_keep_their_sign() {
        let bytes = RecordBuilder::default().u32s(&[52]).i32s(&[-3]).build();
        let codec = AttributeCodec::builtin();
        let mut reader = FieldReader::new(ByteCursor::new(&bytes), 0, OWNER);

        let attributes = reader.attributes(&codec, 1, signed_value).unwrap();

        assert_eq!(attributes[0].raw_value(), -3);
    }

    #[test]
    fn unknown_fields_keep_nonzero_values_with_relative_offsets() {
        let bytes = RecordBuilder::default()
            .u32(0xdead)
            .u16(0)
            .u16(0)
            .u16(5)
            .u32(0)
            .build();
        let mut padded = vec![0xffu8; 8];
        padded.extend(bytes);
        let mut reader = FieldReader::new(ByteCursor::new(&padded), 8, OWNER);

        reader.unknown_u32().unwrap();
        reader.unknown_u16().unwrap();
        let _ = reader.u16().unwrap();
        reader.unknown_u16().unwrap();
        reader.unknown_u32().unwrap();

        let unknowns = reader.finish();
        assert_eq!(
            unknowns,
            vec![
                UnknownField {
                    owner: OWNER,
                    offset: 0,
                    value: 0xdead
                },
                UnknownField {
                    owner: OWNER,
                    offset: 8,
                    value: 5
                },
            ]
        );
    }

    #[test]
    fn end_marker_name_is_none() {
        let bytes = RecordBuilder::named("end").build();
        let mut reader = FieldReader::new(ByteCursor::new(&bytes), 0, OWNER);

        assert_eq!(reader.name().unwrap(), None);
        assert_eq!(reader.position(), NAME_LENGTH);
    }

    #[test]
    fn names_starting_with_end_are_records() {
        let bytes = RecordBuilder::named("endless").build();
        let mut reader = FieldReader::new(ByteCursor::new(&bytes), 0, OWNER);

        assert_eq!(reader.name().unwrap().as_deref(), Some("endless"));
    }
}
