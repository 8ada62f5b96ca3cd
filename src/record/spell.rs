use crate::{
    attribute::AttributeInstance,
    cursor::ByteCursor,
    effect::{EffectInstance, RawEffect},
    error::Result,
    record::{Codecs, EntityRef, FieldReader, Record, TableKind, UnknownField, unsigned_value},
};

const ATTRIBUTE_SLOTS: usize = 13;

/// A magic path and the level in it a caster needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicPathRequirement {
    pub path: u8,
    pub level: u8,
}

/// Splits the packed path and path-level fields into up to two requirements.
///
/// A path mask of -1 means the spell needs no path. Any other negative mask holds a single path
/// in its low byte; otherwise the low byte is the first path and the high byte the second.
fn path_requirements(path_mask: i16, level_mask: u16) -> [Option<MagicPathRequirement>; 2] {
    let [path_lo, path_hi] = path_mask.to_le_bytes();
    let [level_lo, level_hi] = level_mask.to_le_bytes();
    let first = MagicPathRequirement {
        path: path_lo,
        level: level_lo,
    };

    match path_mask {
        -1 => [None, None],
        m if m < 0 => [Some(first), None],
        _ => [
            Some(first),
            Some(MagicPathRequirement {
                path: path_hi,
                level: level_hi,
            }),
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spell {
    number: usize,
    name: String,
    school: i8,
    research_level: u8,
    paths: [Option<MagicPathRequirement>; 2],
    fatigue: u16,
    gem_cost: u16,
    precision: i16,
    effects_count: u16,
    next_spell: u16,
    effect: EffectInstance,
    attributes: Vec<AttributeInstance>,
    unknowns: Vec<UnknownField>,
}

impl Spell {
    /// School of magic, or a negative value for spells that cannot be researched.
    pub fn school(&self) -> i8 {
        self.school
    }

    pub fn research_level(&self) -> u8 {
        self.research_level
    }

    pub fn paths(&self) -> &[Option<MagicPathRequirement>; 2] {
        &self.paths
    }

    pub fn fatigue(&self) -> u16 {
        self.fatigue
    }

    pub fn gem_cost(&self) -> u16 {
        self.gem_cost
    }

    pub fn precision(&self) -> i16 {
        self.precision
    }

    pub fn effects_count(&self) -> u16 {
        self.effects_count
    }

    /// Spell cast right after this one, or 0.
    pub fn next_spell(&self) -> u16 {
        self.next_spell
    }

    pub fn effect(&self) -> &EffectInstance {
        &self.effect
    }

    pub fn attributes(&self) -> &[AttributeInstance] {
        &self.attributes
    }

    pub fn unknowns(&self) -> &[UnknownField] {
        &self.unknowns
    }
}

impl Record for Spell {
    const TABLE: TableKind = TableKind::Spell;

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

        let school = r.i8()?;
        let research_level = r.u8()?;
        let path_mask = r.i16()?;
        let level_mask = r.u16()?;
        // Fatigue and gem cost share a field: gems in the hundreds, fatigue below.
        let fatigue = r.u16()?;
        let area = r.u16()?;
        let identifier = r.u16()?;
        let range = r.u16()?;
        let precision = r.i16()?;
        r.unknown_u32()?;
        let argument = r.i64()?;
        let effects_count = r.u16()?;
        let flight_sprite = r.i16()?;
        let flight_length = r.u16()?;
        let explosion_sprite = r.i16()?;
        let explosion_length = r.u16()?;
        r.unknown_u32()?;
        r.unknown_u16()?;
        let modifiers = r.i64()?;
        let next_spell = r.u16()?;
        let sound = r.u16()?;

        let attributes = r.attributes(codecs.attributes, ATTRIBUTE_SLOTS, unsigned_value)?;
        r.unknown_u32()?;

        let effect = codecs.effects.decode(
            owner,
            RawEffect {
                identifier: identifier.into(),
                argument,
                modifiers,
                range: range.into(),
                area: area.into(),
                sound: sound.into(),
                flight_sprite: flight_sprite.into(),
                flight_length: flight_length.into(),
                explosion_sprite: explosion_sprite.into(),
                explosion_length: explosion_length.into(),
            },
        );

        Ok(Some(Spell {
            number,
            name,
            school,
            research_level,
            paths: path_requirements(path_mask, level_mask),
            fatigue: fatigue % 100,
            gem_cost: fatigue / 100,
            precision,
            effects_count,
            next_spell,
            effect,
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

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{
        attribute::{AttributeValue, BitTable},
        effect::{EffectArea, EffectArgument, EffectRange, Summon},
        record::testing::{RecordBuilder, with_builtin_codecs},
    };

    fn decode(bytes: &[u8]) -> Option<Spell> {
        with_builtin_codecs(|codecs| Spell::decode(ByteCursor::new(bytes), codecs, 0, 5)).unwrap()
    }

    /// A summoning ritual: two paths, gem cost, terrain restriction, and a few unknowns set.
    fn summon_sprites() -> RecordBuilder {
        RecordBuilder::named("Summon Sprites")
            .i8(4)
            .u8(3)
            .i16(0x0601)
            .u16(0x0102)
            .u16(1510)
            .u16(0)
            .u16(10001)
            .u16(3005)
            .i16(100)
            .u32(9)
            .i64(-7)
            .u16(3)
            .i16(-1)
            .u16(0)
            .i16(-1)
            .u16(0)
            .u32(0)
            .u16(0x11)
            .i64(0)
            .u16(0)
            .u16(44)
            .u32s(&[702, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 278])
            .u32s(&[0b110, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 103])
            .u32(0xabc)
    }

    #[test]
    fn decodes_full_record() {
        let builder = summon_sprites();
        assert_eq!(builder.len(), 200);

        let spell = decode(&builder.build()).unwrap();

        assert_eq!(spell.name(), "Summon Sprites");
        assert_eq!(spell.school(), 4);
        assert_eq!(spell.research_level(), 3);
        assert_eq!(spell.fatigue(), 10);
        assert_eq!(spell.gem_cost(), 15);
        assert_eq!(spell.precision(), 100);
        assert_eq!(spell.effects_count(), 3);
        assert_eq!(spell.next_spell(), 0);
        assert_eq!(
            spell.paths(),
            &[
                Some(MagicPathRequirement { path: 1, level: 2 }),
                Some(MagicPathRequirement { path: 6, level: 1 }),
            ]
        );
    }

    #[test]
    fn ritual_effect_is_unpacked() {
        let spell = decode(&summon_sprites().build()).unwrap();
        let effect = spell.effect();

        assert!(effect.is_ritual());
        assert_eq!(effect.duration(), None);
        assert_eq!(effect.base_id(), 1);
        assert_eq!(effect.argument(), &EffectArgument::Summon(Summon::Group(-7)));
        assert_eq!(
            effect.range(),
            EffectRange::Squares {
                base: 5,
                per_level: 3
            }
        );
        assert_eq!(
            effect.area(),
            EffectArea::Squares {
                base: 0,
                per_level: 0
            }
        );
        assert_eq!(effect.sound(), 44);
        assert_eq!(effect.flight_sprite(), None);
        assert!(effect.modifiers().is_empty());
    }

    #[test]
    fn all_thirteen_attribute_slots_are_read() {
        let spell = decode(&summon_sprites().build()).unwrap();
        let values: Vec<_> = spell.attributes().iter().map(|a| a.value().clone()).collect();

        assert_eq!(
            values,
            vec![
                AttributeValue::BitSet {
                    table: BitTable::MapTerrainTypes,
                    bits: vec![2, 4]
                },
                AttributeValue::Nation(3),
            ]
        );
    }

    #[test]
    fn unnamed_fields_become_unknowns() {
        let spell = decode(&summon_sprites().build()).unwrap();
        let found: Vec<_> = spell.unknowns().iter().map(|u| (u.offset, u.value)).collect();

        assert_eq!(found, vec![(52, 9), (78, 0x11), (196, 0xabc)]);
    }

    #[rstest]
    #[case::no_path(-1, 0x0000, [None, None])]
    #[case::holy(-3, 0x0002, [Some(MagicPathRequirement { path: 253, level: 2 }), None])]
    #[case::single(0x0004, 0x0003, [
        Some(MagicPathRequirement { path: 4, level: 3 }),
        Some(MagicPathRequirement { path: 0, level: 0 }),
    ])]
    fn path_masks(
        #[case] path_mask: i16,
        #[case] level_mask: u16,
        #[case] expected: [Option<MagicPathRequirement>; 2],
    ) {
        assert_eq!(path_requirements(path_mask, level_mask), expected);
    }

    #[test]
    fn end_marker_decodes_to_none() {
        assert!(decode(&RecordBuilder::named("end").pad_to(200).build()).is_none());
    }
}
