use crate::{
    attribute::AttributeInstance,
    cursor::ByteCursor,
    effect::{EffectInstance, RawEffect},
    error::Result,
    record::{Codecs, EntityRef, FieldReader, Record, TableKind, UnknownField, unsigned_value},
};

const ATTRIBUTE_SLOTS: usize = 3;

/// A second weapon triggered by this one. The stored value is negative when the second weapon
/// fires on every attack rather than only on a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryEffect {
    None,
    OnHit(u16),
    Always(u16),
}

impl SecondaryEffect {
    pub fn from_raw(raw: i16) -> Self {
        match raw {
            0 => SecondaryEffect::None,
            r if r < 0 => SecondaryEffect::Always(r.unsigned_abs()),
            r => SecondaryEffect::OnHit(r.unsigned_abs()),
        }
    }

    /// Number of the weapon triggered, if any.
    pub fn weapon(&self) -> Option<u16> {
        match self {
            SecondaryEffect::None => None,
            SecondaryEffect::OnHit(n) | SecondaryEffect::Always(n) => Some(*n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weapon {
    number: usize,
    name: String,
    attack: i16,
    defense: i16,
    length: u16,
    attack_rate: i16,
    attacks_total: u16,
    secondary: SecondaryEffect,
    resource_cost: u16,
    effect: EffectInstance,
    attributes: Vec<AttributeInstance>,
    unknowns: Vec<UnknownField>,
}

impl Weapon {
    pub fn attack(&self) -> i16 {
        self.attack
    }

    pub fn defense(&self) -> i16 {
        self.defense
    }

    pub fn length(&self) -> u16 {
        self.length
    }

    pub fn attack_rate(&self) -> i16 {
        self.attack_rate
    }

    pub fn attacks_total(&self) -> u16 {
        self.attacks_total
    }

    pub fn secondary(&self) -> SecondaryEffect {
        self.secondary
    }

    pub fn resource_cost(&self) -> u16 {
        self.resource_cost
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

impl Record for Weapon {
    const TABLE: TableKind = TableKind::Weapon;

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

        r.unknown_u32()?;
        let argument = r.i64()?;
        let attack = r.i16()?;
        let defense = r.i16()?;
        let identifier = r.u16()?;
        let length = r.u16()?;
        let range = r.i16()?;
        let attack_rate = r.i16()?;
        let attacks_total = r.u16()?;
        r.unknown_u16()?;
        let modifiers = r.i64()?;
        let secondary = SecondaryEffect::from_raw(r.i16()?);
        let flight_sprite = r.i16()?;
        let flight_length = r.u16()?;
        let explosion_sprite = r.i16()?;
        let explosion_length = r.u16()?;
        let area = r.u16()?;
        let sound = r.u16()?;
        let resource_cost = r.u16()?;

        let attributes = r.attributes(codecs.attributes, ATTRIBUTE_SLOTS, unsigned_value)?;

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

        Ok(Some(Weapon {
            number,
            name,
            attack,
            defense,
            length,
            attack_rate,
            attacks_total,
            secondary,
            resource_cost,
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
        effect::{Damage, EffectArea, EffectArgument, EffectRange, SpriteRef},
        record::testing::{RecordBuilder, with_builtin_codecs},
    };

    fn decode(bytes: &[u8]) -> Option<Weapon> {
        with_builtin_codecs(|codecs| Weapon::decode(ByteCursor::new(bytes), codecs, 0, 12)).unwrap()
    }

    fn fire_arrow(secondary: i16) -> RecordBuilder {
        RecordBuilder::named("Fire Arrow")
            .u32(0)
            .i64(1006)
            .i16(-1)
            .i16(0)
            .u16(2)
            .u16(0)
            .i16(-7)
            .i16(1)
            .u16(1)
            .u16(0x20)
            .i64(1 << 3)
            .i16(secondary)
            .i16(114)
            .u16(2)
            .i16(-1)
            .u16(0)
            .u16(1002)
            .u16(17)
            .u16(0)
            .u32s(&[0, 0, 278])
            .u32s(&[0, 0, 101])
    }

    #[test]
    fn decodes_full_record() {
        let builder = fire_arrow(0);
        assert_eq!(builder.len(), 112);

        let weapon = decode(&builder.build()).unwrap();

        assert_eq!(weapon.name(), "Fire Arrow");
        assert_eq!(weapon.entity(), EntityRef::new(TableKind::Weapon, 12));
        assert_eq!(weapon.attack(), -1);
        assert_eq!(weapon.defense(), 0);
        assert_eq!(weapon.length(), 0);
        assert_eq!(weapon.attack_rate(), 1);
        assert_eq!(weapon.attacks_total(), 1);
        assert_eq!(weapon.resource_cost(), 0);
        assert_eq!(weapon.secondary(), SecondaryEffect::None);
        assert_eq!(weapon.attributes().len(), 1);
        assert_eq!(weapon.attributes()[0].code(), 278);
    }

    #[test]
    fn embedded_effect_is_unpacked() {
        let weapon = decode(&fire_arrow(0).build()).unwrap();
        let effect = weapon.effect();

        assert_eq!(effect.base_id(), 2);
        assert_eq!(
            effect.argument(),
            &EffectArgument::Damage(Damage {
                base: Some(6),
                per_level: Some(1),
                total: false,
                message: None
            })
        );
        assert_eq!(effect.range(), EffectRange::StrengthDivisor(7));
        assert_eq!(
            effect.area(),
            EffectArea::Squares {
                base: 2,
                per_level: 1
            }
        );
        assert_eq!(effect.modifiers(), &[8]);
        assert_eq!(
            effect.flight_sprite(),
            Some(SpriteRef {
                number: 114,
                length: 2
            })
        );
        assert_eq!(effect.explosion_sprite(), None);
        assert_eq!(effect.sound(), 17);
        assert_eq!(effect.owner(), weapon.entity());
    }

    #[rstest]
    #[case(0, SecondaryEffect::None)]
    #[case(-255, SecondaryEffect::Always(255))]
    #[case(64, SecondaryEffect::OnHit(64))]
    #[case(i16::MIN, SecondaryEffect::Always(32768))]
    fn secondary_effect_sign(#[case] raw: i16, #[case] expected: SecondaryEffect) {
        let weapon = decode(&fire_arrow(raw).build()).unwrap();
        assert_eq!(weapon.secondary(), expected);
    }

    #[test]
    fn unnamed_fields_become_unknowns() {
        let weapon = decode(&fire_arrow(0).build()).unwrap();

        assert_eq!(weapon.unknowns().len(), 1);
        assert_eq!(weapon.unknowns()[0].offset, 62);
        assert_eq!(weapon.unknowns()[0].value, 0x20);
    }

    #[test]
    fn end_marker_decodes_to_none() {
        assert!(decode(&RecordBuilder::named("end").build()).is_none());
    }
}
