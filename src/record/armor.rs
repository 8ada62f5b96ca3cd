use crate::{
    attribute::AttributeInstance,
    cursor::ByteCursor,
    error::Result,
    record::{Codecs, EntityRef, FieldReader, Record, TableKind, UnknownField, unsigned_value},
};

const PROTECTION_SLOTS: usize = 6;
const ATTRIBUTE_SLOTS: usize = 3;

/// How much protection an armor gives one hit location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmorProtection {
    pub owner: EntityRef,
    pub zone: u16,
    pub amount: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Armor {
    number: usize,
    name: String,
    protections: Vec<ArmorProtection>,
    defense: i16,
    encumbrance: u16,
    armor_type: u16,
    resource_cost: u16,
    attributes: Vec<AttributeInstance>,
    unknowns: Vec<UnknownField>,
}

impl Armor {
    pub fn protections(&self) -> &[ArmorProtection] {
        &self.protections
    }

    pub fn defense(&self) -> i16 {
        self.defense
    }

    pub fn encumbrance(&self) -> u16 {
        self.encumbrance
    }

    pub fn armor_type(&self) -> u16 {
        self.armor_type
    }

    pub fn resource_cost(&self) -> u16 {
        self.resource_cost
    }

    pub fn attributes(&self) -> &[AttributeInstance] {
        &self.attributes
    }

    pub fn unknowns(&self) -> &[UnknownField] {
        &self.unknowns
    }
}

impl Record for Armor {
    const TABLE: TableKind = TableKind::Armor;

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

        let mut protections = Vec::new();
        for _ in 0..PROTECTION_SLOTS {
            let zone = r.u16()?;
            let amount = r.u16()?;
            if zone != 0 {
                protections.push(ArmorProtection {
                    owner,
                    zone,
                    amount,
                });
            }
        }

        r.unknown_u16()?;
        let defense = r.i16()?;
        let encumbrance = r.u16()?;
        let armor_type = r.u16()?;
        let resource_cost = r.u16()?;
        r.unknown_u16()?;

        let attributes = r.attributes(codecs.attributes, ATTRIBUTE_SLOTS, unsigned_value)?;

        Ok(Some(Armor {
            number,
            name,
            protections,
            defense,
            encumbrance,
            armor_type,
            resource_cost,
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
