use indexmap::IndexMap;
use tracing::debug;

use crate::record::EntityRef;

mod registry;

/// Bias the game adds to nation numbers stored in attribute slots.
pub const NATION_BIAS: i64 = 100;

/// Tables whose entries are single bits of a 64-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitTable {
    MapTerrainTypes,
    SpecialDamage,
    Buffs1,
    Buffs2,
    EffectModifiers,
}

/// How much is known about what a code means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    Confirmed,
    /// Registered, but the meaning is a best guess.
    Provisional,
    /// Registered as seen in the game data, with no known meaning.
    Undocumented,
    /// Not registered at all. Decoded as a plain value.
    Unregistered,
}

impl Confidence {
    pub(crate) fn from_title(title: &str) -> Self {
        if title.starts_with("<Unknown") {
            Confidence::Undocumented
        } else if title.contains('?') {
            Confidence::Provisional
        } else {
            Confidence::Confirmed
        }
    }
}

/// Splits a mask into the values of its set bits, lowest first.
pub fn expand_bits(raw: i64) -> Vec<u64> {
    let raw = raw as u64;
    (0..64)
        .map(|pos| 1u64 << pos)
        .filter(|bit| raw & bit != 0)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Generic,
    Boolean,
    NationRef,
    MonsterRef,
    BitSet(BitTable),
}

/// What the game's data says about one attribute code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub code: u32,
    pub kind: AttributeKind,
    /// Name of the label table the decoded value indexes into.
    pub group: &'static str,
    pub title: &'static str,
}

impl AttributeSpec {
    pub const fn new(code: u32, kind: AttributeKind, group: &'static str, title: &'static str) -> Self {
        AttributeSpec {
            code,
            kind,
            group,
            title,
        }
    }

    pub fn confidence(&self) -> Confidence {
        Confidence::from_title(self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Generic(i64),
    Boolean(i64),
    Nation(i64),
    Monster(i64),
    BitSet { table: BitTable, bits: Vec<u64> },
}

impl AttributeValue {
    /// The truth of a boolean attribute. Any nonzero raw value is true.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(raw) => Some(*raw != 0),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeInstance {
    owner: EntityRef,
    code: u32,
    raw_value: i64,
    value: AttributeValue,
    title: &'static str,
    confidence: Confidence,
}

impl AttributeInstance {
    pub fn owner(&self) -> EntityRef {
        self.owner
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn raw_value(&self) -> i64 {
        self.raw_value
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }
}

const UNREGISTERED_TITLE: &str = "<Unregistered Attribute>";

/// Maps attribute codes to how their values decode.
#[derive(Debug, Clone, Default)]
pub struct AttributeCodec {
    specs: IndexMap<u32, AttributeSpec>,
}

impl AttributeCodec {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every attribute code known to appear in the supported game versions.
    pub fn builtin() -> Self {
        let mut codec = Self::empty();
        for &spec in registry::ATTRIBUTES {
            codec = codec.with_spec(spec);
        }
        for &code in registry::UNDOCUMENTED {
            codec = codec.with_spec(AttributeSpec::new(
                code,
                AttributeKind::Generic,
                "unknown_values",
                "<Unknown Attribute>",
            ));
        }
        codec.specs.sort_keys();
        codec
    }

    /// Adds or replaces the entry for `spec.code`.
    pub fn with_spec(mut self, spec: AttributeSpec) -> Self {
        self.specs.insert(spec.code, spec);
        self
    }

    pub fn get(&self, code: u32) -> Option<&AttributeSpec> {
        self.specs.get(&code)
    }

    pub fn specs(&self) -> impl Iterator<Item = &AttributeSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Decodes one attribute slot. Codes missing from the registry still decode, as plain
    /// values marked [`Confidence::Unregistered`].
    pub fn decode(&self, owner: EntityRef, code: u32, raw_value: i64) -> AttributeInstance {
        let (kind, title, confidence) = match self.get(code) {
            Some(spec) => (spec.kind, spec.title, spec.confidence()),
            None => {
                debug!("{owner}: unregistered attribute {code} = {raw_value}");
                (AttributeKind::Generic, UNREGISTERED_TITLE, Confidence::Unregistered)
            }
        };

        let value = match kind {
            AttributeKind::Generic => AttributeValue::Generic(raw_value),
            AttributeKind::Boolean => AttributeValue::Boolean(raw_value),
            AttributeKind::NationRef => AttributeValue::Nation(raw_value - NATION_BIAS),
            AttributeKind::MonsterRef => AttributeValue::Monster(raw_value),
            AttributeKind::BitSet(table) => AttributeValue::BitSet {
                table,
                bits: expand_bits(raw_value),
            },
        };

        AttributeInstance {
            owner,
            code,
            raw_value,
            value,
            title,
            confidence,
        }
    }
}
