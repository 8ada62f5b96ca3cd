use indexmap::IndexMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use tracing::debug;

use crate::{
    attribute::{BitTable, Confidence, expand_bits},
    record::EntityRef,
};

mod registry;

/// Argument value meaning the effect destroys its target outright.
pub const TOTAL_DAMAGE: i64 = 999;

/// Tables a single argument value can index into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexTable {
    Enchantments,
    MagicPaths,
    AnonymousProvinceEvents,
    SpecialUniqueSummons,
    TerrainSpecificSummons,
    OtherPlanes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    Null,
    Generic,
    Damage,
    Healing,
    Summon,
    BitSet(BitTable),
    Indexed(IndexTable),
}

/// What the game's data says about one effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectSpec {
    pub base_id: u32,
    pub kind: ArgumentKind,
    /// Name of the label table the argument indexes into.
    pub group: &'static str,
    pub title: &'static str,
    /// Shown instead of the damage numbers when the argument is [`TOTAL_DAMAGE`].
    pub total_message: Option<&'static str>,
}

impl EffectSpec {
    pub const fn new(base_id: u32, kind: ArgumentKind, group: &'static str, title: &'static str) -> Self {
        EffectSpec {
            base_id,
            kind,
            group,
            title,
            total_message: None,
        }
    }

    pub const fn with_total_message(self, message: &'static str) -> Self {
        EffectSpec {
            total_message: Some(message),
            ..self
        }
    }

    pub fn confidence(&self) -> Confidence {
        Confidence::from_title(self.title)
    }
}

/// The parts packed into an effect identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectIdentifier {
    pub base_id: u32,
    /// Number of turns the effect lasts, for timed effects.
    pub duration: Option<u32>,
    pub ritual: bool,
}

impl EffectIdentifier {
    pub fn from_raw(identifier: u32) -> Self {
        let base_id = identifier % 1000;
        if identifier >= 10000 {
            EffectIdentifier {
                base_id,
                duration: None,
                ritual: true,
            }
        } else {
            EffectIdentifier {
                base_id,
                duration: (identifier >= 1000).then_some(identifier / 1000),
                ritual: false,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectRange {
    /// Range is the caster's strength divided by this.
    StrengthDivisor(i64),
    Squares { base: i64, per_level: i64 },
}

impl EffectRange {
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            EffectRange::StrengthDivisor(-raw)
        } else {
            EffectRange::Squares {
                base: raw % 1000,
                per_level: raw / 1000,
            }
        }
    }

    pub fn strength_divisor(&self) -> Option<i64> {
        match self {
            EffectRange::StrengthDivisor(d) => Some(*d),
            EffectRange::Squares { .. } => None,
        }
    }

    pub fn base(&self) -> Option<i64> {
        match self {
            EffectRange::Squares { base, .. } => Some(*base),
            EffectRange::StrengthDivisor(_) => None,
        }
    }

    pub fn per_level(&self) -> Option<i64> {
        match self {
            EffectRange::Squares { per_level, .. } => Some(*per_level),
            EffectRange::StrengthDivisor(_) => None,
        }
    }
}

/// Area values with a fixed meaning: a share of the whole battlefield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum BattlefieldArea {
    Whole = 666,
    Half = 663,
    Quarter = 665,
    Tenth = 664,
    Twentieth = 662,
}

impl BattlefieldArea {
    pub fn percent(self) -> u8 {
        match self {
            BattlefieldArea::Whole => 100,
            BattlefieldArea::Half => 50,
            BattlefieldArea::Quarter => 25,
            BattlefieldArea::Tenth => 10,
            BattlefieldArea::Twentieth => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectArea {
    Battlefield(BattlefieldArea),
    Squares { base: u32, per_level: u32 },
}

impl EffectArea {
    pub fn from_raw(raw: u32) -> Self {
        match BattlefieldArea::try_from(raw) {
            Ok(share) => EffectArea::Battlefield(share),
            Err(_) => EffectArea::Squares {
                base: raw % 1000,
                per_level: raw / 1000,
            },
        }
    }

    pub fn battlefield_percent(&self) -> Option<u8> {
        match self {
            EffectArea::Battlefield(share) => Some(share.percent()),
            EffectArea::Squares { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRef {
    pub number: i64,
    pub length: u32,
}

impl SpriteRef {
    /// Negative sprite numbers mean there is no sprite.
    pub fn from_raw(number: i64, length: u32) -> Option<Self> {
        (number >= 0).then_some(SpriteRef { number, length })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub base: Option<i64>,
    pub per_level: Option<i64>,
    pub total: bool,
    pub message: Option<&'static str>,
}

impl Damage {
    pub fn from_raw(raw: i64, total_message: Option<&'static str>) -> Self {
        if raw == TOTAL_DAMAGE {
            Damage {
                base: None,
                per_level: None,
                total: true,
                message: total_message,
            }
        } else if raw < 0 {
            Damage {
                base: Some(raw),
                per_level: Some(0),
                total: false,
                message: None,
            }
        } else {
            Damage {
                base: Some(raw % 1000),
                per_level: Some(raw / 1000),
                total: false,
                message: None,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summon {
    Monster(i64),
    /// Negative arguments name a group of monsters rather than one.
    Group(i64),
}

impl Summon {
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            Summon::Group(raw)
        } else {
            Summon::Monster(raw)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectArgument {
    Null,
    Generic(i64),
    Damage(Damage),
    Healing(i64),
    Summon(Summon),
    BitSet { table: BitTable, bits: Vec<u64> },
    Indexed { table: IndexTable, code: i64 },
}

impl EffectArgument {
    fn decode(kind: ArgumentKind, raw: i64, total_message: Option<&'static str>) -> Self {
        match kind {
            ArgumentKind::Null => EffectArgument::Null,
            ArgumentKind::Generic => EffectArgument::Generic(raw),
            ArgumentKind::Damage => EffectArgument::Damage(Damage::from_raw(raw, total_message)),
            ArgumentKind::Healing => EffectArgument::Healing(raw),
            ArgumentKind::Summon => EffectArgument::Summon(Summon::from_raw(raw)),
            ArgumentKind::BitSet(table) => EffectArgument::BitSet {
                table,
                bits: expand_bits(raw),
            },
            ArgumentKind::Indexed(table) => EffectArgument::Indexed { table, code: raw },
        }
    }
}

/// The raw effect fields of a weapon or spell record, widened to common types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawEffect {
    pub identifier: u32,
    pub argument: i64,
    pub modifiers: i64,
    pub range: i64,
    pub area: u32,
    pub sound: u32,
    pub flight_sprite: i64,
    pub flight_length: u32,
    pub explosion_sprite: i64,
    pub explosion_length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectInstance {
    owner: EntityRef,
    raw: RawEffect,
    identifier: EffectIdentifier,
    argument: EffectArgument,
    modifiers: Vec<u64>,
    range: EffectRange,
    area: EffectArea,
    flight_sprite: Option<SpriteRef>,
    explosion_sprite: Option<SpriteRef>,
    title: &'static str,
    confidence: Confidence,
}

impl EffectInstance {
    pub fn owner(&self) -> EntityRef {
        self.owner
    }

    /// The fields exactly as stored in the record.
    pub fn raw(&self) -> &RawEffect {
        &self.raw
    }

    pub fn base_id(&self) -> u32 {
        self.identifier.base_id
    }

    pub fn duration(&self) -> Option<u32> {
        self.identifier.duration
    }

    pub fn is_ritual(&self) -> bool {
        self.identifier.ritual
    }

    pub fn argument(&self) -> &EffectArgument {
        &self.argument
    }

    /// Values of the set bits of the modifiers mask.
    pub fn modifiers(&self) -> &[u64] {
        &self.modifiers
    }

    pub fn range(&self) -> EffectRange {
        self.range
    }

    pub fn area(&self) -> EffectArea {
        self.area
    }

    pub fn sound(&self) -> u32 {
        self.raw.sound
    }

    pub fn flight_sprite(&self) -> Option<SpriteRef> {
        self.flight_sprite
    }

    pub fn explosion_sprite(&self) -> Option<SpriteRef> {
        self.explosion_sprite
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }
}

const UNREGISTERED_TITLE: &str = "<Unregistered Argument Type>";

/// Maps effect base ids to how their arguments decode.
#[derive(Debug, Clone, Default)]
pub struct EffectCodec {
    specs: IndexMap<u32, EffectSpec>,
}

impl EffectCodec {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every effect known to appear in the supported game versions.
    pub fn builtin() -> Self {
        let mut codec = Self::empty();
        for &spec in registry::EFFECTS {
            codec = codec.with_spec(spec);
        }
        for &base_id in registry::UNDOCUMENTED {
            codec = codec.with_spec(EffectSpec::new(
                base_id,
                ArgumentKind::Generic,
                "unknown_arguments",
                "<Unknown Argument Type>",
            ));
        }
        codec.specs.sort_keys();
        codec
    }

    /// Adds or replaces the entry for `spec.base_id`.
    pub fn with_spec(mut self, spec: EffectSpec) -> Self {
        self.specs.insert(spec.base_id, spec);
        self
    }

    pub fn get(&self, base_id: u32) -> Option<&EffectSpec> {
        self.specs.get(&base_id)
    }

    pub fn specs(&self) -> impl Iterator<Item = &EffectSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Unpacks an effect. Base ids missing from the registry still decode, with a plain
    /// argument marked [`Confidence::Unregistered`].
    pub fn decode(&self, owner: EntityRef, raw: RawEffect) -> EffectInstance {
        let identifier = EffectIdentifier::from_raw(raw.identifier);

        let (kind, title, message, confidence) = match self.get(identifier.base_id) {
            Some(spec) => (spec.kind, spec.title, spec.total_message, spec.confidence()),
            None => {
                debug!(
                    "{owner}: unregistered effect {} (argument {})",
                    identifier.base_id, raw.argument
                );
                (ArgumentKind::Generic, UNREGISTERED_TITLE, None, Confidence::Unregistered)
            }
        };

        EffectInstance {
            owner,
            raw,
            identifier,
            argument: EffectArgument::decode(kind, raw.argument, message),
            modifiers: expand_bits(raw.modifiers),
            range: EffectRange::from_raw(raw.range),
            area: EffectArea::from_raw(raw.area),
            flight_sprite: SpriteRef::from_raw(raw.flight_sprite, raw.flight_length),
            explosion_sprite: SpriteRef::from_raw(raw.explosion_sprite, raw.explosion_length),
            title,
            confidence,
        }
    }
}
