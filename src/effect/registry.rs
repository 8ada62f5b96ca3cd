use super::{ArgumentKind::*, EffectSpec, IndexTable};
use crate::attribute::BitTable;

const DEATH: &str = "Instant Death on Hit";
const PROBABLE_DEATH: &str = "Instant Death on Hit (?)";

pub(super) const EFFECTS: &[EffectSpec] = &[
    EffectSpec::new(0, Null, "null_arguments", "Nothing"),
    EffectSpec::new(1, Summon, "summons", "Summon"),
    EffectSpec::new(2, Damage, "normal_damage", "Damage (Hitpoints)").with_total_message(DEATH),
    EffectSpec::new(3, Damage, "stun_damage", "Damage (Stun)")
        .with_total_message("Instant Unconsciousness on Hit"),
    EffectSpec::new(4, Generic, "fear_type_1", "Fear (Type I)"),
    EffectSpec::new(7, Damage, "mortal_poison", "Poison (Mortal)"),
    EffectSpec::new(8, Healing, "reinvigoration", "Healing (Fatigue) (?)"),
    EffectSpec::new(10, BitSet(BitTable::Buffs1), "buffs_1", "Bless/Buff (Type I)"),
    EffectSpec::new(11, BitSet(BitTable::SpecialDamage), "special_damage", "Special Damage"),
    EffectSpec::new(13, Healing, "healing", "Healing (Hitpoints) (?)"),
    EffectSpec::new(20, Generic, "blink_ranges", "Range (?)"),
    EffectSpec::new(21, Summon, "summons", "Monster (Commander)"),
    EffectSpec::new(22, Null, "null_arguments", "Nothing"),
    EffectSpec::new(23, BitSet(BitTable::Buffs2), "buffs_2", "Bless/Buff (Type II)"),
    EffectSpec::new(24, Damage, "holy_damage", "Holy Damage"),
    EffectSpec::new(25, Null, "null_arguments", "Nothing"),
    EffectSpec::new(27, Damage, "normal_damage", "Damage (Hitpoints) (?)").with_total_message(DEATH),
    EffectSpec::new(28, Damage, "monster_control", "Possession vs Monster (?)")
        .with_total_message("Instantly Controlled on Hit"),
    EffectSpec::new(29, Damage, "monster_control", "Charm vs Monster (?)")
        .with_total_message("Instantly Charmed on Hit"),
    EffectSpec::new(31, Summon, "summons", "Monster"),
    EffectSpec::new(32, Damage, "damage_vs_large", "Damage vs Large Monsters"),
    EffectSpec::new(33, Damage, "damage_vs_small", "Damage vs Small Monsters"),
    EffectSpec::new(37, Summon, "summons", "Monster"),
    EffectSpec::new(38, Summon, "summons", "Monster"),
    EffectSpec::new(
        42,
        Indexed(IndexTable::AnonymousProvinceEvents),
        "anon_province_events",
        "Anonymous Province Event",
    ),
    EffectSpec::new(43, Summon, "summons", "Monster"),
    EffectSpec::new(46, Generic, "stun_poison", "Poison (Stun)"),
    EffectSpec::new(48, Indexed(IndexTable::MagicPaths), "magic_paths", "Magic Path"),
    EffectSpec::new(50, Summon, "summons", "Monster"),
    EffectSpec::new(54, Summon, "polymorphs", "Monster"),
    EffectSpec::new(57, Damage, "normal_damage", "Damage (Hitpoints) (?)")
        .with_total_message("Instantly Feeble-Minded on Hit (?)"),
    EffectSpec::new(62, Summon, "summons", "Monster"),
    EffectSpec::new(66, Generic, "paralysis", "Paralysis"),
    EffectSpec::new(67, Damage, "weakness", "Damage (Strength) (?)")
        .with_total_message(PROBABLE_DEATH),
    EffectSpec::new(72, Damage, "life_overload_damage", "Damage (Hitpoints) (?)")
        .with_total_message(PROBABLE_DEATH),
    EffectSpec::new(73, Damage, "damage_vs_magic", "Damage vs Magic Creatures")
        .with_total_message("Instant Banishment on Hit (?)"),
    EffectSpec::new(74, Damage, "unlife_damage", "Unlife Damage (?)"),
    EffectSpec::new(81, Indexed(IndexTable::Enchantments), "enchantments", "Enchantment"),
    EffectSpec::new(82, Indexed(IndexTable::Enchantments), "enchantments", "Enchantment"),
    EffectSpec::new(84, Indexed(IndexTable::Enchantments), "enchantments", "Enchantment"),
    EffectSpec::new(85, Null, "null_arguments", "No Argument"),
    EffectSpec::new(
        89,
        Indexed(IndexTable::SpecialUniqueSummons),
        "special_unique_summons",
        "Unique Monster Group",
    ),
    EffectSpec::new(93, Summon, "summons", "Monster"),
    EffectSpec::new(96, Damage, "damage_vs_constructs", "Damage vs Constructs")
        .with_total_message("Instant Destruction on Hit (?)"),
    EffectSpec::new(98, Null, "null_arguments", "Nothing"),
    EffectSpec::new(99, Damage, "petrification", "Petrification (?)")
        .with_total_message("Instant Petrification on Hit"),
    EffectSpec::new(
        100,
        Indexed(IndexTable::TerrainSpecificSummons),
        "terrain_specific_summons",
        "Terrain-Specific Monster Group",
    ),
    EffectSpec::new(101, Generic, "aging", "Number of Years"),
    EffectSpec::new(103, Damage, "life_drain", "Life Drain (Hitpoints) (?)")
        .with_total_message(PROBABLE_DEATH),
    EffectSpec::new(105, Null, "null_arguments", "No Argument"),
    EffectSpec::new(106, Damage, "damage_vs_demons", "Damage (?)"),
    EffectSpec::new(107, Damage, "damage_vs_demons", "Damage"),
    EffectSpec::new(108, Indexed(IndexTable::OtherPlanes), "other_planes", "Plane"),
    EffectSpec::new(109, Damage, "capped_damage", "Capped Damage (Hitpoints)").with_total_message(DEATH),
    EffectSpec::new(112, Damage, "normal_damage", "Damage (Hitpoints) (?)").with_total_message(DEATH),
    EffectSpec::new(113, Null, "null_arguments", "No Argument"),
    EffectSpec::new(
        114,
        Indexed(IndexTable::SpecialUniqueSummons),
        "special_unique_summons",
        "Unique Monster Group",
    ),
    EffectSpec::new(117, Generic, "alchemy", "Gems"),
    EffectSpec::new(119, Summon, "summons", "Monster"),
];

/// Effects seen in the game data whose argument meaning has not been worked out.
pub(super) const UNDOCUMENTED: &[u32] = &[
    15, 19, 26, 30, 35, 39, 40, 41, 44, 49, 53, 63, 64, 68, 70, 75, 76, 77, 79, 80, 86, 90, 91, 92,
    94, 95, 97, 102, 104, 110, 111, 115, 116, 118, 120, 500, 504, 509, 514, 524, 599, 600, 601,
    609,
];
