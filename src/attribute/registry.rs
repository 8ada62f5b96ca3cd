use super::{AttributeKind::*, AttributeSpec, BitTable};

const TERRAIN: super::AttributeKind = BitSet(BitTable::MapTerrainTypes);

pub(super) const ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec::new(52, Generic, "capital_magic_sites", "Capital Magic Site {Ntn: #startsite}"),
    AttributeSpec::new(
        100,
        Generic,
        "capital_magic_sites",
        "Capital Magic Site (Unholy?) {Ntn: #startsite}",
    ),
    AttributeSpec::new(139, MonsterRef, "unique_heroes", "National Unique Hero {Ntn: #hero1}"),
    AttributeSpec::new(140, MonsterRef, "unique_heroes", "National Unique Hero {Ntn: #hero2}"),
    AttributeSpec::new(141, MonsterRef, "unique_heroes", "National Unique Hero {Ntn: #hero3}"),
    AttributeSpec::new(142, MonsterRef, "unique_heroes", "National Unique Hero {Ntn: #hero4}"),
    AttributeSpec::new(143, MonsterRef, "unique_heroes", "National Unique Hero {Ntn: #hero5}"),
    AttributeSpec::new(144, MonsterRef, "unique_heroes", "National Unique Hero {Ntn: #hero6}"),
    AttributeSpec::new(145, MonsterRef, "generic_heroes", "National Generic Hero {Ntn: #multihero1}"),
    AttributeSpec::new(146, MonsterRef, "generic_heroes", "National Generic Hero {Ntn: #multihero2}"),
    AttributeSpec::new(158, MonsterRef, "recruitable_units", "Coastal Fort Commander {Ntn: #coastcom1}"),
    AttributeSpec::new(159, MonsterRef, "recruitable_units", "Coastal Fort Commander {Ntn: #coastcom2}"),
    AttributeSpec::new(160, MonsterRef, "recruitable_units", "Coastal Fort Troop {Ntn: #coastunit1}"),
    AttributeSpec::new(161, MonsterRef, "recruitable_units", "Coastal Fort Troop {Ntn: #coastunit2}"),
    AttributeSpec::new(162, MonsterRef, "recruitable_units", "Coastal Fort Troop {Ntn: #coastunit3}"),
    AttributeSpec::new(266, Boolean, "boolean_values", "Material Composition: Ferrous"),
    AttributeSpec::new(267, Boolean, "boolean_values", "Material Composition: Ferrous"),
    AttributeSpec::new(268, Boolean, "boolean_values", "Material Composition: Flammable"),
    AttributeSpec::new(269, Boolean, "boolean_values", "Material Composition: Flammable"),
    AttributeSpec::new(278, NationRef, "restrict_to_nations", "Restrict to Nation {Spl: #restricted}"),
    AttributeSpec::new(700, Generic, "map_ranges", "Map Range {Spl: #provrange}"),
    AttributeSpec::new(701, TERRAIN, "map_terrain_types", "<Unknown Attribute>"),
    AttributeSpec::new(702, TERRAIN, "map_terrain_types", "Source Terrain (?) {Spl: #onlygeosrc}"),
    AttributeSpec::new(
        703,
        Boolean,
        "boolean_values",
        "Only Target Own Provinces (?) {Spl: #onlyowndst}",
    ),
    AttributeSpec::new(706, Boolean, "boolean_values", "No Path over Land (?) {Spl: #nolandtrace}"),
];

/// Codes seen in the game data whose meaning has not been worked out. They decode as plain values.
pub(super) const UNDOCUMENTED: &[u32] = &[
    35, 36, 41, 43, 46, 47, 59, 69, 73, 74, 75, 76, 77, 78, 79, 80, 81, 82, 83, 84, 85, 90, 91, 92,
    93, 94, 95, 122, 123, 124, 125, 126, 127, 131, 132, 133, 134, 136, 137, 138, 156, 157, 163,
    167, 168, 169, 170, 171, 172, 173, 174, 175, 176, 177, 178, 179, 180, 185, 186, 187, 188, 189,
    190, 191, 193, 194, 195, 196, 197, 198, 199, 200, 205, 207, 210, 211, 213, 217, 220, 221, 222,
    223, 261, 263, 264, 265, 270, 271, 272, 273, 274, 275, 279, 280, 287, 288, 289, 290, 293, 294,
    295, 296, 297, 298, 299, 300, 302, 303, 304, 305, 306, 404, 426, 477, 704, 705, 707, 708, 709,
    711,
];
