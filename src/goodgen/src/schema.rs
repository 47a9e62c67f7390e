//! Versioned upstream field-name adapter
//!
//! Upstream snapshots drift: field names have been renamed across data
//! generations while the record shapes stayed put. All upstream key strings
//! live here so a new snapshot generation becomes a new [`UpstreamSchema`]
//! constant instead of branching inside the projectors.

/// Field names for one upstream snapshot generation
#[derive(Debug, Clone, Copy)]
pub struct UpstreamSchema {
    // Character records
    pub char_id: &'static str,
    pub char_promote_id: &'static str,
    pub char_icon: &'static str,
    pub char_name_hash: &'static str,
    pub char_hp_base: &'static str,
    pub char_atk_base: &'static str,
    pub char_def_base: &'static str,
    pub char_grow_curves: &'static str,
    pub grow_curve_prop: &'static str,
    pub grow_curve_name: &'static str,

    // Curve records (characters and weapons share the shape)
    pub curve_infos: &'static str,
    pub curve_type: &'static str,
    pub curve_value: &'static str,

    // Promotion records
    pub char_promote_group: &'static str,
    pub weapon_promote_group: &'static str,
    pub promote_level: &'static str,
    pub add_props: &'static str,
    pub prop_type: &'static str,
    pub prop_value: &'static str,

    // Weapon records
    pub weapon_id: &'static str,
    pub weapon_promote_id: &'static str,
    pub weapon_icon: &'static str,
    pub weapon_name_hash: &'static str,
    pub weapon_class: &'static str,
    pub weapon_rank: &'static str,
    pub weapon_props: &'static str,
    pub weapon_prop_type: &'static str,
    pub weapon_prop_init: &'static str,
    pub weapon_prop_curve: &'static str,

    // Artifact piece records
    pub artifact_id: &'static str,
    pub artifact_set_id: &'static str,
    pub artifact_icon: &'static str,
    pub artifact_name_hash: &'static str,
    pub artifact_slot: &'static str,
    pub artifact_rank: &'static str,

    // Artifact level records
    pub level_rank: &'static str,
    pub level_level: &'static str,

    // Set and affix records
    pub set_id: &'static str,
    pub set_affix_id: &'static str,
    pub affix_id: &'static str,
    pub affix_name_hash: &'static str,
}

/// Current upstream snapshot generation
pub const CURRENT: &UpstreamSchema = &UpstreamSchema {
    char_id: "id",
    char_promote_id: "avatarPromoteId",
    char_icon: "iconName",
    char_name_hash: "nameTextMapHash",
    char_hp_base: "hpBase",
    char_atk_base: "attackBase",
    char_def_base: "defenseBase",
    char_grow_curves: "propGrowCurves",
    grow_curve_prop: "type",
    grow_curve_name: "growCurve",

    curve_infos: "curveInfos",
    curve_type: "type",
    curve_value: "value",

    char_promote_group: "avatarPromoteId",
    weapon_promote_group: "weaponPromoteId",
    promote_level: "promoteLevel",
    add_props: "addProps",
    prop_type: "propType",
    prop_value: "value",

    weapon_id: "id",
    weapon_promote_id: "weaponPromoteId",
    weapon_icon: "icon",
    weapon_name_hash: "nameTextMapHash",
    weapon_class: "weaponType",
    weapon_rank: "rankLevel",
    weapon_props: "weaponProp",
    weapon_prop_type: "propType",
    weapon_prop_init: "initValue",
    weapon_prop_curve: "type",

    artifact_id: "id",
    artifact_set_id: "setId",
    artifact_icon: "icon",
    artifact_name_hash: "nameTextMapHash",
    artifact_slot: "equipType",
    artifact_rank: "rankLevel",

    level_rank: "rank",
    level_level: "level",

    set_id: "setId",
    set_affix_id: "equipAffixId",
    affix_id: "id",
    affix_name_hash: "nameTextMapHash",
};

// Growth-curve property codes on character records. These select which curve
// reference feeds which base stat; they never appear in scaling output.
pub const PROP_BASE_HP: &str = "FIGHT_PROP_BASE_HP";
pub const PROP_BASE_ATTACK: &str = "FIGHT_PROP_BASE_ATTACK";
pub const PROP_BASE_DEFENSE: &str = "FIGHT_PROP_BASE_DEFENSE";
