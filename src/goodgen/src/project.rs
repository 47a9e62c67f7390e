//! Record projection: loosely-typed upstream records to validated entities
//!
//! Every entity kind has a `from_record` constructor that validates required
//! fields up front. A single missing required field invalidates the whole
//! record; projection skips it and moves on. There are no partially-populated
//! entities downstream of this module.

use serde::{Deserialize, Serialize};

use crate::mapping;
use crate::raw::{f64_field, str_field, text_key_field, u32_field, RawRecord, RawTable};
use crate::schema::{self, UpstreamSchema};

/// One hp/atk/def value group
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatTriple {
    pub hp: f64,
    pub atk: f64,
    pub def_: f64,
}

impl StatTriple {
    pub const ZERO: StatTriple = StatTriple {
        hp: 0.0,
        atk: 0.0,
        def_: 0.0,
    };
}

/// Growth-curve names backing each base stat.
///
/// Upstream reuses curve codes across stats (hp and def routinely reference
/// the same curve); identical multipliers are expected, not a collision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveRefs {
    pub hp: String,
    pub atk: String,
    pub def_: String,
}

/// A projected playable character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub ascension_id: u32,
    pub icon: String,
    pub text_map_key: String,
    pub base: StatTriple,
    pub curves: CurveRefs,
}

impl Character {
    /// Project one upstream character record; `None` skips the record
    pub fn from_record(record: &RawRecord, s: &UpstreamSchema) -> Option<Self> {
        let grow_curves = record.get(s.char_grow_curves)?.as_array()?;
        let curve_for = |prop: &str| -> Option<String> {
            let entry = crate::raw::find(grow_curves, s.grow_curve_prop, prop)?;
            Some(entry.get(s.grow_curve_name)?.as_str()?.to_string())
        };

        Some(Character {
            id: u32_field(record, s.char_id)?,
            ascension_id: u32_field(record, s.char_promote_id)?,
            icon: str_field(record, s.char_icon)?.to_string(),
            text_map_key: text_key_field(record, s.char_name_hash)?,
            base: StatTriple {
                hp: f64_field(record, s.char_hp_base)?,
                atk: f64_field(record, s.char_atk_base)?,
                def_: f64_field(record, s.char_def_base)?,
            },
            curves: CurveRefs {
                hp: curve_for(schema::PROP_BASE_HP)?,
                atk: curve_for(schema::PROP_BASE_ATTACK)?,
                def_: curve_for(schema::PROP_BASE_DEFENSE)?,
            },
        })
    }
}

/// One named weapon stat with its base value and growth-curve reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStat {
    pub key: String,
    pub base: f64,
    pub curve: String,
}

/// A projected weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: u32,
    pub ascension_id: u32,
    pub icon: String,
    pub text_map_key: String,
    pub weapon_type: String,
    pub rarity: u8,
    pub stats: Vec<WeaponStat>,
}

impl Weapon {
    /// Project one upstream weapon record; `None` skips the record.
    ///
    /// The base-attack property is renamed to the canonical `base_atk` key,
    /// keeping it distinct from the percentage/elemental secondary stats.
    /// Property entries whose stat code has no mapping are dropped from the
    /// stat list; a property entry without a growth-curve reference
    /// invalidates the whole record.
    pub fn from_record(record: &RawRecord, s: &UpstreamSchema) -> Option<Self> {
        let weapon_type =
            mapping::weapon_type_key(str_field(record, s.weapon_class)?)?.to_string();

        let mut stats = Vec::new();
        for prop in record.get(s.weapon_props)?.as_array()? {
            let prop = prop.as_object()?;
            // Upstream pads the property list with empty entries
            let Some(prop_type) = str_field(prop, s.weapon_prop_type) else {
                continue;
            };
            let curve = str_field(prop, s.weapon_prop_curve)?.to_string();
            let base = f64_field(prop, s.weapon_prop_init).unwrap_or(0.0);

            let key = if prop_type == schema::PROP_BASE_ATTACK {
                "base_atk"
            } else {
                match mapping::stat_key(prop_type) {
                    Some(key) => key,
                    None => continue,
                }
            };
            stats.push(WeaponStat {
                key: key.to_string(),
                base,
                curve,
            });
        }

        Some(Weapon {
            id: u32_field(record, s.weapon_id)?,
            ascension_id: u32_field(record, s.weapon_promote_id)?,
            icon: str_field(record, s.weapon_icon)?.to_string(),
            text_map_key: text_key_field(record, s.weapon_name_hash)?,
            weapon_type,
            rarity: u32_field(record, s.weapon_rank)? as u8,
            stats,
        })
    }
}

/// A projected artifact piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactPiece {
    pub id: u32,
    pub set_id: u32,
    pub icon: String,
    pub text_map_key: String,
    pub slot: String,
    pub rarity: u8,
}

impl ArtifactPiece {
    /// Project one upstream artifact record; `None` skips the record.
    /// An unmapped equip-slot code skips the record like any missing field.
    pub fn from_record(record: &RawRecord, s: &UpstreamSchema) -> Option<Self> {
        Some(ArtifactPiece {
            id: u32_field(record, s.artifact_id)?,
            set_id: u32_field(record, s.artifact_set_id)?,
            icon: str_field(record, s.artifact_icon)?.to_string(),
            text_map_key: text_key_field(record, s.artifact_name_hash)?,
            slot: mapping::slot_key(str_field(record, s.artifact_slot)?)?.to_string(),
            rarity: u32_field(record, s.artifact_rank)? as u8,
        })
    }
}

/// Project all character records, skipping incomplete ones
pub fn project_characters(table: &RawTable, s: &UpstreamSchema) -> Vec<Character> {
    table
        .iter()
        .filter_map(|rec| Character::from_record(rec, s))
        .collect()
}

/// Project all weapon records, skipping incomplete ones
pub fn project_weapons(table: &RawTable, s: &UpstreamSchema) -> Vec<Weapon> {
    table
        .iter()
        .filter_map(|rec| Weapon::from_record(rec, s))
        .collect()
}

/// Project all artifact records in upstream order, skipping incomplete ones
pub fn project_artifacts(table: &RawTable, s: &UpstreamSchema) -> Vec<ArtifactPiece> {
    table
        .iter()
        .filter_map(|rec| ArtifactPiece::from_record(rec, s))
        .collect()
}
