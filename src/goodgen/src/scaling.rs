//! Stat-scaling resolution: sparse breakpoint tables to dense matrices
//!
//! Curve and promotion tables are indexed once up front; the per-entity loops
//! afterwards are pure lookups, so a full run is O(entities x 100).
//!
//! Character and weapon ascension bonuses deliberately diverge: a character
//! tier with no promotion record resolves to a zero triple, while a weapon
//! tier with no base-attack bonus is omitted from the output map. This
//! asymmetry matches observed upstream consumption; do not unify it without
//! product confirmation.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::project::{Character, StatTriple, Weapon};
use crate::raw::{find, u32_field, RawTable};
use crate::schema::{self, UpstreamSchema};

/// Dense level domain: levels 0 through 99
pub const LEVEL_COUNT: usize = 100;

/// Ascension tier domain: tiers 0 through 6
pub const TIER_COUNT: usize = 7;

/// Per-level multiplier lookup, indexed by level position and curve name
#[derive(Debug, Clone, Default)]
pub struct CurveTable {
    levels: Vec<HashMap<String, f64>>,
}

impl CurveTable {
    /// Index a raw curve table. Record order carries the level: the n-th
    /// record holds the multipliers for level n.
    pub fn from_raw(table: &RawTable, s: &UpstreamSchema) -> Self {
        let levels = table
            .iter()
            .map(|rec| {
                let mut by_name = HashMap::new();
                let infos = rec.get(s.curve_infos).and_then(|v| v.as_array());
                for info in infos.into_iter().flatten() {
                    let Some(name) = info.get(s.curve_type).and_then(|v| v.as_str()) else {
                        continue;
                    };
                    let Some(value) = info.get(s.curve_value).and_then(|v| v.as_f64()) else {
                        continue;
                    };
                    by_name.insert(name.to_string(), value);
                }
                by_name
            })
            .collect();
        Self { levels }
    }

    /// Multiplier for a curve at a level; `None` when either is unknown
    pub fn multiplier(&self, level: usize, curve: &str) -> Option<f64> {
        self.levels.get(level)?.get(curve).copied()
    }

    /// Number of level rows the upstream snapshot carries
    pub fn level_rows(&self) -> usize {
        self.levels.len()
    }
}

/// Promotion bonuses indexed by (ascension group, tier)
#[derive(Debug, Clone, Default)]
pub struct PromoteTable {
    bonuses: HashMap<(u32, u8), Vec<serde_json::Value>>,
}

impl PromoteTable {
    /// Index a raw promotion table. `group_key` names the grouping field
    /// (character and weapon promotion tables differ only there). A record
    /// without a tier field is the unascended tier-0 baseline.
    pub fn from_raw(table: &RawTable, group_key: &str, s: &UpstreamSchema) -> Self {
        let mut bonuses = HashMap::new();
        for rec in table {
            let Some(group) = u32_field(rec, group_key) else {
                continue;
            };
            let tier = u32_field(rec, s.promote_level).unwrap_or(0) as u8;
            let props = rec
                .get(s.add_props)
                .and_then(|v| v.as_array())
                .cloned()
                .unwrap_or_default();
            bonuses.insert((group, tier), props);
        }
        Self { bonuses }
    }

    /// Bonus property list for a (group, tier), if a record exists
    pub fn props(&self, group: u32, tier: u8) -> Option<&[serde_json::Value]> {
        self.bonuses.get(&(group, tier)).map(Vec::as_slice)
    }

    /// Bonus value of one property, zero-filling both a missing property
    /// entry and a property entry without a value (character policy)
    pub fn bonus_or_zero(&self, group: u32, tier: u8, prop_type: &str, s: &UpstreamSchema) -> f64 {
        self.props(group, tier)
            .and_then(|props| find(props, s.prop_type, prop_type))
            .and_then(|prop| prop.get(s.prop_value))
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    /// Bonus value of one property, present only when the record, the
    /// property entry and its value all exist (weapon policy)
    pub fn bonus(&self, group: u32, tier: u8, prop_type: &str, s: &UpstreamSchema) -> Option<f64> {
        let prop = find(self.props(group, tier)?, s.prop_type, prop_type)?;
        prop.get(s.prop_value)?.as_f64()
    }
}

/// Resolved scaling matrices for one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterScaling {
    /// Exactly [`LEVEL_COUNT`] triples of curve multipliers
    pub level_multipliers: Vec<StatTriple>,
    /// Exactly [`TIER_COUNT`] additive bonus triples, zero-filled for
    /// tiers with no promotion record
    pub ascension_values: Vec<StatTriple>,
}

/// Resolved scaling matrices for one weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponScaling {
    /// Per stat key, exactly [`LEVEL_COUNT`] curve multipliers
    pub stat_multipliers: BTreeMap<String, Vec<f64>>,
    /// Flat base-attack bonus per ascension tier; tiers without an upstream
    /// bonus entry are absent, never zero-filled
    pub ascension_base_atk: BTreeMap<u8, f64>,
}

/// Resolve dense scaling matrices for every character.
///
/// A character whose curve reference is missing from the curve table (or
/// whose snapshot carries fewer than 100 level rows) is skipped whole, per
/// the record-skip policy. Output is keyed by character id in sorted order
/// so identical snapshots serialize identically.
pub fn resolve_character_scaling(
    characters: &[Character],
    curves: &CurveTable,
    promotes: &PromoteTable,
    s: &UpstreamSchema,
) -> BTreeMap<u32, CharacterScaling> {
    let mut out = BTreeMap::new();

    'character: for character in characters {
        let mut level_multipliers = Vec::with_capacity(LEVEL_COUNT);
        for level in 0..LEVEL_COUNT {
            let triple = (|| {
                Some(StatTriple {
                    hp: curves.multiplier(level, &character.curves.hp)?,
                    atk: curves.multiplier(level, &character.curves.atk)?,
                    def_: curves.multiplier(level, &character.curves.def_)?,
                })
            })();
            match triple {
                Some(triple) => level_multipliers.push(triple),
                None => continue 'character,
            }
        }

        let ascension_values = (0..TIER_COUNT as u8)
            .map(|tier| StatTriple {
                hp: promotes.bonus_or_zero(character.ascension_id, tier, schema::PROP_BASE_HP, s),
                atk: promotes.bonus_or_zero(
                    character.ascension_id,
                    tier,
                    schema::PROP_BASE_ATTACK,
                    s,
                ),
                def_: promotes.bonus_or_zero(
                    character.ascension_id,
                    tier,
                    schema::PROP_BASE_DEFENSE,
                    s,
                ),
            })
            .collect();

        out.insert(
            character.id,
            CharacterScaling {
                level_multipliers,
                ascension_values,
            },
        );
    }

    out
}

/// Resolve dense scaling matrices for every weapon.
///
/// Each stat entry expands to a 100-entry multiplier sequence from its own
/// curve reference; any unknown curve skips the weapon whole. Ascension
/// base-attack bonuses stay sparse (see module docs).
pub fn resolve_weapon_scaling(
    weapons: &[Weapon],
    curves: &CurveTable,
    promotes: &PromoteTable,
    s: &UpstreamSchema,
) -> BTreeMap<u32, WeaponScaling> {
    let mut out = BTreeMap::new();

    'weapon: for weapon in weapons {
        let mut stat_multipliers = BTreeMap::new();
        for stat in &weapon.stats {
            let sequence: Option<Vec<f64>> = (0..LEVEL_COUNT)
                .map(|level| curves.multiplier(level, &stat.curve))
                .collect();
            match sequence {
                Some(sequence) => {
                    stat_multipliers.insert(stat.key.clone(), sequence);
                }
                None => continue 'weapon,
            }
        }

        let mut ascension_base_atk = BTreeMap::new();
        for tier in 0..TIER_COUNT as u8 {
            if let Some(value) =
                promotes.bonus(weapon.ascension_id, tier, schema::PROP_BASE_ATTACK, s)
            {
                ascension_base_atk.insert(tier, value);
            }
        }

        out.insert(
            weapon.id,
            WeaponScaling {
                stat_multipliers,
                ascension_base_atk,
            },
        );
    }

    out
}
