//! Artifact set assembly and level scaling
//!
//! Three independent joins over the artifact tables: set display names
//! resolved transitively through the affix table, piece grouping by set and
//! slot, and the rank-by-level value table for artifact main stats.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::mapping;
use crate::project::ArtifactPiece;
use crate::raw::{text_key_field, u32_field, RawTable};
use crate::schema::UpstreamSchema;
use crate::textmap::TextMap;

/// A named artifact set with its canonical piece per slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSet {
    pub id: u32,
    pub name: String,
    /// GOOD slot key to the one canonical piece in that slot
    pub pieces: BTreeMap<String, ArtifactPiece>,
}

/// Resolve set display names: `set -> equip affix -> text key -> name`.
///
/// A set whose affix id has no affix record, or whose affix text key has no
/// localized string, is dropped; there are no partially-named sets.
pub fn resolve_set_names(
    sets: &RawTable,
    affixes: &RawTable,
    text_map: &TextMap,
    s: &UpstreamSchema,
) -> BTreeMap<u32, String> {
    // Affix id to text key, first record wins
    let mut affix_keys: HashMap<u32, String> = HashMap::new();
    for rec in affixes {
        let Some(id) = u32_field(rec, s.affix_id) else {
            continue;
        };
        let Some(key) = text_key_field(rec, s.affix_name_hash) else {
            continue;
        };
        affix_keys.entry(id).or_insert(key);
    }

    let mut names = BTreeMap::new();
    for rec in sets {
        let Some(set_id) = u32_field(rec, s.set_id) else {
            continue;
        };
        let Some(affix_id) = u32_field(rec, s.set_affix_id) else {
            continue;
        };
        let Some(key) = affix_keys.get(&affix_id) else {
            continue;
        };
        let Some(name) = text_map.resolve(key) else {
            continue;
        };
        names.insert(set_id, name.to_string());
    }
    names
}

/// Group pieces by set, then by slot. Within a slot the first piece in
/// upstream order wins; later duplicates are dropped.
pub fn group_pieces(pieces: Vec<ArtifactPiece>) -> BTreeMap<u32, BTreeMap<String, ArtifactPiece>> {
    let mut grouped: BTreeMap<u32, BTreeMap<String, ArtifactPiece>> = BTreeMap::new();
    for piece in pieces {
        grouped
            .entry(piece.set_id)
            .or_default()
            .entry(piece.slot.clone())
            .or_insert(piece);
    }
    grouped
}

/// Assemble named sets with their canonical pieces. Pieces whose set never
/// resolved a name are dropped along with the set.
pub fn assemble_sets(
    names: BTreeMap<u32, String>,
    pieces: Vec<ArtifactPiece>,
) -> BTreeMap<u32, ArtifactSet> {
    let mut grouped = group_pieces(pieces);
    names
        .into_iter()
        .map(|(id, name)| {
            let pieces = grouped.remove(&id).unwrap_or_default();
            (id, ArtifactSet { id, name, pieces })
        })
        .collect()
}

/// Rank-by-level main-stat value table.
///
/// Upstream levels are 1-based; index `level - 1` holds that level's values.
/// Property codes with no stat-key mapping are omitted from the level's map,
/// never zero-filled. Levels with no upstream record stay as empty maps.
pub fn resolve_artifact_levels(
    table: &RawTable,
    s: &UpstreamSchema,
) -> BTreeMap<u8, Vec<BTreeMap<&'static str, f64>>> {
    let mut out: BTreeMap<u8, Vec<BTreeMap<&'static str, f64>>> = BTreeMap::new();

    for rec in table {
        // Rank-0 records omit the rank field upstream
        let rank = u32_field(rec, s.level_rank).unwrap_or(0) as u8;
        let Some(level) = u32_field(rec, s.level_level) else {
            continue;
        };
        if level == 0 {
            continue;
        }

        let mut values = BTreeMap::new();
        let props = rec.get(s.add_props).and_then(|v| v.as_array());
        for prop in props.into_iter().flatten() {
            let Some(code) = prop.get(s.prop_type).and_then(|v| v.as_str()) else {
                continue;
            };
            let Some(key) = mapping::stat_key(code) else {
                continue;
            };
            let Some(value) = prop.get(s.prop_value).and_then(|v| v.as_f64()) else {
                continue;
            };
            values.insert(key, value);
        }

        let rows = out.entry(rank).or_default();
        let index = (level - 1) as usize;
        if rows.len() <= index {
            rows.resize(index + 1, BTreeMap::new());
        }
        rows[index] = values;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::UpstreamTable;
    use crate::schema::CURRENT;
    use serde_json::json;

    fn piece(id: u32, set_id: u32, slot: &str) -> ArtifactPiece {
        ArtifactPiece {
            id,
            set_id,
            icon: format!("UI_RelicIcon_{set_id}_{id}"),
            text_map_key: id.to_string(),
            slot: slot.to_string(),
            rarity: 5,
        }
    }

    fn set_table() -> RawTable {
        RawTable::from_value(
            UpstreamTable::ArtifactSets,
            json!([
                {"setId": 10005, "equipAffixId": 210500},
                {"setId": 10006, "equipAffixId": 999999},
                {"setId": 10007, "equipAffixId": 210700},
            ]),
        )
        .unwrap()
    }

    fn affix_table() -> RawTable {
        RawTable::from_value(
            UpstreamTable::ArtifactAffixes,
            json!([
                {"id": 210500, "nameTextMapHash": 1001},
                // Text key 1002 has no localized string in the fixture map
                {"id": 210700, "nameTextMapHash": 1002},
            ]),
        )
        .unwrap()
    }

    fn text_map() -> TextMap {
        [("1001".to_string(), "Berserker".to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_set_dropped_without_affix_or_name() {
        let names = resolve_set_names(&set_table(), &affix_table(), &text_map(), CURRENT);
        // 10006 has no affix record, 10007 has no localized name
        assert_eq!(names.len(), 1);
        assert_eq!(names[&10005], "Berserker");
    }

    #[test]
    fn test_first_piece_per_slot_wins() {
        let grouped = group_pieces(vec![
            piece(1, 10005, "flower"),
            piece(2, 10005, "plume"),
            piece(3, 10005, "flower"),
        ]);
        let slots = &grouped[&10005];
        assert_eq!(slots.len(), 2);
        assert_eq!(slots["flower"].id, 1);
    }

    #[test]
    fn test_nameless_set_drops_its_pieces() {
        let names = resolve_set_names(&set_table(), &affix_table(), &text_map(), CURRENT);
        let sets = assemble_sets(names, vec![piece(1, 10005, "flower"), piece(9, 10006, "plume")]);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[&10005].pieces.len(), 1);
        assert!(!sets.contains_key(&10006));
    }

    #[test]
    fn test_artifact_levels_filter_and_offset() {
        let table = RawTable::from_value(
            UpstreamTable::ArtifactLevels,
            json!([
                {"level": 1, "addProps": [
                    {"propType": "FIGHT_PROP_HP", "value": 129.0},
                    {"propType": "FIGHT_PROP_SHIELD_COST_MINUS_RATIO", "value": 1.0},
                ]},
                {"rank": 5, "level": 2, "addProps": [
                    {"propType": "FIGHT_PROP_HP", "value": 1123.0},
                    {"propType": "FIGHT_PROP_CRITICAL", "value": 0.066},
                ]},
            ]),
        )
        .unwrap();

        let levels = resolve_artifact_levels(&table, CURRENT);
        // Rank field absent means rank 0
        assert_eq!(levels[&0][0], BTreeMap::from([("hp", 129.0)]));
        // 1-based upstream level 2 lands at index 1; index 0 stays empty
        assert!(levels[&5][0].is_empty());
        assert_eq!(
            levels[&5][1],
            BTreeMap::from([("hp", 1123.0), ("critRate_", 0.066)])
        );
    }
}
