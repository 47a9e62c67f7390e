//! Per-run context: every upstream table fetched once, indexed once
//!
//! One [`RunContext`] replaces module-level caches: it is built at the start
//! of a run from a [`TableSource`], all lookup indices are constructed before
//! any entity processing begins, and nothing mutates afterwards. A fetch
//! failure aborts construction; there is no partial context.

use crate::raw::{RawTable, TableError, TableSource, UpstreamTable};
use crate::scaling::{CurveTable, PromoteTable};
use crate::schema::{self, UpstreamSchema};
use crate::textmap::TextMap;

/// All upstream data one generation run needs, read-only once built
pub struct RunContext {
    pub schema: &'static UpstreamSchema,
    pub text_map: TextMap,

    pub characters: RawTable,
    pub weapons: RawTable,
    pub artifacts: RawTable,
    pub artifact_sets: RawTable,
    pub artifact_affixes: RawTable,
    pub artifact_levels: RawTable,

    pub character_curves: CurveTable,
    pub character_promotes: PromoteTable,
    pub weapon_curves: CurveTable,
    pub weapon_promotes: PromoteTable,
}

impl RunContext {
    /// Fetch and index every table against the current upstream schema
    pub fn load(source: &impl TableSource) -> Result<Self, TableError> {
        Self::load_with_schema(source, schema::CURRENT)
    }

    /// Fetch and index every table against a specific snapshot schema
    pub fn load_with_schema(
        source: &impl TableSource,
        s: &'static UpstreamSchema,
    ) -> Result<Self, TableError> {
        let character_curves =
            CurveTable::from_raw(&source.fetch_table(UpstreamTable::CharacterCurves)?, s);
        let character_promotes = PromoteTable::from_raw(
            &source.fetch_table(UpstreamTable::CharacterPromotions)?,
            s.char_promote_group,
            s,
        );
        let weapon_curves =
            CurveTable::from_raw(&source.fetch_table(UpstreamTable::WeaponCurves)?, s);
        let weapon_promotes = PromoteTable::from_raw(
            &source.fetch_table(UpstreamTable::WeaponPromotions)?,
            s.weapon_promote_group,
            s,
        );

        Ok(RunContext {
            schema: s,
            text_map: source.fetch_text_map()?,
            characters: source.fetch_table(UpstreamTable::Characters)?,
            weapons: source.fetch_table(UpstreamTable::Weapons)?,
            artifacts: source.fetch_table(UpstreamTable::Artifacts)?,
            artifact_sets: source.fetch_table(UpstreamTable::ArtifactSets)?,
            artifact_affixes: source.fetch_table(UpstreamTable::ArtifactAffixes)?,
            artifact_levels: source.fetch_table(UpstreamTable::ArtifactLevels)?,
            character_curves,
            character_promotes,
            weapon_curves,
            weapon_promotes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{project_artifacts, project_characters, project_weapons};
    use crate::raw::MemorySource;
    use crate::scaling::{
        resolve_character_scaling, resolve_weapon_scaling, LEVEL_COUNT, TIER_COUNT,
    };
    use crate::sets::{assemble_sets, resolve_set_names};
    use serde_json::json;

    #[test]
    fn test_missing_table_aborts_load() {
        // Everything but the weapon tables present
        let source = MemorySource::new()
            .with_table(UpstreamTable::Characters, json!([]))
            .with_table(UpstreamTable::CharacterCurves, json!([]))
            .with_table(UpstreamTable::CharacterPromotions, json!([]))
            .with_table(UpstreamTable::Artifacts, json!([]))
            .with_table(UpstreamTable::ArtifactSets, json!([]))
            .with_table(UpstreamTable::ArtifactAffixes, json!([]))
            .with_table(UpstreamTable::ArtifactLevels, json!([]));

        let err = RunContext::load(&source);
        assert!(matches!(err, Err(TableError::MissingTable(_))));
    }

    #[test]
    fn test_load_builds_all_indices() {
        let source = MemorySource::new()
            .with_table(UpstreamTable::Characters, json!([]))
            .with_table(
                UpstreamTable::CharacterCurves,
                json!([{"curveInfos": [{"type": "GROW_CURVE_HP_S4", "value": 1.0}]}]),
            )
            .with_table(UpstreamTable::CharacterPromotions, json!([]))
            .with_table(UpstreamTable::Weapons, json!([]))
            .with_table(UpstreamTable::WeaponCurves, json!([]))
            .with_table(UpstreamTable::WeaponPromotions, json!([]))
            .with_table(UpstreamTable::Artifacts, json!([]))
            .with_table(UpstreamTable::ArtifactSets, json!([]))
            .with_table(UpstreamTable::ArtifactAffixes, json!([]))
            .with_table(UpstreamTable::ArtifactLevels, json!([]));

        let ctx = RunContext::load(&source).unwrap();
        assert_eq!(ctx.character_curves.level_rows(), 1);
        assert_eq!(
            ctx.character_curves.multiplier(0, "GROW_CURVE_HP_S4"),
            Some(1.0)
        );
        assert!(ctx.characters.is_empty());
    }

    fn snapshot_source() -> MemorySource {
        let curve_rows: Vec<serde_json::Value> = (0..100)
            .map(|lvl| {
                json!({"curveInfos": [
                    {"type": "GROW_CURVE_HP_S4", "value": 1.0 + lvl as f64 * 0.05},
                    {"type": "GROW_CURVE_ATTACK_S4", "value": 1.0 + lvl as f64 * 0.07},
                ]})
            })
            .collect();

        let text_map: TextMap = [
            ("100".to_string(), "Amber".to_string()),
            ("200".to_string(), "Dragon's Bane".to_string()),
            ("300".to_string(), "Berserker".to_string()),
        ]
        .into_iter()
        .collect();

        MemorySource::new()
            .with_text_map(text_map)
            .with_table(
                UpstreamTable::Characters,
                json!([{
                    "id": 10000021,
                    "avatarPromoteId": 21,
                    "iconName": "UI_AvatarIcon_Ambor",
                    "nameTextMapHash": 100,
                    "hpBase": 793.3,
                    "attackBase": 18.7,
                    "defenseBase": 50.4,
                    "propGrowCurves": [
                        {"type": "FIGHT_PROP_BASE_HP", "growCurve": "GROW_CURVE_HP_S4"},
                        {"type": "FIGHT_PROP_BASE_ATTACK", "growCurve": "GROW_CURVE_ATTACK_S4"},
                        {"type": "FIGHT_PROP_BASE_DEFENSE", "growCurve": "GROW_CURVE_HP_S4"},
                    ],
                }]),
            )
            .with_table(UpstreamTable::CharacterCurves, json!(curve_rows.clone()))
            .with_table(
                UpstreamTable::CharacterPromotions,
                json!([
                    {"avatarPromoteId": 21, "addProps": []},
                    {"avatarPromoteId": 21, "promoteLevel": 1, "addProps": [
                        {"propType": "FIGHT_PROP_BASE_HP", "value": 300.0},
                        {"propType": "FIGHT_PROP_BASE_ATTACK", "value": 7.0},
                        {"propType": "FIGHT_PROP_BASE_DEFENSE", "value": 19.0},
                    ]},
                ]),
            )
            .with_table(
                UpstreamTable::Weapons,
                json!([{
                    "id": 13401,
                    "weaponPromoteId": 13401,
                    "icon": "UI_EquipIcon_Pole_Stardust",
                    "nameTextMapHash": 200,
                    "weaponType": "WEAPON_POLE",
                    "rankLevel": 4,
                    "weaponProp": [
                        {"propType": "FIGHT_PROP_BASE_ATTACK", "initValue": 41.1, "type": "GROW_CURVE_ATTACK_S4"},
                        {"propType": "FIGHT_PROP_ELEMENT_MASTERY", "initValue": 48.0, "type": "GROW_CURVE_HP_S4"},
                    ],
                }]),
            )
            .with_table(UpstreamTable::WeaponCurves, json!(curve_rows))
            .with_table(
                UpstreamTable::WeaponPromotions,
                json!([
                    {"weaponPromoteId": 13401, "promoteLevel": 1, "addProps": [
                        {"propType": "FIGHT_PROP_BASE_ATTACK", "value": 25.9},
                    ]},
                ]),
            )
            .with_table(
                UpstreamTable::Artifacts,
                json!([
                    {"id": 1, "setId": 10005, "icon": "UI_RelicIcon_10005_4",
                     "nameTextMapHash": 400, "equipType": "EQUIP_BRACER", "rankLevel": 4},
                    {"id": 2, "setId": 10005, "icon": "UI_RelicIcon_10005_4b",
                     "nameTextMapHash": 401, "equipType": "EQUIP_BRACER", "rankLevel": 4},
                ]),
            )
            .with_table(
                UpstreamTable::ArtifactSets,
                json!([{"setId": 10005, "equipAffixId": 210500}]),
            )
            .with_table(
                UpstreamTable::ArtifactAffixes,
                json!([{"id": 210500, "nameTextMapHash": 300}]),
            )
            .with_table(UpstreamTable::ArtifactLevels, json!([]))
    }

    #[test]
    fn test_full_snapshot_resolves_end_to_end() {
        let source = snapshot_source();
        let ctx = RunContext::load(&source).unwrap();

        let characters = project_characters(&ctx.characters, ctx.schema);
        let char_scalings = resolve_character_scaling(
            &characters,
            &ctx.character_curves,
            &ctx.character_promotes,
            ctx.schema,
        );
        let scaling = &char_scalings[&10000021];
        assert_eq!(scaling.level_multipliers.len(), LEVEL_COUNT);
        assert_eq!(scaling.ascension_values.len(), TIER_COUNT);
        // Tier 2 has no promotion record: zero-filled for characters
        assert_eq!(scaling.ascension_values[2].hp, 0.0);
        assert_eq!(ctx.text_map.resolve(&characters[0].text_map_key), Some("Amber"));

        let weapons = project_weapons(&ctx.weapons, ctx.schema);
        let weapon_scalings = resolve_weapon_scaling(
            &weapons,
            &ctx.weapon_curves,
            &ctx.weapon_promotes,
            ctx.schema,
        );
        let scaling = &weapon_scalings[&13401];
        assert_eq!(scaling.stat_multipliers["base_atk"].len(), LEVEL_COUNT);
        assert_eq!(scaling.stat_multipliers["eleMas"].len(), LEVEL_COUNT);
        // Tier 2 has no promotion record: omitted for weapons
        assert_eq!(scaling.ascension_base_atk.len(), 1);
        assert_eq!(scaling.ascension_base_atk[&1], 25.9);

        let pieces = project_artifacts(&ctx.artifacts, ctx.schema);
        let names = resolve_set_names(
            &ctx.artifact_sets,
            &ctx.artifact_affixes,
            &ctx.text_map,
            ctx.schema,
        );
        let sets = assemble_sets(names, pieces);
        // Duplicate flower pieces collapse to the first upstream record
        assert_eq!(sets[&10005].name, "Berserker");
        assert_eq!(sets[&10005].pieces.len(), 1);
        assert_eq!(sets[&10005].pieces["flower"].id, 1);
    }

    #[test]
    fn test_two_runs_serialize_identically() {
        let source = snapshot_source();

        let resolve = || {
            let ctx = RunContext::load(&source).unwrap();
            let characters = project_characters(&ctx.characters, ctx.schema);
            let scalings = resolve_character_scaling(
                &characters,
                &ctx.character_curves,
                &ctx.character_promotes,
                ctx.schema,
            );
            serde_json::to_vec(&scalings).unwrap()
        };

        assert_eq!(resolve(), resolve());
    }
}
