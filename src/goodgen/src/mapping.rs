//! Static translation tables from upstream enumerated codes to GOOD keys
//!
//! Upstream identifies stats, equip slots and weapon classes with
//! FIGHT_PROP_* / EQUIP_* / WEAPON_* string codes. Downstream consumers speak
//! the GOOD vocabulary (`hp_`, `critRate_`, `flower`, `Claymore`, ...). These
//! tables are the only place the two vocabularies meet.
//!
//! A code absent from a table is not an error: callers either drop the field
//! (stat keys) or skip the whole record (slots), per their own contracts.

use phf::phf_map;

/// Upstream stat codes mapped to GOOD stat keys.
///
/// Percentage stats carry a trailing underscore in GOOD. The three BASE_*
/// codes used by growth-curve references are deliberately absent; base stats
/// are carried on the entity itself, not in scaling property lists.
pub static STAT_KEYS: phf::Map<&'static str, &'static str> = phf_map! {
    "FIGHT_PROP_HP" => "hp",
    "FIGHT_PROP_HP_PERCENT" => "hp_",
    "FIGHT_PROP_ATTACK" => "atk",
    "FIGHT_PROP_ATTACK_PERCENT" => "atk_",
    "FIGHT_PROP_DEFENSE" => "def",
    "FIGHT_PROP_DEFENSE_PERCENT" => "def_",
    "FIGHT_PROP_CRITICAL" => "critRate_",
    "FIGHT_PROP_CRITICAL_HURT" => "critDMG_",
    "FIGHT_PROP_ELEMENT_MASTERY" => "eleMas",
    "FIGHT_PROP_CHARGE_EFFICIENCY" => "enerRech_",
    "FIGHT_PROP_HEAL_ADD" => "heal_",
    "FIGHT_PROP_FIRE_ADD_HURT" => "pyro_dmg_",
    "FIGHT_PROP_ELEC_ADD_HURT" => "electro_dmg_",
    "FIGHT_PROP_WATER_ADD_HURT" => "hydro_dmg_",
    "FIGHT_PROP_WIND_ADD_HURT" => "anemo_dmg_",
    "FIGHT_PROP_ROCK_ADD_HURT" => "geo_dmg_",
    "FIGHT_PROP_GRASS_ADD_HURT" => "dendro_dmg_",
    "FIGHT_PROP_ICE_ADD_HURT" => "cryo_dmg_",
    "FIGHT_PROP_PHYSICAL_ADD_HURT" => "physical_dmg_",
};

/// Map an upstream stat code to its GOOD key
pub fn stat_key(upstream: &str) -> Option<&'static str> {
    STAT_KEYS.get(upstream).copied()
}

/// Map an upstream equip-slot code to its GOOD slot key
pub fn slot_key(upstream: &str) -> Option<&'static str> {
    match upstream {
        "EQUIP_BRACER" => Some("flower"),
        "EQUIP_NECKLACE" => Some("plume"),
        "EQUIP_SHOES" => Some("sands"),
        "EQUIP_RING" => Some("goblet"),
        "EQUIP_DRESS" => Some("circlet"),
        _ => None,
    }
}

/// All GOOD slot keys in canonical display order
pub const SLOT_KEYS: &[&str] = &["flower", "plume", "sands", "goblet", "circlet"];

/// Map an upstream weapon-class code to its GOOD weapon type key
pub fn weapon_type_key(upstream: &str) -> Option<&'static str> {
    match upstream {
        "WEAPON_SWORD_ONE_HAND" => Some("Sword"),
        "WEAPON_CLAYMORE" => Some("Claymore"),
        "WEAPON_POLE" => Some("Pole"),
        "WEAPON_BOW" => Some("Bow"),
        "WEAPON_CATALYST" => Some("Catalyst"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_key_known_codes() {
        assert_eq!(stat_key("FIGHT_PROP_HP"), Some("hp"));
        assert_eq!(stat_key("FIGHT_PROP_CRITICAL"), Some("critRate_"));
        assert_eq!(stat_key("FIGHT_PROP_PHYSICAL_ADD_HURT"), Some("physical_dmg_"));
    }

    #[test]
    fn test_stat_key_rejects_base_stats() {
        // Base stat codes live on the entity, never in scaling output
        assert_eq!(stat_key("FIGHT_PROP_BASE_HP"), None);
        assert_eq!(stat_key("FIGHT_PROP_BASE_ATTACK"), None);
        assert_eq!(stat_key("FIGHT_PROP_BASE_DEFENSE"), None);
    }

    #[test]
    fn test_slot_key_covers_all_slots() {
        let upstream = [
            "EQUIP_BRACER",
            "EQUIP_NECKLACE",
            "EQUIP_SHOES",
            "EQUIP_RING",
            "EQUIP_DRESS",
        ];
        let mapped: Vec<_> = upstream.iter().map(|s| slot_key(s).unwrap()).collect();
        assert_eq!(mapped, SLOT_KEYS);
    }

    #[test]
    fn test_unknown_codes_are_none() {
        assert_eq!(stat_key("FIGHT_PROP_UNKNOWN"), None);
        assert_eq!(slot_key("EQUIP_HAT"), None);
        assert_eq!(weapon_type_key("WEAPON_WHIP"), None);
    }
}
