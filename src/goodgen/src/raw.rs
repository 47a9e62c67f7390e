//! Raw upstream table model and the fetch contract
//!
//! Upstream documents are JSON arrays of loosely-typed objects. Nothing here
//! interprets them; this module only names the documents, preserves their
//! record order, and gives projectors typed accessors over individual fields.

use std::collections::HashMap;
use thiserror::Error;

use crate::textmap::TextMap;

/// One upstream record: an ordered JSON object
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to fetch upstream table {0}: {1}")]
    Fetch(&'static str, String),

    #[error("Failed to decode upstream table: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Upstream table {0} is not a JSON array of objects")]
    Shape(&'static str),

    #[error("No such table in source: {0}")]
    MissingTable(&'static str),
}

/// The upstream documents a full run consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamTable {
    Characters,
    CharacterCurves,
    CharacterPromotions,
    Weapons,
    WeaponCurves,
    WeaponPromotions,
    Artifacts,
    ArtifactLevels,
    ArtifactSets,
    ArtifactAffixes,
}

impl UpstreamTable {
    /// Upstream file name under the ExcelBinOutput directory
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Characters => "AvatarExcelConfigData.json",
            Self::CharacterCurves => "AvatarCurveExcelConfigData.json",
            Self::CharacterPromotions => "AvatarPromoteExcelConfigData.json",
            Self::Weapons => "WeaponExcelConfigData.json",
            Self::WeaponCurves => "WeaponCurveExcelConfigData.json",
            Self::WeaponPromotions => "WeaponPromoteExcelConfigData.json",
            Self::Artifacts => "ReliquaryExcelConfigData.json",
            Self::ArtifactLevels => "ReliquaryLevelExcelConfigData.json",
            Self::ArtifactSets => "ReliquarySetExcelConfigData.json",
            Self::ArtifactAffixes => "EquipAffixExcelConfigData.json",
        }
    }
}

/// An upstream table with its record order preserved.
///
/// Order matters: duplicate artifact pieces resolve by first-seen record.
#[derive(Debug, Clone, Default)]
pub struct RawTable(Vec<RawRecord>);

impl RawTable {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self(records)
    }

    /// Parse a table from a JSON document (must be an array of objects)
    pub fn from_value(
        table: UpstreamTable,
        value: serde_json::Value,
    ) -> Result<Self, TableError> {
        let items = match value {
            serde_json::Value::Array(items) => items,
            _ => return Err(TableError::Shape(table.file_name())),
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match item {
                serde_json::Value::Object(map) => records.push(map),
                _ => return Err(TableError::Shape(table.file_name())),
            }
        }
        Ok(Self(records))
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a RawTable {
    type Item = &'a RawRecord;
    type IntoIter = std::slice::Iter<'a, RawRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Where raw tables come from.
///
/// The engine treats a fetch failure as fatal for the whole run; there is no
/// per-table retry or partial output.
pub trait TableSource {
    fn fetch_table(&self, table: UpstreamTable) -> Result<RawTable, TableError>;
    fn fetch_text_map(&self) -> Result<TextMap, TableError>;
}

/// In-memory source for tests and fixture-driven runs
#[derive(Debug, Default)]
pub struct MemorySource {
    tables: HashMap<UpstreamTable, RawTable>,
    text_map: TextMap,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: UpstreamTable, value: serde_json::Value) -> Self {
        let parsed = RawTable::from_value(table, value).expect("fixture table must be an array");
        self.tables.insert(table, parsed);
        self
    }

    pub fn with_text_map(mut self, text_map: TextMap) -> Self {
        self.text_map = text_map;
        self
    }
}

impl TableSource for MemorySource {
    fn fetch_table(&self, table: UpstreamTable) -> Result<RawTable, TableError> {
        self.tables
            .get(&table)
            .cloned()
            .ok_or(TableError::MissingTable(table.file_name()))
    }

    fn fetch_text_map(&self) -> Result<TextMap, TableError> {
        Ok(self.text_map.clone())
    }
}

/// First record whose field equals the given value, in table order
pub fn find<'a>(
    records: &'a [serde_json::Value],
    key: &str,
    value: &str,
) -> Option<&'a serde_json::Value> {
    records
        .iter()
        .find(|rec| rec.get(key).and_then(|v| v.as_str()) == Some(value))
}

/// Integer field accessor (upstream ids are plain JSON numbers)
pub fn u32_field(record: &RawRecord, key: &str) -> Option<u32> {
    record.get(key)?.as_u64()?.try_into().ok()
}

/// Float field accessor (accepts integral JSON numbers too)
pub fn f64_field(record: &RawRecord, key: &str) -> Option<f64> {
    record.get(key)?.as_f64()
}

/// String field accessor
pub fn str_field<'a>(record: &'a RawRecord, key: &str) -> Option<&'a str> {
    record.get(key)?.as_str()
}

/// Text-map key accessor: upstream hashes appear as numbers or strings
pub fn text_key_field(record: &RawRecord, key: &str) -> Option<String> {
    match record.get(key)? {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_rejects_non_arrays() {
        let err = RawTable::from_value(UpstreamTable::Characters, json!({"id": 1}));
        assert!(matches!(err, Err(TableError::Shape(_))));
    }

    #[test]
    fn test_from_value_preserves_order() {
        let table = RawTable::from_value(
            UpstreamTable::Artifacts,
            json!([{"id": 3}, {"id": 1}, {"id": 2}]),
        )
        .unwrap();
        let ids: Vec<_> = table.iter().map(|r| u32_field(r, "id").unwrap()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_find_returns_first_match() {
        let props = vec![
            json!({"propType": "FIGHT_PROP_BASE_HP", "value": 10.0}),
            json!({"propType": "FIGHT_PROP_BASE_HP", "value": 99.0}),
        ];
        let hit = find(&props, "propType", "FIGHT_PROP_BASE_HP").unwrap();
        assert_eq!(hit["value"].as_f64(), Some(10.0));
        assert!(find(&props, "propType", "FIGHT_PROP_BASE_ATTACK").is_none());
    }

    #[test]
    fn test_text_key_field_accepts_numbers_and_strings() {
        let rec: RawRecord = serde_json::from_value(json!({
            "numeric": 1060721874u64,
            "stringy": "1060721874",
            "bad": [1, 2],
        }))
        .unwrap();
        assert_eq!(text_key_field(&rec, "numeric").as_deref(), Some("1060721874"));
        assert_eq!(text_key_field(&rec, "stringy").as_deref(), Some("1060721874"));
        assert_eq!(text_key_field(&rec, "bad"), None);
    }

    #[test]
    fn test_memory_source_missing_table_is_fatal() {
        let source = MemorySource::new();
        let err = source.fetch_table(UpstreamTable::Weapons);
        assert!(matches!(err, Err(TableError::MissingTable(_))));
    }
}
