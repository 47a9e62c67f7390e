//! Generate command: fetch, normalize, resolve, and write entity bundles
//!
//! One bundle per entity: a directory holding `data.json` (the projected
//! entity plus its resolved scaling matrices), a front-end `index.tsx` stub,
//! and the entity's icon unless images are disabled. Each kind also gets an
//! aggregating `index.tsx` so the front-end can import the whole roster.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use goodgen::context::RunContext;
use goodgen::mapping::SLOT_KEYS;
use goodgen::project::{
    project_artifacts, project_characters, project_weapons, Character, Weapon,
};
use goodgen::scaling::{
    resolve_character_scaling, resolve_weapon_scaling, CharacterScaling, WeaponScaling,
};
use goodgen::sets::{assemble_sets, resolve_artifact_levels, resolve_set_names};

use crate::config::Config;
use crate::fetch::{download_icon, HttpSource};

pub struct GenerateOptions {
    pub output: PathBuf,
    pub characters: bool,
    pub weapons: bool,
    pub artifacts: bool,
    pub no_images: bool,
    pub roster: Option<PathBuf>,
}

/// Handle `goodgen generate`
pub fn handle(opts: GenerateOptions) -> Result<()> {
    let config = Config::load()?;
    let source = HttpSource::new(config.data_url());

    println!("Fetching upstream tables from {}", config.data_url());
    let ctx = RunContext::load(&source).context("Upstream table fetch failed, aborting run")?;

    let roster_path = opts
        .roster
        .clone()
        .or_else(|| config.frontend_dir().map(|d| d.join("src/constants.json")));
    let roster = match roster_path {
        Some(path) if path.exists() => Some(
            Roster::load(&path)
                .with_context(|| format!("Failed to read roster from {}", path.display()))?,
        ),
        _ => None,
    };

    let images = if opts.no_images {
        None
    } else {
        Some(config.textures_url().to_string())
    };

    let all = !(opts.characters || opts.weapons || opts.artifacts);

    if all || opts.characters {
        println!("Generating character data");
        generate_characters(&ctx, &opts.output, roster.as_ref(), images.as_deref())?;
    }
    if all || opts.weapons {
        println!("Generating weapon data");
        generate_weapons(&ctx, &opts.output, roster.as_ref(), images.as_deref())?;
    }
    if all || opts.artifacts {
        println!("Generating artifact data");
        generate_artifacts(&ctx, &opts.output, roster.as_ref(), images.as_deref())?;
    }

    Ok(())
}

// ============================================================================
// Roster filter
// ============================================================================

/// Front-end roster (constants.json): which entities the front-end ships.
/// When no roster is available, everything resolvable is emitted.
#[derive(Debug, Default, Deserialize)]
pub struct Roster {
    #[serde(default, rename = "Characters")]
    characters: Vec<String>,
    #[serde(default, rename = "ArtifactSetNames")]
    artifact_sets: serde_json::Map<String, serde_json::Value>,
    #[serde(default, rename = "WeaponsSword")]
    swords: Vec<String>,
    #[serde(default, rename = "WeaponsClaymore")]
    claymores: Vec<String>,
    #[serde(default, rename = "WeaponsPolearm")]
    polearms: Vec<String>,
    #[serde(default, rename = "WeaponsBow")]
    bows: Vec<String>,
    #[serde(default, rename = "WeaponsCatalyst")]
    catalysts: Vec<String>,
}

impl Roster {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn allows_character(&self, ident: &str) -> bool {
        self.characters.iter().any(|c| c == ident)
    }

    fn allows_weapon(&self, ident: &str) -> bool {
        [
            &self.swords,
            &self.claymores,
            &self.polearms,
            &self.bows,
            &self.catalysts,
        ]
        .iter()
        .any(|list| list.iter().any(|w| w == ident))
    }

    fn allows_set(&self, ident: &str) -> bool {
        self.artifact_sets.contains_key(ident)
    }
}

/// Display name to front-end identifier: keep ASCII alphanumerics only
/// ("Dragon's Bane" becomes "DragonsBane")
pub fn ident(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

// ============================================================================
// Per-kind generation
// ============================================================================

#[derive(Serialize)]
struct CharacterBundle<'a> {
    name: &'a str,
    #[serde(flatten)]
    character: &'a Character,
    scalings: &'a CharacterScaling,
}

fn generate_characters(
    ctx: &RunContext,
    output: &Path,
    roster: Option<&Roster>,
    textures_url: Option<&str>,
) -> Result<()> {
    let characters = project_characters(&ctx.characters, ctx.schema);
    let scalings = resolve_character_scaling(
        &characters,
        &ctx.character_curves,
        &ctx.character_promotes,
        ctx.schema,
    );

    let base_dir = output.join("characters");
    let mut emitted = Vec::new();

    for character in &characters {
        let Some(name) = ctx.text_map.resolve(&character.text_map_key) else {
            continue;
        };
        let ident = ident(name);
        if roster.is_some_and(|r| !r.allows_character(&ident)) {
            continue;
        }
        let Some(scaling) = scalings.get(&character.id) else {
            continue;
        };

        let dir = base_dir.join(&ident);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        write_pretty_json(
            &dir.join("data.json"),
            &CharacterBundle {
                name,
                character,
                scalings: scaling,
            },
        )?;
        fs::write(
            dir.join("index.tsx"),
            entity_index_stub("avatar", "./avatar.png"),
        )?;

        if let Some(base) = textures_url {
            let found = download_icon(
                &format!("{base}/character_icon"),
                &character.icon,
                &dir.join("avatar.png"),
            )?;
            if !found {
                println!("  no texture for {ident} ({})", character.icon);
            }
        }

        println!("  characters/{ident}");
        emitted.push(ident);
    }

    write_named_exports_index(&base_dir, &emitted)?;
    println!("  {} characters written", emitted.len());
    Ok(())
}

#[derive(Serialize)]
struct WeaponBundle<'a> {
    name: &'a str,
    #[serde(flatten)]
    weapon: &'a Weapon,
    scalings: &'a WeaponScaling,
}

fn generate_weapons(
    ctx: &RunContext,
    output: &Path,
    roster: Option<&Roster>,
    textures_url: Option<&str>,
) -> Result<()> {
    let weapons = project_weapons(&ctx.weapons, ctx.schema);
    let scalings =
        resolve_weapon_scaling(&weapons, &ctx.weapon_curves, &ctx.weapon_promotes, ctx.schema);

    let base_dir = output.join("weapons");
    let mut by_type: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut total = 0usize;

    for weapon in &weapons {
        let Some(name) = ctx.text_map.resolve(&weapon.text_map_key) else {
            continue;
        };
        let ident = ident(name);
        if roster.is_some_and(|r| !r.allows_weapon(&ident)) {
            continue;
        }
        let Some(scaling) = scalings.get(&weapon.id) else {
            continue;
        };

        let dir = base_dir.join(&weapon.weapon_type).join(&ident);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        write_pretty_json(
            &dir.join("data.json"),
            &WeaponBundle {
                name,
                weapon,
                scalings: scaling,
            },
        )?;
        fs::write(
            dir.join("index.tsx"),
            entity_index_stub("icon", "./icon.png"),
        )?;

        if let Some(base) = textures_url {
            let found = download_icon(
                &format!("{base}/equip"),
                &weapon.icon,
                &dir.join("icon.png"),
            )?;
            if !found {
                println!("  no texture for {ident} ({})", weapon.icon);
            }
        }

        println!("  weapons/{}/{ident}", weapon.weapon_type);
        by_type
            .entry(weapon.weapon_type.clone())
            .or_default()
            .push(ident);
        total += 1;
    }

    for (weapon_type, idents) in &by_type {
        write_default_export_index(&base_dir.join(weapon_type), "weapons", idents)?;
    }

    println!("  {total} weapons written");
    Ok(())
}

fn generate_artifacts(
    ctx: &RunContext,
    output: &Path,
    roster: Option<&Roster>,
    textures_url: Option<&str>,
) -> Result<()> {
    let pieces = project_artifacts(&ctx.artifacts, ctx.schema);
    let names = resolve_set_names(
        &ctx.artifact_sets,
        &ctx.artifact_affixes,
        &ctx.text_map,
        ctx.schema,
    );
    let sets = assemble_sets(names, pieces);
    let levels = resolve_artifact_levels(&ctx.artifact_levels, ctx.schema);

    let base_dir = output.join("artifacts");
    fs::create_dir_all(&base_dir)
        .with_context(|| format!("Failed to create {}", base_dir.display()))?;

    // The rank-by-level main-stat table is shared by every set
    write_pretty_json(&base_dir.join("levels.json"), &levels)?;
    println!("  artifacts/levels.json - {} ranks", levels.len());

    let mut emitted = Vec::new();
    for set in sets.values() {
        let ident = ident(&set.name);
        if roster.is_some_and(|r| !r.allows_set(&ident)) {
            continue;
        }

        let dir = base_dir.join(&ident);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        write_pretty_json(&dir.join("data.json"), set)?;

        let slots: Vec<&str> = SLOT_KEYS
            .iter()
            .copied()
            .filter(|slot| set.pieces.contains_key(*slot))
            .collect();
        fs::write(dir.join("index.tsx"), set_index_stub(&slots))?;

        if let Some(base) = textures_url {
            for (slot, piece) in &set.pieces {
                let found = download_icon(
                    &format!("{base}/equip"),
                    &piece.icon,
                    &dir.join(format!("{slot}.png")),
                )?;
                if !found {
                    println!("  no texture for {ident}/{slot} ({})", piece.icon);
                }
            }
        }

        println!("  artifacts/{ident}");
        emitted.push(ident);
    }

    write_named_exports_index(&base_dir, &emitted)?;
    println!("  {} artifact sets written", emitted.len());
    Ok(())
}

// ============================================================================
// Output stubs
// ============================================================================

fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Per-entity stub: one image import plus the data bundle
fn entity_index_stub(binding: &str, image_path: &str) -> String {
    format!(
        "import {binding} from \"{image_path}\";\n\
         import data from \"./data.json\";\n\
         const toExport = {{ {binding}, data }};\n\
         export default toExport;\n"
    )
}

/// Per-set stub: one import per present slot plus the data bundle
fn set_index_stub(slots: &[&str]) -> String {
    let mut stub = String::new();
    for slot in slots {
        stub.push_str(&format!("import {slot} from \"./{slot}.png\";\n"));
    }
    stub.push_str("import data from \"./data.json\";\n");
    let mut bindings: Vec<&str> = slots.to_vec();
    bindings.push("data");
    stub.push_str(&format!("const toExport = {{ {} }};\n", bindings.join(", ")));
    stub.push_str("export default toExport;\n");
    stub
}

/// Kind-level index with named exports (characters, artifact sets)
fn write_named_exports_index(dir: &Path, idents: &[String]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let mut contents = String::new();
    for ident in idents {
        contents.push_str(&format!("import {ident} from './{ident}';\n"));
    }
    contents.push_str(&format!("export {{ {} }};\n", idents.join(", ")));
    fs::write(dir.join("index.tsx"), contents)
        .with_context(|| format!("Failed to write index in {}", dir.display()))?;
    Ok(())
}

/// Kind-level index with a default export map (weapon type directories)
fn write_default_export_index(dir: &Path, binding: &str, idents: &[String]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let mut contents = String::new();
    for ident in idents {
        contents.push_str(&format!("import {ident} from './{ident}';\n"));
    }
    contents.push_str(&format!(
        "const {binding} = {{ {} }};\nexport default {binding};\n",
        idents.join(", ")
    ));
    fs::write(dir.join("index.tsx"), contents)
        .with_context(|| format!("Failed to write index in {}", dir.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ident_strips_punctuation_and_spaces() {
        assert_eq!(ident("Hu Tao"), "HuTao");
        assert_eq!(ident("Dragon's Bane"), "DragonsBane");
        assert_eq!(ident("Wavebreaker's Fin"), "WavebreakersFin");
    }

    #[test]
    fn test_roster_filters_by_kind() {
        let roster: Roster = serde_json::from_value(json!({
            "Characters": ["Amber"],
            "WeaponsPolearm": ["DragonsBane"],
            "ArtifactSetNames": {"Berserker": "Berserker"},
        }))
        .unwrap();
        assert!(roster.allows_character("Amber"));
        assert!(!roster.allows_character("Xiao"));
        assert!(roster.allows_weapon("DragonsBane"));
        assert!(!roster.allows_weapon("Amber"));
        assert!(roster.allows_set("Berserker"));
        assert!(!roster.allows_set("Instructor"));
    }

    #[test]
    fn test_entity_index_stub_shape() {
        let stub = entity_index_stub("avatar", "./avatar.png");
        assert!(stub.contains("import avatar from \"./avatar.png\";"));
        assert!(stub.contains("const toExport = { avatar, data };"));
        assert!(stub.ends_with("export default toExport;\n"));
    }

    #[test]
    fn test_set_index_stub_lists_present_slots_only() {
        let stub = set_index_stub(&["flower", "plume"]);
        assert!(stub.contains("import flower from \"./flower.png\";"));
        assert!(!stub.contains("circlet"));
        assert!(stub.contains("const toExport = { flower, plume, data };"));
    }

    #[test]
    fn test_kind_index_files() {
        let dir = tempfile::tempdir().unwrap();

        let names = vec!["Amber".to_string(), "HuTao".to_string()];
        write_named_exports_index(dir.path(), &names).unwrap();
        let index = fs::read_to_string(dir.path().join("index.tsx")).unwrap();
        assert!(index.contains("import Amber from './Amber';"));
        assert!(index.contains("export { Amber, HuTao };"));

        write_default_export_index(&dir.path().join("Pole"), "weapons", &names).unwrap();
        let index = fs::read_to_string(dir.path().join("Pole/index.tsx")).unwrap();
        assert!(index.contains("const weapons = { Amber, HuTao };"));
        assert!(index.contains("export default weapons;"));
    }
}
