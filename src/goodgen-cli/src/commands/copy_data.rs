//! Copy-data command: sync generated bundles into the front-end checkout
//!
//! Replaces each entity directory under `<frontend>/src/data/<kind>` with its
//! freshly generated counterpart. Directories are removed before copying so
//! stale files from earlier generations never linger.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::Config;

const KINDS: &[&str] = &["characters", "weapons", "artifacts"];

/// Handle `goodgen copy-data`
pub fn handle(output: &Path, frontend: Option<&Path>) -> Result<()> {
    let config = Config::load()?;
    let frontend = match frontend.or_else(|| config.frontend_dir()) {
        Some(dir) => dir.to_path_buf(),
        None => bail!("No front-end directory configured; run `goodgen configure --frontend ...`"),
    };

    let data_dir = frontend.join("src/data");
    for kind in KINDS {
        let source = output.join(kind);
        if !source.exists() {
            println!("Skipping {kind} (nothing generated)");
            continue;
        }
        println!("Copying {kind} data");
        copy_dir_contents(&source, &data_dir.join(kind))?;
    }

    Ok(())
}

/// Copy every child of `source` into `dest`, replacing what was there
fn copy_dir_contents(source: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;

    for entry in
        fs::read_dir(source).with_context(|| format!("Failed to read {}", source.display()))?
    {
        let entry = entry?;
        let target = dest.join(entry.file_name());

        if entry.path().is_dir() {
            if target.exists() {
                fs::remove_dir_all(&target)
                    .with_context(|| format!("Failed to remove {}", target.display()))?;
            }
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy to {}", target.display()))?;
        }
    }

    Ok(())
}

fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy to {}", target.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_replaces_stale_entity_dirs() {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();

        fs::create_dir_all(source.path().join("Amber")).unwrap();
        fs::write(source.path().join("Amber/data.json"), "{}").unwrap();
        fs::write(source.path().join("index.tsx"), "export {};").unwrap();

        // Stale file from an earlier generation
        fs::create_dir_all(dest.path().join("Amber")).unwrap();
        fs::write(dest.path().join("Amber/old.png"), "x").unwrap();

        copy_dir_contents(source.path(), dest.path()).unwrap();

        assert!(dest.path().join("Amber/data.json").exists());
        assert!(!dest.path().join("Amber/old.png").exists());
        assert!(dest.path().join("index.tsx").exists());
    }

    #[test]
    fn test_copy_is_recursive() {
        let source = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();

        fs::create_dir_all(source.path().join("Pole/DragonsBane")).unwrap();
        fs::write(source.path().join("Pole/DragonsBane/data.json"), "{}").unwrap();

        copy_dir_contents(source.path(), dest.path()).unwrap();
        assert!(dest.path().join("Pole/DragonsBane/data.json").exists());
    }
}
