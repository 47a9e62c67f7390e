//! HTTP collaborators: upstream table fetch and icon download
//!
//! `HttpSource` is the production [`TableSource`]; a failed or malformed
//! fetch is fatal to the run. Icon downloads are best-effort: a missing
//! texture skips the image, never the entity.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use goodgen::raw::{RawTable, TableError, TableSource, UpstreamTable};
use goodgen::textmap::TextMap;

/// Upstream mirror speaking the ExcelBinOutput directory layout
pub struct HttpSource {
    base: String,
}

impl HttpSource {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { base }
    }
}

impl TableSource for HttpSource {
    fn fetch_table(&self, table: UpstreamTable) -> Result<RawTable, TableError> {
        let url = format!("{}/ExcelBinOutput/{}", self.base, table.file_name());
        let value: serde_json::Value = ureq::get(&url)
            .call()
            .map_err(|e| TableError::Fetch(table.file_name(), e.to_string()))?
            .into_json()
            .map_err(|e| TableError::Fetch(table.file_name(), e.to_string()))?;
        RawTable::from_value(table, value)
    }

    fn fetch_text_map(&self) -> Result<TextMap, TableError> {
        let url = format!("{}/TextMap/TextMapEN.json", self.base);
        let entries: HashMap<String, String> = ureq::get(&url)
            .call()
            .map_err(|e| TableError::Fetch("TextMapEN.json", e.to_string()))?
            .into_json()
            .map_err(|e| TableError::Fetch("TextMapEN.json", e.to_string()))?;
        Ok(TextMap::new(entries))
    }
}

// Icons larger than this indicate a CDN error page, not a texture
const MAX_ICON_BYTES: u64 = 8 * 1024 * 1024;

/// Download one icon into `dest`. Returns `Ok(false)` when the texture does
/// not exist upstream; only transport and filesystem failures are errors.
pub fn download_icon(textures_base: &str, icon: &str, dest: &Path) -> Result<bool> {
    let url = format!(
        "{}/{}.png",
        textures_base.trim_end_matches('/'),
        icon
    );

    let response = match ureq::get(&url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(404, _)) => return Ok(false),
        Err(e) => return Err(e).with_context(|| format!("Failed to download {url}")),
    };

    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_ICON_BYTES)
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read {url}"))?;

    fs::write(dest, bytes).with_context(|| format!("Failed to write {}", dest.display()))?;
    Ok(true)
}
