//! Import and export of [Settings] as JSON text. The exported text is the same format that is
//! persisted, so exports from older versions can be imported directly.

use anyhow::{Context, Result};
use tracing::{info, instrument};

use super::{store::SettingsStore, Settings};

pub fn export_settings(settings: &Settings) -> Result<String> {
    Ok(serde_json::to_string_pretty(settings)?)
}

/// Parses an import payload. Blank input means there is nothing to import and yields `None`.
pub fn parse_import(raw: &str) -> Result<Option<Settings>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let settings = serde_json::from_str::<Settings>(raw)
        .context("Payload doesn't match { schedule, targets } structure")?;
    Ok(Some(settings))
}

/// Replaces stored settings with the payload. The store is only touched once the whole payload
/// was parsed, a broken payload leaves it as it was.
#[instrument(skip_all)]
pub async fn import_into(store: &impl SettingsStore, raw: &str) -> Result<Option<Settings>> {
    let Some(settings) = parse_import(raw)? else {
        info!("Empty payload, nothing imported");
        return Ok(None);
    };
    store.save(&settings).await?;
    info!("Imported settings");
    Ok(Some(settings))
}
