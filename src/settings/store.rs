use std::{
    future::Future,
    ops::Deref,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::fs::operations::{read_file_locked, write_file_atomic};

use super::{Settings, Theme};

pub const SETTINGS_FILE: &str = "settings.json";
pub const THEME_FILE: &str = "theme";

/// Interface for abstracting where [Settings] live.
pub trait SettingsStore {
    /// Returns stored settings, or the defaults if nothing usable was stored yet.
    fn load(&self) -> impl Future<Output = Result<Settings>>;

    fn save(&self, settings: &Settings) -> impl Future<Output = Result<()>>;
}

pub trait ThemeStore {
    /// Returns the stored theme, [Theme::Dark] if nothing usable was stored yet.
    fn load_theme(&self) -> impl Future<Output = Result<Theme>>;

    fn save_theme(&self, theme: Theme) -> impl Future<Output = Result<()>>;
}

impl<T: Deref> SettingsStore for T
where
    T::Target: SettingsStore,
{
    fn load(&self) -> impl Future<Output = Result<Settings>> {
        self.deref().load()
    }

    fn save(&self, settings: &Settings) -> impl Future<Output = Result<()>> {
        self.deref().save(settings)
    }
}

/// Stores settings as JSON files inside the application directory.
pub struct FileSettingsStore {
    settings_path: PathBuf,
    theme_path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(app_dir: &Path) -> Self {
        Self {
            settings_path: app_dir.join(SETTINGS_FILE),
            theme_path: app_dir.join(THEME_FILE),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }
}

impl SettingsStore for FileSettingsStore {
    async fn load(&self) -> Result<Settings> {
        let path = &self.settings_path;
        let Some(raw) = read_file_locked(path)
            .await
            .with_context(|| format!("Failed to read settings from {path:?}"))?
        else {
            info!("No settings found at {path:?}, using defaults");
            return Ok(Settings::default());
        };

        match serde_json::from_str::<Settings>(&raw) {
            Ok(settings) => {
                debug!("Loaded settings from {path:?}");
                Ok(settings)
            }
            Err(e) => {
                // A broken file is treated like a first run. It gets replaced on next save.
                warn!("Settings in {path:?} are not valid, using defaults: {e}");
                Ok(Settings::default())
            }
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        let data = serde_json::to_string_pretty(settings)?;
        write_file_atomic(&self.settings_path, data.as_bytes())
            .await
            .with_context(|| format!("Failed to write settings to {:?}", self.settings_path))?;
        debug!("Saved settings to {:?}", self.settings_path);
        Ok(())
    }
}

impl ThemeStore for FileSettingsStore {
    async fn load_theme(&self) -> Result<Theme> {
        let raw = read_file_locked(&self.theme_path)
            .await
            .with_context(|| format!("Failed to read theme from {:?}", self.theme_path))?;
        Ok(match raw.map(|v| v.parse::<Theme>()) {
            Some(Ok(theme)) => theme,
            Some(Err(e)) => {
                warn!("Ignoring stored theme: {e}");
                Theme::default()
            }
            None => Theme::default(),
        })
    }

    async fn save_theme(&self, theme: Theme) -> Result<()> {
        write_file_atomic(&self.theme_path, theme.to_string().as_bytes())
            .await
            .with_context(|| format!("Failed to write theme to {:?}", self.theme_path))
    }
}

/// Keeps settings in memory. Nothing survives the process.
#[derive(Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Option<Settings>>,
}

impl MemorySettingsStore {
    pub fn with(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Settings> {
        let settings = self.settings.lock().expect("Settings lock was poisoned");
        Ok(settings.clone().unwrap_or_default())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        *self.settings.lock().expect("Settings lock was poisoned") = Some(settings.clone());
        Ok(())
    }
}
