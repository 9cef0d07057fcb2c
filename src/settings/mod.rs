//! Persisted state of the application.
//!
//! [Settings] is stored in the same JSON shape that is used for import and export:
//! `{ "schedule": { "mon": [{ "start": "09:00", "end": "12:00" }, ...], ... },
//!    "targets": { "dailyMinutes": 450, "weeklyMinutes": 2250 } }`.
//! The theme is stored separately, see [store::ThemeStore].

pub mod interchange;
pub mod store;

use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::schedule::{default_schedule, Targets, WeekSchedule};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub schedule: WeekSchedule,
    pub targets: Targets,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schedule: default_schedule(),
            targets: Targets::default(),
        }
    }
}

/// Missing or `null` sections fall back to their defaults independently of each other.
#[derive(Deserialize)]
struct SettingsPayload {
    #[serde(default)]
    schedule: Option<WeekSchedule>,
    #[serde(default)]
    targets: Option<Targets>,
}

impl<'de> Deserialize<'de> for Settings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let SettingsPayload { schedule, targets } = SettingsPayload::deserialize(deserializer)?;
        Ok(Settings {
            schedule: schedule.unwrap_or_else(default_schedule),
            targets: targets.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow!("Unknown theme {other}")),
        }
    }
}
