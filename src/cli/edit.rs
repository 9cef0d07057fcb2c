//! Commands that change the stored schedule and targets. Every change is applied to a freshly
//! loaded copy of the settings and saved as a whole.

use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use tracing::{info, instrument};

use crate::{
    schedule::{default_day, math::parse_time_to_minutes, DayKey, TimeInterval},
    settings::{store::SettingsStore, Settings},
};

/// Amount of intervals the editor offers for every day.
pub const EDITOR_SLOTS: usize = 2;

/// One end of an interval as typed by the user. `-` or an empty string clear it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(Option<String>);

impl Endpoint {
    pub fn unset() -> Self {
        Self(None)
    }

    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl FromStr for Endpoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "-" {
            return Ok(Self(None));
        }
        match parse_time_to_minutes(Some(s)) {
            Some(_) => Ok(Self(Some(s.to_string()))),
            None => Err(anyhow!("{s} is not a time of day, expected HH:MM")),
        }
    }
}

/// Converts a target entered in hours into minutes. Rejects anything that isn't a positive
/// number.
pub fn hours_to_minutes(hours: f64) -> Option<u32> {
    if !hours.is_finite() || hours <= 0. {
        return None;
    }
    let minutes = (hours * 60.).round();
    if minutes > u32::MAX as f64 {
        return None;
    }
    Some(minutes as u32)
}

/// Replaces interval number `slot` (starting from 1) of a day.
#[instrument(skip(store))]
pub async fn set_interval(
    store: &impl SettingsStore,
    day: DayKey,
    slot: usize,
    start: Endpoint,
    end: Endpoint,
) -> Result<Settings> {
    let mut settings = store.load().await?;
    let intervals = settings.schedule.entry(day).or_default();
    intervals.resize_with(intervals.len().max(EDITOR_SLOTS), TimeInterval::unset);

    if slot == 0 || slot > intervals.len() {
        bail!(
            "{} has intervals 1 to {}, got {slot}",
            day.label(),
            intervals.len()
        );
    }
    intervals[slot - 1] = TimeInterval {
        start: start.into_inner(),
        end: end.into_inner(),
    };

    store.save(&settings).await?;
    info!("Updated interval {slot} of {day}");
    Ok(settings)
}

#[instrument(skip(store))]
pub async fn clear_day(store: &impl SettingsStore, day: DayKey) -> Result<Settings> {
    let mut settings = store.load().await?;
    settings
        .schedule
        .insert(day, vec![TimeInterval::unset(); EDITOR_SLOTS]);
    store.save(&settings).await?;
    info!("Cleared {day}");
    Ok(settings)
}

/// Restores a single day to its default intervals.
#[instrument(skip(store))]
pub async fn restore_day(store: &impl SettingsStore, day: DayKey) -> Result<Settings> {
    let mut settings = store.load().await?;
    settings.schedule.insert(day, default_day(day));
    store.save(&settings).await?;
    info!("Restored {day} to defaults");
    Ok(settings)
}

/// Updates targets given in hours. Nothing is saved unless every given value is valid.
#[instrument(skip(store))]
pub async fn set_targets(
    store: &impl SettingsStore,
    daily_hours: Option<f64>,
    weekly_hours: Option<f64>,
) -> Result<Settings> {
    let mut settings = store.load().await?;
    if let Some(hours) = daily_hours {
        settings.targets.daily_minutes = hours_to_minutes(hours)
            .ok_or_else(|| anyhow!("Daily target must be a positive number of hours"))?;
    }
    if let Some(hours) = weekly_hours {
        settings.targets.weekly_minutes = hours_to_minutes(hours)
            .ok_or_else(|| anyhow!("Weekly target must be a positive number of hours"))?;
    }
    store.save(&settings).await?;
    info!("Targets are now {:?}", settings.targets);
    Ok(settings)
}

/// Restores default schedule and targets.
#[instrument(skip(store))]
pub async fn reset(store: &impl SettingsStore) -> Result<Settings> {
    let settings = Settings::default();
    store.save(&settings).await?;
    info!("Reset settings to defaults");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::{
        schedule::{default_day, math::compute_weekly_minutes, DayKey, TimeInterval},
        settings::{
            store::{MemorySettingsStore, SettingsStore},
            Settings,
        },
        utils::logging::TEST_LOGGING,
    };

    use super::{
        clear_day, hours_to_minutes, reset, restore_day, set_interval, set_targets, Endpoint,
    };

    fn endpoint(value: &str) -> Endpoint {
        value.parse().unwrap()
    }

    #[test]
    fn endpoint_parsing() {
        assert_eq!(endpoint("-"), Endpoint::unset());
        assert_eq!(endpoint(""), Endpoint::unset());
        assert_eq!(endpoint(" 9:15 ").into_inner().as_deref(), Some("9:15"));
        assert!("25:00".parse::<Endpoint>().is_err());
        assert!("noon".parse::<Endpoint>().is_err());
    }

    #[test]
    fn hours_conversion() {
        assert_eq!(hours_to_minutes(7.5), Some(450));
        assert_eq!(hours_to_minutes(37.5), Some(2250));
        assert_eq!(hours_to_minutes(7.33), Some(440));
        assert_eq!(hours_to_minutes(0.), None);
        assert_eq!(hours_to_minutes(-1.), None);
        assert_eq!(hours_to_minutes(f64::NAN), None);
        assert_eq!(hours_to_minutes(f64::INFINITY), None);
    }

    #[tokio::test]
    async fn set_interval_pads_and_replaces() -> Result<()> {
        *TEST_LOGGING;
        let mut initial = Settings::default();
        initial.schedule.insert(DayKey::Sat, vec![]);
        let store = MemorySettingsStore::with(initial);

        let settings = set_interval(&store, DayKey::Sat, 2, endpoint("10:00"), endpoint("12:30"))
            .await?;
        assert_eq!(
            settings.schedule[&DayKey::Sat],
            vec![TimeInterval::unset(), TimeInterval::new("10:00", "12:30")]
        );
        assert_eq!(compute_weekly_minutes(&store.load().await?.schedule), 2250 + 150);

        set_interval(&store, DayKey::Mon, 1, endpoint("08:00"), endpoint("-")).await?;
        assert_eq!(
            store.load().await?.schedule[&DayKey::Mon][0],
            TimeInterval {
                start: Some("08:00".into()),
                end: None
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn set_interval_rejects_bad_slot() -> Result<()> {
        let store = MemorySettingsStore::default();
        assert!(set_interval(&store, DayKey::Mon, 0, endpoint("-"), endpoint("-"))
            .await
            .is_err());
        assert!(set_interval(&store, DayKey::Mon, 3, endpoint("-"), endpoint("-"))
            .await
            .is_err());
        assert_eq!(store.load().await?, Settings::default());
        Ok(())
    }

    #[tokio::test]
    async fn clear_and_restore_day() -> Result<()> {
        let store = MemorySettingsStore::default();

        let settings = clear_day(&store, DayKey::Wed).await?;
        assert_eq!(settings.schedule[&DayKey::Wed], vec![TimeInterval::unset(); 2]);
        assert_eq!(compute_weekly_minutes(&settings.schedule), 1800);

        let settings = restore_day(&store, DayKey::Wed).await?;
        assert_eq!(settings.schedule[&DayKey::Wed], default_day(DayKey::Wed));
        Ok(())
    }

    #[tokio::test]
    async fn targets_are_validated() -> Result<()> {
        let store = MemorySettingsStore::default();

        let settings = set_targets(&store, Some(8.), None).await?;
        assert_eq!(settings.targets.daily_minutes, 480);
        assert_eq!(settings.targets.weekly_minutes, 2250);

        assert!(set_targets(&store, Some(6.), Some(-40.)).await.is_err());
        let stored = store.load().await?;
        assert_eq!(stored.targets.daily_minutes, 480);
        assert_eq!(stored.targets.weekly_minutes, 2250);
        Ok(())
    }

    #[tokio::test]
    async fn reset_restores_defaults() -> Result<()> {
        let store = MemorySettingsStore::default();
        clear_day(&store, DayKey::Mon).await?;
        set_targets(&store, Some(1.), Some(1.)).await?;

        reset(&store).await?;
        assert_eq!(store.load().await?, Settings::default());
        Ok(())
    }
}
