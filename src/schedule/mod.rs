//! Schedule data model and the arithmetic performed over it.
//!  - [math] holds the pure functions turning `HH:MM` strings into minutes and back.
//!  - [summary] derives everything displayed next to a schedule (deltas, progress, breakdown).

pub mod math;
pub mod summary;

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use anyhow::anyhow;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Identifier of a day of the week. Ordering is Monday first, which is only relevant for
/// presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayKey {
    pub const ALL: [DayKey; 7] = [
        DayKey::Mon,
        DayKey::Tue,
        DayKey::Wed,
        DayKey::Thu,
        DayKey::Fri,
        DayKey::Sat,
        DayKey::Sun,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DayKey::Mon => "Monday",
            DayKey::Tue => "Tuesday",
            DayKey::Wed => "Wednesday",
            DayKey::Thu => "Thursday",
            DayKey::Fri => "Friday",
            DayKey::Sat => "Saturday",
            DayKey::Sun => "Sunday",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            DayKey::Mon => "mon",
            DayKey::Tue => "tue",
            DayKey::Wed => "wed",
            DayKey::Thu => "thu",
            DayKey::Fri => "fri",
            DayKey::Sat => "sat",
            DayKey::Sun => "sun",
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self, DayKey::Sat | DayKey::Sun)
    }
}

impl From<Weekday> for DayKey {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Mon => DayKey::Mon,
            Weekday::Tue => DayKey::Tue,
            Weekday::Wed => DayKey::Wed,
            Weekday::Thu => DayKey::Thu,
            Weekday::Fri => DayKey::Fri,
            Weekday::Sat => DayKey::Sat,
            Weekday::Sun => DayKey::Sun,
        }
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for DayKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        DayKey::ALL
            .into_iter()
            .find(|day| day.key() == lowered || day.label().eq_ignore_ascii_case(&lowered))
            .ok_or_else(|| anyhow!("Can't parse {s} into a day of the week"))
    }
}

/// A span of a day. Both ends are `HH:MM` strings and either may be unset. Values that don't
/// parse are kept as typed and simply contribute no time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl TimeInterval {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    pub fn unset() -> Self {
        Self::default()
    }

    pub fn is_unset(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

pub type DaySchedule = Vec<TimeInterval>;

pub type WeekSchedule = BTreeMap<DayKey, DaySchedule>;

/// Daily and weekly goals, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Targets {
    #[serde(with = "minutes_ser")]
    pub daily_minutes: u32,
    #[serde(with = "minutes_ser")]
    pub weekly_minutes: u32,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            daily_minutes: 450,
            weekly_minutes: 2250,
        }
    }
}

/// Older exports may carry fractional minutes (`7.33h * 60`), so anything numeric is accepted and
/// rounded. Output is always an integer.
mod minutes_ser {
    use serde::{self, de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(minutes: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(*minutes)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() || value < 0. || value > u32::MAX as f64 {
            return Err(D::Error::custom(format!(
                "{value} is not a valid amount of minutes"
            )));
        }
        Ok(value.round() as u32)
    }
}

pub fn default_day(key: DayKey) -> DaySchedule {
    if key.is_weekend() {
        vec![TimeInterval::unset(), TimeInterval::unset()]
    } else {
        vec![
            TimeInterval::new("09:00", "12:00"),
            TimeInterval::new("13:00", "17:30"),
        ]
    }
}

/// Monday to Friday 09:00-12:00 and 13:00-17:30, weekend left empty.
pub fn default_schedule() -> WeekSchedule {
    DayKey::ALL
        .into_iter()
        .map(|key| (key, default_day(key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::{default_schedule, DayKey, Targets, TimeInterval};

    #[test]
    fn day_key_parsing() {
        assert_eq!("mon".parse::<DayKey>().unwrap(), DayKey::Mon);
        assert_eq!("Sunday".parse::<DayKey>().unwrap(), DayKey::Sun);
        assert_eq!(" WED ".parse::<DayKey>().unwrap(), DayKey::Wed);
        assert!("monday-ish".parse::<DayKey>().is_err());
    }

    #[test]
    fn day_key_from_weekday() {
        assert_eq!(DayKey::from(Weekday::Sun), DayKey::Sun);
        assert_eq!(DayKey::from(Weekday::Mon), DayKey::Mon);
    }

    #[test]
    fn default_schedule_shape() {
        let schedule = default_schedule();
        assert_eq!(schedule.len(), 7);
        assert_eq!(
            schedule[&DayKey::Fri],
            vec![
                TimeInterval::new("09:00", "12:00"),
                TimeInterval::new("13:00", "17:30")
            ]
        );
        assert!(schedule[&DayKey::Sat].iter().all(TimeInterval::is_unset));
        assert_eq!(schedule[&DayKey::Sun].len(), 2);
    }

    #[test]
    fn targets_serialization_shape() {
        let json = serde_json::to_value(Targets::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "dailyMinutes": 450, "weeklyMinutes": 2250 })
        );
    }

    #[test]
    fn targets_accept_fractional_minutes() {
        let targets: Targets =
            serde_json::from_str(r#"{ "dailyMinutes": 439.8, "weeklyMinutes": 2250 }"#).unwrap();
        assert_eq!(targets.daily_minutes, 440);
        assert!(serde_json::from_str::<Targets>(
            r#"{ "dailyMinutes": -5, "weeklyMinutes": 2250 }"#
        )
        .is_err());
    }

    #[test]
    fn interval_null_endpoints() {
        let interval: TimeInterval = serde_json::from_str(r#"{ "start": null }"#).unwrap();
        assert!(interval.is_unset());
        assert_eq!(
            serde_json::to_string(&TimeInterval::unset()).unwrap(),
            r#"{"start":null,"end":null}"#
        );
    }
}
