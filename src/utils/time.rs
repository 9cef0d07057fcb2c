use chrono::Datelike;

use crate::schedule::DayKey;

/// Day of the week a date falls on, in terms of schedule keys.
pub fn day_key_of(date: &impl Datelike) -> DayKey {
    date.weekday().into()
}
