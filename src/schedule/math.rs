use super::{DaySchedule, TimeInterval};

const MINUTES_IN_HOUR: u32 = 60;

/// Converts `H:MM` or `HH:MM` into minutes since midnight. Anything else, including out of range
/// values, is treated as unset.
pub fn parse_time_to_minutes(value: Option<&str>) -> Option<u32> {
    let (hours, minutes) = value?.split_once(':')?;
    if !(1..=2).contains(&hours.len()) || minutes.len() != 2 {
        return None;
    }
    if !hours.bytes().chain(minutes.bytes()).all(|v| v.is_ascii_digit()) {
        return None;
    }
    let hours = hours.parse::<u32>().ok()?;
    let minutes = minutes.parse::<u32>().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * MINUTES_IN_HOUR + minutes)
}

fn interval_bounds(interval: &TimeInterval) -> Option<(u32, u32)> {
    let start = parse_time_to_minutes(interval.start.as_deref())?;
    let end = parse_time_to_minutes(interval.end.as_deref())?;
    Some((start, end))
}

/// Length of an interval in minutes. Unset, malformed, empty and inverted intervals are all worth
/// 0, intervals never wrap past midnight.
pub fn compute_interval_minutes(interval: &TimeInterval) -> u32 {
    match interval_bounds(interval) {
        Some((start, end)) if end > start => end - start,
        _ => 0,
    }
}

/// Whether both ends are set but the interval ends before (or when) it starts. Used to warn
/// while editing, the interval still counts as 0.
pub fn is_interval_inverted(interval: &TimeInterval) -> bool {
    matches!(interval_bounds(interval), Some((start, end)) if end <= start)
}

pub fn compute_day_minutes(day: &[TimeInterval]) -> u32 {
    day.iter().map(compute_interval_minutes).sum()
}

/// Sums every day present in `week`. Works with any map keyed by day, it doesn't care which or
/// how many days are there.
pub fn compute_weekly_minutes<'a, K: 'a>(
    week: impl IntoIterator<Item = (&'a K, &'a DaySchedule)>,
) -> u32 {
    week.into_iter().map(|(_, day)| compute_day_minutes(day)).sum()
}

/// Formats minutes as `HH:MM`. Hours aren't wrapped at 24. Negative values get a `-`, positive
/// ones get a `+` only when `signed` is set, zero is never signed.
pub fn format_minutes_to_hhmm(total_minutes: i64, signed: bool) -> String {
    let sign = if total_minutes < 0 {
        "-"
    } else if signed && total_minutes > 0 {
        "+"
    } else {
        ""
    };
    let abs = total_minutes.unsigned_abs();
    let hours = abs / MINUTES_IN_HOUR as u64;
    let minutes = abs % MINUTES_IN_HOUR as u64;
    format!("{sign}{hours:02}:{minutes:02}")
}
