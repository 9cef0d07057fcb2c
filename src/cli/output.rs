//! Text rendering of schedules and summaries. Everything here returns strings so it can be
//! checked without a terminal.

use std::fmt::Write;

use ansi_term::{Colour, Style};
use chrono::{DateTime, TimeZone};

use crate::{
    schedule::{
        math::{compute_day_minutes, format_minutes_to_hhmm, is_interval_inverted},
        summary::Summary,
        TimeInterval, WeekSchedule,
    },
    settings::Theme,
    utils::percentage::Percentage,
};

use super::edit::EDITOR_SLOTS;

const PROGRESS_WIDTH: usize = 20;
const UNSET_TIME: &str = "--:--";

/// Colours used for output. Light terminals get darker shades.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    accent: Style,
    muted: Style,
    positive: Style,
    negative: Style,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                accent: Colour::Cyan.bold(),
                muted: Colour::Fixed(245).normal(),
                positive: Colour::Green.normal(),
                negative: Colour::Red.normal(),
            },
            Theme::Light => Self {
                accent: Colour::Blue.bold(),
                muted: Colour::Fixed(240).normal(),
                positive: Colour::Fixed(28).normal(),
                negative: Colour::Fixed(124).normal(),
            },
        }
    }

    /// No escape codes at all. Used when output isn't a terminal.
    pub fn plain() -> Self {
        Self {
            accent: Style::new(),
            muted: Style::new(),
            positive: Style::new(),
            negative: Style::new(),
        }
    }

    fn delta(&self, minutes: i64) -> String {
        let text = format_minutes_to_hhmm(minutes, true);
        if minutes < 0 {
            self.negative.paint(text).to_string()
        } else {
            self.positive.paint(text).to_string()
        }
    }
}

fn progress_bar(progress: Percentage) -> String {
    let filled = ((progress.min(100.) / 100.) * PROGRESS_WIDTH as f64).round() as usize;
    let overflow = if *progress > 100. { "+" } else { "" };
    format!(
        "[{}{}]{overflow}",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}

fn endpoint(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNSET_TIME)
}

fn slot_label(index: usize) -> &'static str {
    match index {
        0 => "Morning",
        1 => "Afternoon",
        _ => "",
    }
}

/// Week as shown by the editor, every day padded to the editor slots.
pub fn render_week(schedule: &WeekSchedule, palette: &Palette) -> String {
    let mut out = String::new();
    for (key, day) in schedule {
        let mut slots = day.clone();
        slots.resize_with(slots.len().max(EDITOR_SLOTS), TimeInterval::unset);

        let _ = writeln!(out, "{}", palette.accent.paint(key.label()));
        for (index, interval) in slots.iter().enumerate() {
            let warning = if is_interval_inverted(interval) {
                palette.negative.paint(" ! ends before it starts").to_string()
            } else {
                String::new()
            };
            let _ = writeln!(
                out,
                "  {}. {} - {}  {}{warning}",
                index + 1,
                endpoint(&interval.start),
                endpoint(&interval.end),
                palette.muted.paint(slot_label(index)),
            );
        }

        let has_any_value = slots.iter().any(|v| !v.is_unset());
        if has_any_value {
            let total = format_minutes_to_hhmm(compute_day_minutes(day) as i64, false);
            let _ = writeln!(out, "  Total: {total}");
        } else {
            let _ = writeln!(out, "  {}", palette.muted.paint("No work planned"));
        }
    }
    out
}

fn summary_row(
    out: &mut String,
    label: &str,
    worked: u32,
    target: u32,
    delta: i64,
    progress: Percentage,
    palette: &Palette,
) {
    let _ = writeln!(
        out,
        "{} {} worked  {} {progress}",
        palette.accent.paint(format!("{label:<10}")),
        format_minutes_to_hhmm(worked as i64, false),
        progress_bar(progress),
    );
    let _ = writeln!(
        out,
        "{:<10} {}",
        "",
        palette.muted.paint(format!(
            "Target {} · {} vs target",
            format_minutes_to_hhmm(target as i64, false),
            palette.delta(delta)
        )),
    );
}

pub fn render_summary(summary: &Summary, palette: &Palette) -> String {
    let mut out = String::new();
    if summary.is_weekend() {
        let _ = writeln!(out, "Weekend mode. Weekly progress and totals only.");
    } else {
        let _ = writeln!(
            out,
            "Today is {}. Targets and progress update live.",
            summary.today.label()
        );
    }
    let _ = writeln!(out);

    summary_row(
        &mut out,
        "Today",
        summary.today_minutes,
        summary.daily_target,
        summary.daily_delta(),
        summary.daily_progress,
        palette,
    );
    summary_row(
        &mut out,
        "This week",
        summary.weekly_minutes,
        summary.weekly_target,
        summary.weekly_delta(),
        summary.weekly_progress,
        palette,
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", palette.muted.paint("By day"));
    for (key, minutes) in &summary.by_day {
        let marker = if *key == summary.today { "*" } else { " " };
        let _ = writeln!(
            out,
            "  {marker} {:<10} {}",
            key.label(),
            format_minutes_to_hhmm(*minutes as i64, false)
        );
    }
    out
}

/// Single line refreshed by the live clock.
pub fn render_clock_line<Tz: TimeZone>(
    now: &DateTime<Tz>,
    summary: &Summary,
    palette: &Palette,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}  {}  Today {}/{} ({})  Week {}/{} ({})",
        palette.accent.paint(now.format("%H:%M:%S").to_string()),
        palette.muted.paint(now.format("%a %d %b %Y").to_string()),
        format_minutes_to_hhmm(summary.today_minutes as i64, false),
        format_minutes_to_hhmm(summary.daily_target as i64, false),
        palette.delta(summary.daily_delta()),
        format_minutes_to_hhmm(summary.weekly_minutes as i64, false),
        format_minutes_to_hhmm(summary.weekly_target as i64, false),
        palette.delta(summary.weekly_delta()),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use crate::{
        schedule::{summary::Summary, DayKey, TimeInterval},
        settings::Settings,
        utils::percentage::Percentage,
    };

    use super::{progress_bar, render_clock_line, render_summary, render_week, Palette};

    #[test]
    fn progress_bar_fill() {
        assert_eq!(progress_bar(Percentage::ZERO), format!("[{}]", "-".repeat(20)));
        assert_eq!(
            progress_bar(Percentage::new_opt(50.).unwrap()),
            format!("[{}{}]", "#".repeat(10), "-".repeat(10))
        );
        assert_eq!(
            progress_bar(Percentage::new_opt(150.).unwrap()),
            format!("[{}]+", "#".repeat(20))
        );
    }

    #[test]
    fn week_rendering() {
        let mut settings = Settings::default();
        settings
            .schedule
            .insert(DayKey::Sat, vec![TimeInterval::new("14:00", "10:00")]);
        let week = render_week(&settings.schedule, &Palette::plain());

        assert!(week.contains("Monday\n  1. 09:00 - 12:00  Morning\n  2. 13:00 - 17:30  Afternoon\n  Total: 07:30"));
        assert!(week.contains("Saturday\n  1. 14:00 - 10:00  Morning ! ends before it starts\n  2. --:-- - --:--  Afternoon\n  Total: 00:00"));
        assert!(week.contains("Sunday\n  1. --:-- - --:--  Morning\n  2. --:-- - --:--  Afternoon\n  No work planned"));
    }

    #[test]
    fn summary_rendering() {
        let mut settings = Settings::default();
        settings.targets.daily_minutes = 420;
        let summary = Summary::compute(&settings, DayKey::Tue);
        let text = render_summary(&summary, &Palette::plain());

        assert!(text.starts_with("Today is Tuesday."));
        assert!(text.contains("07:30 worked"));
        assert!(text.contains("Target 07:00 · +00:30 vs target"));
        assert!(text.contains("Target 37:30 · 00:00 vs target"));
        assert!(text.contains("  * Tuesday    07:30"));
        assert!(text.contains("    Sunday     00:00"));

        let weekend = render_summary(&Summary::compute(&settings, DayKey::Sat), &Palette::plain());
        assert!(weekend.starts_with("Weekend mode."));
        assert!(weekend.contains("-07:00 vs target"));
    }

    #[test]
    fn clock_line() {
        let now = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 19, 14, 3, 27)
            .unwrap();
        let summary = Summary::compute(&Settings::default(), DayKey::Mon);
        assert_eq!(
            render_clock_line(&now, &summary, &Palette::plain()),
            "14:03:27  Mon 19 Oct 2026  Today 07:30/07:30 (00:00)  Week 37:30/37:30 (00:00)"
        );
    }
}
