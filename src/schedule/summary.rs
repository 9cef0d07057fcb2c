use crate::{settings::Settings, utils::percentage::{minutes_percentage, Percentage}};

use super::{
    math::{compute_day_minutes, compute_weekly_minutes},
    DayKey,
};

/// Progress bars stop growing past twice the target.
pub const MAX_PROGRESS: f64 = 200.;

/// Everything shown next to the schedule for a given day of the week.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub today: DayKey,
    pub today_minutes: u32,
    pub weekly_minutes: u32,
    pub daily_target: u32,
    pub weekly_target: u32,
    pub daily_progress: Percentage,
    pub weekly_progress: Percentage,
    /// Days present in the schedule in Monday first order.
    pub by_day: Vec<(DayKey, u32)>,
}

impl Summary {
    pub fn compute(settings: &Settings, today: DayKey) -> Self {
        let today_minutes = settings
            .schedule
            .get(&today)
            .map(|day| compute_day_minutes(day))
            .unwrap_or(0);
        let weekly_minutes = compute_weekly_minutes(&settings.schedule);
        let targets = settings.targets;

        let by_day = DayKey::ALL
            .into_iter()
            .filter_map(|key| {
                settings
                    .schedule
                    .get(&key)
                    .map(|day| (key, compute_day_minutes(day)))
            })
            .collect();

        Self {
            today,
            today_minutes,
            weekly_minutes,
            daily_target: targets.daily_minutes,
            weekly_target: targets.weekly_minutes,
            daily_progress: minutes_percentage(today_minutes, targets.daily_minutes)
                .clamp_to(MAX_PROGRESS),
            weekly_progress: minutes_percentage(weekly_minutes, targets.weekly_minutes)
                .clamp_to(MAX_PROGRESS),
            by_day,
        }
    }

    pub fn daily_delta(&self) -> i64 {
        self.today_minutes as i64 - self.daily_target as i64
    }

    pub fn weekly_delta(&self) -> i64 {
        self.weekly_minutes as i64 - self.weekly_target as i64
    }

    pub fn is_weekend(&self) -> bool {
        self.today.is_weekend()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        schedule::{DayKey, Targets, TimeInterval},
        settings::Settings,
    };

    use super::Summary;

    #[test]
    fn default_settings_on_a_weekday() {
        let summary = Summary::compute(&Settings::default(), DayKey::Wed);
        assert_eq!(summary.today_minutes, 450);
        assert_eq!(summary.weekly_minutes, 2250);
        assert_eq!(summary.daily_delta(), 0);
        assert_eq!(summary.weekly_delta(), 0);
        assert_eq!(*summary.daily_progress, 100.);
        assert!(!summary.is_weekend());
        assert_eq!(summary.by_day.len(), 7);
        assert_eq!(summary.by_day[0], (DayKey::Mon, 450));
        assert_eq!(summary.by_day[6], (DayKey::Sun, 0));
    }

    #[test]
    fn weekend_has_negative_daily_delta() {
        let summary = Summary::compute(&Settings::default(), DayKey::Sun);
        assert!(summary.is_weekend());
        assert_eq!(summary.today_minutes, 0);
        assert_eq!(summary.daily_delta(), -450);
        assert_eq!(*summary.daily_progress, 0.);
    }

    #[test]
    fn progress_is_capped() {
        let mut settings = Settings::default();
        settings.targets = Targets {
            daily_minutes: 60,
            weekly_minutes: 0,
        };
        let summary = Summary::compute(&settings, DayKey::Mon);
        assert_eq!(*summary.daily_progress, 200.);
        assert_eq!(*summary.weekly_progress, 0.);
        assert_eq!(summary.daily_delta(), 390);
        assert_eq!(summary.weekly_delta(), 2250);
    }

    #[test]
    fn missing_days_are_skipped() {
        let mut settings = Settings::default();
        settings.schedule.retain(|key, _| *key == DayKey::Tue);
        settings
            .schedule
            .insert(DayKey::Tue, vec![TimeInterval::new("10:00", "11:00")]);

        let summary = Summary::compute(&settings, DayKey::Mon);
        assert_eq!(summary.today_minutes, 0);
        assert_eq!(summary.weekly_minutes, 60);
        assert_eq!(summary.by_day, vec![(DayKey::Tue, 60)]);
    }
}
