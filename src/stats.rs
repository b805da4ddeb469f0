use crate::models::{date_key, weekday_code, AppData, DayPoint, DayStats, WeekStatsResponse};
use crate::score::{day_stats_for, sleep_durations};
use chrono::{Datelike, Duration, Local, NaiveDate};

/// Week view anchored on the current week's Monday (server local date).
pub fn build_week(data: &AppData) -> WeekStatsResponse {
    build_week_at(week_start(Local::now().date_naive()), data)
}

/// Builds the renderer's week window: nine consecutive days from the Sunday
/// before `monday` through the Monday after. The extra day on each side gives
/// every night inside the week both of its endpoints, so the bedtime drawn on
/// Sunday can pair with Monday's wake time and vice versa.
pub fn build_week_at(monday: NaiveDate, data: &AppData) -> WeekStatsResponse {
    let mut days = Vec::with_capacity(9);
    let mut series: Vec<DayStats> = Vec::with_capacity(9);

    for offset in -1..=7 {
        let date = monday + Duration::days(offset);
        let key = date_key(date);
        let stats = day_stats_for(data, &key);
        days.push(DayPoint {
            date: key,
            weekday: weekday_code(date.weekday()),
            percent: stats.percent,
            wake_hour: stats.wake_hour,
            sleep_hour: stats.sleep_hour,
        });
        series.push(stats);
    }

    WeekStatsResponse {
        monday: date_key(monday),
        days,
        sleep_durations: sleep_durations(&series),
    }
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}
