//! Scoring core: which tasks apply to a date, what each entered value is
//! worth, and the wake/sleep timing signals derived alongside the score.
//!
//! Everything here is a pure function over the in-memory snapshot. Malformed
//! input (bad date keys, unparseable times, non-numeric scores) degrades to
//! zero contribution or a missing signal; nothing returns an error.

use crate::models::{
    AppData, CellValue, DayRecord, DayStats, TaskDefinition, TaskType, TimeCondition,
};
use std::collections::BTreeMap;

/// Weight lost per 30 minutes past a `before` target.
const LATE_PENALTY_PER_30_MIN: f64 = 0.2;

/// Parses `HH:MM` into fractional hours (`06:30` -> 6.5). Anything that does
/// not split into two numeric parts yields `None`.
pub fn parse_time(raw: &str) -> Option<f64> {
    let (hours, minutes) = raw.split_once(':')?;
    let hours: f64 = hours.trim().parse().ok()?;
    let minutes: f64 = minutes.trim().parse().ok()?;
    Some(hours + minutes / 60.0)
}

/// Whether `task` applies on `date_key`: the key must fall inside the task's
/// inclusive date range (lexical comparison, the format is fixed-width) and
/// its weekday must be in the task's day set. Malformed keys are inactive.
pub fn is_active(task: &TaskDefinition, date_key: &str) -> bool {
    let Some(date) = crate::models::parse_date_key(date_key) else {
        return false;
    };
    if date_key < task.start_date.as_str() || date_key > task.end_date.as_str() {
        return false;
    }
    task.days.contains(chrono::Datelike::weekday(&date))
}

/// Weight earned by one active task for the value entered that day.
/// The result is in `0..=task.weight`; a missing or unusable value earns 0.
pub fn contribution(task: &TaskDefinition, value: Option<&CellValue>) -> f64 {
    match task.kind {
        TaskType::Bool => {
            if value.is_some_and(CellValue::is_truthy) {
                task.weight
            } else {
                0.0
            }
        }
        TaskType::Score => match value.and_then(CellValue::as_number) {
            Some(raw) => task.weight * raw.clamp(0.0, 100.0) / 100.0,
            None => 0.0,
        },
        TaskType::Time => {
            let entered = value.and_then(CellValue::as_str).and_then(parse_time);
            let target = task.target.as_deref().and_then(parse_time);
            let (Some(entered), Some(target)) = (entered, target) else {
                return 0.0;
            };
            let diff_minutes = (entered - target) * 60.0;
            match task.condition {
                Some(TimeCondition::Before) => {
                    if diff_minutes <= 0.0 {
                        task.weight
                    } else {
                        let penalty = diff_minutes / 30.0 * LATE_PENALTY_PER_30_MIN;
                        (task.weight * (1.0 - penalty)).max(0.0)
                    }
                }
                // Being early when "after" is required earns nothing; there
                // is deliberately no partial credit on this side.
                Some(TimeCondition::After) => {
                    if diff_minutes >= 0.0 {
                        task.weight
                    } else {
                        0.0
                    }
                }
                None => 0.0,
            }
        }
    }
}

/// Folds every task over one date: active tasks add their weight to the
/// possible total whether or not a value was entered, so an unscored task
/// drags the percentage down instead of vanishing from it.
///
/// Time-typed tasks whose name contains `wake` or `sleep` double as timing
/// signals. A bedtime before noon is pushed past 24 so it orders correctly
/// against the next morning's wake time. When several tasks match, the last
/// one in definition order wins.
pub fn day_stats(
    config: &[TaskDefinition],
    records: &BTreeMap<String, DayRecord>,
    date_key: &str,
) -> DayStats {
    let mut earned = 0.0;
    let mut total = 0.0;
    let mut wake_hour = None;
    let mut sleep_hour = None;
    let day = records.get(date_key);

    for task in config {
        if !is_active(task, date_key) {
            continue;
        }
        total += task.weight;
        let value = day.and_then(|record| record.get(&task.name));

        if task.kind == TaskType::Time {
            if let Some(hour) = value.and_then(CellValue::as_str).and_then(parse_time) {
                let name = task.name.to_lowercase();
                if name.contains("wake") {
                    wake_hour = Some(hour);
                }
                if name.contains("sleep") {
                    sleep_hour = Some(if hour < 12.0 { hour + 24.0 } else { hour });
                }
            }
        }

        earned += contribution(task, value);
    }

    DayStats {
        percent: if total == 0.0 {
            0.0
        } else {
            100.0 * earned / total
        },
        wake_hour,
        sleep_hour,
    }
}

/// Convenience over a full snapshot.
pub fn day_stats_for(data: &AppData, date_key: &str) -> DayStats {
    day_stats(&data.config, &data.records, date_key)
}

/// Pairs each day's bedtime with the following day's wake time and returns
/// the slept hours per pair (`None` where either side is missing). Output
/// length is one less than the input, aligned so slot `i` spans the night
/// between day `i` and day `i + 1`.
pub fn sleep_durations(stats: &[DayStats]) -> Vec<Option<f64>> {
    let mut durations = Vec::with_capacity(stats.len().saturating_sub(1));
    for pair in stats.windows(2) {
        let (Some(sleep), Some(wake)) = (pair[0].sleep_hour, pair[1].wake_hour) else {
            durations.push(None);
            continue;
        };
        // Undo the past-midnight normalization before wrapping.
        let sleep = if sleep >= 24.0 { sleep - 24.0 } else { sleep };
        let mut duration = if wake >= sleep {
            wake - sleep
        } else {
            (24.0 - sleep) + wake
        };
        if duration < 0.0 {
            duration += 24.0;
        }
        durations.push(Some(duration));
    }
    durations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DaySet, TaskDefinition};

    fn task(name: &str, kind: TaskType, weight: f64) -> TaskDefinition {
        TaskDefinition {
            name: name.into(),
            kind,
            weight,
            target: None,
            condition: None,
            days: DaySet::all(),
            start_date: "2026-01-01".into(),
            end_date: "2026-12-31".into(),
        }
    }

    fn time_task(name: &str, target: &str, condition: TimeCondition, weight: f64) -> TaskDefinition {
        TaskDefinition {
            target: Some(target.into()),
            condition: Some(condition),
            ..task(name, TaskType::Time, weight)
        }
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.into())
    }

    fn records_for(date: &str, entries: &[(&str, CellValue)]) -> BTreeMap<String, DayRecord> {
        let mut day = DayRecord::new();
        for (name, value) in entries {
            day.insert((*name).into(), value.clone());
        }
        BTreeMap::from([(date.to_string(), day)])
    }

    #[test]
    fn active_requires_range_and_weekday() {
        let mut t = task("Gym", TaskType::Bool, 10.0);
        t.days = DaySet::parse("Mon,Tue,Wed,Thu,Fri");

        // 2026-01-05 is a Monday.
        assert!(is_active(&t, "2026-01-05"));
        assert!(!is_active(&t, "2026-01-10")); // Saturday
        assert!(!is_active(&t, "2025-12-29")); // Monday, before range
        assert!(!is_active(&t, "2027-01-04")); // Monday, after range
        assert!(!is_active(&t, "not-a-date"));
        assert!(!is_active(&t, "+262142-12-31"));
    }

    #[test]
    fn one_off_task_is_active_on_its_single_day() {
        let mut t = task("Dentist", TaskType::Bool, 5.0);
        t.start_date = "2026-04-15".into();
        t.end_date = "2026-04-15".into();
        t.days = DaySet::single(chrono::Weekday::Wed);

        assert!(is_active(&t, "2026-04-15"));
        assert!(!is_active(&t, "2026-04-14"));
        assert!(!is_active(&t, "2026-04-16"));
    }

    #[test]
    fn bool_contribution_is_all_or_nothing() {
        let t = task("Gym", TaskType::Bool, 15.0);
        assert_eq!(contribution(&t, Some(&CellValue::Bool(true))), 15.0);
        assert_eq!(contribution(&t, Some(&CellValue::Bool(false))), 0.0);
        assert_eq!(contribution(&t, None), 0.0);
    }

    #[test]
    fn score_contribution_clamps_to_0_100() {
        let t = task("Focus", TaskType::Score, 40.0);
        assert_eq!(contribution(&t, Some(&text("50"))), 20.0);
        assert_eq!(contribution(&t, Some(&text("150"))), 40.0);
        assert_eq!(contribution(&t, Some(&text("-10"))), 0.0);
        assert_eq!(contribution(&t, Some(&text(""))), 0.0);
        assert_eq!(contribution(&t, Some(&text("abc"))), 0.0);
        assert_eq!(contribution(&t, Some(&CellValue::Number(75.0))), 30.0);
    }

    #[test]
    fn time_before_decays_linearly_past_target() {
        let t = time_task("Wake up", "06:00", TimeCondition::Before, 20.0);
        assert_eq!(contribution(&t, Some(&text("06:00"))), 20.0);
        assert_eq!(contribution(&t, Some(&text("05:30"))), 20.0);
        // 30 minutes late costs 20% of the weight.
        assert!((contribution(&t, Some(&text("06:30"))) - 16.0).abs() < 1e-9);
        // 90 minutes late costs 60%.
        assert!((contribution(&t, Some(&text("07:30"))) - 8.0).abs() < 1e-9);
        // 150 minutes late hits the floor.
        assert_eq!(contribution(&t, Some(&text("08:30"))), 0.0);
        assert_eq!(contribution(&t, Some(&text("11:00"))), 0.0);
    }

    #[test]
    fn time_after_gives_no_partial_credit_for_being_early() {
        let t = time_task("Sleep", "23:00", TimeCondition::After, 20.0);
        assert_eq!(contribution(&t, Some(&text("23:30"))), 20.0);
        assert_eq!(contribution(&t, Some(&text("23:00"))), 20.0);
        assert_eq!(contribution(&t, Some(&text("22:30"))), 0.0);
    }

    #[test]
    fn unparseable_times_score_zero_silently() {
        let t = time_task("Wake up", "06:00", TimeCondition::Before, 20.0);
        assert_eq!(contribution(&t, Some(&text("630"))), 0.0);
        assert_eq!(contribution(&t, Some(&text("six:30"))), 0.0);
        assert_eq!(contribution(&t, Some(&CellValue::Bool(true))), 0.0);

        let no_target = TaskDefinition {
            target: None,
            ..t
        };
        assert_eq!(contribution(&no_target, Some(&text("06:00"))), 0.0);
    }

    #[test]
    fn unscored_active_task_still_counts_in_the_total() {
        let config = vec![task("Gym", TaskType::Bool, 20.0), task("Read", TaskType::Bool, 20.0)];
        let records = records_for("2026-01-05", &[("Gym", CellValue::Bool(true))]);

        let stats = day_stats(&config, &records, "2026-01-05");
        assert!((stats.percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn inactive_task_counts_toward_neither_side() {
        let mut weekend_only = task("Hike", TaskType::Bool, 80.0);
        weekend_only.days = DaySet::parse("Sat,Sun");
        let config = vec![task("Gym", TaskType::Bool, 20.0), weekend_only];
        let records = records_for(
            "2026-01-05",
            &[("Gym", CellValue::Bool(true)), ("Hike", CellValue::Bool(true))],
        );

        // Monday: only Gym applies, so the day is perfect.
        let stats = day_stats(&config, &records, "2026-01-05");
        assert!((stats.percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn no_active_tasks_reports_zero_percent() {
        let stats = day_stats(&[], &BTreeMap::new(), "2026-01-05");
        assert_eq!(stats.percent, 0.0);
        assert_eq!(stats.wake_hour, None);
        assert_eq!(stats.sleep_hour, None);
    }

    #[test]
    fn wake_and_sleep_signals_come_from_name_matching() {
        let config = vec![
            time_task("Wake up", "06:00", TimeCondition::Before, 20.0),
            time_task("Sleep", "23:00", TimeCondition::Before, 20.0),
        ];
        let records = records_for(
            "2026-01-05",
            &[("Wake up", text("06:30")), ("Sleep", text("23:30"))],
        );

        let stats = day_stats(&config, &records, "2026-01-05");
        assert_eq!(stats.wake_hour, Some(6.5));
        assert_eq!(stats.sleep_hour, Some(23.5));
    }

    #[test]
    fn bedtime_before_noon_is_normalized_past_24() {
        let config = vec![time_task("Sleep", "23:00", TimeCondition::Before, 20.0)];
        let records = records_for("2026-01-05", &[("Sleep", text("00:30"))]);

        let stats = day_stats(&config, &records, "2026-01-05");
        assert_eq!(stats.sleep_hour, Some(24.5));
    }

    #[test]
    fn last_matching_signal_task_wins() {
        let config = vec![
            time_task("Wake up", "06:00", TimeCondition::Before, 20.0),
            time_task("Wake up (weekend)", "08:00", TimeCondition::Before, 20.0),
        ];
        let records = records_for(
            "2026-01-05",
            &[
                ("Wake up", text("06:00")),
                ("Wake up (weekend)", text("08:15")),
            ],
        );

        let stats = day_stats(&config, &records, "2026-01-05");
        assert_eq!(stats.wake_hour, Some(8.25));
    }

    #[test]
    fn day_stats_is_a_pure_function_of_its_inputs() {
        let config = vec![
            task("Gym", TaskType::Bool, 20.0),
            time_task("Wake up", "06:00", TimeCondition::Before, 20.0),
        ];
        let records = records_for(
            "2026-01-05",
            &[("Gym", CellValue::Bool(true)), ("Wake up", text("06:10"))],
        );

        let first = day_stats(&config, &records, "2026-01-05");
        let second = day_stats(&config, &records, "2026-01-05");
        assert_eq!(first, second);
    }

    #[test]
    fn serde_round_trip_reproduces_identical_stats() {
        let data = AppData {
            config: vec![
                task("Gym", TaskType::Bool, 20.0),
                time_task("Sleep", "23:00", TimeCondition::Before, 20.0),
            ],
            records: records_for(
                "2026-01-05",
                &[("Gym", CellValue::Bool(true)), ("Sleep", text("23:45"))],
            ),
        };

        let reparsed: AppData =
            serde_json::from_slice(&serde_json::to_vec_pretty(&data).unwrap()).unwrap();
        assert_eq!(
            day_stats_for(&data, "2026-01-05"),
            day_stats_for(&reparsed, "2026-01-05")
        );
    }

    fn stats(sleep: Option<f64>, wake: Option<f64>) -> DayStats {
        DayStats {
            percent: 0.0,
            wake_hour: wake,
            sleep_hour: sleep,
        }
    }

    #[test]
    fn sleep_pairing_spans_midnight() {
        // Bed at 23:30, up at 06:00 the next day.
        let days = [stats(Some(23.5), None), stats(None, Some(6.0))];
        assert_eq!(sleep_durations(&days), vec![Some(6.5)]);
    }

    #[test]
    fn sleep_pairing_unwinds_normalized_bedtimes() {
        // Bed at 00:30 (stored as 24.5), up at 07:00.
        let days = [stats(Some(24.5), None), stats(None, Some(7.0))];
        assert_eq!(sleep_durations(&days), vec![Some(6.5)]);
    }

    #[test]
    fn sleep_pairing_skips_incomplete_pairs() {
        let days = [
            stats(Some(23.0), None),
            stats(None, None),
            stats(Some(22.0), Some(7.0)),
            stats(None, Some(6.0)),
        ];
        assert_eq!(sleep_durations(&days), vec![None, None, Some(8.0)]);
    }

    #[test]
    fn sleep_pairing_handles_same_day_wake_after_bed() {
        // Early bedtime, later wake value: no wrap needed.
        let days = [stats(Some(22.0), None), stats(None, Some(23.0))];
        assert_eq!(sleep_durations(&days), vec![Some(1.0)]);
    }
}
