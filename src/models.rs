use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scoring rule attached to a task. Determines how an entered value is
/// converted into a weight contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Bool,
    Score,
    Time,
}

/// Direction of a time-target comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeCondition {
    Before,
    After,
}

/// Set of weekdays a task recurs on. Serialized as a comma-joined string of
/// short codes (`"Mon,Tue,Wed"`), the format the data file has always used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DaySet(Vec<Weekday>);

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

impl DaySet {
    pub fn all() -> Self {
        DaySet(ALL_DAYS.to_vec())
    }

    pub fn single(day: Weekday) -> Self {
        DaySet(vec![day])
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses the wire format. `Daily` is a legacy token meaning every day;
    /// unknown tokens are dropped rather than rejected.
    pub fn parse(raw: &str) -> Self {
        let mut days = Vec::new();
        for token in raw.split(',') {
            match token.trim() {
                "Mon" => push_unique(&mut days, Weekday::Mon),
                "Tue" => push_unique(&mut days, Weekday::Tue),
                "Wed" => push_unique(&mut days, Weekday::Wed),
                "Thu" => push_unique(&mut days, Weekday::Thu),
                "Fri" => push_unique(&mut days, Weekday::Fri),
                "Sat" => push_unique(&mut days, Weekday::Sat),
                "Sun" => push_unique(&mut days, Weekday::Sun),
                "Daily" => return DaySet::all(),
                _ => {}
            }
        }
        DaySet(days)
    }

    pub fn to_wire(&self) -> String {
        self.0
            .iter()
            .map(|day| weekday_code(*day))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn push_unique(days: &mut Vec<Weekday>, day: Weekday) {
    if !days.contains(&day) {
        days.push(day);
    }
}

pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

impl Serialize for DaySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for DaySet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(DaySet::parse(&raw))
    }
}

/// One configured trackable item. Dates stay as `YYYY-MM-DD` strings: the
/// format is fixed-width, so range checks are plain lexical comparisons and
/// never pass through a timezone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TaskType,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<TimeCondition>,
    pub days: DaySet,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

/// Raw value entered for one (date, task) cell. The data file mixes checkbox
/// booleans, numeric strings and `HH:MM` strings, so this stays untagged and
/// round-trips whatever was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Bool(b) => *b,
            CellValue::Number(n) => *n != 0.0,
            CellValue::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Values entered for one calendar day, keyed by task name.
pub type DayRecord = BTreeMap<String, CellValue>;

/// Everything the data file holds: the ordered task list and the sparse
/// per-day records keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub config: Vec<TaskDefinition>,
    #[serde(rename = "data")]
    pub records: BTreeMap<String, DayRecord>,
}

/// Derived per-day result. Never persisted; recomputed on every query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayStats {
    pub percent: f64,
    pub wake_hour: Option<f64>,
    pub sleep_hour: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct DayStatsResponse {
    pub date: String,
    pub percent: f64,
    pub wake_hour: Option<f64>,
    pub sleep_hour: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct DayPoint {
    pub date: String,
    pub weekday: &'static str,
    pub percent: f64,
    pub wake_hour: Option<f64>,
    pub sleep_hour: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct WeekStatsResponse {
    pub monday: String,
    pub days: Vec<DayPoint>,
    /// One slot per consecutive (day, next day) pair; `null` where either
    /// the bedtime or the following wake time is missing.
    pub sleep_durations: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct SetValueRequest {
    pub date: String,
    pub task: String,
    pub value: CellValue,
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Strictly fixed-width `YYYY-MM-DD` only. chrono's `%Y-%m-%d` also accepts
/// signed and five-plus-digit years, which would break lexical range
/// comparison and can overflow date arithmetic in the week window.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let bytes = key.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());
    if !digits {
        return None;
    }
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Task list shipped on first run, matching the original app's seed.
pub fn default_config(year: i32) -> Vec<TaskDefinition> {
    let start = format!("{year}-01-01");
    let end = format!("{year}-12-31");
    let weekdays = DaySet::parse("Mon,Tue,Wed,Thu,Fri");

    let task = |name: &str, kind, weight, target: Option<&str>, days: &DaySet| TaskDefinition {
        name: name.to_string(),
        kind,
        weight,
        target: target.map(str::to_string),
        condition: target.map(|_| TimeCondition::Before),
        days: days.clone(),
        start_date: start.clone(),
        end_date: end.clone(),
    };

    vec![
        task("Wake up", TaskType::Time, 20.0, Some("06:00"), &DaySet::all()),
        task("Gym", TaskType::Bool, 20.0, None, &weekdays),
        task("Deep Work", TaskType::Bool, 20.0, None, &weekdays),
        task("Reading", TaskType::Bool, 20.0, None, &DaySet::all()),
        task("Sleep", TaskType::Time, 20.0, Some("23:00"), &DaySet::all()),
    ]
}

/// Fills in missing date bounds with the given year's full span. Configs from
/// before date ranges existed carry empty bounds; the loader and the config
/// endpoint both apply this.
pub fn migrate_config(config: &mut [TaskDefinition], year: i32) {
    for task in config.iter_mut() {
        if task.start_date.is_empty() {
            task.start_date = format!("{year}-01-01");
        }
        if task.end_date.is_empty() {
            task.end_date = format!("{year}-12-31");
        }
    }
}

pub fn current_year() -> i32 {
    chrono::Local::now().date_naive().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_set_round_trips_wire_format() {
        let days = DaySet::parse("Mon,Wed,Fri");
        assert_eq!(days.to_wire(), "Mon,Wed,Fri");
        assert!(days.contains(Weekday::Wed));
        assert!(!days.contains(Weekday::Sun));
    }

    #[test]
    fn day_set_accepts_legacy_daily_token() {
        let days = DaySet::parse("Daily");
        for day in ALL_DAYS {
            assert!(days.contains(day));
        }
    }

    #[test]
    fn day_set_drops_unknown_tokens() {
        let days = DaySet::parse("Mon, Xyz ,Sun");
        assert_eq!(days.to_wire(), "Mon,Sun");
    }

    #[test]
    fn migrate_fills_missing_bounds_only() {
        let mut config = vec![
            TaskDefinition {
                name: "Old".into(),
                kind: TaskType::Bool,
                weight: 10.0,
                target: None,
                condition: None,
                days: DaySet::all(),
                start_date: String::new(),
                end_date: String::new(),
            },
            TaskDefinition {
                name: "New".into(),
                kind: TaskType::Bool,
                weight: 10.0,
                target: None,
                condition: None,
                days: DaySet::all(),
                start_date: "2026-03-01".into(),
                end_date: "2026-03-01".into(),
            },
        ];
        migrate_config(&mut config, 2026);
        assert_eq!(config[0].start_date, "2026-01-01");
        assert_eq!(config[0].end_date, "2026-12-31");
        assert_eq!(config[1].start_date, "2026-03-01");
        assert_eq!(config[1].end_date, "2026-03-01");
    }

    #[test]
    fn date_keys_must_be_fixed_width() {
        assert!(parse_date_key("2026-01-05").is_some());
        // Signed and wide years parse under chrono's %Y but are not valid
        // keys: they defeat lexical comparison and overflow week math.
        assert_eq!(parse_date_key("+262142-12-31"), None);
        assert_eq!(parse_date_key("-2026-01-05"), None);
        assert_eq!(parse_date_key("12026-01-05"), None);
        assert_eq!(parse_date_key("2026-1-5"), None);
        assert_eq!(parse_date_key("2026-01-0x"), None);
        assert_eq!(parse_date_key("not-a-date"), None);
    }

    #[test]
    fn cell_value_deserializes_mixed_json() {
        let record: DayRecord = serde_json::from_str(
            r#"{"Gym": true, "Mood": "80", "Wake up": "06:30", "Steps": 4200}"#,
        )
        .unwrap();
        assert_eq!(record["Gym"], CellValue::Bool(true));
        assert_eq!(record["Mood"], CellValue::Text("80".into()));
        assert_eq!(record["Steps"], CellValue::Number(4200.0));
        assert_eq!(record["Mood"].as_number(), Some(80.0));
    }

    #[test]
    fn task_definition_uses_original_field_names() {
        let json = r#"{
            "name": "Wake up",
            "type": "time",
            "weight": 20,
            "target": "06:00",
            "condition": "before",
            "days": "Mon,Tue,Wed,Thu,Fri,Sat,Sun",
            "startDate": "2026-01-01",
            "endDate": "2026-12-31"
        }"#;
        let task: TaskDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(task.kind, TaskType::Time);
        assert_eq!(task.condition, Some(TimeCondition::Before));
        assert_eq!(task.start_date, "2026-01-01");

        let out = serde_json::to_value(&task).unwrap();
        assert_eq!(out["type"], "time");
        assert_eq!(out["startDate"], "2026-01-01");
        assert_eq!(out["days"], "Mon,Tue,Wed,Thu,Fri,Sat,Sun");
    }
}
