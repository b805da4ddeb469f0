use crate::errors::AppError;
use crate::models::{
    current_year, date_key, migrate_config, parse_date_key, AppData, DayStatsResponse,
    SetValueRequest, TaskDefinition, WeekStatsResponse,
};
use crate::score::day_stats_for;
use crate::state::AppState;
use crate::stats::{build_week, build_week_at, week_start};
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Local;
use serde::Deserialize;

pub async fn index() -> Html<String> {
    let today = Local::now().date_naive();
    Html(render_index(&date_key(today), &date_key(week_start(today))))
}

/// Full snapshot for the page: task list plus all recorded values.
pub async fn get_state(State(state): State<AppState>) -> Json<AppData> {
    let data = state.data.lock().await;
    Json(data.clone())
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DayStatsResponse>, AppError> {
    if parse_date_key(&date).is_none() {
        return Err(AppError::bad_request("date must be YYYY-MM-DD"));
    }
    let data = state.data.lock().await;
    Ok(Json(to_day_response(&data, date)))
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    monday: Option<String>,
}

pub async fn get_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekStatsResponse>, AppError> {
    let data = state.data.lock().await;
    let week = match query.monday {
        Some(raw) => {
            let date = parse_date_key(&raw)
                .ok_or_else(|| AppError::bad_request("monday must be YYYY-MM-DD"))?;
            // Snap off-Monday anchors rather than rejecting them.
            build_week_at(week_start(date), &data)
        }
        None => build_week(&data),
    };
    Ok(Json(week))
}

/// Upserts one (date, task) cell and returns that date's fresh stats. The
/// cell is last-writer-wins; a task name no longer in the config is stored
/// anyway and simply never scores.
pub async fn set_value(
    State(state): State<AppState>,
    Json(payload): Json<SetValueRequest>,
) -> Result<Json<DayStatsResponse>, AppError> {
    if parse_date_key(&payload.date).is_none() {
        return Err(AppError::bad_request("date must be YYYY-MM-DD"));
    }
    if payload.task.trim().is_empty() {
        return Err(AppError::bad_request("task name must not be empty"));
    }

    let mut data = state.data.lock().await;
    data.records
        .entry(payload.date.clone())
        .or_default()
        .insert(payload.task, payload.value);

    persist_data(&state.data_path, &data).await?;

    Ok(Json(to_day_response(&data, payload.date)))
}

/// Replaces the whole task list. The page owns editing (add, reorder,
/// delete) and sends the result back in one piece, so removed tasks leave
/// their historical values orphaned, which is harmless.
pub async fn put_config(
    State(state): State<AppState>,
    Json(mut config): Json<Vec<TaskDefinition>>,
) -> Result<Json<Vec<TaskDefinition>>, AppError> {
    migrate_config(&mut config, current_year());

    let mut data = state.data.lock().await;
    data.config = config;
    persist_data(&state.data_path, &data).await?;

    Ok(Json(data.config.clone()))
}

/// Liveness ping from the page. The watchdog in `main` shuts the server
/// down once these stop arriving.
pub async fn heartbeat(State(state): State<AppState>) -> StatusCode {
    state.touch_heartbeat().await;
    StatusCode::OK
}

fn to_day_response(data: &AppData, date: String) -> DayStatsResponse {
    let stats = day_stats_for(data, &date);
    DayStatsResponse {
        date,
        percent: stats.percent,
        wake_hour: stats.wake_hour,
        sleep_hour: stats.sleep_hour,
    }
}
