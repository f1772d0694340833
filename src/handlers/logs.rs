//! CRUD handlers for daily weather logs.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};

use crate::error::{AppError, AppResult};
use crate::models::daily_log::{
    is_iso_date, CreateLogRequest, DailyLog, LogRangeQuery, TempValue, UpdateLogRequest,
};
use crate::store::{SqlParam, Store};
use crate::AppState;

const SELECT_LOGS: &str = "SELECT id, log_date, location, temp_c, condition, notes, \
     created_at, updated_at FROM daily_logs";

const SELECT_LOG_BY_ID: &str = "SELECT id, log_date, location, temp_c, condition, notes, \
     created_at, updated_at FROM daily_logs WHERE id = ?";

/// Both timestamps of a record come from a single call to this at the
/// moment of the operation, RFC 3339 UTC with millisecond precision.
fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn fetch_by_id(store: &Store, id: i64) -> AppResult<Option<DailyLog>> {
    let log = store
        .fetch_one(SELECT_LOG_BY_ID, vec![id.into()])
        .await?;
    Ok(log)
}

fn parse_temp(value: TempValue) -> AppResult<Option<f64>> {
    match value {
        TempValue::Number(n) => Ok(Some(n)),
        TempValue::Text(s) if s.is_empty() => Ok(None),
        TempValue::Text(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|_| AppError::Validation("temp_c must be a number".into())),
    }
}

pub async fn list_logs(
    State(state): State<AppState>,
    Query(range): Query<LogRangeQuery>,
) -> AppResult<Json<Vec<DailyLog>>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut params: Vec<SqlParam> = Vec::new();

    // Empty bounds behave like absent ones.
    if let Some(from) = range.from.filter(|s| !s.is_empty()) {
        clauses.push("log_date >= ?");
        params.push(from.into());
    }
    if let Some(to) = range.to.filter(|s| !s.is_empty()) {
        clauses.push("log_date <= ?");
        params.push(to.into());
    }

    let mut sql = String::from(SELECT_LOGS);
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY log_date DESC");

    let logs = state.store.fetch_all(&sql, params).await?;
    Ok(Json(logs))
}

pub async fn get_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DailyLog>> {
    let log = fetch_by_id(&state.store, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(log))
}

pub async fn create_log(
    State(state): State<AppState>,
    Json(body): Json<CreateLogRequest>,
) -> AppResult<(StatusCode, Json<DailyLog>)> {
    let log_date = match body.log_date {
        Some(d) if is_iso_date(&d) => d,
        _ => return Err(AppError::Validation("log_date must be YYYY-MM-DD".into())),
    };
    let temp_c = body.temp_c.map(parse_temp).transpose()?.flatten();

    let now = now_iso();

    // The insert itself arbitrates log_date uniqueness; no pre-check.
    let outcome = state
        .store
        .execute(
            "INSERT INTO daily_logs \
             (log_date, location, temp_c, condition, notes, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            vec![
                log_date.into(),
                body.location.into(),
                temp_c.into(),
                body.condition.into(),
                body.notes.into(),
                now.clone().into(),
                now.into(),
            ],
        )
        .await?;

    let log = fetch_by_id(&state.store, outcome.last_insert_id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("row missing after insert")))?;

    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn update_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateLogRequest>,
) -> AppResult<Json<DailyLog>> {
    if let Some(date) = &body.log_date {
        if !is_iso_date(date) {
            return Err(AppError::Validation("log_date must be YYYY-MM-DD".into()));
        }
    }

    let existing = fetch_by_id(&state.store, id)
        .await?
        .ok_or(AppError::NotFound)?;

    let log_date = body.log_date.unwrap_or(existing.log_date);
    let location = body.location.or(existing.location);
    // An empty string keeps the stored reading; this operation cannot
    // clear temp_c, only replace it with a new number.
    let temp_c = match body.temp_c {
        Some(value) => parse_temp(value)?.or(existing.temp_c),
        None => existing.temp_c,
    };
    let condition = body.condition.or(existing.condition);
    let notes = body.notes.or(existing.notes);
    let updated_at = now_iso();

    state
        .store
        .execute(
            "UPDATE daily_logs SET log_date = ?, location = ?, temp_c = ?, \
             condition = ?, notes = ?, updated_at = ? WHERE id = ?",
            vec![
                log_date.into(),
                location.into(),
                temp_c.into(),
                condition.into(),
                notes.into(),
                updated_at.into(),
                id.into(),
            ],
        )
        .await?;

    let log = fetch_by_id(&state.store, id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("row missing after update")))?;

    Ok(Json(log))
}

pub async fn delete_log(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    let outcome = state
        .store
        .execute("DELETE FROM daily_logs WHERE id = ?", vec![id.into()])
        .await?;

    if outcome.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}
