use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One day's weather observation. `log_date` is kept as a plain
/// `YYYY-MM-DD` string and is unique across all logs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyLog {
    pub id: i64,
    pub log_date: String,
    pub location: Option<String>,
    pub temp_c: Option<f64>,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// `temp_c` arrives from the front end either as a JSON number or as a
/// string; an empty string means "no value".
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TempValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    pub log_date: Option<String>,
    pub location: Option<String>,
    pub temp_c: Option<TempValue>,
    pub condition: Option<String>,
    pub notes: Option<String>,
}

/// Partial update: every omitted field keeps its stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateLogRequest {
    pub log_date: Option<String>,
    pub location: Option<String>,
    pub temp_c: Option<TempValue>,
    pub condition: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Shape check only: four digits, dash, two digits, dash, two digits.
/// Calendar validity is deliberately not enforced.
pub fn is_iso_date(value: &str) -> bool {
    let b = value.as_bytes();
    b.len() == 10
        && b[..4].iter().all(|c| c.is_ascii_digit())
        && b[4] == b'-'
        && b[5..7].iter().all(|c| c.is_ascii_digit())
        && b[7] == b'-'
        && b[8..10].iter().all(|c| c.is_ascii_digit())
}
