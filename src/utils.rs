use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trims `value`, rejecting it when nothing is left.
pub fn require_text(value: &str, message: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(trimmed.to_string())
}
