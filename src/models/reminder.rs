use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub user_id: String,
    pub company_id: String,
    pub company_user_id: String,
    pub last_entry_date: DateTime<Utc>,
    pub next_send_date: DateTime<Utc>,
    pub custom_days: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/reminders` and `PUT /api/reminders/{id}`.
///
/// Every field defaults so that a partially filled body reaches validation
/// and gets per-field messages instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReminderRequest {
    #[serde(default)]
    pub company_id: String,
    #[serde(default)]
    pub company_user_id: String,
    #[serde(default)]
    pub last_entry_date: String,
    #[serde(default)]
    pub custom_days: Option<i64>,
}

/// Validated, scheduled values ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderFields {
    pub company_id: String,
    pub company_user_id: String,
    pub last_entry_date: DateTime<Utc>,
    pub next_send_date: DateTime<Utc>,
    pub custom_days: Option<i64>,
}

// A due reminder joined with its owner's address, for the operator CLI
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DueReminder {
    pub id: String,
    pub user_email: String,
    pub company_id: String,
    pub company_user_id: String,
    pub next_send_date: DateTime<Utc>,
}
