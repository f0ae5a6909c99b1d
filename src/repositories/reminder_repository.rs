use crate::models::reminder::{DueReminder, Reminder, ReminderFields};
use crate::repositories::user_repository::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Reminder persistence. Every per-row operation is scoped by the owning
/// user, so a caller can never see or touch another user's rows; a row
/// owned by someone else is indistinguishable from a missing one.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ReminderRepository: Send + Sync {
    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Reminder>>;
    async fn find_by_id(&self, id: &str, user_id: &str) -> RepositoryResult<Option<Reminder>>;
    async fn insert(&self, user_id: &str, fields: &ReminderFields) -> RepositoryResult<Reminder>;
    async fn update(
        &self,
        id: &str,
        user_id: &str,
        fields: &ReminderFields,
    ) -> RepositoryResult<Reminder>;
    async fn delete(&self, id: &str, user_id: &str) -> RepositoryResult<()>;
    async fn list_due(&self, at: DateTime<Utc>) -> RepositoryResult<Vec<DueReminder>>;
}

pub struct SqliteReminderRepository {
    pool: SqlitePool,
}

impl SqliteReminderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReminderRepository for SqliteReminderRepository {
    async fn list_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, Reminder>(
            r#"
            SELECT id, user_id, company_id, company_user_id, last_entry_date,
                   next_send_date, custom_days, created_at
            FROM reminders
            WHERE user_id = ?
            ORDER BY next_send_date ASC, created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders)
    }

    async fn find_by_id(&self, id: &str, user_id: &str) -> RepositoryResult<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, Reminder>(
            r#"
            SELECT id, user_id, company_id, company_user_id, last_entry_date,
                   next_send_date, custom_days, created_at
            FROM reminders
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder)
    }

    async fn insert(&self, user_id: &str, fields: &ReminderFields) -> RepositoryResult<Reminder> {
        let reminder = Reminder {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            company_id: fields.company_id.clone(),
            company_user_id: fields.company_user_id.clone(),
            last_entry_date: fields.last_entry_date,
            next_send_date: fields.next_send_date,
            custom_days: fields.custom_days,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO reminders (id, user_id, company_id, company_user_id,
                                   last_entry_date, next_send_date, custom_days, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&reminder.id)
        .bind(&reminder.user_id)
        .bind(&reminder.company_id)
        .bind(&reminder.company_user_id)
        .bind(reminder.last_entry_date)
        .bind(reminder.next_send_date)
        .bind(reminder.custom_days)
        .bind(reminder.created_at)
        .execute(&self.pool)
        .await?;

        Ok(reminder)
    }

    async fn update(
        &self,
        id: &str,
        user_id: &str,
        fields: &ReminderFields,
    ) -> RepositoryResult<Reminder> {
        let result = sqlx::query(
            r#"
            UPDATE reminders
            SET company_id = ?, company_user_id = ?, last_entry_date = ?,
                next_send_date = ?, custom_days = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&fields.company_id)
        .bind(&fields.company_user_id)
        .bind(fields.last_entry_date)
        .bind(fields.next_send_date)
        .bind(fields.custom_days)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.find_by_id(id, user_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, id: &str, user_id: &str) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM reminders WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_due(&self, at: DateTime<Utc>) -> RepositoryResult<Vec<DueReminder>> {
        let due = sqlx::query_as::<_, DueReminder>(
            r#"
            SELECT r.id, u.email AS user_email, r.company_id, r.company_user_id,
                   r.next_send_date
            FROM reminders r
            JOIN users u ON u.id = r.user_id
            WHERE r.next_send_date <= ?
            ORDER BY r.next_send_date ASC
            "#,
        )
        .bind(at)
        .fetch_all(&self.pool)
        .await?;

        Ok(due)
    }
}
