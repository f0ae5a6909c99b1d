use crate::error::FieldError;
use crate::models::reminder::{DueReminder, Reminder, ReminderFields, ReminderRequest};
use crate::repositories::reminder_repository::ReminderRepository;
use crate::repositories::user_repository::RepositoryError;
use crate::services::company_catalog::CompanyCatalog;
use crate::services::scheduler::{self, ScheduleError};
use crate::services::validation;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ReminderServiceError {
    #[error("Invalid reminder input")]
    Validation(Vec<FieldError>),
    #[error("Unknown company: {0}")]
    InvalidCompany(String),
    #[error("Reminder not found")]
    NotFound,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

impl From<ScheduleError> for ReminderServiceError {
    fn from(err: ScheduleError) -> Self {
        let field = match err {
            ScheduleError::UnresolvedDays(_) => {
                FieldError::new("custom_days", "Custom days are required for this company")
            }
            ScheduleError::InvalidCustomDays(_) => {
                FieldError::new("custom_days", "Custom days must be at least 1")
            }
            ScheduleError::OutOfRange => {
                FieldError::new("last_entry_date", "Next send date is out of range")
            }
        };
        ReminderServiceError::Validation(vec![field])
    }
}

/// Reminder use cases: validate, resolve the company, schedule, persist.
pub struct ReminderService {
    repository: Arc<dyn ReminderRepository>,
    catalog: Arc<CompanyCatalog>,
}

impl ReminderService {
    pub fn new(repository: Arc<dyn ReminderRepository>, catalog: Arc<CompanyCatalog>) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Reminder>, ReminderServiceError> {
        Ok(self.repository.list_by_user(user_id).await?)
    }

    pub async fn get(&self, id: &str, user_id: &str) -> Result<Reminder, ReminderServiceError> {
        self.repository
            .find_by_id(id, user_id)
            .await?
            .ok_or(ReminderServiceError::NotFound)
    }

    pub async fn create(
        &self,
        user_id: &str,
        request: &ReminderRequest,
    ) -> Result<Reminder, ReminderServiceError> {
        let fields = self.schedule(request).await?;
        let reminder = self.repository.insert(user_id, &fields).await?;
        tracing::info!(
            "Created reminder {} for user {} (company {}, next send {})",
            reminder.id,
            user_id,
            reminder.company_id,
            reminder.next_send_date
        );
        Ok(reminder)
    }

    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        request: &ReminderRequest,
    ) -> Result<Reminder, ReminderServiceError> {
        let fields = self.schedule(request).await?;
        match self.repository.update(id, user_id, &fields).await {
            Ok(reminder) => {
                tracing::info!("Updated reminder {} for user {}", id, user_id);
                Ok(reminder)
            }
            Err(RepositoryError::NotFound) => Err(ReminderServiceError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: &str, user_id: &str) -> Result<(), ReminderServiceError> {
        match self.repository.delete(id, user_id).await {
            Ok(()) => {
                tracing::info!("Deleted reminder {} for user {}", id, user_id);
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(ReminderServiceError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Reminders across all users whose send date is at or before `at`.
    pub async fn list_due(
        &self,
        at: DateTime<Utc>,
    ) -> Result<Vec<DueReminder>, ReminderServiceError> {
        Ok(self.repository.list_due(at).await?)
    }

    /// Turn a request body into storable fields.
    ///
    /// Field rules run first, then the company must exist in the catalog,
    /// then the next send date is computed. `custom_days` is only kept for
    /// companies without a fixed window.
    async fn schedule(
        &self,
        request: &ReminderRequest,
    ) -> Result<ReminderFields, ReminderServiceError> {
        let input =
            validation::validate_reminder(request).map_err(ReminderServiceError::Validation)?;

        let company = self
            .catalog
            .get(&input.company_id)
            .await
            .ok_or_else(|| ReminderServiceError::InvalidCompany(input.company_id.clone()))?;

        let next_send_date =
            scheduler::compute_next_send(&input.last_entry_date, &company, input.custom_days)?;

        Ok(ReminderFields {
            company_id: input.company_id,
            company_user_id: input.company_user_id,
            last_entry_date: input.last_entry_date,
            next_send_date,
            custom_days: if company.is_custom() {
                input.custom_days
            } else {
                None
            },
        })
    }
}
