use crate::models::{Company, PublicUser, Reminder};
use crate::services::company_catalog::CompanyCatalog;
use crate::services::reminder_service::{ReminderService, ReminderServiceError};
use crate::services::scheduler;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub user: PublicUser,
    pub company_count: usize,
    pub due_count: usize,
    pub reminders: Vec<DashboardReminder>,
}

// Reminder row joined with catalog data for display
#[derive(Debug, Serialize)]
pub struct DashboardReminder {
    #[serde(flatten)]
    pub reminder: Reminder,
    pub company_name: Option<String>,
    pub policy_link: Option<String>,
    pub effective_days: Option<i64>,
    pub due: bool,
    pub days_until_send: i64,
}

impl DashboardReminder {
    fn new(reminder: Reminder, company: Option<&Company>, now: DateTime<Utc>) -> Self {
        let effective_days = match company {
            Some(c) => scheduler::effective_days(c, reminder.custom_days)
                .ok()
                .and_then(|days| i64::try_from(days).ok()),
            None => reminder.custom_days,
        };

        Self {
            company_name: company.map(|c| c.name.clone()),
            policy_link: company.and_then(|c| c.policy_link.clone()),
            effective_days,
            due: reminder.next_send_date <= now,
            days_until_send: (reminder.next_send_date - now).num_days(),
            reminder,
        }
    }
}

pub struct DashboardService {
    reminders: Arc<ReminderService>,
    catalog: Arc<CompanyCatalog>,
}

impl DashboardService {
    pub fn new(reminders: Arc<ReminderService>, catalog: Arc<CompanyCatalog>) -> Self {
        Self { reminders, catalog }
    }

    pub async fn build(
        &self,
        user: PublicUser,
        now: DateTime<Utc>,
    ) -> Result<Dashboard, ReminderServiceError> {
        let companies = self.catalog.list().await;
        let mut reminders: Vec<DashboardReminder> = self
            .reminders
            .list(&user.id)
            .await?
            .into_iter()
            .map(|reminder| {
                let company = companies.iter().find(|c| c.id == reminder.company_id);
                DashboardReminder::new(reminder, company, now)
            })
            .collect();
        reminders.sort_by_key(|r| r.reminder.next_send_date);

        Ok(Dashboard {
            user,
            company_count: companies.len(),
            due_count: reminders.iter().filter(|r| r.due).count(),
            reminders,
        })
    }
}
