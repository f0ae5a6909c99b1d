pub mod reminder_repository;
pub mod user_repository;

pub use reminder_repository::{ReminderRepository, SqliteReminderRepository};
pub use user_repository::{
    RepositoryError, RepositoryResult, SqliteUserRepository, UserRepository,
};
