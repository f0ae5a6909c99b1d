pub mod company;
pub mod reminder;
pub mod user;

pub use company::Company;
pub use reminder::{DueReminder, Reminder, ReminderFields, ReminderRequest};
pub use user::{NewUser, PublicUser, User};
