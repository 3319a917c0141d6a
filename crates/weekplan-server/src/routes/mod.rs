pub mod clients;
pub mod data;
pub mod labels;
pub mod reminders;
pub mod weeks;
