pub mod analyze;
pub mod feed;
pub mod history;
pub mod uploads;
