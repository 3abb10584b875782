pub mod course;
pub mod uploads;
