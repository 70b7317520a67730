pub mod about;
pub mod detail;
pub mod history;
pub mod home;
