pub mod flag;
pub mod user;
