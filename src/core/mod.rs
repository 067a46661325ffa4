pub mod access;
pub mod calculator;
pub mod changes;
pub mod edit;
pub mod employees;
pub mod log;
pub mod overview;
pub mod punch;
pub mod reports;
pub mod requests;
