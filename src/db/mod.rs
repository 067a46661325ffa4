pub mod employees;
pub mod holidays;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod requests;
pub mod stats;
