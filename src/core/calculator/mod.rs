pub mod alarms;
pub mod buckets;
pub mod reducer;
pub mod session;
