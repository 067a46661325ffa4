pub mod change_tag;
pub mod current_user;
pub mod day_summary;
pub mod duration_result;
pub mod employee;
pub mod entry_type;
pub mod holiday;
pub mod request;
pub mod time_entry;
pub mod time_type;
