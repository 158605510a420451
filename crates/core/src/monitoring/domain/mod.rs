pub mod dwell_tracker;
pub mod violation;
