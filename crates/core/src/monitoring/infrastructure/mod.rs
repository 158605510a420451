pub mod shared_dwell_tracker;
