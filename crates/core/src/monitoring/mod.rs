pub mod domain;
pub mod infrastructure;
pub mod zone_monitor;
