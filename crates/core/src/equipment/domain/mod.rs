pub mod equipment_catalog;
pub mod equipment_matcher;
