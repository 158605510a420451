pub mod polygon;
pub mod zone;
pub mod zone_config;
pub mod zone_locator;
