pub mod json_zone_loader;
