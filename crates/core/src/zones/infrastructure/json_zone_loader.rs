use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::equipment::domain::equipment_catalog::EquipmentCatalog;
use crate::shared::bounding_box::Point;
use crate::zones::domain::polygon::Polygon;
use crate::zones::domain::zone::{RuleSet, Zone};
use crate::zones::domain::zone_config::{ImageSize, ZoneConfig, ZoneConfigError};

#[derive(Deserialize)]
struct ZoneDocument {
    image_reference: String,
    image_size: ImageSizeEntry,
    zones: Vec<ZoneEntry>,
}

#[derive(Deserialize)]
struct ImageSizeEntry {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct ZoneEntry {
    id: String,
    name: String,
    polygon: Vec<[i32; 2]>,
    #[serde(default)]
    rules: RulesEntry,
}

#[derive(Deserialize, Default)]
struct RulesEntry {
    #[serde(default)]
    ppe_required: Vec<String>,
    #[serde(default)]
    max_dwell_time: Option<u64>,
    #[serde(default)]
    restricted_access: bool,
}

/// Reads and validates a zone configuration file.
pub fn load(path: &Path) -> Result<ZoneConfig, ZoneConfigError> {
    let json = fs::read_to_string(path).map_err(|e| ZoneConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = parse(&json)?;
    log::info!(
        "Loaded {} zones from {}",
        config.zones().len(),
        path.display()
    );
    Ok(config)
}

/// Parses and validates a zone configuration document.
///
/// Fails on the first invalid zone; no partially loaded configuration is
/// ever returned.
pub fn parse(json: &str) -> Result<ZoneConfig, ZoneConfigError> {
    let doc: ZoneDocument = serde_json::from_str(json).map_err(ZoneConfigError::Parse)?;
    let catalog = EquipmentCatalog::default();

    let zones = doc
        .zones
        .into_iter()
        .enumerate()
        .map(|(index, entry)| build_zone(index, entry, &catalog))
        .collect::<Result<Vec<_>, _>>()?;

    ZoneConfig::new(
        doc.image_reference,
        ImageSize {
            width: doc.image_size.width,
            height: doc.image_size.height,
        },
        zones,
    )
}

fn build_zone(
    index: usize,
    entry: ZoneEntry,
    catalog: &EquipmentCatalog,
) -> Result<Zone, ZoneConfigError> {
    let vertices = entry.polygon.len();
    let polygon = Polygon::new(entry.polygon.into_iter().map(Point::from).collect())
        .ok_or_else(|| ZoneConfigError::DegeneratePolygon {
            index,
            id: entry.id.clone(),
            vertices,
        })?;
    if polygon.is_zero_area() {
        log::warn!(
            "Zone '{}' has a zero-area polygon and will never match any detection",
            entry.id
        );
    }

    let rules = build_rules(&entry.id, entry.rules, catalog);
    Ok(Zone::new(entry.id, entry.name, polygon, rules))
}

fn build_rules(zone_id: &str, entry: RulesEntry, catalog: &EquipmentCatalog) -> RuleSet {
    let mut required_equipment: Vec<String> = Vec::with_capacity(entry.ppe_required.len());
    for raw in &entry.ppe_required {
        let name = raw.trim().to_lowercase();
        if name.is_empty() || required_equipment.contains(&name) {
            continue;
        }
        if !catalog.has_category(&name) {
            log::warn!(
                "Zone '{zone_id}' requires unknown equipment '{name}'; it can never be satisfied"
            );
        }
        required_equipment.push(name);
    }

    let max_dwell_secs = match entry.max_dwell_time {
        Some(0) => {
            log::warn!("Zone '{zone_id}' has max_dwell_time 0; treating dwell time as unlimited");
            None
        }
        other => other,
    };

    RuleSet {
        required_equipment,
        max_dwell_secs,
        restricted_access: entry.restricted_access,
    }
}
