use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::zones::domain::zone::Zone;

#[derive(Error, Debug)]
pub enum ZoneConfigError {
    #[error("failed to read zone configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid zone configuration: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("zone #{index} ('{id}') has a degenerate polygon: {vertices} vertices, at least 3 required")]
    DegeneratePolygon {
        index: usize,
        id: String,
        vertices: usize,
    },
    #[error("zone #{index} reuses identifier '{id}'")]
    DuplicateZoneId { index: usize, id: String },
    #[error("zone #{index} has an empty identifier")]
    EmptyZoneId { index: usize },
}

/// Reference image dimensions the polygons were drawn against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Validated, ordered zone set.
///
/// Zone order is configuration order; membership lookups honour it.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoneConfig {
    image_reference: String,
    image_size: ImageSize,
    zones: Vec<Zone>,
}

impl ZoneConfig {
    /// Builds a configuration, rejecting empty or repeated zone identifiers.
    pub fn new(
        image_reference: impl Into<String>,
        image_size: ImageSize,
        zones: Vec<Zone>,
    ) -> Result<Self, ZoneConfigError> {
        let mut seen = HashSet::with_capacity(zones.len());
        for (index, zone) in zones.iter().enumerate() {
            if zone.id().is_empty() {
                return Err(ZoneConfigError::EmptyZoneId { index });
            }
            if !seen.insert(zone.id()) {
                return Err(ZoneConfigError::DuplicateZoneId {
                    index,
                    id: zone.id().to_string(),
                });
            }
        }
        Ok(Self {
            image_reference: image_reference.into(),
            image_size,
            zones,
        })
    }

    pub fn image_reference(&self) -> &str {
        &self.image_reference
    }

    pub fn image_size(&self) -> ImageSize {
        self.image_size
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id() == id)
    }
}
