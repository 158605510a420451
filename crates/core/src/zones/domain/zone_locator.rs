use std::sync::Arc;

use crate::shared::bounding_box::Point;
use crate::zones::domain::zone::Zone;
use crate::zones::domain::zone_config::ZoneConfig;

/// Maps a point to the zone that contains it.
///
/// Zones are tested in configuration order and the first match wins, so
/// overlapping zones resolve deterministically. Each polygon's cached bounds
/// act as a prefilter before the exact test.
#[derive(Clone, Debug)]
pub struct ZoneLocator {
    config: Arc<ZoneConfig>,
}

impl ZoneLocator {
    pub fn new(config: Arc<ZoneConfig>) -> Self {
        Self { config }
    }

    pub fn locate(&self, p: Point) -> Option<&Zone> {
        self.config.zones().iter().find(|z| z.contains(p))
    }

    pub fn zones(&self) -> &[Zone] {
        self.config.zones()
    }

    pub fn config(&self) -> &Arc<ZoneConfig> {
        &self.config
    }
}
