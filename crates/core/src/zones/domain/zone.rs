use crate::shared::bounding_box::Point;
use crate::zones::domain::polygon::Polygon;

/// Safety rules attached to one zone. Each rule is evaluated independently.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleSet {
    /// Equipment categories every person in the zone must wear, in
    /// configuration order.
    pub required_equipment: Vec<String>,
    /// Maximum dwell time in seconds; `None` means unlimited.
    pub max_dwell_secs: Option<u64>,
    pub restricted_access: bool,
}

impl RuleSet {
    pub fn requires_equipment(&self) -> bool {
        !self.required_equipment.is_empty()
    }
}

/// A named monitored region. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    id: String,
    name: String,
    polygon: Polygon,
    rules: RuleSet,
}

impl Zone {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        polygon: Polygon,
        rules: RuleSet,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            polygon,
            rules,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn contains(&self, p: Point) -> bool {
        self.polygon.contains(p)
    }
}
