use std::collections::HashSet;

use crate::equipment::domain::equipment_catalog::EquipmentCatalog;
use crate::shared::detection::Detection;

/// Associates equipment detections with a person by bounding-box overlap.
///
/// Overlap is a coarse stand-in for "worn by": equipment touching two
/// adjacent people counts for both.
#[derive(Clone, Debug, Default)]
pub struct EquipmentMatcher {
    catalog: EquipmentCatalog,
}

impl EquipmentMatcher {
    pub fn new(catalog: EquipmentCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        &self.catalog
    }

    /// Categories found on equipment overlapping the person.
    pub fn detected_categories<'a>(
        &'a self,
        person: &Detection,
        equipment: &[Detection],
    ) -> HashSet<&'a str> {
        let person_box = person.bbox();
        equipment
            .iter()
            .filter(|e| person_box.overlaps(&e.bbox()))
            .filter_map(|e| self.catalog.categorize(e.class_name()))
            .collect()
    }

    /// Required categories not found on the person, in `required` order.
    pub fn missing_equipment(
        &self,
        person: &Detection,
        equipment: &[Detection],
        required: &[String],
    ) -> Vec<String> {
        if required.is_empty() {
            return Vec::new();
        }
        let detected = self.detected_categories(person, equipment);
        required
            .iter()
            .filter(|r| !detected.contains(r.as_str()))
            .cloned()
            .collect()
    }
}
