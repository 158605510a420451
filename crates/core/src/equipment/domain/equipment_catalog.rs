use crate::shared::constants::EQUIPMENT_CATEGORIES;

/// Maps detector labels to equipment categories.
///
/// A label belongs to the first category, in table order, that has a
/// pattern occurring in the label (case-insensitive). Labels matching no
/// pattern map to nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct EquipmentCatalog {
    categories: Vec<(String, Vec<String>)>,
}

impl EquipmentCatalog {
    pub fn new<C, P>(categories: impl IntoIterator<Item = (C, P)>) -> Self
    where
        C: Into<String>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let categories = categories
            .into_iter()
            .map(|(name, patterns)| {
                let patterns = patterns
                    .into_iter()
                    .map(|p| p.as_ref().to_lowercase())
                    .collect();
                (name.into(), patterns)
            })
            .collect();
        Self { categories }
    }

    pub fn categorize(&self, label: &str) -> Option<&str> {
        let label = label.to_lowercase();
        self.categories
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| label.contains(p.as_str())))
            .map(|(name, _)| name.as_str())
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|(c, _)| c == name)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(c, _)| c.as_str())
    }
}

impl Default for EquipmentCatalog {
    fn default() -> Self {
        Self::new(
            EQUIPMENT_CATEGORIES
                .iter()
                .map(|&(name, patterns)| (name, patterns.iter().copied())),
        )
    }
}
