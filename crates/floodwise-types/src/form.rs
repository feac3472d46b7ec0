//! Form state accumulated by the wizard, one category at a time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::{Category, DEFAULT_SCORE, Feature};

/// Values saved for one category.
pub type CategoryValues = BTreeMap<Feature, f64>;

/// Mapping category -> (feature -> value).
///
/// Empty at session start and after a reset. A category is only present once
/// its step has been submitted (or a template has been applied).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    categories: BTreeMap<Category, CategoryValues>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Saved values of `category`, if its step has been submitted.
    pub fn category(&self, category: Category) -> Option<&CategoryValues> {
        self.categories.get(&category)
    }

    /// Replace the saved values of one category.
    pub fn set_category(&mut self, category: Category, values: CategoryValues) {
        self.categories.insert(category, values);
    }

    /// Saved value of a single feature.
    pub fn value(&self, feature: Feature) -> Option<f64> {
        self.categories
            .get(&feature.category())
            .and_then(|values| values.get(&feature))
            .copied()
    }

    /// Value a step control shows: the saved value, or the default score.
    pub fn display_value(&self, feature: Feature) -> f64 {
        self.value(feature).unwrap_or(DEFAULT_SCORE)
    }

    /// Categories with saved values, in wizard order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryValues)> {
        self.categories.iter().map(|(c, v)| (*c, v))
    }

    pub fn clear(&mut self) {
        self.categories.clear();
    }

    /// Merge every category into one feature -> value map.
    ///
    /// Categories hold disjoint features, so nothing is overwritten.
    pub fn flatten(&self) -> BTreeMap<Feature, f64> {
        let mut flat = BTreeMap::new();
        for values in self.categories.values() {
            for (feature, value) in values {
                flat.entry(*feature).or_insert(*value);
            }
        }
        flat
    }

    /// Build a form from a flat feature map, grouping by category.
    ///
    /// Categories with no values in `flat` are left out.
    pub fn from_flat(flat: &BTreeMap<Feature, f64>) -> Self {
        let mut form = FormState::new();
        for category in Category::ALL {
            let values: CategoryValues = category
                .features()
                .iter()
                .filter_map(|f| flat.get(f).map(|v| (*f, *v)))
                .collect();
            if !values.is_empty() {
                form.set_category(category, values);
            }
        }
        form
    }

    /// Whether every feature of every category has a value.
    pub fn is_complete(&self) -> bool {
        Feature::ALL.iter().all(|f| self.value(*f).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infrastructure_values() -> CategoryValues {
        BTreeMap::from([
            (Feature::DamsQuality, 3.0),
            (Feature::DrainageSystems, 4.5),
            (Feature::DeterioratingInfrastructure, 6.1),
        ])
    }

    #[test]
    fn test_new_form_is_empty() {
        let form = FormState::new();
        assert!(form.is_empty());
        assert!(!form.is_complete());
        assert!(form.flatten().is_empty());
    }

    #[test]
    fn test_display_value_defaults_to_five() {
        let mut form = FormState::new();
        assert_eq!(form.display_value(Feature::DamsQuality), 5.0);

        form.set_category(Category::Infrastructure, infrastructure_values());
        assert_eq!(form.display_value(Feature::DamsQuality), 3.0);
        assert_eq!(form.value(Feature::Siltation), None);
    }

    #[test]
    fn test_from_flat_groups_by_category() {
        let flat: BTreeMap<Feature, f64> = Feature::ALL.iter().map(|f| (*f, 1.0)).collect();
        let form = FormState::from_flat(&flat);

        assert!(form.is_complete());
        for category in Category::ALL {
            assert_eq!(
                form.category(category).unwrap().len(),
                category.features().len()
            );
        }
        assert_eq!(form.flatten(), flat);
    }

    #[test]
    fn test_from_flat_skips_empty_categories() {
        let flat = BTreeMap::from([(Feature::Urbanization, 2.0)]);
        let form = FormState::from_flat(&flat);
        assert_eq!(form.iter().count(), 1);
        assert!(form.category(Category::UrbanizationHumanActivity).is_some());
    }

    #[test]
    fn test_clear() {
        let mut form = FormState::new();
        form.set_category(Category::Infrastructure, infrastructure_values());
        form.clear();
        assert!(form.is_empty());
    }

    #[test]
    fn test_serde_roundtrip_keeps_structure() {
        let mut form = FormState::new();
        form.set_category(Category::Infrastructure, infrastructure_values());
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["categories"]["infrastructure"]["DamsQuality"], 3.0);
        let parsed: FormState = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, form);
    }
}
