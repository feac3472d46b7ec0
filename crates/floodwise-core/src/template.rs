//! Named location templates.
//!
//! A template is a complete, fixed feature profile. Applying one replaces the
//! whole form and jumps straight to review, skipping the editing steps.

use std::collections::BTreeMap;

use serde::Serialize;

use floodwise_types::form::FormState;
use floodwise_types::schema::{Feature, FEATURE_COUNT};
use floodwise_types::wizard::{SessionState, WizardPhase};

/// A preset profile covering all twenty features.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub name: &'static str,
    /// Short button label, e.g. `"Sumatera (High Risk)"`.
    pub label: &'static str,
    /// Values in canonical feature order.
    #[serde(skip)]
    pub values: [f64; FEATURE_COUNT],
}

impl Template {
    /// The profile as a flat feature -> value map.
    pub fn feature_map(&self) -> BTreeMap<Feature, f64> {
        Feature::ALL.iter().copied().zip(self.values).collect()
    }
}

/// High-risk reference profile.
const SUMATERA: Template = Template {
    name: "Sumatera",
    label: "Sumatera (High Risk)",
    values: [
        9.2, // MonsoonIntensity
        7.8, // TopographyDrainage
        8.5, // RiverManagement
        9.0, // Deforestation
        7.5, // Urbanization
        8.8, // ClimateChange
        8.2, // DamsQuality
        8.9, // Siltation
        7.8, // AgriculturalPractices
        8.5, // Encroachments
        9.1, // IneffectiveDisasterPreparedness
        8.7, // DrainageSystems
        7.9, // CoastalVulnerability
        8.6, // Landslides
        8.4, // Watersheds
        8.8, // DeterioratingInfrastructure
        8.3, // PopulationScore
        8.9, // WetlandLoss
        9.0, // InadequatePlanning
        7.7, // PoliticalFactors
    ],
};

/// Low-risk reference profile.
const BELANDA: Template = Template {
    name: "Belanda",
    label: "Belanda (Low Risk)",
    values: [
        2.1, // MonsoonIntensity
        1.5, // TopographyDrainage
        1.2, // RiverManagement
        1.8, // Deforestation
        3.2, // Urbanization
        2.5, // ClimateChange
        1.3, // DamsQuality
        1.7, // Siltation
        2.0, // AgriculturalPractices
        1.4, // Encroachments
        1.1, // IneffectiveDisasterPreparedness
        1.0, // DrainageSystems
        2.8, // CoastalVulnerability
        1.2, // Landslides
        1.6, // Watersheds
        1.5, // DeterioratingInfrastructure
        3.5, // PopulationScore
        1.9, // WetlandLoss
        1.3, // InadequatePlanning
        1.8, // PoliticalFactors
    ],
};

/// All shipped templates, in display order.
pub const TEMPLATES: &[Template] = &[SUMATERA, BELANDA];

/// Look up a template by exact name.
pub fn find_template(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name == name)
}

/// Replace the session's form with a template and jump to review.
///
/// Returns `false` and leaves the session untouched when `name` is unknown.
pub fn apply_template(session: &mut SessionState, name: &str) -> bool {
    let Some(template) = find_template(name) else {
        tracing::debug!(template = name, "unknown template ignored");
        return false;
    };

    session.form = FormState::from_flat(&template.feature_map());
    session.phase = WizardPhase::Review;
    tracing::info!(template = template.name, "template applied");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardExt;
    use floodwise_types::schema::Category;

    #[test]
    fn test_known_template_jumps_to_review_with_exact_values() {
        for template in TEMPLATES {
            let mut session = SessionState::new();
            assert!(apply_template(&mut session, template.name));
            assert_eq!(session.phase, WizardPhase::Review);
            assert!(session.form.is_complete());
            assert_eq!(session.form.flatten(), template.feature_map());
        }
    }

    #[test]
    fn test_template_replaces_rather_than_merges() {
        let mut session = SessionState::new();
        let values: BTreeMap<String, f64> = Category::EnvironmentWeather
            .features()
            .iter()
            .map(|f| (f.as_str().to_string(), 0.0))
            .collect();
        session.submit_step(&values).unwrap();

        apply_template(&mut session, "Belanda");
        assert_eq!(session.form.value(Feature::MonsoonIntensity), Some(2.1));
        assert_eq!(session.form.flatten(), BELANDA.feature_map());
    }

    #[test]
    fn test_unknown_template_is_a_no_op() {
        let mut session = SessionState::new();
        let values: BTreeMap<String, f64> = Category::EnvironmentWeather
            .features()
            .iter()
            .map(|f| (f.as_str().to_string(), 6.0))
            .collect();
        session.submit_step(&values).unwrap();
        let before = session.clone();

        assert!(!apply_template(&mut session, "Jakarta"));
        assert!(!apply_template(&mut session, "sumatera"));
        assert_eq!(session, before);
    }

    #[test]
    fn test_template_from_predicted_phase() {
        let mut session = SessionState::new();
        apply_template(&mut session, "Sumatera");
        session.begin_prediction().unwrap();

        assert!(apply_template(&mut session, "Belanda"));
        assert_eq!(session.phase, WizardPhase::Review);
    }

    #[test]
    fn test_reference_profiles() {
        let sumatera = find_template("Sumatera").unwrap().feature_map();
        assert!(sumatera.values().all(|v| (7.5..=9.2).contains(v)));
        assert_eq!(sumatera[&Feature::MonsoonIntensity], 9.2);
        assert_eq!(sumatera[&Feature::PoliticalFactors], 7.7);

        let belanda = find_template("Belanda").unwrap().feature_map();
        assert!(belanda.values().all(|v| (1.0..=3.5).contains(v)));
        assert_eq!(belanda[&Feature::PopulationScore], 3.5);
    }
}
