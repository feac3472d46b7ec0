//! Static feature schema.
//!
//! Twenty numeric risk factors, each scored on `[0.0, 10.0]`, grouped into
//! five categories. The declaration order of [`Feature`] is the canonical
//! order the model expects; the declaration order of [`Category`] is the order
//! the wizard walks through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Number of features in the model input vector.
pub const FEATURE_COUNT: usize = 20;

/// Number of wizard categories (one step each).
pub const CATEGORY_COUNT: usize = 5;

/// Lower bound of every feature score.
pub const MIN_SCORE: f64 = 0.0;

/// Upper bound of every feature score.
pub const MAX_SCORE: f64 = 10.0;

/// Granularity of the numeric control for each feature.
pub const SCORE_STEP: f64 = 0.1;

/// Value shown for a feature the user has not set yet.
pub const DEFAULT_SCORE: f64 = 5.0;

/// A single risk factor.
///
/// Variants are declared in canonical model order, so the derived `Ord`
/// sorts features the way the model consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Feature {
    MonsoonIntensity,
    TopographyDrainage,
    RiverManagement,
    Deforestation,
    Urbanization,
    ClimateChange,
    DamsQuality,
    Siltation,
    AgriculturalPractices,
    Encroachments,
    IneffectiveDisasterPreparedness,
    DrainageSystems,
    CoastalVulnerability,
    Landslides,
    Watersheds,
    DeterioratingInfrastructure,
    PopulationScore,
    WetlandLoss,
    InadequatePlanning,
    PoliticalFactors,
}

impl Feature {
    /// All features in canonical model order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::MonsoonIntensity,
        Feature::TopographyDrainage,
        Feature::RiverManagement,
        Feature::Deforestation,
        Feature::Urbanization,
        Feature::ClimateChange,
        Feature::DamsQuality,
        Feature::Siltation,
        Feature::AgriculturalPractices,
        Feature::Encroachments,
        Feature::IneffectiveDisasterPreparedness,
        Feature::DrainageSystems,
        Feature::CoastalVulnerability,
        Feature::Landslides,
        Feature::Watersheds,
        Feature::DeterioratingInfrastructure,
        Feature::PopulationScore,
        Feature::WetlandLoss,
        Feature::InadequatePlanning,
        Feature::PoliticalFactors,
    ];

    /// Position of this feature in the model input vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the model artifact and the wire format.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::MonsoonIntensity => "MonsoonIntensity",
            Feature::TopographyDrainage => "TopographyDrainage",
            Feature::RiverManagement => "RiverManagement",
            Feature::Deforestation => "Deforestation",
            Feature::Urbanization => "Urbanization",
            Feature::ClimateChange => "ClimateChange",
            Feature::DamsQuality => "DamsQuality",
            Feature::Siltation => "Siltation",
            Feature::AgriculturalPractices => "AgriculturalPractices",
            Feature::Encroachments => "Encroachments",
            Feature::IneffectiveDisasterPreparedness => "IneffectiveDisasterPreparedness",
            Feature::DrainageSystems => "DrainageSystems",
            Feature::CoastalVulnerability => "CoastalVulnerability",
            Feature::Landslides => "Landslides",
            Feature::Watersheds => "Watersheds",
            Feature::DeterioratingInfrastructure => "DeterioratingInfrastructure",
            Feature::PopulationScore => "PopulationScore",
            Feature::WetlandLoss => "WetlandLoss",
            Feature::InadequatePlanning => "InadequatePlanning",
            Feature::PoliticalFactors => "PoliticalFactors",
        }
    }

    /// The wizard category this feature is edited in.
    pub fn category(self) -> Category {
        match self {
            Feature::MonsoonIntensity
            | Feature::ClimateChange
            | Feature::CoastalVulnerability
            | Feature::Landslides
            | Feature::Watersheds
            | Feature::TopographyDrainage => Category::EnvironmentWeather,
            Feature::Deforestation
            | Feature::Siltation
            | Feature::WetlandLoss
            | Feature::AgriculturalPractices => Category::EnvironmentalDamage,
            Feature::DamsQuality
            | Feature::DrainageSystems
            | Feature::DeterioratingInfrastructure => Category::Infrastructure,
            Feature::Urbanization
            | Feature::Encroachments
            | Feature::PopulationScore
            | Feature::InadequatePlanning => Category::UrbanizationHumanActivity,
            Feature::RiverManagement
            | Feature::IneffectiveDisasterPreparedness
            | Feature::PoliticalFactors => Category::GovernancePolicy,
        }
    }

    /// Human-readable description shown next to the control (Indonesian).
    pub fn description(self) -> &'static str {
        match self {
            Feature::MonsoonIntensity => "Tingkat Volume hujan (0-10).",
            Feature::TopographyDrainage => {
                "Tingkat buruknya drainase (semakin tinggi nilai semakin buruk) (0-10)."
            }
            Feature::RiverManagement => {
                "Kualitas buruknya dan ketidakefektivitas praktik pengelolaan sungai (semakin tinggi nilai semakin baik) (0-10)."
            }
            Feature::Deforestation => {
                "Tingkat deforestasi di wilayah tersebut (semakin tinggi nilai semakin sering terjadi)(0-10)."
            }
            Feature::Urbanization => "Tingkat urbanisasi di wilayah (0-10).",
            Feature::ClimateChange => "Dampak perubahan iklim terhadap wilayah (0-10).",
            Feature::DamsQuality => {
                "Tingkat buruknya kualitas dan status pemeliharaan bendungan (semakin tinggi nilai semakin buruk) (0-10)."
            }
            Feature::Siltation => {
                "Tingkat buruknya sedimentasi di sungai dan waduk (semakin tinggi nilai semakin buruk) (0-10)."
            }
            Feature::AgriculturalPractices => {
                "Jumlah wilayah pertanian yang dibabat (semakin tinggi nilai semakin banyak) (0-10)."
            }
            Feature::Encroachments => {
                "Tingkat buruknya penyerapan pada dataran banjir dan jalur air alami (0-10)."
            }
            Feature::IneffectiveDisasterPreparedness => {
                "Nilai buruknya Mitigasi rencana darurat, sistem peringatan, dan simulasi meningkatkan dampak banjir (semakin tinggi nilai semakin buruk) (0-10)."
            }
            Feature::DrainageSystems => {
                "Buruknya Sistem drainase (semakin tinggi nilai semakin buruk) (0-10)."
            }
            Feature::CoastalVulnerability => {
                "Jumlah area pesisir yang rentan (semakin tinggi nilai semakin banyak) (0-10)."
            }
            Feature::Landslides => {
                "Jumlah area rentan (lahan longsor) (semakin tinggi nilai semakin banyak) (0-10)."
            }
            Feature::Watersheds => {
                "Jumlah area aliran sungai dan sejenisnya (semakin tinggi nilai semakin banyak) (0-10)."
            }
            Feature::DeterioratingInfrastructure => {
                "Infrastruktur yang rusak (semakin tinggi nilai semakin banyak) (0-10)."
            }
            Feature::PopulationScore => {
                "Jumlah populasi yang dapat terpengaruh (semakin tinggi nilai semakin banyak) (0-10)."
            }
            Feature::WetlandLoss => {
                "Jumlah kehilangan lahan basah yang dapat menyerap (semakin tinggi nilai semakin banyak) (0-10)."
            }
            Feature::InadequatePlanning => {
                "Buruknya Perencanaan tata kota (semakin tinggi nilai semakin buruk) (0-10)."
            }
            Feature::PoliticalFactors => {
                "Buruknya Faktor politik mendukung pengelolaan banjir ?(semakin tinggi nilai semakin buruk) (0-10)."
            }
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownFeature(s.to_string()))
    }
}

/// A group of related features edited together in one wizard step.
///
/// Variants are declared in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    EnvironmentWeather,
    EnvironmentalDamage,
    Infrastructure,
    UrbanizationHumanActivity,
    GovernancePolicy,
}

impl Category {
    /// All categories in wizard order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::EnvironmentWeather,
        Category::EnvironmentalDamage,
        Category::Infrastructure,
        Category::UrbanizationHumanActivity,
        Category::GovernancePolicy,
    ];

    /// Category shown at wizard step `index`, if any.
    pub fn from_step(index: usize) -> Option<Category> {
        Category::ALL.get(index).copied()
    }

    /// Zero-based wizard step of this category.
    pub fn step(self) -> usize {
        self as usize
    }

    /// Stable machine identifier (matches the serde representation).
    pub fn slug(self) -> &'static str {
        match self {
            Category::EnvironmentWeather => "environment_weather",
            Category::EnvironmentalDamage => "environmental_damage",
            Category::Infrastructure => "infrastructure",
            Category::UrbanizationHumanActivity => "urbanization_human_activity",
            Category::GovernancePolicy => "governance_policy",
        }
    }

    /// Display title of the step (Indonesian).
    pub fn title(self) -> &'static str {
        match self {
            Category::EnvironmentWeather => "Lingkungan & Cuaca",
            Category::EnvironmentalDamage => "Kerusakan Lingkungan",
            Category::Infrastructure => "Infrastruktur",
            Category::UrbanizationHumanActivity => "Urbanisasi & Aktivitas Manusia",
            Category::GovernancePolicy => "Tata Kelola & Kebijakan",
        }
    }

    /// Features of this category in the order they are displayed.
    pub fn features(self) -> &'static [Feature] {
        match self {
            Category::EnvironmentWeather => &[
                Feature::MonsoonIntensity,
                Feature::ClimateChange,
                Feature::CoastalVulnerability,
                Feature::Landslides,
                Feature::Watersheds,
                Feature::TopographyDrainage,
            ],
            Category::EnvironmentalDamage => &[
                Feature::Deforestation,
                Feature::Siltation,
                Feature::WetlandLoss,
                Feature::AgriculturalPractices,
            ],
            Category::Infrastructure => &[
                Feature::DamsQuality,
                Feature::DrainageSystems,
                Feature::DeterioratingInfrastructure,
            ],
            Category::UrbanizationHumanActivity => &[
                Feature::Urbanization,
                Feature::Encroachments,
                Feature::PopulationScore,
                Feature::InadequatePlanning,
            ],
            Category::GovernancePolicy => &[
                Feature::RiverManagement,
                Feature::IneffectiveDisasterPreparedness,
                Feature::PoliticalFactors,
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Category {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == s || c.title() == s)
            .ok_or_else(|| SchemaError::UnknownCategory(s.to_string()))
    }
}

/// Whether `value` is a legal feature score.
pub fn in_range(value: f64) -> bool {
    value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value)
}

/// Snap a score to the control's 0.1 grid.
pub fn snap_to_step(value: f64) -> f64 {
    let steps_per_unit = (1.0 / SCORE_STEP).round();
    (value * steps_per_unit).round() / steps_per_unit
}

/// The model input: one value per feature, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    /// `(feature, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.iter().copied().zip(self.0.iter().copied())
    }
}
