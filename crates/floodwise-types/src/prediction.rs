//! Prediction result and risk classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered flood risk levels derived from the predicted probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "RENDAH")]
    Low,
    #[serde(rename = "SEDANG")]
    Moderate,
    #[serde(rename = "TINGGI")]
    High,
    #[serde(rename = "SANGAT TINGGI")]
    VeryHigh,
}

/// Severity tag used by the presentation layer to pick a message style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Probability thresholds between consecutive risk levels.
pub const MODERATE_THRESHOLD: f64 = 0.35;
pub const HIGH_THRESHOLD: f64 = 0.50;
pub const VERY_HIGH_THRESHOLD: f64 = 0.65;

impl RiskLevel {
    /// Classify a probability using half-open intervals.
    ///
    /// | p range          | level          |
    /// |------------------|----------------|
    /// | p < 0.35         | RENDAH         |
    /// | 0.35 <= p < 0.50 | SEDANG         |
    /// | 0.50 <= p < 0.65 | TINGGI         |
    /// | p >= 0.65        | SANGAT TINGGI  |
    pub fn from_probability(p: f64) -> Self {
        if p < MODERATE_THRESHOLD {
            RiskLevel::Low
        } else if p < HIGH_THRESHOLD {
            RiskLevel::Moderate
        } else if p < VERY_HIGH_THRESHOLD {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "RENDAH",
            RiskLevel::Moderate => "SEDANG",
            RiskLevel::High => "TINGGI",
            RiskLevel::VeryHigh => "SANGAT TINGGI",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            RiskLevel::Low => Severity::Info,
            RiskLevel::Moderate | RiskLevel::High => Severity::Warning,
            RiskLevel::VeryHigh => Severity::Critical,
        }
    }

    /// Hex color of the result panel.
    pub fn color(self) -> &'static str {
        match self {
            RiskLevel::Low => "#28a745",
            RiskLevel::Moderate => "#ffc107",
            RiskLevel::High => "#fd7e14",
            RiskLevel::VeryHigh => "#dc3545",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            RiskLevel::Low => "🟢",
            RiskLevel::Moderate => "🟡",
            RiskLevel::High => "🟠",
            RiskLevel::VeryHigh => "🔴",
        }
    }

    /// Recommendation text shown under the result (Indonesian).
    pub fn recommendation(self) -> &'static str {
        match self {
            RiskLevel::Low => "Risiko banjir rendah. Tetap pantau kondisi cuaca dan lingkungan.",
            RiskLevel::Moderate => {
                "Risiko banjir sedang. Persiapkan rencana evakuasi dan monitor perkembangan."
            }
            RiskLevel::High => "Risiko banjir tinggi! Segera lakukan mitigasi dan siapkan evakuasi.",
            RiskLevel::VeryHigh => {
                "RISIKO BANJIR SANGAT TINGGI! Evakuasi segera dan hubungi pihak berwenang!"
            }
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Flood probability in `[0, 1]`.
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub severity: Severity,
    pub color: String,
    pub recommendation: String,
}

impl PredictionResult {
    /// Derive the full result from a probability already clamped to `[0, 1]`.
    pub fn from_probability(probability: f64) -> Self {
        let risk_level = RiskLevel::from_probability(probability);
        Self {
            probability,
            risk_level,
            severity: risk_level.severity(),
            color: risk_level.color().to_string(),
            recommendation: risk_level.recommendation().to_string(),
        }
    }

    /// Probability formatted as a percentage with two decimals, e.g. `"90.65%"`.
    pub fn percent(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(RiskLevel::from_probability(0.349999), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.35), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_probability(0.499999), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_probability(0.50), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(0.649999), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(0.65), RiskLevel::VeryHigh);
    }

    #[test]
    fn test_classification_extremes() {
        assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(1.0), RiskLevel::VeryHigh);
    }

    #[test]
    fn test_labels_and_severity() {
        assert_eq!(RiskLevel::Low.label(), "RENDAH");
        assert_eq!(RiskLevel::VeryHigh.label(), "SANGAT TINGGI");
        assert_eq!(RiskLevel::Low.severity(), Severity::Info);
        assert_eq!(RiskLevel::Moderate.severity(), Severity::Warning);
        assert_eq!(RiskLevel::High.severity(), Severity::Warning);
        assert_eq!(RiskLevel::VeryHigh.severity(), Severity::Critical);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::High < RiskLevel::VeryHigh);
    }

    #[test]
    fn test_result_from_probability() {
        let result = PredictionResult::from_probability(0.9065);
        assert_eq!(result.risk_level, RiskLevel::VeryHigh);
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(result.color, "#dc3545");
        assert_eq!(result.percent(), "90.65%");
    }

    #[test]
    fn test_result_serializes_labels() {
        let result = PredictionResult::from_probability(0.42);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["risk_level"], "SEDANG");
        assert_eq!(json["severity"], "warning");
    }
}
