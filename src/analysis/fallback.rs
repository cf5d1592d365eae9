//! Deterministic offline analysis.
//!
//! Used whenever the remote service is unavailable or failing. No image
//! content is parsed: the image identifier is the only signal, and the rule
//! is a fixed placeholder, not a vision result.
//!
//! ```text
//! identifier contains a disease marker → 1 disease (medium, 65%, 25% area), health 55
//! otherwise                            → no disease, health 75
//! ```

use crate::analysis::result::{
    Disease, DiseaseDetection, FallbackResult, GrowthIndicators, Percent, Severity, TreeAnalysis,
};
use crate::config::FallbackConfig;

const HEALTHY_SCORE: u32 = 75;
const DISEASED_SCORE: u32 = 55;
const DISEASE_CONFIDENCE: u32 = 65;
const DISEASE_AFFECTED_AREA: u32 = 25;

/// Pure placeholder analyzer keyed on the image identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackAnalyzer {
    markers: Vec<String>,
}

impl FallbackAnalyzer {
    /// Markers are matched case-insensitively as substrings.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &FallbackConfig) -> Self {
        Self::new(&config.disease_markers)
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// True when `identifier` carries one of the disease markers.
    pub fn flags_disease(&self, identifier: &str) -> bool {
        let lowered = identifier.to_lowercase();
        self.markers.iter().any(|marker| lowered.contains(marker.as_str()))
    }

    pub fn analyze(&self, identifier: &str) -> FallbackResult {
        let (diseases, score) = if self.flags_disease(identifier) {
            (vec![placeholder_disease()], DISEASED_SCORE)
        } else {
            (Vec::new(), HEALTHY_SCORE)
        };

        FallbackResult {
            success: true,
            disease_detection: DiseaseDetection {
                detected: !diseases.is_empty(),
                diseases,
                overall_health_score: Percent::new(score),
            },
            tree_analysis: placeholder_tree(),
        }
    }
}

impl Default for FallbackAnalyzer {
    fn default() -> Self {
        Self::from_config(&FallbackConfig::default())
    }
}

fn placeholder_disease() -> Disease {
    Disease {
        name: "Disease detected".to_string(),
        confidence_score: Percent::new(DISEASE_CONFIDENCE),
        severity: Severity::Medium,
        affected_area_percent: Percent::new(DISEASE_AFFECTED_AREA),
        recommendations: vec![
            "Visual inspection recommended".to_string(),
            "Regular monitoring required".to_string(),
        ],
    }
}

fn placeholder_tree() -> TreeAnalysis {
    TreeAnalysis {
        species: "Unidentified".to_string(),
        estimated_age: "Not estimated".to_string(),
        foliage_density: Percent::new(70),
        structural_integrity: Percent::new(80),
        growth_indicators: GrowthIndicators {
            new_growth: true,
            leaf_color: "green".to_string(),
            branch_health: "good".to_string(),
        },
    }
}
