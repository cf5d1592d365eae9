//! Analysis result types.
//!
//! Both variants serialize with a `mode` tag so consumers can tell where a
//! result came from:
//!
//! ```text
//! { "mode": "remote",   ...payload as returned by the service }
//! { "mode": "fallback", "success": true, "diseaseDetection": {..}, "treeAnalysis": {..} }
//! ```

use std::fmt;

use serde::Serialize;

use crate::remote::RemotePayload;

/// Provenance of an analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Remote,
    Fallback,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Remote => "remote",
            AnalysisMode::Fallback => "fallback",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A score or percentage, clamped to `[0, 100]` on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Percent(u8);

impl Percent {
    pub const MAX: Percent = Percent(100);

    pub fn new(value: u32) -> Self {
        Percent(value.min(100) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<u32> for Percent {
    fn from(value: u32) -> Self {
        Percent::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disease {
    pub name: String,
    pub confidence_score: Percent,
    pub severity: Severity,
    pub affected_area_percent: Percent,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseDetection {
    pub detected: bool,
    pub diseases: Vec<Disease>,
    pub overall_health_score: Percent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthIndicators {
    pub new_growth: bool,
    pub leaf_color: String,
    pub branch_health: String,
}

/// Descriptive placeholders for the tree itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeAnalysis {
    pub species: String,
    pub estimated_age: String,
    pub foliage_density: Percent,
    pub structural_integrity: Percent,
    pub growth_indicators: GrowthIndicators,
}

/// Locally derived placeholder analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackResult {
    pub success: bool,
    pub disease_detection: DiseaseDetection,
    pub tree_analysis: TreeAnalysis,
}

/// Payload returned by the remote service, kept exactly as received.
///
/// Never contains a `mode` field; payloads that do are rejected upstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RemoteResult(RemotePayload);

impl RemoteResult {
    pub fn new(payload: RemotePayload) -> Self {
        RemoteResult(payload)
    }

    pub fn payload(&self) -> &RemotePayload {
        &self.0
    }
}

/// Outcome of analysing one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum AnalysisResult {
    Remote(RemoteResult),
    Fallback(FallbackResult),
}

impl AnalysisResult {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            AnalysisResult::Remote(_) => AnalysisMode::Remote,
            AnalysisResult::Fallback(_) => AnalysisMode::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.mode() == AnalysisMode::Fallback
    }

    pub fn as_remote(&self) -> Option<&RemoteResult> {
        match self {
            AnalysisResult::Remote(result) => Some(result),
            AnalysisResult::Fallback(_) => None,
        }
    }

    pub fn as_fallback(&self) -> Option<&FallbackResult> {
        match self {
            AnalysisResult::Fallback(result) => Some(result),
            AnalysisResult::Remote(_) => None,
        }
    }
}

/// One result per input image, in input order.
pub type BatchResult = Vec<AnalysisResult>;
