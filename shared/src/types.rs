use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Map viewport in geographic degrees, serialized as `[south, west, north, east]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from([south, west, north, east]: [f64; 4]) -> Self {
        Self::new(south, west, north, east)
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.south, bbox.west, bbox.north, bbox.east]
    }
}

/// Predictive horizon in years. Always a multiple of 5 in `[0, 50]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct FutureYear(u32);

impl FutureYear {
    pub const MAX: u32 = 50;
    pub const STEP: u32 = 5;

    /// Clamps into range and snaps down to the step.
    pub fn new(years: i64) -> Self {
        let clamped = years.clamp(0, Self::MAX as i64) as u32;
        Self(clamped - clamped % Self::STEP)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl<'de> Deserialize<'de> for FutureYear {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(deserializer).map(FutureYear::new)
    }
}

impl fmt::Display for FutureYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub bbox: BoundingBox,
    pub future_year: FutureYear,
    pub show_transects: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub vegetation_coverage: f64,
    pub erosion_risk_index: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Upstream analysis payload. Only the mask and metrics are read; the rest is
/// kept so the value re-serializes unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metrics: Metrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    pub ai_recommendation: String,
    #[serde(default)]
    pub timeline_data: Vec<TimelineRow>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    #[serde(deserialize_with = "deserialize_label")]
    pub year: String,
    pub vegetation: f64,
    pub erosion_risk: f64,
    pub restoration_potential: f64,
    pub status: ReportStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// The engine labels years as "+5 Years" but older builds sent bare numbers
fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "Expected string or number, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    Stable,
    Normal,
    Warning,
    Critical,
    Other(String),
}

impl ReportStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReportStatus::Stable => "STABLE",
            ReportStatus::Normal => "NORMAL",
            ReportStatus::Warning => "WARNING",
            ReportStatus::Critical => "CRITICAL",
            ReportStatus::Other(s) => s,
        }
    }
}

impl From<String> for ReportStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "STABLE" => ReportStatus::Stable,
            "NORMAL" => ReportStatus::Normal,
            "WARNING" => ReportStatus::Warning,
            "CRITICAL" => ReportStatus::Critical,
            _ => ReportStatus::Other(s),
        }
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorSummary {
    pub classification: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorResult {
    #[serde(default)]
    pub visit_points: Vec<VisitPoint>,
    #[serde(default)]
    pub graph_data: Vec<f64>,
    pub summary: PredictorSummary,
    pub gis_image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictorResult {
    /// Image source usable in an `<img src>`, whether or not the engine
    /// already prefixed the base64 payload.
    pub fn gis_image_src(&self) -> String {
        if self.gis_image.starts_with("data:") {
            self.gis_image.clone()
        } else {
            format!("data:image/png;base64,{}", self.gis_image)
        }
    }

    /// Visit points paired with their graph value, when one exists.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &VisitPoint, Option<f64>)> {
        self.visit_points
            .iter()
            .enumerate()
            .map(|(idx, point)| (idx, point, self.graph_data.get(idx).copied()))
    }
}

/// Error body returned by every gateway operation on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
