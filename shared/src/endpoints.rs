//! Paths shared by the gateway and the client.

pub const COASTAL_ANALYSIS: &str = "/api/coastal-analysis";
pub const GENERATE_REPORT: &str = "/api/generate-report";
pub const AI_PREDICTOR: &str = "/api/ai-predictor";
pub const HEALTH: &str = "/api/health";

/// Upstream AI engine suffixes, appended to `AI_ENGINE_URL`.
pub mod upstream {
    pub const ANALYZE_COAST: &str = "/analyze-coast";
    pub const GENERATE_REPORT: &str = "/generate-report";
    pub const AI_PREDICTOR: &str = "/ai-predictor";
}
