pub mod endpoints;
pub mod session;
pub mod sites;
pub mod telemetry;
pub mod types;

pub use session::{GatewayFailure, Outcome, SessionState};
pub use types::{
    AnalysisRequest, AnalysisResult, BoundingBox, ErrorResponse, FutureYear, PredictorResult,
    ReportResult, ReportStatus,
};
