//! Client session controller.
//!
//! `SessionState` owns everything the UI shows and is only mutated through the
//! transition methods below. Network calls are not performed here: each
//! `request_*` returns the body the UI layer must send, and the matching
//! `complete_*` applies the outcome once the call settles.

use crate::sites::CoastalSite;
use crate::telemetry::{chart_series, ChartSeries};
use crate::types::{AnalysisRequest, AnalysisResult, BoundingBox, FutureYear, PredictorResult, ReportResult};
use serde_json::{Map, Value};
use std::fmt;

pub const NOTICE_CONNECTION: &str = "Connection Error: Ensure the gateway and AI engine are running.";
pub const NOTICE_REPORT_FAILED: &str = "Failed to generate report.";
pub const NOTICE_PREDICTOR_FAILED: &str = "Failed to run AI Predictor.";
pub const NOTICE_RUN_ANALYSIS_FIRST: &str = "Please click 'Run Twin Simulation' first to generate data!";

/// Why a gateway call did not produce a result.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayFailure {
    Network(String),
    Status(u16),
    Decode(String),
}

impl fmt::Display for GatewayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayFailure::Network(e) => write!(f, "Network error: {}", e),
            GatewayFailure::Status(code) => write!(f, "Gateway returned status {}", code),
            GatewayFailure::Decode(e) => write!(f, "Failed to parse response: {}", e),
        }
    }
}

impl std::error::Error for GatewayFailure {}

pub type Outcome<T> = Result<T, GatewayFailure>;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

const GUARDIAN_WIDTH_RESERVE: f64 = 280.0;
const GUARDIAN_HEIGHT_RESERVE: f64 = 190.0;
const GUARDIAN_MARGIN: f64 = 10.0;
const FALLBACK_VEGETATION: f64 = 62.0;
const FALLBACK_EROSION: f64 = 38.0;
const FALLBACK_SCAN_RISK: f64 = 42.0;

const SCAN_LINES: [&str; 4] = [
    "Ionizing coastal drift... residual surge dampened.",
    "Mangrove lattice shows regenerative pulse.",
    "Infra-spectral sweep detected latent erosion pockets.",
    "Turbulence barrier calibrated to +3.2 resilience index.",
];

/// Floating "Guardian Watch" card.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardianWidget {
    pub visible: bool,
    pub position: Point,
    drag_offset: Option<Point>,
    pub log: Option<String>,
}

impl GuardianWidget {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            visible: true,
            position: Point {
                x: 30.0,
                y: viewport.height - 230.0,
            },
            drag_offset: None,
            log: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_offset.is_some()
    }

    pub fn start_drag(&mut self, pointer: Point) {
        self.drag_offset = Some(Point {
            x: pointer.x - self.position.x,
            y: pointer.y - self.position.y,
        });
    }

    pub fn drag_to(&mut self, pointer: Point, viewport: Viewport) -> bool {
        let Some(offset) = self.drag_offset else {
            return false;
        };
        self.position = Point {
            x: (pointer.x - offset.x)
                .max(GUARDIAN_MARGIN)
                .min(viewport.width - GUARDIAN_WIDTH_RESERVE),
            y: (pointer.y - offset.y)
                .max(GUARDIAN_MARGIN)
                .min(viewport.height - GUARDIAN_HEIGHT_RESERVE),
        };
        true
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag_offset.take().is_some()
    }

    pub fn fit_viewport(&mut self, viewport: Viewport) {
        self.position.x = self.position.x.min(viewport.width - GUARDIAN_WIDTH_RESERVE);
        self.position.y = self.position.y.min(viewport.height - GUARDIAN_HEIGHT_RESERVE);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    bounds: Option<BoundingBox>,
    target: Option<CoastalSite>,
    future_year: FutureYear,
    analysis: Option<AnalysisResult>,
    report: Option<ReportResult>,
    predictor: Option<PredictorResult>,
    loading: bool,
    show_chart: bool,
    show_report: bool,
    show_predictor: bool,
    show_overlay: bool,
    guardian: GuardianWidget,
    notice: Option<String>,
}

impl SessionState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            bounds: None,
            target: None,
            future_year: FutureYear::default(),
            analysis: None,
            report: None,
            predictor: None,
            loading: false,
            show_chart: false,
            show_report: false,
            show_predictor: false,
            show_overlay: true,
            guardian: GuardianWidget::new(viewport),
            notice: None,
        }
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn target(&self) -> Option<&CoastalSite> {
        self.target.as_ref()
    }

    pub fn future_year(&self) -> FutureYear {
        self.future_year
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn report(&self) -> Option<&ReportResult> {
        self.report.as_ref()
    }

    pub fn predictor(&self) -> Option<&PredictorResult> {
        self.predictor.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn chart_visible(&self) -> bool {
        self.show_chart
    }

    pub fn overlay_enabled(&self) -> bool {
        self.show_overlay
    }

    pub fn guardian(&self) -> &GuardianWidget {
        &self.guardian
    }

    pub fn guardian_mut(&mut self) -> &mut GuardianWidget {
        &mut self.guardian
    }

    /// Report to show, if its modal is open.
    pub fn visible_report(&self) -> Option<&ReportResult> {
        self.report.as_ref().filter(|_| self.show_report)
    }

    /// Predictor result to show, if its modal is open.
    pub fn visible_predictor(&self) -> Option<&PredictorResult> {
        self.predictor.as_ref().filter(|_| self.show_predictor)
    }

    /// Telemetry chart, only while the chart is toggled on.
    pub fn visible_chart(&self) -> Option<ChartSeries> {
        self.analysis
            .as_ref()
            .filter(|_| self.show_chart)
            .map(|result| chart_series(self.future_year, Some(result)))
    }

    /// Mask image and the viewport it is stretched over.
    pub fn mask_overlay(&self) -> Option<(&str, BoundingBox)> {
        let mask = self.analysis.as_ref()?.mask_image.as_deref()?;
        Some((mask, self.bounds?))
    }

    pub fn transect_sweep_active(&self) -> bool {
        self.show_overlay && self.analysis.is_some()
    }

    pub fn set_bounds(&mut self, bbox: BoundingBox) {
        self.bounds = Some(bbox);
    }

    /// Switching site always invalidates the previous analysis. Returns the
    /// fly-to target for the map.
    pub fn select_location(&mut self, site: CoastalSite) -> CoastalSite {
        self.target = Some(site);
        self.analysis = None;
        self.show_chart = false;
        site
    }

    pub fn set_future_year(&mut self, years: i64) {
        self.future_year = FutureYear::new(years);
    }

    /// Returns the request to send, or `None` when no viewport is known yet.
    pub fn request_analysis(&mut self) -> Option<AnalysisRequest> {
        let bbox = self.bounds?;
        self.loading = true;
        self.show_chart = false;
        Some(AnalysisRequest {
            bbox,
            future_year: self.future_year,
            show_transects: true,
        })
    }

    pub fn complete_analysis(&mut self, outcome: Outcome<AnalysisResult>) {
        self.loading = false;
        match outcome {
            Ok(result) => self.analysis = Some(result),
            Err(_) => self.notice = Some(NOTICE_CONNECTION.to_string()),
        }
    }

    pub fn request_report(&mut self) -> Value {
        self.loading = true;
        Value::Object(Map::new())
    }

    pub fn complete_report(&mut self, outcome: Outcome<ReportResult>) {
        self.loading = false;
        match outcome {
            Ok(result) => {
                self.report = Some(result);
                self.show_report = true;
            }
            Err(_) => self.notice = Some(NOTICE_REPORT_FAILED.to_string()),
        }
    }

    pub fn request_predictor(&mut self) -> Value {
        self.loading = true;
        Value::Object(Map::new())
    }

    pub fn complete_predictor(&mut self, outcome: Outcome<PredictorResult>) {
        self.loading = false;
        match outcome {
            Ok(result) => {
                self.predictor = Some(result);
                self.show_predictor = true;
            }
            Err(_) => self.notice = Some(NOTICE_PREDICTOR_FAILED.to_string()),
        }
    }

    pub fn close_report(&mut self) {
        self.show_report = false;
    }

    pub fn close_predictor(&mut self) {
        self.show_predictor = false;
    }

    /// Flips the chart. Without an analysis result this only raises a notice.
    pub fn toggle_chart(&mut self) -> bool {
        if self.analysis.is_none() {
            self.notice = Some(NOTICE_RUN_ANALYSIS_FIRST.to_string());
            return false;
        }
        self.show_chart = !self.show_chart;
        true
    }

    pub fn toggle_overlay(&mut self) {
        self.show_overlay = !self.show_overlay;
    }

    pub fn toggle_guardian(&mut self) {
        self.guardian.visible = !self.guardian.visible;
    }

    /// Bio-shield integrity shown on the Guardian card, 0..=100.
    pub fn health_score(&self) -> u8 {
        let (veg, erosion) = self
            .analysis
            .as_ref()
            .map(|r| (r.metrics.vegetation_coverage, r.metrics.erosion_risk_index))
            .unwrap_or((FALLBACK_VEGETATION, FALLBACK_EROSION));
        (veg - erosion / 3.0).round().clamp(0.0, 100.0) as u8
    }

    /// `roll` is a uniform sample in `[0, 1)`.
    pub fn deep_scan(&mut self, roll: f64) {
        let risk = self
            .analysis
            .as_ref()
            .map(|r| r.metrics.erosion_risk_index)
            .unwrap_or(FALLBACK_SCAN_RISK);
        let idx = ((roll.clamp(0.0, 1.0) * SCAN_LINES.len() as f64) as usize).min(SCAN_LINES.len() - 1);
        self.guardian.log = Some(format!("{} Risk vector {:.1}.", SCAN_LINES[idx], risk));
    }

    /// Pending blocking notification, cleared once taken.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}
