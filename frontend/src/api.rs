use coastal_shared::endpoints;
use coastal_shared::{
    AnalysisRequest, AnalysisResult, GatewayFailure, Outcome, PredictorResult, ReportResult,
};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

const NATIVE_GATEWAY: &str = "https://coaspire-server.onrender.com";
const LOCAL_GATEWAY: &str = "http://localhost:3000";

/// Packaged builds talk to the deployed gateway; web builds use
/// `COASTAL_API_BASE` at compile time or the local dev server.
pub fn resolve_api_base_url() -> String {
    if cfg!(feature = "native-shell") {
        return NATIVE_GATEWAY.to_string();
    }
    option_env!("COASTAL_API_BASE")
        .filter(|base| !base.is_empty())
        .unwrap_or(LOCAL_GATEWAY)
        .trim_end_matches('/')
        .to_string()
}

#[derive(Clone, PartialEq)]
pub struct GatewayClient {
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub async fn submit_analysis(&self, request: &AnalysisRequest) -> Outcome<AnalysisResult> {
        log::info!("Submitting analysis | year: {}", request.future_year);
        self.post(endpoints::COASTAL_ANALYSIS, request).await
    }

    pub async fn generate_report(&self, body: &Value) -> Outcome<ReportResult> {
        log::info!("Requesting strategic report");
        self.post(endpoints::GENERATE_REPORT, body).await
    }

    pub async fn run_predictor(&self, body: &Value) -> Outcome<PredictorResult> {
        log::info!("Running AI predictor");
        self.post(endpoints::AI_PREDICTOR, body).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Outcome<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = Request::post(&format!("{}{}", self.base_url, path))
            .json(body)
            .map_err(|e| GatewayFailure::Decode(e.to_string()))?
            .send()
            .await
            .map_err(|e| GatewayFailure::Network(e.to_string()))?;

        if !response.ok() {
            return Err(GatewayFailure::Status(response.status()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GatewayFailure::Decode(e.to_string()))
    }
}
