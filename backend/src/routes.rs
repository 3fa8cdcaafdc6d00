use actix_files::Files;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::web::{self, Bytes};
use actix_web::{HttpResponse, ResponseError};
use coastal_shared::endpoints::{self, upstream};
use coastal_shared::ErrorResponse;
use log::{error, info};
use serde_json::{json, Map, Value};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::upstream::{AiEngineClient, UpstreamError};

/// Inbound bodies may carry base64 imagery.
const MAX_PAYLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SubmitAnalysis,
    GenerateReport,
    RunPredictor,
}

impl Operation {
    pub fn upstream_path(self) -> &'static str {
        match self {
            Operation::SubmitAnalysis => upstream::ANALYZE_COAST,
            Operation::GenerateReport => upstream::GENERATE_REPORT,
            Operation::RunPredictor => upstream::AI_PREDICTOR,
        }
    }

    /// Static body sent to the client on any upstream failure.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::SubmitAnalysis => "Neural Network Unreachable",
            Operation::GenerateReport => "Report Gen Failed",
            Operation::RunPredictor => "AI Predictor Failed",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::SubmitAnalysis => "submitAnalysis",
            Operation::GenerateReport => "generateReport",
            Operation::RunPredictor => "runPredictor",
        })
    }
}

/// Upstream detail stays in the server log; the client only sees the
/// operation's static message.
#[derive(Error, Debug)]
#[error("{operation} failed: {source}")]
pub struct RelayError {
    pub operation: Operation,
    #[source]
    pub source: UpstreamError,
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::InternalServerError().json(ErrorResponse {
            error: self.operation.failure_message().to_string(),
        })
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: Option<PathBuf>) {
    cfg.app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
        .service(web::resource(endpoints::COASTAL_ANALYSIS).route(web::post().to(coastal_analysis)))
        .service(web::resource(endpoints::GENERATE_REPORT).route(web::post().to(generate_report)))
        .service(web::resource(endpoints::AI_PREDICTOR).route(web::post().to(ai_predictor)))
        .service(web::resource(endpoints::HEALTH).route(web::get().to(health)));

    if let Some(dir) = frontend_dir {
        cfg.service(Files::new("/", dir).index_file("index.html"));
    }
}

async fn relay(
    engine: &AiEngineClient,
    operation: Operation,
    body: Bytes,
) -> Result<HttpResponse, RelayError> {
    match engine.post_json(operation.upstream_path(), body).await {
        Ok(payload) => Ok(HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(payload)),
        Err(source) => {
            error!(
                "AI engine failure | op: {} | upstream status: {} | {}",
                operation,
                source
                    .status()
                    .map_or_else(|| "none".to_string(), |s| s.to_string()),
                source
            );
            Err(RelayError { operation, source })
        }
    }
}

async fn coastal_analysis(
    engine: web::Data<AiEngineClient>,
    body: Bytes,
) -> Result<HttpResponse, RelayError> {
    let forwarded = analysis_forward_body(&body);
    info!(
        "Processing GIS request | year: +{}",
        forwarded.get("future_year").unwrap_or(&Value::Null)
    );
    relay(&engine, Operation::SubmitAnalysis, Bytes::from(forwarded.to_string())).await
}

async fn generate_report(
    engine: web::Data<AiEngineClient>,
    body: Bytes,
) -> Result<HttpResponse, RelayError> {
    info!("Generating strategic report");
    relay(&engine, Operation::GenerateReport, passthrough_body(body)).await
}

async fn ai_predictor(
    engine: web::Data<AiEngineClient>,
    body: Bytes,
) -> Result<HttpResponse, RelayError> {
    info!("Running AI predictor");
    relay(&engine, Operation::RunPredictor, passthrough_body(body)).await
}

async fn health(engine: web::Data<AiEngineClient>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "ai_engine_url": engine.base_url(),
    }))
}

/// Keeps only the three analysis fields. `future_year` falls back to 0 for any
/// falsy value; absent `bbox`/`show_transects` stay absent.
fn analysis_forward_body(body: &[u8]) -> Value {
    let mut inbound = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    let mut forwarded = Map::new();
    if let Some(bbox) = inbound.remove("bbox") {
        forwarded.insert("bbox".into(), bbox);
    }
    let future_year = inbound
        .remove("future_year")
        .filter(is_truthy)
        .unwrap_or_else(|| json!(0));
    forwarded.insert("future_year".into(), future_year);
    if let Some(show_transects) = inbound.remove("show_transects") {
        forwarded.insert("show_transects".into(), show_transects);
    }
    Value::Object(forwarded)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn passthrough_body(body: Bytes) -> Bytes {
    if body.iter().all(u8::is_ascii_whitespace) {
        Bytes::from_static(b"{}")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpRequest, HttpServer};
    use coastal_shared::{AnalysisRequest, BoundingBox, FutureYear};
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};
    use url::Url;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<(String, Value)>>>);

    impl Recorder {
        fn calls(&self) -> Vec<(String, Value)> {
            self.0.lock().unwrap().clone()
        }
    }

    #[derive(Clone)]
    enum Reply {
        Json(Value),
        Status(u16, Value),
        Html,
    }

    async fn mock_engine(
        req: HttpRequest,
        body: Bytes,
        recorder: web::Data<Recorder>,
        reply: web::Data<Reply>,
    ) -> HttpResponse {
        let parsed = serde_json::from_slice(&body).unwrap_or(Value::Null);
        recorder.0.lock().unwrap().push((req.path().to_string(), parsed));

        match reply.get_ref() {
            Reply::Json(payload) => HttpResponse::Ok().json(payload),
            Reply::Status(code, payload) => {
                HttpResponse::build(StatusCode::from_u16(*code).unwrap()).json(payload)
            }
            Reply::Html => HttpResponse::Ok()
                .content_type(ContentType::html())
                .body("<html>maintenance</html>"),
        }
    }

    fn spawn_engine(reply: Reply) -> (String, Recorder) {
        let recorder = Recorder::default();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server_recorder = recorder.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(server_recorder.clone()))
                .app_data(web::Data::new(reply.clone()))
                .default_service(web::to(mock_engine))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();
        actix_web::rt::spawn(server);

        (format!("http://{}", addr), recorder)
    }

    fn closed_port() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn engine(base: &str) -> web::Data<AiEngineClient> {
        web::Data::new(AiEngineClient::new(&Url::parse(base).unwrap()))
    }

    fn analysis_payload() -> Value {
        json!({
            "metrics": { "vegetation_coverage": 55, "erosion_risk_index": 40 },
            "mask_image": "x"
        })
    }

    #[actix_web::test]
    async fn analysis_forwards_request_and_returns_payload_verbatim() {
        let (base, recorder) = spawn_engine(Reply::Json(analysis_payload()));
        let app = actix_test::init_service(
            App::new()
                .app_data(engine(&base))
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await;

        let request = AnalysisRequest {
            bbox: BoundingBox::new(10.0, 10.0, 20.0, 20.0),
            future_year: FutureYear::new(20),
            show_transects: true,
        };
        let req = actix_test::TestRequest::post()
            .uri(endpoints::COASTAL_ANALYSIS)
            .set_json(&request)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = actix_test::read_body(resp).await;
        assert_eq!(body, Bytes::from(serde_json::to_vec(&analysis_payload()).unwrap()));

        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, upstream::ANALYZE_COAST);
        assert_eq!(
            calls[0].1,
            json!({ "bbox": [10.0, 10.0, 20.0, 20.0], "future_year": 20, "show_transects": true })
        );
    }

    #[actix_web::test]
    async fn every_offset_reaches_upstream_unchanged() {
        let (base, recorder) = spawn_engine(Reply::Json(analysis_payload()));
        let app = actix_test::init_service(
            App::new()
                .app_data(engine(&base))
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await;

        for years in (0..=50).step_by(5) {
            let req = actix_test::TestRequest::post()
                .uri(endpoints::COASTAL_ANALYSIS)
                .set_json(json!({ "bbox": [1, 2, 3, 4], "future_year": years, "show_transects": true }))
                .to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let calls = recorder.calls();
        assert_eq!(calls.len(), 11);
        for (idx, (path, body)) in calls.iter().enumerate() {
            assert_eq!(path, upstream::ANALYZE_COAST);
            assert_eq!(body["future_year"], json!(idx * 5));
        }
    }

    #[actix_web::test]
    async fn missing_or_falsy_future_year_is_forwarded_as_zero() {
        let (base, recorder) = spawn_engine(Reply::Json(analysis_payload()));
        let app = actix_test::init_service(
            App::new()
                .app_data(engine(&base))
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await;

        for body in [
            json!({ "bbox": [1, 2, 3, 4], "show_transects": false }),
            json!({ "bbox": [1, 2, 3, 4], "future_year": null }),
            json!({ "future_year": "" }),
        ] {
            let req = actix_test::TestRequest::post()
                .uri(endpoints::COASTAL_ANALYSIS)
                .set_json(body)
                .to_request();
            actix_test::call_service(&app, req).await;
        }

        let calls = recorder.calls();
        assert_eq!(calls[0].1, json!({ "bbox": [1, 2, 3, 4], "future_year": 0, "show_transects": false }));
        assert_eq!(calls[1].1, json!({ "bbox": [1, 2, 3, 4], "future_year": 0 }));
        assert_eq!(calls[2].1, json!({ "future_year": 0 }));
    }

    #[actix_web::test]
    async fn upstream_error_collapses_to_static_analysis_message() {
        let (base, _) = spawn_engine(Reply::Status(
            422,
            json!({ "error": "bbox must have four coordinates" }),
        ));
        let app = actix_test::init_service(
            App::new()
                .app_data(engine(&base))
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri(endpoints::COASTAL_ANALYSIS)
            .set_json(json!({ "bbox": "garbage" }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Neural Network Unreachable" }));
    }

    #[actix_web::test]
    async fn unreachable_engine_maps_each_operation_to_its_message() {
        let app = actix_test::init_service(
            App::new()
                .app_data(engine(&closed_port()))
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await;

        for (uri, message) in [
            (endpoints::COASTAL_ANALYSIS, "Neural Network Unreachable"),
            (endpoints::GENERATE_REPORT, "Report Gen Failed"),
            (endpoints::AI_PREDICTOR, "AI Predictor Failed"),
        ] {
            let req = actix_test::TestRequest::post()
                .uri(uri)
                .set_json(json!({}))
                .to_request();
            let resp = actix_test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body: Value = actix_test::read_body_json(resp).await;
            assert_eq!(body, json!({ "error": message }));
        }
    }

    #[actix_web::test]
    async fn non_json_success_body_is_a_failure() {
        let (base, _) = spawn_engine(Reply::Html);
        let app = actix_test::init_service(
            App::new()
                .app_data(engine(&base))
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri(endpoints::AI_PREDICTOR)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "AI Predictor Failed" }));
    }

    #[actix_web::test]
    async fn report_forwards_empty_body_as_object_and_returns_identical_payloads() {
        let report = json!({
            "ai_recommendation": "Zone is stable. Maintain current monitoring protocols.",
            "timeline_data": []
        });
        let (base, recorder) = spawn_engine(Reply::Json(report.clone()));
        let app = actix_test::init_service(
            App::new()
                .app_data(engine(&base))
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await;

        let mut bodies = Vec::new();
        for _ in 0..2 {
            let req = actix_test::TestRequest::post()
                .uri(endpoints::GENERATE_REPORT)
                .to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            bodies.push(actix_test::read_body_json::<Value, _>(resp).await);
        }

        assert_eq!(bodies[0], report);
        assert_eq!(bodies[0], bodies[1]);
        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls
            .iter()
            .all(|(path, body)| path == upstream::GENERATE_REPORT && *body == json!({})));
    }

    #[actix_web::test]
    async fn predictor_passes_caller_body_through() {
        let (base, recorder) = spawn_engine(Reply::Json(json!({ "gis_image": "AAAA" })));
        let app = actix_test::init_service(
            App::new()
                .app_data(engine(&base))
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri(endpoints::AI_PREDICTOR)
            .set_json(json!({ "site": "Puri Beach, Odisha", "future_year": 0 }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            recorder.calls()[0],
            (
                upstream::AI_PREDICTOR.to_string(),
                json!({ "site": "Puri Beach, Odisha", "future_year": 0 })
            )
        );
    }

    #[actix_web::test]
    async fn health_does_not_touch_the_engine() {
        let app = actix_test::init_service(
            App::new()
                .app_data(engine(&closed_port()))
                .configure(|cfg| configure_routes(cfg, None)),
        )
        .await;

        let req = actix_test::TestRequest::get().uri(endpoints::HEALTH).to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
    }

    #[test]
    fn truthiness_follows_json_falsy_values() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{} should be falsy", falsy);
        }
        for truthy in [json!(5), json!("20"), json!(true), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{} should be truthy", truthy);
        }
    }

    #[test]
    fn malformed_analysis_body_forwards_only_the_default_year() {
        assert_eq!(analysis_forward_body(b"not json"), json!({ "future_year": 0 }));
        assert_eq!(analysis_forward_body(b""), json!({ "future_year": 0 }));
        assert_eq!(analysis_forward_body(b"[1,2]"), json!({ "future_year": 0 }));
    }

    #[test]
    fn analysis_body_drops_unknown_fields() {
        let forwarded = analysis_forward_body(br#"{"bbox":[1,2,3,4],"future_year":15,"extra":true}"#);
        assert_eq!(forwarded, json!({ "bbox": [1, 2, 3, 4], "future_year": 15 }));
    }

    #[test]
    fn passthrough_keeps_raw_bytes() {
        assert_eq!(passthrough_body(Bytes::new()), Bytes::from_static(b"{}"));
        assert_eq!(passthrough_body(Bytes::from_static(b"  \n")), Bytes::from_static(b"{}"));
        assert_eq!(
            passthrough_body(Bytes::from_static(b"not json")),
            Bytes::from_static(b"not json")
        );
    }

    #[test]
    fn relay_error_hides_upstream_detail() {
        let err = RelayError {
            operation: Operation::GenerateReport,
            source: UpstreamError::Status {
                status: 503,
                body: "engine overloaded".into(),
            },
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("engine overloaded"));
        assert_eq!(Operation::GenerateReport.to_string(), "generateReport");
    }
}
