use crate::application::use_cases::stock_report::StockReportUseCase;
use crate::domain::error::ErrorClass;
use crate::infrastructure::config::{AppConfig, ServerConfig};
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

const MAX_LOG_ENTRIES: usize = 100;
const FILE_NAME_HEADER: &str = "X-File-Name";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub type LogBuffer = Arc<Mutex<Vec<LogEntry>>>;

pub struct HttpState {
    pub use_case: Arc<StockReportUseCase>,
    pub logs: LogBuffer,
}

#[derive(Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

fn error_response(class: ErrorClass, detail: String) -> HttpResponse {
    let body = ErrorBody { detail };
    match class {
        ErrorClass::BadRequest => HttpResponse::BadRequest().json(body),
        ErrorClass::Internal => HttpResponse::InternalServerError().json(body),
    }
}

/// Query parameter first, then the header
fn upload_file_name(req: &HttpRequest, query: &UploadQuery) -> Option<String> {
    query
        .filename
        .clone()
        .or_else(|| {
            req.headers()
                .get(FILE_NAME_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        })
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

#[post("/upload")]
async fn upload(
    data: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> impl Responder {
    let request_id = uuid::Uuid::new_v4();

    let Some(file_name) = upload_file_name(&req, &query) else {
        add_log(&data.logs, "WARN", "HttpApi", &format!("[{}] Upload without a file name", request_id));
        return error_response(ErrorClass::BadRequest, "No file name provided".to_string());
    };

    if body.is_empty() {
        add_log(
            &data.logs,
            "WARN",
            "HttpApi",
            &format!("[{}] Empty upload: {}", request_id, file_name),
        );
        return error_response(ErrorClass::BadRequest, "Uploaded file is empty".to_string());
    }

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("[{}] Processing {} ({} bytes)", request_id, file_name, body.len()),
    );

    let use_case = data.use_case.clone();
    let name = file_name.clone();
    let result = web::block(move || use_case.execute(&name, &body)).await;

    match result {
        Ok(Ok(report)) => {
            add_log(
                &data.logs,
                "INFO",
                "HttpApi",
                &format!(
                    "[{}] Report ready: {} items, {} categories",
                    request_id,
                    report.bar_labels.len(),
                    report.pie_labels.len()
                ),
            );
            HttpResponse::Ok().json(report)
        }
        Ok(Err(e)) => {
            let level = match e.status_class() {
                ErrorClass::BadRequest => "WARN",
                ErrorClass::Internal => "ERROR",
            };
            add_log(&data.logs, level, "HttpApi", &format!("[{}] {}: {}", request_id, file_name, e));
            error_response(e.status_class(), e.detail())
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("[{}] Worker failed: {}", request_id, e),
            );
            error_response(ErrorClass::Internal, format!("Error processing file: {}", e))
        }
    }
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = lock_logs(&data.logs);
    HttpResponse::Ok().json(&*logs)
}

// A poisoned buffer still holds valid entries
fn lock_logs(logs: &Mutex<Vec<LogEntry>>) -> MutexGuard<'_, Vec<LogEntry>> {
    logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = lock_logs(logs);
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

/// Record in the in-memory buffer and mirror to tracing
pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    match level {
        "ERROR" => tracing::error!(source, "{}", message),
        "WARN" => tracing::warn!(source, "{}", message),
        _ => tracing::info!(source, "{}", message),
    }
    add_log_entry(logs, level, source, message);
}

fn cors(server: &ServerConfig) -> Cors {
    if server.allows_any_origin() {
        return Cors::permissive();
    }

    server
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
}

pub fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .service(upload)
        .service(health)
        .service(get_logs)
}

pub fn start_server(
    config: &AppConfig,
    use_case: Arc<StockReportUseCase>,
    logs: LogBuffer,
) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState { use_case, logs });
    let server_config = config.server.clone();
    let payload_limit = server_config.max_upload_bytes;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&server_config))
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(payload_limit))
            .service(api_scope())
    })
    .bind(config.bind_address())?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ChartConfig;
    use actix_web::http::StatusCode;
    use actix_web::test;

    const REPORT_CSV: &str = "\
Inventory Status Report,,,,
Generated 2024-01-31,,,,
Material name,Vendor name,Balance qty,Min,Max
Widget,Acme,5,10,20
Gadget,Globex,25,10,20
";

    fn state() -> web::Data<HttpState> {
        let use_case = StockReportUseCase::new(ChartConfig {
            bar_width: 400,
            bar_height: 300,
            pie_size: 200,
        });
        web::Data::new(HttpState {
            use_case: Arc::new(use_case),
            logs: Arc::new(Mutex::new(Vec::new())),
        })
    }

    macro_rules! service {
        ($state:expr, $limit:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .app_data(web::PayloadConfig::new($limit))
                    .service(api_scope()),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_upload_returns_report() {
        let state = state();
        let app = service!(state, 1 << 20);

        let req = test::TestRequest::post()
            .uri("/api/upload?filename=report.csv")
            .set_payload(REPORT_CSV)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["understocked"][0]["name"], "Widget");
        assert_eq!(body["overstocked"][0]["vendor"], "Globex");
        assert_eq!(body["color_counts"], serde_json::json!({"yellow": 1, "red": 1}));
        assert!(body["charts"]["bar"].as_str().is_some_and(|s| !s.is_empty()));
    }

    #[actix_web::test]
    async fn test_file_name_from_header() {
        let state = state();
        let app = service!(state, 1 << 20);

        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header((FILE_NAME_HEADER, "report.csv"))
            .set_payload(REPORT_CSV)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_unsupported_format_is_400() {
        let state = state();
        let app = service!(state, 1 << 20);

        let req = test::TestRequest::post()
            .uri("/api/upload?filename=report.txt")
            .set_payload(REPORT_CSV)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Unsupported file format");
    }

    #[actix_web::test]
    async fn test_missing_file_name_is_400() {
        let state = state();
        let app = service!(state, 1 << 20);

        let req = test::TestRequest::post()
            .uri("/api/upload")
            .set_payload(REPORT_CSV)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_broken_xlsx_is_500() {
        let state = state();
        let app = service!(state, 1 << 20);

        let req = test::TestRequest::post()
            .uri("/api/upload?filename=report.xlsx")
            .set_payload("not a workbook")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["detail"]
            .as_str()
            .is_some_and(|d| d.starts_with("Error processing file: ")));
    }

    #[actix_web::test]
    async fn test_oversized_upload_is_413() {
        let state = state();
        let app = service!(state, 16);

        let req = test::TestRequest::post()
            .uri("/api/upload?filename=report.csv")
            .set_payload(REPORT_CSV)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[actix_web::test]
    async fn test_health_and_logs() {
        let state = state();
        let app = service!(state, 1 << 20);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");

        let req = test::TestRequest::post()
            .uri("/api/upload?filename=report.csv")
            .set_payload(REPORT_CSV)
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/logs").to_request();
        let logs: Vec<LogEntry> = test::call_and_read_body_json(&app, req).await;
        assert!(logs.iter().any(|entry| entry.message.contains("Report ready")));
    }

    #[actix_web::test]
    async fn test_log_buffer_is_bounded() {
        let logs = Mutex::new(Vec::new());
        for i in 0..(MAX_LOG_ENTRIES + 5) {
            add_log_entry(&logs, "INFO", "Test", &format!("entry {}", i));
        }

        let logs = logs.lock().unwrap();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "entry 5");
    }
}
