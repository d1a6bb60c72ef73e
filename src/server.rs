use std::io;
use std::io::ErrorKind;
use std::sync::Arc;
use std::time::Duration;

use ntex::http::StatusCode;
use ntex::web;
use ntex::web::HttpRequest;
use serde::Serialize;
use spdlog::{error, info, warn};

use crate::config::{self, Config, Defaults};
use crate::content_store::ContentStore;
use crate::error::StoreError;
use crate::health::LivenessCheck;
use crate::metrics::metric_handler::MetricHandler;
use crate::metrics::metric_publisher::MetricPublisher;
use crate::metrics::MetricRegistry;
use crate::query_string::QueryString;

struct AppState {
    store: ContentStore,
    liveness: LivenessCheck,
    registry: Arc<MetricRegistry>,
    defaults: Defaults,
}

fn query_of(req: &HttpRequest) -> QueryString {
    QueryString::from(req.uri().query().unwrap_or(""))
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> web::HttpResponse {
    match serde_json::to_string(value) {
        Ok(body) => web::HttpResponse::build(status)
            .content_type("application/json")
            .body(body),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error serializing response: {}", e)),
    }
}

fn error_response(err: &StoreError) -> web::HttpResponse {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!("Error fetching content: {}", err);
    }
    web::HttpResponse::build(status)
        .content_type("text/plain; charset=utf-8")
        .body(err.to_string())
}

fn bad_request(desc: String) -> web::HttpResponse {
    web::HttpResponse::BadRequest()
        .content_type("text/plain; charset=utf-8")
        .body(desc)
}

#[web::get("/post/{date}/{title}")]
async fn find_post(req: HttpRequest, path: web::types::Path<(String, String)>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let (date, title) = path.into_inner();
    let qs = query_of(&req);
    let (lang, content_type) = match (qs.get_lang(state.defaults.lang), qs.get_type(state.defaults.content_type)) {
        (Ok(lang), Ok(content_type)) => (lang, content_type),
        (Err(e), _) | (_, Err(e)) => return bad_request(e),
    };

    match state.store.read(lang, content_type, &date, &title) {
        Ok(item) => json_response(StatusCode::OK, &item),
        Err(e) => error_response(&e),
    }
}

#[web::get("/last")]
async fn find_last(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let qs = query_of(&req);
    let (lang, content_type, limit) = match (
        qs.get_lang(state.defaults.lang),
        qs.get_type(state.defaults.content_type),
        qs.get_limit(state.defaults.max_limit),
    ) {
        (Ok(lang), Ok(content_type), Ok(limit)) => (lang, content_type, limit),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => return bad_request(e),
    };

    match state.store.read_recent(lang, content_type, limit) {
        Ok(items) => json_response(StatusCode::OK, &items),
        Err(e) => error_response(&e),
    }
}

#[web::get("/health/live")]
async fn liveness_check(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let report = state.liveness.check(&state.store);
    let status = if report.is_up() {
        StatusCode::OK
    } else {
        warn!("Liveness check is down: {:?}", report.checks);
        StatusCode::SERVICE_UNAVAILABLE
    };
    json_response(status, &report)
}

#[web::get("/metrics")]
async fn metrics_snapshot(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let snapshot = state.registry.snapshot(state.store.usable_space_mb().ok());
    json_response(StatusCode::OK, &snapshot)
}

fn start_metrics(metrics_cfg: &config::Metrics, app_state: &Arc<AppState>) -> Option<MetricHandler> {
    let Some(ref location) = metrics_cfg.location else {
        warn!("Metrics location not set. Metrics are only served on /metrics");
        return None;
    };

    let publisher = match MetricPublisher::new(location) {
        Ok(publisher) => publisher,
        Err(e) => {
            error!("Error creating metrics file {}: {}", location.display(), e);
            return None;
        }
    };

    let period = Duration::from_secs(metrics_cfg.time_slot_secs.unwrap_or(60).max(1));
    let probe_state = app_state.clone();
    let space_probe = Box::new(move || probe_state.store.usable_space_mb().ok());
    Some(MetricHandler::start(app_state.registry.clone(), publisher, space_probe, period))
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let registry = Arc::new(MetricRegistry::new());
    let store = ContentStore::from_config(&config.storage, registry.clone())
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.to_string()))?;

    let root_dir = config.storage.root_dir.display();
    if store.storage_root_exists() {
        info!("Serving content from {}", root_dir);
    } else {
        warn!("Storage directory {} does not exist", root_dir);
    }

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState {
        store,
        liveness: LivenessCheck::from_config(&config.health),
        registry,
        defaults: config.defaults,
    });

    // Publishing stops when the handler is dropped with the server
    let _metric_handler = config.metrics.as_ref().and_then(|metrics_cfg| start_metrics(metrics_cfg, &app_state));

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(find_post)
            .service(find_last)
            .service(liveness_check)
            .service(metrics_snapshot)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
