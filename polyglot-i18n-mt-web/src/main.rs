use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use polyglot_i18n::{
    EngineConfig, Language, NamingPattern, SizeCheck, catalog, resolve_codes,
};
use polyglot_i18n_mt::{
    GoogleTranslateProvider, MachineTranslator, MemorySink, MockMode, MockTranslator,
    OpenAiProvider, OutputFile, RunCoordinator, RunError, TranslationJob,
};

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const SAMPLE_FILE_NAME: &str = "sample.json";

#[derive(Deserialize)]
pub struct NamingPatternRequest {
    pub pattern: String,
    pub file_name: Option<String>,
    pub language: Option<String>,
}

#[derive(Serialize)]
pub struct NamingPatternResponse {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
}

#[derive(Deserialize)]
pub struct EstimateRequest {
    pub file_name: String,
    pub content: String,
    pub languages: Vec<String>,
}

#[derive(Serialize)]
pub struct EstimateResponse {
    pub total_units: usize,
    pub status: SizeCheck,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Deserialize)]
pub struct TranslateRequest {
    pub file_name: String,
    pub content: String,
    pub languages: Vec<String>,
    pub naming_pattern: Option<String>,
}

#[derive(Serialize)]
pub struct TranslateResponse {
    pub files: Vec<OutputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

fn run_error(err: RunError) -> ApiError {
    let status = match &err {
        RunError::Validation(_) | RunError::Parse(_) => StatusCode::BAD_REQUEST,
        RunError::SizeLimit { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        RunError::Provider { .. } => StatusCode::BAD_GATEWAY,
        RunError::Archive(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, err)
}

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<dyn MachineTranslator>,
    pub config: Arc<EngineConfig>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/languages", get(list_languages))
        .route("/api/naming-pattern", post(check_naming_pattern))
        .route("/api/estimate", post(estimate))
        .route("/api/translate", post(translate_file))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn translator_from_env() -> anyhow::Result<Arc<dyn MachineTranslator>> {
    let provider = std::env::var("POLYGLOT_PROVIDER").unwrap_or_else(|_| "openai".to_string());
    let translator: Arc<dyn MachineTranslator> = match provider.as_str() {
        "google" => Arc::new(GoogleTranslateProvider::from_env()?),
        "mock" => Arc::new(MockTranslator::new(MockMode::Suffix)),
        _ => Arc::new(OpenAiProvider::from_env()?),
    };
    Ok(translator)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();

    let config = EngineConfig::from_env()?;
    let translator = translator_from_env()?;
    info!("🌍 Starting polyglot-i18n MT Web Server with {}", translator.provider_name());

    let state = AppState {
        translator,
        config: Arc::new(config),
    };

    let bind = std::env::var("POLYGLOT_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("🚀 Server running at http://{}", bind);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

async fn list_languages() -> Json<&'static [Language]> {
    Json(catalog())
}

async fn check_naming_pattern(
    Json(request): Json<NamingPatternRequest>,
) -> Result<Json<NamingPatternResponse>, ApiError> {
    let pattern = match NamingPattern::parse(&request.pattern) {
        Ok(pattern) => pattern,
        Err(err) => {
            return Ok(Json(NamingPatternResponse {
                is_valid: false,
                reason: Some(err.to_string()),
                sample: None,
            }));
        }
    };

    let language = match request.language.as_deref() {
        Some(code) => {
            Language::from_code(code).map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?
        }
        None => catalog()[0],
    };
    let file_name = request.file_name.as_deref().unwrap_or(SAMPLE_FILE_NAME);

    Ok(Json(NamingPatternResponse {
        is_valid: true,
        reason: None,
        sample: Some(format!("For e.g {}", pattern.expand(file_name, &language))),
    }))
}

async fn estimate(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let languages =
        resolve_codes(&request.languages).map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;
    let job = TranslationJob::from_source(
        &request.content,
        &request.file_name,
        languages,
        NamingPattern::default(),
    )
    .map_err(run_error)?;

    let total_units = job.total_units();
    let status = state.config.check_size(total_units);
    Ok(Json(EstimateResponse {
        total_units,
        status,
        message: status.message(),
    }))
}

async fn translate_file(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let pattern = request
        .naming_pattern
        .as_deref()
        .unwrap_or(&state.config.default_naming_pattern);
    let pattern = NamingPattern::parse(pattern).map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;
    let languages =
        resolve_codes(&request.languages).map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;
    let job = TranslationJob::from_source(&request.content, &request.file_name, languages, pattern)
        .map_err(run_error)?;

    info!(
        "Translating {} into {:?}",
        request.file_name, request.languages
    );

    // Every request is its own run
    let coordinator = RunCoordinator::new(Arc::clone(&state.translator), (*state.config).clone());
    let sink = MemorySink::new();
    let report = coordinator.submit(job, &sink).await.map_err(|e| {
        warn!("Translation of {} failed: {}", request.file_name, e);
        run_error(e)
    })?;

    Ok(Json(match report {
        Some(report) => TranslateResponse {
            files: report.bundle.files,
            warning: report.advisory,
        },
        None => TranslateResponse {
            files: Vec::new(),
            warning: None,
        },
    }))
}
