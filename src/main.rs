use std::sync::Arc;
use std::time::Instant;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web::Query;
use actix_web::{get, middleware, post, web, App, HttpResponse, HttpServer, Responder};
use tracing::{error, info};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

mod error;
mod export;
mod extract;
mod parse;
mod pdf;
mod qa;
mod scrape;
mod structure;
mod types;

use crate::error::ApiError;
use crate::extract::ContentCategory;
use crate::parse::Document;
use crate::qa::{question_prompt, suggestion_prompt, GeminiClient, QaBridge};
use crate::scrape::{Fetch, HttpFetcher};
use crate::structure::PageReport;
use crate::types::{
    AnalyzeRequest, AnalyzeResponse, AskRequest, AskResponse, SaveRequest, ValidateQuery,
    ValidateResponse,
};

/// Immutable per-process state; every request works on data it owns.
struct AppState {
    fetcher: Arc<dyn Fetch>,
    qa: Arc<dyn QaBridge>,
}

fn require_valid_url(raw: Option<&str>) -> Result<Url, ApiError> {
    raw.and_then(scrape::parse_valid_url)
        .ok_or_else(|| ApiError::invalid("missing or invalid 'url'"))
}

async fn fetch_page(state: &AppState, url: &Url) -> Result<String, ApiError> {
    state.fetcher.fetch_html(url).await.map_err(|e| {
        error!(error = ?e, url = %url, "fetch failed");
        ApiError::Unreachable
    })
}

#[get("/health")]
async fn health() -> impl Responder {
    web::Json(serde_json::json!({ "status": "ok" }))
}

/* ------------------------ /validate ------------------------ */

#[get("/validate")]
async fn validate(query: Query<ValidateQuery>) -> Result<HttpResponse, ApiError> {
    let url = query
        .into_inner()
        .url
        .ok_or_else(|| ApiError::invalid("the 'url' query parameter is required"))?;
    Ok(HttpResponse::Ok().json(ValidateResponse {
        valid: scrape::validate_url(&url),
    }))
}

/* ------------------------ /analyze ------------------------ */

#[post("/analyze")]
async fn analyze_page(
    state: web::Data<AppState>,
    payload: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = payload.into_inner();
    let url = require_valid_url(req.url.as_deref())?;

    let started = Instant::now();
    let html = fetch_page(&state, &url).await?;
    // parsed tree dropped before the QA await
    let (analysis, suggestions, report) = {
        let doc = Document::parse(&html);
        let analysis = structure::analyze(&doc);
        let suggestions = structure::suggest(&analysis);
        (analysis, suggestions, PageReport::new(doc.full_text()))
    };
    let execution_time = started.elapsed().as_secs_f64();

    let prompt = suggestion_prompt(&report.qa_context, &suggestions);
    let gemini_suggestions = match state.qa.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            error!(error = ?e, url = %url, "suggestion generation failed");
            format!("Error querying the language model: {e}")
        }
    };

    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        snippet: report.snippet,
        full_content: report.full_text,
        analysis,
        suggestions,
        gemini_suggestions,
        execution_time,
    }))
}

/* ------------------------ /ask ------------------------ */

#[post("/ask")]
async fn ask(
    state: web::Data<AppState>,
    payload: web::Json<AskRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = payload.into_inner();
    let question = req
        .question
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::invalid("missing or invalid 'url' or 'question'"))?;
    let url = require_valid_url(req.url.as_deref())?;

    let html = fetch_page(&state, &url).await?;
    let content = {
        let doc = Document::parse(&html);
        extract::extract(&doc, ContentCategory::parse(&req.data_type)).into_text()
    };

    let prompt = question_prompt(&content, &question);
    let response = match state.qa.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            error!(error = ?e, url = %url, "question answering failed");
            format!("Error querying the language model: {e}")
        }
    };

    Ok(HttpResponse::Ok().json(AskResponse { question, response }))
}

/* ------------------------ /save ------------------------ */

#[post("/save")]
async fn save(payload: web::Json<SaveRequest>) -> Result<HttpResponse, ApiError> {
    let req = payload.into_inner();
    let (content, format_type) = match (req.content, req.format_type) {
        (Some(content), Some(format_type)) => (content, format_type),
        _ => {
            return Err(ApiError::invalid(
                "the 'content' and 'format_type' parameters are required",
            ))
        }
    };

    let artifact = export::export(&content, &format_type, &req.filename_base)?;
    Ok(HttpResponse::Ok()
        .content_type(artifact.mime_type)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.filename),
        ))
        .body(artifact.bytes))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Logging
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish()
        .try_init();

    // Config
    let addr = std::env::var("WEBSCOPE_BIND").unwrap_or_else(|_| "127.0.0.1:5000".into());
    let api_key = std::env::var("GOOGLE_API_KEY").expect("GOOGLE_API_KEY not set");
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".into());
    let allowed_origin =
        std::env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".into());

    let fetcher = HttpFetcher::new().expect("http client init failed");
    let qa_client = GeminiClient::new(api_key, model).expect("gemini client init failed");
    let state = web::Data::new(AppState {
        fetcher: Arc::new(fetcher),
        qa: Arc::new(qa_client),
    });

    info!("🌐 worker listening on {}", addr);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_header(header::CONTENT_TYPE)
            .supports_credentials();
        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .service(health)
            .service(validate)
            .service(analyze_page)
            .service(ask)
            .service(save)
    })
    .bind(addr)?
    .workers(2)
    .run()
    .await
}
