// Mountain Huts - Web Server
// Read-only REST API over a region loaded once at startup

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use mountain_huts::{logging, MountainHut, Municipality, Region, RegionConfig, RegionReport};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state; the region is never mutated after loading
#[derive(Clone)]
struct AppState {
    region: Arc<Region>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Serialize)]
struct MunicipalityResponse {
    name: String,
    province: String,
    altitude: i32,
}

#[derive(Serialize)]
struct HutResponse {
    name: String,
    altitude: Option<i32>,
    category: String,
    beds_number: u32,
    municipality: String,
    province: String,
    altitude_range: String,
}

impl From<&Municipality> for MunicipalityResponse {
    fn from(m: &Municipality) -> Self {
        Self {
            name: m.name().to_string(),
            province: m.province().to_string(),
            altitude: m.altitude(),
        }
    }
}

fn hut_response(region: &Region, hut: &MountainHut) -> Option<HutResponse> {
    let municipality = region.municipality_of(hut)?;
    Some(HutResponse {
        name: hut.name().to_string(),
        altitude: hut.altitude(),
        category: hut.category().to_string(),
        beds_number: hut.beds_number(),
        municipality: municipality.name().to_string(),
        province: municipality.province().to_string(),
        altitude_range: region.queries().altitude_range_of(hut, municipality),
    })
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/municipalities
async fn get_municipalities(State(state): State<AppState>) -> impl IntoResponse {
    let response: Vec<MunicipalityResponse> =
        state.region.municipalities().iter().map(Into::into).collect();
    Json(ApiResponse::ok(response))
}

/// GET /api/huts
async fn get_huts(State(state): State<AppState>) -> impl IntoResponse {
    let region = &state.region;
    let response: Vec<HutResponse> = region
        .mountain_huts()
        .iter()
        .filter_map(|hut| hut_response(region, hut))
        .collect();
    Json(ApiResponse::ok(response))
}

/// GET /api/huts/:name
async fn get_hut(State(state): State<AppState>, Path(name): Path<String>) -> impl IntoResponse {
    let region = &state.region;
    match region
        .store()
        .find_mountain_hut(&name)
        .and_then(|hut| hut_response(region, hut))
    {
        Some(hut) => (StatusCode::OK, Json(ApiResponse::ok(hut))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<HutResponse>::err(format!("Hut not found: {}", name))),
        )
            .into_response(),
    }
}

/// GET /api/classify/:altitude - range label for an altitude
async fn classify(State(state): State<AppState>, Path(altitude): Path<i32>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.region.altitude_range(Some(altitude)).to_string()))
}

/// GET /api/report - every aggregate query at once
async fn get_report(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(RegionReport::build(&state.region)))
}

async fn municipalities_by_province(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.region.municipalities_count_by_province()))
}

async fn huts_by_municipality(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.region.huts_count_by_municipality_by_province()))
}

async fn huts_by_altitude(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.region.huts_count_by_altitude_range()))
}

async fn beds_by_province(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.region.total_beds_by_province()))
}

async fn max_beds_by_altitude(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.region.max_beds_by_altitude_range()))
}

async fn municipalities_by_hut_count(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.region.municipality_names_by_hut_count()))
}

fn app(region: Region) -> Router {
    let state = AppState {
        region: Arc::new(region),
    };

    let stats_routes = Router::new()
        .route("/municipalities-by-province", get(municipalities_by_province))
        .route("/huts-by-municipality", get(huts_by_municipality))
        .route("/huts-by-altitude", get(huts_by_altitude))
        .route("/beds-by-province", get(beds_by_province))
        .route("/max-beds-by-altitude", get(max_beds_by_altitude))
        .route("/municipalities-by-hut-count", get(municipalities_by_hut_count));

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/municipalities", get(get_municipalities))
        .route("/huts", get(get_huts))
        .route("/huts/:name", get(get_hut))
        .route("/classify/:altitude", get(classify))
        .route("/report", get(get_report))
        .nest("/stats", stats_routes)
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

// ============================================================================
// Main Server
// ============================================================================

fn load_config() -> Result<RegionConfig> {
    let mut config = match std::env::var("HUTS_CONFIG") {
        Ok(path) => RegionConfig::from_file(path)?,
        Err(_) => RegionConfig::default(),
    };
    if let Ok(data) = std::env::var("HUTS_DATA") {
        config.data_file = PathBuf::from(data);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging(false);

    println!("🌐 Mountain Huts - Web Server v{}", mountain_huts::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = load_config()?;
    let (mut region, load) = Region::from_file(config.name.clone(), &config.data_file)?;
    region.configure_altitude_ranges(config.parsed_ranges()?);
    println!("✓ {} ({})", load.summary(), config.data_file.display());

    let addr = std::env::var("HUTS_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/report", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app(region))
        .await
        .context("Server error")?;

    Ok(())
}
