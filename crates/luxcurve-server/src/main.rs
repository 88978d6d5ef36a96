//! Luxcurve curve store server.
//!
//! The authoritative store for schedule curves. Every point-level edit is a
//! full round trip: the client sends the edit, the store applies it under
//! its own rules, and the complete updated curve comes back.
//!
//! ## Routes
//!
//! ```text
//! GET    /api/curves/             list (optional ?kind=bri|ct|hue|sat)
//! POST   /api/curves/             create { name, kind, offset?, count? }
//! GET    /api/curves/{id}         fetch one
//! PUT    /api/curves/{id}         update metadata { name?, offset? }
//! DELETE /api/curves/{id}         remove (non-default only)
//! PUT    /api/curves/{id}/{idx}   move a point { x, y }
//! POST   /api/curves/{id}/{idx}   insert a point { position }
//! DELETE /api/curves/{id}/{idx}   remove a point
//! ```

mod interpolate;
mod store;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use luxcurve_core::{Curve, CurveKind, InsertPosition};
use serde::Deserialize;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use store::{CurveStore, StoreError};

#[derive(Debug, Deserialize)]
struct ListParams {
    kind: Option<CurveKind>,
}

fn default_count() -> u32 {
    2
}

#[derive(Debug, Deserialize)]
struct CreateBody {
    name: String,
    kind: CurveKind,
    #[serde(default)]
    offset: i32,
    #[serde(default = "default_count")]
    count: u32,
}

#[derive(Debug, Deserialize)]
struct UpdateBody {
    name: Option<String>,
    offset: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct PointBody {
    x: i32,
    y: i32,
}

#[derive(Debug, Deserialize)]
struct InsertBody {
    position: InsertPosition,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Refused(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luxcurve_server=info,tower_http=info".into()),
        )
        .init();

    let store = Arc::new(CurveStore::with_defaults());

    let app = Router::new()
        .route("/api/curves/", get(list_curves).post(create_curve))
        .route(
            "/api/curves/{id}",
            get(get_curve).put(update_curve).delete(delete_curve),
        )
        .route(
            "/api/curves/{id}/{index}",
            axum::routing::put(update_point)
                .post(insert_point)
                .delete(delete_point),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store);

    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    info!("Luxcurve store listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn health() -> &'static str {
    "ok"
}

async fn list_curves(
    State(store): State<Arc<CurveStore>>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Curve>> {
    Json(store.list(params.kind))
}

async fn create_curve(
    State(store): State<Arc<CurveStore>>,
    Json(body): Json<CreateBody>,
) -> Json<Curve> {
    let curve = store.create(body.name, body.kind, body.offset, body.count);
    info!("created curve {} ({:?})", curve.id, curve.kind);
    Json(curve)
}

async fn get_curve(
    State(store): State<Arc<CurveStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Curve>, StoreError> {
    store.get(id).map(Json)
}

async fn update_curve(
    State(store): State<Arc<CurveStore>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<Curve>, StoreError> {
    store.update_meta(id, body.name, body.offset).map(Json)
}

async fn delete_curve(
    State(store): State<Arc<CurveStore>>,
    Path(id): Path<i64>,
) -> Result<Json<Curve>, StoreError> {
    let curve = store.delete(id)?;
    info!("deleted curve {id}");
    Ok(Json(curve))
}

async fn update_point(
    State(store): State<Arc<CurveStore>>,
    Path((id, index)): Path<(i64, usize)>,
    Json(body): Json<PointBody>,
) -> Result<Json<Curve>, StoreError> {
    store.update_point(id, index, body.x, body.y).map(Json)
}

async fn insert_point(
    State(store): State<Arc<CurveStore>>,
    Path((id, index)): Path<(i64, usize)>,
    Json(body): Json<InsertBody>,
) -> Result<Json<Curve>, StoreError> {
    store.insert_point(id, index, body.position).map(Json)
}

async fn delete_point(
    State(store): State<Arc<CurveStore>>,
    Path((id, index)): Path<(i64, usize)>,
) -> Result<Json<Curve>, StoreError> {
    store.delete_point(id, index).map(Json)
}
