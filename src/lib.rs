rust_i18n::i18n!("locales", fallback = "en");

pub mod classroom;
pub mod content;
pub mod extractors;
pub mod handlers;
pub mod names;
pub mod progress;
pub mod quiz;
pub mod rejections;
pub mod simulation;
pub mod statics;
pub mod utils;
pub mod views;
pub mod walkthrough;

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::sync::Mutex;

use crate::{classroom::Classroom, content::Catalog, simulation::SimulationService};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub classroom: Arc<Mutex<Classroom>>,
    pub simulator: Arc<SimulationService>,
}

impl AppState {
    pub fn new(catalog: Catalog, simulator: SimulationService) -> Self {
        Self {
            catalog: Arc::new(catalog),
            classroom: Arc::new(Mutex::new(Classroom::new())),
            simulator: Arc::new(simulator),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::course::routes())
        .merge(handlers::simulation::routes())
        .layer(middleware::from_fn(csrf_check))
        .nest("/static", statics::routes())
        .fallback(rejections::fallback)
        .with_state(state)
}

async fn csrf_check(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{Method, StatusCode};
    use axum::response::IntoResponse;

    let state_changing = [Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    if state_changing.contains(req.method()) {
        let has_hx_request = req
            .headers()
            .get("HX-Request")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "true");

        if !has_hx_request {
            return (StatusCode::FORBIDDEN, "CSRF check failed").into_response();
        }
    }

    next.run(req).await
}
