use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use stores_course::{
    content::Catalog,
    router,
    simulation::{GeminiClient, SimulationService},
    AppState,
};
use tower::ServiceExt;

/// Never set by the tests, so the simulator always lacks a credential.
pub const UNSET_KEY_VAR: &str = "STORES_COURSE_IT_UNSET_API_KEY";

pub fn create_test_app() -> Router {
    // Nothing listens on the discard port; reaching it would surface as a transport error.
    create_test_app_with("http://127.0.0.1:9", UNSET_KEY_VAR)
}

pub fn create_test_app_with(api_base: &str, api_key_var: &str) -> Router {
    let catalog = Catalog::builtin().expect("built-in course should load");
    let provider = GeminiClient::new(api_base, "gemini-test");
    router(AppState::new(
        catalog,
        SimulationService::new(provider, api_key_var),
    ))
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("router should respond");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

pub async fn get(app: &Router, uri: &str, htmx: bool) -> (StatusCode, String) {
    let mut req = Request::builder().method(Method::GET).uri(uri);
    if htmx {
        req = req.header("HX-Request", "true");
    }
    send(app, req.body(Body::empty()).expect("request build should succeed")).await
}

/// An htmx POST, optionally carrying a urlencoded form.
pub async fn post(app: &Router, uri: &str, form: Option<&str>) -> (StatusCode, String) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("HX-Request", "true")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(form.map_or_else(Body::empty, |f| Body::from(f.to_owned())))
        .expect("request build should succeed");
    send(app, req).await
}
