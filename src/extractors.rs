use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Extracts whether the request is an HTMX request by checking the `HX-Request` header.
pub struct IsHtmx(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for IsHtmx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(IsHtmx(is_htmx_request(parts)))
    }
}

fn is_htmx_request(parts: &Parts) -> bool {
    parts
        .headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}
