use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;
use rust_i18n::t;

use crate::{names, views};

#[derive(Debug)]
pub enum AppError {
    NotFound(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::NotFound(what) => {
                tracing::warn!("not found: {what}");
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            }
        };

        let body = views::page(
            "Error",
            html! {
                h1 { (message) }
                p { a href=(names::CURRENT_VIEW_URL) { (t!("error.back")) } }
            },
        );
        (code, body).into_response()
    }
}

pub async fn fallback() -> AppError {
    AppError::NotFound("route")
}
