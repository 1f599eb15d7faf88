use axum::{
    extract::{Form, Path, State},
    routing::{get, post},
    Router,
};
use maud::Markup;
use serde::Deserialize;

use super::respond;
use crate::{extractors::IsHtmx, names, rejections::AppError, walkthrough::Advance, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::CURRENT_VIEW_URL, get(current_view))
        .route(names::DASHBOARD_URL, post(dashboard))
        .route("/modules/{module_id}", post(select_module))
        .route(names::ADVANCE_URL, post(advance))
        .route(names::SELECT_ANSWER_URL, post(select_answer))
        .route(names::SUBMIT_QUIZ_URL, post(submit_quiz))
        .route(names::RETURN_TO_DASHBOARD_URL, post(return_to_dashboard))
}

async fn current_view(IsHtmx(is_htmx): IsHtmx, State(state): State<AppState>) -> Markup {
    let mut room = state.classroom.lock().await;
    respond(is_htmx, &state, &mut room)
}

async fn dashboard(IsHtmx(is_htmx): IsHtmx, State(state): State<AppState>) -> Markup {
    let mut room = state.classroom.lock().await;
    room.go_to_dashboard();
    respond(is_htmx, &state, &mut room)
}

async fn select_module(
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
    Path(module_id): Path<String>,
) -> Result<Markup, AppError> {
    let mut room = state.classroom.lock().await;
    if let Err(e) = room.select_module(&state.catalog, &module_id) {
        tracing::warn!("{e}");
        return Err(AppError::NotFound("module"));
    }
    Ok(respond(is_htmx, &state, &mut room))
}

async fn advance(IsHtmx(is_htmx): IsHtmx, State(state): State<AppState>) -> Markup {
    let mut room = state.classroom.lock().await;
    match room.advance(&state.catalog) {
        Some(Advance::QuizStarted) => tracing::debug!("quiz started"),
        Some(Advance::Section(idx)) => tracing::debug!("moved to section {idx}"),
        Some(Advance::AlreadyInQuiz) | None => {}
    }
    respond(is_htmx, &state, &mut room)
}

#[derive(Deserialize)]
struct SelectAnswerBody {
    question_id: String,
    option: usize,
}

async fn select_answer(
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
    Form(body): Form<SelectAnswerBody>,
) -> Markup {
    let mut room = state.classroom.lock().await;
    if !room.select_answer(&state.catalog, &body.question_id, body.option) {
        tracing::debug!(
            "ignored answer {} for question {}",
            body.option,
            body.question_id
        );
    }
    respond(is_htmx, &state, &mut room)
}

async fn submit_quiz(IsHtmx(is_htmx): IsHtmx, State(state): State<AppState>) -> Markup {
    let mut room = state.classroom.lock().await;
    room.submit_quiz(&state.catalog);
    respond(is_htmx, &state, &mut room)
}

async fn return_to_dashboard(IsHtmx(is_htmx): IsHtmx, State(state): State<AppState>) -> Markup {
    let mut room = state.classroom.lock().await;
    room.return_to_dashboard();
    respond(is_htmx, &state, &mut room)
}
