use axum::{
    extract::{Form, State},
    routing::post,
    Router,
};
use maud::Markup;
use serde::Deserialize;

use super::respond;
use crate::{extractors::IsHtmx, names, progress::View, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::SIMULATION_URL, post(open_simulation))
        .route(names::GENERATE_SCENARIO_URL, post(generate_scenario))
        .route(names::SELECT_OPTION_URL, post(select_option))
}

async fn open_simulation(IsHtmx(is_htmx): IsHtmx, State(state): State<AppState>) -> Markup {
    let mut room = state.classroom.lock().await;
    room.go_to_simulation();
    respond(is_htmx, &state, &mut room)
}

async fn generate_scenario(IsHtmx(is_htmx): IsHtmx, State(state): State<AppState>) -> Markup {
    let ticket = {
        let mut room = state.classroom.lock().await;
        if room.progress().view() != View::Simulation {
            return respond(is_htmx, &state, &mut room);
        }
        room.simulation_mut().begin()
    };

    // The lock is released while the provider works; newer requests supersede this one.
    let result = state.simulator.generate().await;
    if let Err(e) = &result {
        tracing::error!("scenario generation failed: {e}");
    }

    let mut room = state.classroom.lock().await;
    room.simulation_mut().finish(ticket, result);
    respond(is_htmx, &state, &mut room)
}

#[derive(Deserialize)]
struct SelectOptionBody {
    option_id: String,
}

async fn select_option(
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
    Form(body): Form<SelectOptionBody>,
) -> Markup {
    let mut room = state.classroom.lock().await;
    if room.progress().view() == View::Simulation {
        room.simulation_mut().select_option(&body.option_id);
    }
    respond(is_htmx, &state, &mut room)
}
