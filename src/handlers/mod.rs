pub mod course;
pub mod simulation;

use maud::Markup;

use crate::{classroom::Classroom, views, AppState};

/// Renders the learner's current view after an action has been applied.
pub(crate) fn respond(is_htmx: bool, state: &AppState, room: &mut Classroom) -> Markup {
    let (title, body) = views::current(&state.catalog, room);
    views::render(is_htmx, &title, body)
}
