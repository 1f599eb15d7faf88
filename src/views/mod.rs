pub mod dashboard;
pub mod layout;
pub mod module;
pub mod quiz;
pub mod sidebar;
pub mod simulation;

pub use layout::{page, render, titled};

use maud::{html, Markup};
use rust_i18n::t;

use crate::{classroom::Classroom, content::Catalog, progress::View};

/// The app shell for whatever the learner is looking at: sidebar plus the active view.
///
/// Consumes the one-shot completion notice, so call it once per response.
pub fn current(catalog: &Catalog, room: &mut Classroom) -> (String, Markup) {
    let notice = room.take_notice();

    let (title, content) = match (
        room.progress().view(),
        room.current_module(catalog),
        room.walkthrough(),
    ) {
        (View::Module, Some(module), Some(walkthrough)) => match walkthrough.quiz() {
            Some(attempt) => (module.title.clone(), quiz::quiz(module, attempt)),
            None => (module.title.clone(), module::module(module, walkthrough)),
        },
        (View::Simulation, _, _) => (
            t!("simulation.title").to_string(),
            simulation::simulation(room.simulation()),
        ),
        _ => (
            t!("dashboard.title").to_string(),
            dashboard::dashboard(catalog, room.progress(), notice.as_ref()),
        ),
    };

    let body = html! {
        (sidebar::sidebar(catalog, room.progress()))
        main { (content) }
    };

    (title, body)
}
