use maud::{html, Markup};
use rust_i18n::t;
use serde_json::json;

use crate::{
    names,
    quiz::OptionMark,
    simulation::{FailureKind, SimulationState},
};

pub fn failure_message(kind: FailureKind) -> String {
    match kind {
        FailureKind::Configuration => t!("simulation.error_configuration").to_string(),
        FailureKind::Transport => t!("simulation.error_transport").to_string(),
        FailureKind::Malformed => t!("simulation.error_malformed").to_string(),
    }
}

pub fn simulation(state: &SimulationState) -> Markup {
    let answered = state.selected().is_some();

    html! {
        article.simulator {
            header.simulator-header {
                hgroup {
                    h2 { (t!("simulation.title")) }
                    p { (t!("simulation.powered_by")) }
                }
                button hx-post=(names::GENERATE_SCENARIO_URL)
                       hx-disabled-elt="this"
                       hx-indicator="#scenario-loading" {
                    (t!("simulation.new_scenario"))
                }
            }

            // A request this page did not send is still running; pick up its result.
            @if state.is_loading() {
                div hx-get=(names::CURRENT_VIEW_URL)
                    hx-trigger="every 1s"
                    hx-swap="innerHTML" {}
            }

            // First visit: ask for a scenario as soon as the view is on screen.
            @if state.needs_first_scenario() {
                div hx-post=(names::GENERATE_SCENARIO_URL)
                    hx-trigger="load"
                    hx-indicator="#scenario-loading" {}
            }

            @if let Some(kind) = state.failure() {
                div.simulator-error role="alert" { (failure_message(kind)) }
            }

            div #scenario-loading
                class=(if state.is_loading() || state.needs_first_scenario() { "loading" } else { "loading htmx-indicator" }) {
                p { (t!("simulation.loading")) }
            }

            @if let Some(scenario) = state.scenario() {
                section.scenario {
                    h4 { (t!("simulation.scenario_heading")) }
                    p { (scenario.scenario) }
                }

                section.actions {
                    h4 { (t!("simulation.choose_action")) }
                    @for option in &scenario.options {
                        @let mark = state.option_mark(&option.id);
                        button type="button"
                               class=(format!("option {}", mark.css_class()))
                               disabled[answered]
                               hx-post=(names::SELECT_OPTION_URL)
                               hx-vals=(json!({ "option_id": option.id }).to_string()) {
                            span.option-id { (option.id) }
                            span.option-text { (option.text) }
                            @if mark == OptionMark::Correct {
                                span.option-verdict { "\u{2713}" }
                            } @else if mark == OptionMark::Incorrect {
                                span.option-verdict { "\u{2717}" }
                            }
                        }
                    }
                }

                @if answered {
                    aside.examiner-note {
                        h4 { (t!("simulation.examiner_note")) }
                        p { (scenario.explanation) }
                    }
                }
            }
        }
    }
}
