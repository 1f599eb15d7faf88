use maud::{html, Markup};
use rust_i18n::t;

use crate::{content::Catalog, names, progress::CourseProgress, utils};

pub fn sidebar(catalog: &Catalog, progress: &CourseProgress) -> Markup {
    html! {
        aside.sidebar {
            hgroup.brand {
                h2 { (t!("sidebar.brand")) }
                p { (t!("sidebar.course")) }
            }

            nav {
                ul {
                    li {
                        button.nav-item hx-post=(names::DASHBOARD_URL) {
                            (t!("nav.dashboard"))
                        }
                    }
                    li {
                        button."nav-item nav-simulation" hx-post=(names::SIMULATION_URL) {
                            (t!("nav.simulation"))
                        }
                    }
                }

                p.nav-heading { (t!("nav.modules")) }

                ul {
                    @for module in catalog.modules() {
                        @let is_active = progress.current_module() == Some(module.id.as_str());
                        li {
                            button class=(if is_active { "nav-item active" } else { "nav-item" })
                                   hx-post=(names::module_url(&module.id)) {
                                span { (module.short_title()) }
                                @if progress.is_completed(&module.id) {
                                    span.nav-done title=(t!("nav.completed")) { "\u{2713}" }
                                }
                            }
                        }
                    }
                }
            }

            footer {
                small { (t!("sidebar.footer")) " \u{b7} v" (utils::VERSION) }
            }
        }
    }
}
