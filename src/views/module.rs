use maud::{html, Markup};
use rust_i18n::t;

use crate::{content::Module, names, walkthrough::Walkthrough};

pub fn module(module: &Module, walkthrough: &Walkthrough) -> Markup {
    let position = walkthrough.active_section() + 1;

    html! {
        header.module-header {
            h1 { (module.title) }
            p { (module.description) }

            section.outcomes {
                h4 { (t!("module.learning_outcomes")) }
                ul {
                    @for outcome in &module.learning_outcomes {
                        li { (outcome) }
                    }
                }
            }
        }

        @if let Some(section) = walkthrough.section(module) {
            h2.section-title {
                span.section-number { (position) }
                (section.title)
            }
            div.section-content { (section.content) }

            @if let Some(points) = &section.key_points {
                aside.key-points {
                    h4 { (t!("module.key_points")) }
                    ul {
                        @for point in points {
                            li { (point) }
                        }
                    }
                }
            }
        }

        footer.section-nav {
            span {
                (t!("module.section_of", current = position, total = module.sections.len()))
            }
            button hx-post=(names::ADVANCE_URL) {
                @if walkthrough.is_last_section(module) {
                    (t!("module.take_quiz"))
                } @else {
                    (t!("module.next_section"))
                }
            }
        }
    }
}
