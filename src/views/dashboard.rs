use maud::{html, Markup};
use rust_i18n::t;

use crate::{classroom::CompletionNotice, content::Catalog, names, progress::CourseProgress};

pub fn dashboard(
    catalog: &Catalog,
    progress: &CourseProgress,
    notice: Option<&CompletionNotice>,
) -> Markup {
    let summary = progress.summary(catalog);

    html! {
        header.dashboard-header {
            h1 { (t!("dashboard.welcome")) }
            p { (t!("dashboard.course_name")) }
        }

        @if let Some(notice) = notice {
            @let title = catalog
                .get(&notice.module_id)
                .map_or(notice.module_id.as_str(), |m| m.title.as_str());
            article.notice-success role="status" {
                (t!(
                    "dashboard.completed_notice",
                    module = title,
                    correct = notice.score.correct,
                    total = notice.score.total
                ))
            }
        }

        div.stats {
            article.stat {
                p { (t!("dashboard.progress")) }
                strong { (summary.percent()) "%" }
            }
            article.stat {
                p { (t!("dashboard.modules_completed")) }
                strong { (summary.completed) " / " (summary.total) }
            }
            article.stat {
                p { (t!("dashboard.status")) }
                strong {
                    @if summary.is_certified() {
                        (t!("dashboard.certified"))
                    } @else {
                        (t!("dashboard.in_training"))
                    }
                }
            }
        }

        h2 { (t!("dashboard.modules")) }
        div.module-grid {
            @for module in catalog.modules() {
                @let is_completed = progress.is_completed(&module.id);
                article class=(if is_completed { "module-card completed" } else { "module-card" }) {
                    header {
                        small { (module.id.to_uppercase()) }
                        @if is_completed {
                            mark { (t!("dashboard.completed_badge")) }
                        }
                    }
                    h3 { (module.title) }
                    p { (module.description) }
                    footer {
                        @if is_completed {
                            button.outline hx-post=(names::module_url(&module.id)) {
                                (t!("dashboard.review_module"))
                            }
                        } @else {
                            button hx-post=(names::module_url(&module.id)) {
                                (t!("dashboard.start_module"))
                            }
                        }
                    }
                }
            }
        }

        article.probationer-note {
            h4 { (t!("dashboard.note_title")) }
            p { (t!("dashboard.note_body")) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Score;

    #[test]
    fn shows_progress_badges_and_notice() {
        let catalog = Catalog::builtin().unwrap();
        let mut progress = CourseProgress::new();
        progress.select_module(&catalog, "m1").unwrap();
        progress.complete_current_module();

        let notice = CompletionNotice {
            module_id: "m1".to_string(),
            score: Score {
                correct: 1,
                total: 1,
            },
        };
        let html = dashboard(&catalog, &progress, Some(&notice)).into_string();

        assert!(html.contains("17%"));
        assert!(html.contains("1 / 6"));
        assert!(html.contains("In Training"));
        assert!(html.contains("Review Module"));
        assert_eq!(html.matches("Start Module").count(), 5);
        assert!(html.contains("1 / 1"));
        assert!(html.contains("notice-success"));
    }

    #[test]
    fn certifies_when_everything_is_complete() {
        let catalog = Catalog::builtin().unwrap();
        let mut progress = CourseProgress::new();
        for module in catalog.modules() {
            progress.select_module(&catalog, &module.id).unwrap();
            progress.complete_current_module();
        }

        let html = dashboard(&catalog, &progress, None).into_string();
        assert!(html.contains("100%"));
        assert!(html.contains("Certified"));
        assert!(!html.contains("Start Module"));
        assert!(!html.contains("notice-success"));
    }
}
