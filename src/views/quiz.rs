use maud::{html, Markup};
use rust_i18n::t;
use serde_json::json;

use crate::{content::Module, names, quiz::QuizAttempt};

pub fn quiz(module: &Module, attempt: &QuizAttempt) -> Markup {
    let locked = attempt.is_submitted();

    html! {
        article.quiz {
            header.quiz-header {
                h2 { (t!("quiz.title")) }
                p { (t!("quiz.subtitle", module = module.title)) }
            }

            @for (idx, question) in module.quiz.iter().enumerate() {
                section.question {
                    p.question-text {
                        span.question-number { (idx + 1) "." }
                        (question.question)
                    }
                    div.options {
                        @for (option_idx, option) in question.options.iter().enumerate() {
                            @let mark = attempt.option_mark(question, option_idx);
                            button type="button"
                                   class=(format!("option {}", mark.css_class()))
                                   disabled[locked]
                                   hx-post=(names::SELECT_ANSWER_URL)
                                   hx-vals=(json!({ "question_id": question.id, "option": option_idx }).to_string()) {
                                (option)
                            }
                        }
                    }
                    @if let Some(correct) = attempt.answered_correctly(question) {
                        div class=(if correct { "explanation correct" } else { "explanation incorrect" }) {
                            strong { (t!("quiz.explanation")) }
                            " " (question.explanation)
                        }
                    }
                }
            }

            footer.quiz-footer {
                @if let Some(score) = attempt.score() {
                    p.score { (t!("quiz.score", correct = score.correct, total = score.total)) }
                    button.secondary hx-post=(names::RETURN_TO_DASHBOARD_URL) {
                        (t!("quiz.return"))
                    }
                } @else {
                    button hx-post=(names::SUBMIT_QUIZ_URL) { (t!("quiz.submit")) }
                }
            }
        }
    }
}
