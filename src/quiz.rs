use std::collections::HashMap;

use crate::content::QuizQuestion;

/// How an answer option should be presented.
///
/// `Open` and `Chosen` are the only marks shown before answers are revealed, so nothing
/// about correctness leaks until then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Open,
    Chosen,
    Correct,
    Incorrect,
    Neutral,
}

impl OptionMark {
    pub fn css_class(self) -> &'static str {
        match self {
            OptionMark::Open => "option-open",
            OptionMark::Chosen => "option-chosen",
            OptionMark::Correct => "option-correct",
            OptionMark::Incorrect => "option-incorrect",
            OptionMark::Neutral => "option-neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }
}

/// One learner's pass over a module quiz. Dropped when the learner leaves the quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizAttempt {
    selected: HashMap<String, usize>,
    submitted: bool,
    score: Option<Score>,
}

impl QuizAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub fn selected(&self, question_id: &str) -> Option<usize> {
        self.selected.get(question_id).copied()
    }

    /// Records (or replaces) the answer for `question_id`.
    ///
    /// Ignored once submitted, and for question ids or option indexes the quiz does not offer.
    pub fn select_answer(
        &mut self,
        quiz: &[QuizQuestion],
        question_id: &str,
        option: usize,
    ) -> bool {
        if self.submitted {
            return false;
        }
        let Some(question) = quiz.iter().find(|q| q.id == question_id) else {
            return false;
        };
        if option >= question.options.len() {
            return false;
        }
        self.selected.insert(question.id.clone(), option);
        true
    }

    /// Scores the attempt and locks it. Returns `None` if it was already submitted.
    pub fn submit(&mut self, quiz: &[QuizQuestion]) -> Option<Score> {
        if self.submitted {
            return None;
        }
        let correct = quiz
            .iter()
            .filter(|q| self.selected(&q.id) == Some(q.correct_answer))
            .count();
        let score = Score {
            correct,
            total: quiz.len(),
        };
        self.submitted = true;
        self.score = Some(score);
        Some(score)
    }

    pub fn is_perfect(&self) -> bool {
        self.score.is_some_and(|s| s.is_perfect())
    }

    pub fn option_mark(&self, question: &QuizQuestion, option: usize) -> OptionMark {
        let chosen = self.selected(&question.id) == Some(option);
        if !self.submitted {
            return if chosen {
                OptionMark::Chosen
            } else {
                OptionMark::Open
            };
        }
        if option == question.correct_answer {
            OptionMark::Correct
        } else if chosen {
            OptionMark::Incorrect
        } else {
            OptionMark::Neutral
        }
    }

    /// Whether the learner got `question` right; `None` until submission.
    pub fn answered_correctly(&self, question: &QuizQuestion) -> Option<bool> {
        self.submitted
            .then(|| self.selected(&question.id) == Some(question.correct_answer))
    }
}
