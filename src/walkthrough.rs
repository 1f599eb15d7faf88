use crate::{
    content::{Module, ModuleSection},
    quiz::QuizAttempt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Reading,
    Quiz(QuizAttempt),
}

/// What a call to [`Walkthrough::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Section(usize),
    QuizStarted,
    AlreadyInQuiz,
}

/// Linear, forward-only pass through one module's sections followed by its quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walkthrough {
    module_id: String,
    active_section: usize,
    phase: Phase,
}

impl Walkthrough {
    pub fn open(module: &Module) -> Self {
        Self {
            module_id: module.id.clone(),
            active_section: 0,
            phase: Phase::Reading,
        }
    }

    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    pub fn active_section(&self) -> usize {
        self.active_section
    }

    pub fn section<'m>(&self, module: &'m Module) -> Option<&'m ModuleSection> {
        module.sections.get(self.active_section)
    }

    pub fn is_last_section(&self, module: &Module) -> bool {
        self.active_section + 1 >= module.sections.len()
    }

    pub fn is_quiz_phase(&self) -> bool {
        matches!(self.phase, Phase::Quiz(_))
    }

    pub fn quiz(&self) -> Option<&QuizAttempt> {
        match &self.phase {
            Phase::Quiz(attempt) => Some(attempt),
            Phase::Reading => None,
        }
    }

    pub fn quiz_mut(&mut self) -> Option<&mut QuizAttempt> {
        match &mut self.phase {
            Phase::Quiz(attempt) => Some(attempt),
            Phase::Reading => None,
        }
    }

    pub fn advance(&mut self, module: &Module) -> Advance {
        if self.is_quiz_phase() {
            return Advance::AlreadyInQuiz;
        }
        if self.is_last_section(module) {
            self.phase = Phase::Quiz(QuizAttempt::new());
            Advance::QuizStarted
        } else {
            self.active_section += 1;
            Advance::Section(self.active_section)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Catalog;

    #[test]
    fn every_module_reaches_quiz_after_one_advance_per_section() {
        let catalog = Catalog::builtin().unwrap();
        for module in catalog.modules() {
            let mut walkthrough = Walkthrough::open(module);
            let mut visited = vec![walkthrough.active_section()];
            let mut quiz_starts = 0;

            for _ in 0..module.sections.len() {
                match walkthrough.advance(module) {
                    Advance::Section(idx) => visited.push(idx),
                    Advance::QuizStarted => quiz_starts += 1,
                    Advance::AlreadyInQuiz => panic!("advanced past the quiz in {}", module.id),
                }
            }

            let expected: Vec<usize> = (0..module.sections.len()).collect();
            assert_eq!(visited, expected, "sections of {}", module.id);
            assert_eq!(quiz_starts, 1);
            assert!(walkthrough.is_quiz_phase());
            assert!(!walkthrough.quiz().unwrap().is_submitted());
        }
    }

    #[test]
    fn advancing_in_quiz_phase_keeps_the_attempt() {
        let catalog = crate::content::tests::single_module_catalog();
        let module = catalog.get("m1").unwrap();
        let mut walkthrough = Walkthrough::open(module);

        assert_eq!(walkthrough.advance(module), Advance::QuizStarted);
        walkthrough
            .quiz_mut()
            .unwrap()
            .select_answer(&module.quiz, "q1", 2);

        assert_eq!(walkthrough.advance(module), Advance::AlreadyInQuiz);
        assert_eq!(walkthrough.quiz().unwrap().selected("q1"), Some(2));
    }

    #[test]
    fn shows_section_at_active_index() {
        let catalog = Catalog::builtin().unwrap();
        let module = catalog.get("m2").unwrap();
        let mut walkthrough = Walkthrough::open(module);

        assert_eq!(walkthrough.section(module).unwrap().title, "Stock vs Non-Stock");
        assert!(!walkthrough.is_last_section(module));

        walkthrough.advance(module);
        assert_eq!(walkthrough.section(module).unwrap().title, "Imprest Stores");
        assert!(walkthrough.is_last_section(module));
    }
}
