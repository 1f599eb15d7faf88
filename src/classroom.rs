use crate::{
    content::{Catalog, Module},
    progress::{CourseProgress, UnknownModule, View},
    quiz::{QuizAttempt, Score},
    simulation::SimulationState,
    walkthrough::{Advance, Walkthrough},
};

/// Shown once on the dashboard after a perfect quiz submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionNotice {
    pub module_id: String,
    pub score: Score,
}

/// The learner's whole session: navigation, the open walkthrough and the simulator.
///
/// Every UI action maps onto exactly one method here.
#[derive(Debug, Default)]
pub struct Classroom {
    progress: CourseProgress,
    walkthrough: Option<Walkthrough>,
    simulation: SimulationState,
    notice: Option<CompletionNotice>,
}

impl Classroom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> &CourseProgress {
        &self.progress
    }

    pub fn walkthrough(&self) -> Option<&Walkthrough> {
        self.walkthrough.as_ref()
    }

    pub fn simulation(&self) -> &SimulationState {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut SimulationState {
        &mut self.simulation
    }

    pub fn current_module<'c>(&self, catalog: &'c Catalog) -> Option<&'c Module> {
        self.progress.current_module().and_then(|id| catalog.get(id))
    }

    pub fn take_notice(&mut self) -> Option<CompletionNotice> {
        self.notice.take()
    }

    pub fn select_module(&mut self, catalog: &Catalog, id: &str) -> Result<(), UnknownModule> {
        let reopening = self.progress.view() == View::Module
            && self.progress.current_module() == Some(id)
            && self.walkthrough.is_some();

        let module = self.progress.select_module(catalog, id)?;
        self.leave_simulation();
        self.notice = None;
        if !reopening {
            tracing::debug!("opening module {}", module.id);
            self.walkthrough = Some(Walkthrough::open(module));
        }
        Ok(())
    }

    pub fn go_to_dashboard(&mut self) {
        self.progress.go_to_dashboard();
        self.walkthrough = None;
        self.leave_simulation();
    }

    pub fn go_to_simulation(&mut self) {
        if self.progress.view() != View::Simulation {
            self.simulation.reset();
        }
        self.progress.go_to_simulation();
        self.walkthrough = None;
        self.notice = None;
    }

    /// Marks the open module complete (at most once) and returns to the dashboard.
    pub fn complete_current_module(&mut self) -> bool {
        let newly_completed = self.progress.complete_current_module();
        self.walkthrough = None;
        self.leave_simulation();
        newly_completed
    }

    pub fn advance(&mut self, catalog: &Catalog) -> Option<Advance> {
        let module = self.current_module(catalog)?;
        let walkthrough = self.walkthrough.as_mut()?;
        Some(walkthrough.advance(module))
    }

    pub fn select_answer(&mut self, catalog: &Catalog, question_id: &str, option: usize) -> bool {
        let Some(module) = self.current_module(catalog) else {
            return false;
        };
        self.quiz_mut()
            .is_some_and(|attempt| attempt.select_answer(&module.quiz, question_id, option))
    }

    /// Scores the open quiz. A perfect score completes the module straight away.
    pub fn submit_quiz(&mut self, catalog: &Catalog) -> Option<Score> {
        let module = self.current_module(catalog)?;
        let score = self.quiz_mut()?.submit(&module.quiz)?;
        tracing::info!(
            "quiz for {} submitted: {}/{}",
            module.id,
            score.correct,
            score.total
        );

        if score.is_perfect() {
            let module_id = module.id.clone();
            self.complete_current_module();
            self.notice = Some(CompletionNotice { module_id, score });
        }
        Some(score)
    }

    /// "Return to Dashboard" from a quiz. Only a perfect attempt counts toward completion.
    pub fn return_to_dashboard(&mut self) {
        let perfect = self
            .walkthrough
            .as_ref()
            .and_then(Walkthrough::quiz)
            .is_some_and(QuizAttempt::is_perfect);

        if perfect {
            self.complete_current_module();
        } else {
            self.go_to_dashboard();
        }
    }

    fn quiz_mut(&mut self) -> Option<&mut QuizAttempt> {
        self.walkthrough.as_mut().and_then(Walkthrough::quiz_mut)
    }

    fn leave_simulation(&mut self) {
        if self.progress.view() != View::Simulation {
            self.simulation.reset();
        }
    }
}
