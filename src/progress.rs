use crate::content::{Catalog, Module};

/// Top-level screens. The quiz is a phase of [`View::Module`], not a view of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Module,
    Simulation,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown module `{0}`")]
pub struct UnknownModule(pub String);

/// Which module is open, which view is active and which modules are complete.
///
/// `completed` keeps insertion order and never holds an id twice; nothing removes from it.
#[derive(Debug, Clone, Default)]
pub struct CourseProgress {
    completed: Vec<String>,
    current_module: Option<String>,
    view: View,
}

impl CourseProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn current_module(&self) -> Option<&str> {
        self.current_module.as_deref()
    }

    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    pub fn is_completed(&self, module_id: &str) -> bool {
        self.completed.iter().any(|id| id == module_id)
    }

    /// Opens `id` in the module view. An id missing from `catalog` leaves everything untouched.
    pub fn select_module<'c>(
        &mut self,
        catalog: &'c Catalog,
        id: &str,
    ) -> Result<&'c Module, UnknownModule> {
        let module = catalog
            .get(id)
            .ok_or_else(|| UnknownModule(id.to_string()))?;
        self.current_module = Some(module.id.clone());
        self.view = View::Module;
        Ok(module)
    }

    pub fn go_to_dashboard(&mut self) {
        self.view = View::Dashboard;
        self.current_module = None;
    }

    pub fn go_to_simulation(&mut self) {
        self.view = View::Simulation;
        self.current_module = None;
    }

    /// Records the current module as complete and returns to the dashboard.
    ///
    /// Returns `true` only when the module was not already complete.
    pub fn complete_current_module(&mut self) -> bool {
        let newly_completed = match self.current_module.take() {
            Some(id) if !self.is_completed(&id) => {
                tracing::info!("module {id} completed");
                self.completed.push(id);
                true
            }
            _ => false,
        };
        self.go_to_dashboard();
        newly_completed
    }

    pub fn summary(&self, catalog: &Catalog) -> ProgressSummary {
        let completed = catalog
            .modules()
            .iter()
            .filter(|m| self.is_completed(&m.id))
            .count();
        ProgressSummary {
            completed,
            total: catalog.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
}

impl ProgressSummary {
    /// Completion rounded to the nearest whole percent.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.completed as f64 * 100.0 / self.total as f64).round() as u32
    }

    pub fn is_certified(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}
