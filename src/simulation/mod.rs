mod gemini;
mod scenario;

pub use gemini::{GeminiClient, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use scenario::{Scenario, ScenarioOption, SchemaViolation, EXPECTED_OPTIONS};

use crate::quiz::OptionMark;

/// Instruction sent with every scenario request.
pub const SCENARIO_PROMPT: &str = "\
You are a Senior Indian Railway Stores & Audit Officer examining IRHS Probationers.
Generate one challenging, realistic administrative scenario involving Medical Stores, \
Procurement, or Vigilance, strictly within the rules of the Indian Railway Medical Manual.
Focus on one of: splitting of indents, misuse of Proprietary Article Certificates, \
irregular emergency purchases, or expiry management.
Respond with a JSON object containing:
- \"scenario\": a detailed description of the situation,
- \"options\": exactly four possible courses of action with ids \"A\", \"B\", \"C\" and \"D\",
- \"correctOptionId\": the id of the best administrative decision,
- \"explanation\": why that decision is right, citing financial propriety and Railway rules.";

// ---------------------------------------------------------------------------
// ScenarioProvider trait (the external generative service)
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request to scenario provider failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("scenario provider returned status {0}")]
    Status(u16),
    #[error("scenario provider sent an unreadable body: {0}")]
    Body(#[from] serde_json::Error),
}

#[cfg_attr(test, mockall::automock)]
pub trait ScenarioProvider: Send + Sync {
    /// Sends one schema-constrained request; `Ok(None)` means the reply carried no text.
    fn generate(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, ProviderError>> + Send;
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("environment variable `{0}` is not set")]
    MissingCredential(String),
    #[error(transparent)]
    Transport(ProviderError),
    #[error("scenario provider returned no text")]
    EmptyResponse,
    #[error("scenario is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("scenario does not match the schema: {0}")]
    Schema(#[from] SchemaViolation),
}

/// The distinctions the learner gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Transport,
    Malformed,
}

impl From<ProviderError> for ScenarioError {
    fn from(err: ProviderError) -> Self {
        match err {
            // The provider answered, but not with anything we can read.
            ProviderError::Body(e) => ScenarioError::InvalidJson(e),
            other => ScenarioError::Transport(other),
        }
    }
}

impl ScenarioError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ScenarioError::MissingCredential(_) => FailureKind::Configuration,
            ScenarioError::Transport(_) => FailureKind::Transport,
            ScenarioError::EmptyResponse
            | ScenarioError::InvalidJson(_)
            | ScenarioError::Schema(_) => FailureKind::Malformed,
        }
    }
}

// ---------------------------------------------------------------------------
// SimulationService
// ---------------------------------------------------------------------------

pub struct SimulationService<P: ScenarioProvider = GeminiClient> {
    provider: P,
    api_key_var: String,
}

impl<P: ScenarioProvider> SimulationService<P> {
    pub fn new(provider: P, api_key_var: impl Into<String>) -> Self {
        Self {
            provider,
            api_key_var: api_key_var.into(),
        }
    }

    pub fn api_key_var(&self) -> &str {
        &self.api_key_var
    }

    /// Generates one scenario. The credential is read from the environment on every call
    /// and checked before anything is sent.
    pub async fn generate(&self) -> Result<Scenario, ScenarioError> {
        let api_key = std::env::var(&self.api_key_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ScenarioError::MissingCredential(self.api_key_var.clone()))?;

        let text = self
            .provider
            .generate(&api_key, SCENARIO_PROMPT)
            .await?
            .ok_or(ScenarioError::EmptyResponse)?;

        Scenario::parse(&text)
    }
}

// ---------------------------------------------------------------------------
// SimulationState
// ---------------------------------------------------------------------------

/// Identifies one generation request; only the latest ticket may update the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Simulation view state. Lives only while the simulation view is shown.
#[derive(Debug, Default)]
pub struct SimulationState {
    sequence: u64,
    pending: Option<u64>,
    started: bool,
    scenario: Option<Scenario>,
    selected: Option<String>,
    failure: Option<FailureKind>,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// True until the first generation after entering the view has been requested.
    pub fn needs_first_scenario(&self) -> bool {
        !self.started
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn failure(&self) -> Option<FailureKind> {
        self.failure
    }

    /// Starts a generation, superseding any request still in flight.
    pub fn begin(&mut self) -> Ticket {
        self.sequence += 1;
        self.pending = Some(self.sequence);
        self.started = true;
        self.scenario = None;
        self.selected = None;
        self.failure = None;
        Ticket(self.sequence)
    }

    /// Applies a generation result. Results for superseded tickets are dropped.
    pub fn finish(&mut self, ticket: Ticket, result: Result<Scenario, ScenarioError>) -> bool {
        if self.pending != Some(ticket.0) {
            tracing::debug!(ticket = ticket.0, "discarding stale scenario response");
            return false;
        }
        self.pending = None;
        match result {
            Ok(scenario) => {
                self.scenario = Some(scenario);
                self.failure = None;
            }
            Err(err) => {
                self.scenario = None;
                self.failure = Some(err.kind());
            }
        }
        self.selected = None;
        true
    }

    /// Drops everything shown by the view. In-flight requests become stale.
    pub fn reset(&mut self) {
        let sequence = self.sequence + 1;
        *self = Self {
            sequence,
            ..Self::default()
        };
    }

    /// Records the learner's pick. Only the first pick counts and unknown ids are ignored.
    pub fn select_option(&mut self, option_id: &str) -> bool {
        if self.selected.is_some() {
            return false;
        }
        match &self.scenario {
            Some(scenario) if scenario.has_option(option_id) => {
                self.selected = Some(option_id.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn option_mark(&self, option_id: &str) -> OptionMark {
        self.scenario
            .as_ref()
            .map_or(OptionMark::Open, |s| s.option_mark(self.selected(), option_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenario::tests::SAMPLE;

    fn service(
        provider: MockScenarioProvider,
        api_key_var: &str,
    ) -> SimulationService<MockScenarioProvider> {
        SimulationService::new(provider, api_key_var)
    }

    fn with_key(var: &str) -> &str {
        std::env::set_var(var, "test-key");
        var
    }

    fn sample() -> Scenario {
        Scenario::parse(SAMPLE).unwrap()
    }

    // ----- SimulationService -----

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        let mut mock = MockScenarioProvider::new();
        mock.expect_generate().never();

        let svc = service(mock, "STORES_COURSE_TEST_UNSET_KEY");
        let err = svc.generate().await.unwrap_err();
        assert!(matches!(err, ScenarioError::MissingCredential(_)));
        assert_eq!(
            err.to_string(),
            "environment variable `STORES_COURSE_TEST_UNSET_KEY` is not set"
        );
        assert_eq!(err.kind(), FailureKind::Configuration);
    }

    #[tokio::test]
    async fn blank_credential_counts_as_missing() {
        std::env::set_var("STORES_COURSE_TEST_BLANK_KEY", "  ");
        let mut mock = MockScenarioProvider::new();
        mock.expect_generate().never();

        let svc = service(mock, "STORES_COURSE_TEST_BLANK_KEY");
        let err = svc.generate().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Configuration);
    }

    #[tokio::test]
    async fn sends_one_request_with_key_and_prompt() {
        let mut mock = MockScenarioProvider::new();
        mock.expect_generate()
            .withf(|key, prompt| key == "test-key" && prompt == SCENARIO_PROMPT)
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(Some(SAMPLE.to_string())) }));

        let svc = service(mock, with_key("STORES_COURSE_TEST_KEY_OK"));
        let scenario = svc.generate().await.unwrap();
        assert_eq!(scenario, sample());
    }

    #[tokio::test]
    async fn provider_failure_is_transport() {
        let mut mock = MockScenarioProvider::new();
        mock.expect_generate()
            .returning(|_, _| Box::pin(async { Err(ProviderError::Status(429)) }));

        let svc = service(mock, with_key("STORES_COURSE_TEST_KEY_429"));
        let err = svc.generate().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[tokio::test]
    async fn unreadable_provider_body_is_malformed() {
        let mut mock = MockScenarioProvider::new();
        mock.expect_generate().returning(|_, _| {
            Box::pin(async {
                let err = serde_json::from_str::<serde_json::Value>("<html>busy</html>")
                    .unwrap_err();
                Err(ProviderError::Body(err))
            })
        });

        let svc = service(mock, with_key("STORES_COURSE_TEST_KEY_HTML"));
        let err = svc.generate().await.unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidJson(_)));
        assert_eq!(err.kind(), FailureKind::Malformed);
    }

    #[tokio::test]
    async fn empty_or_invalid_reply_is_malformed() {
        let mut mock = MockScenarioProvider::new();
        mock.expect_generate()
            .returning(|_, _| Box::pin(async { Ok(None) }));
        let svc = service(mock, with_key("STORES_COURSE_TEST_KEY_EMPTY"));
        let err = svc.generate().await.unwrap_err();
        assert!(matches!(err, ScenarioError::EmptyResponse));
        assert_eq!(err.kind(), FailureKind::Malformed);

        let mut mock = MockScenarioProvider::new();
        mock.expect_generate().returning(|_, _| {
            Box::pin(async {
                Ok(Some(
                    r#"{"scenario":"S","options":[{"id":"A","text":"x"}],"correctOptionId":"A","explanation":"E"}"#
                        .to_string(),
                ))
            })
        });
        let svc = service(mock, with_key("STORES_COURSE_TEST_KEY_SHORT"));
        let err = svc.generate().await.unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Schema(SchemaViolation::OptionCount(1))
        ));
        assert_eq!(err.kind(), FailureKind::Malformed);
    }

    // ----- SimulationState -----

    #[test]
    fn success_replaces_scenario_and_clears_failure() {
        let mut state = SimulationState::new();
        assert!(state.needs_first_scenario());

        let first = state.begin();
        assert!(state.is_loading());
        assert!(!state.needs_first_scenario());
        state.finish(first, Err(ScenarioError::EmptyResponse));
        assert_eq!(state.failure(), Some(FailureKind::Malformed));
        assert!(state.scenario().is_none());

        let second = state.begin();
        assert_eq!(state.failure(), None);
        assert!(state.finish(second, Ok(sample())));
        assert!(!state.is_loading());
        assert_eq!(state.scenario().unwrap().scenario, "S");
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = SimulationState::new();
        let old = state.begin();
        let new = state.begin();

        assert!(state.finish(new, Ok(sample())));
        assert!(!state.finish(old, Err(ScenarioError::EmptyResponse)));
        assert_eq!(state.failure(), None);
        assert!(state.scenario().is_some());
    }

    #[test]
    fn reset_invalidates_in_flight_request() {
        let mut state = SimulationState::new();
        let ticket = state.begin();
        state.reset();

        assert!(!state.finish(ticket, Ok(sample())));
        assert!(state.scenario().is_none());
        assert!(!state.is_loading());
        assert!(state.needs_first_scenario());

        let next = state.begin();
        assert_ne!(next, ticket);
    }

    #[test]
    fn first_pick_reveals_marks_and_locks() {
        let mut state = SimulationState::new();
        let ticket = state.begin();
        state.finish(ticket, Ok(sample()));

        assert_eq!(state.option_mark("B"), OptionMark::Open);
        assert!(!state.select_option("Z"));
        assert!(state.select_option("A"));
        assert!(!state.select_option("B"));

        assert_eq!(state.selected(), Some("A"));
        assert_eq!(state.option_mark("A"), OptionMark::Incorrect);
        assert_eq!(state.option_mark("B"), OptionMark::Correct);
        assert_eq!(state.option_mark("C"), OptionMark::Neutral);
    }

    #[test]
    fn new_scenario_clears_previous_pick() {
        let mut state = SimulationState::new();
        let ticket = state.begin();
        state.finish(ticket, Ok(sample()));
        state.select_option("B");

        let ticket = state.begin();
        assert_eq!(state.selected(), None);
        state.finish(ticket, Ok(sample()));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn selecting_without_scenario_is_ignored() {
        let mut state = SimulationState::new();
        assert!(!state.select_option("A"));
        assert_eq!(state.option_mark("A"), OptionMark::Open);
    }
}
