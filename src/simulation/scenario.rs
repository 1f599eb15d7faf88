use serde::{Deserialize, Serialize};

use super::ScenarioError;
use crate::quiz::OptionMark;

pub const EXPECTED_OPTIONS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub scenario: String,
    pub options: Vec<ScenarioOption>,
    pub correct_option_id: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("scenario text is empty")]
    EmptyScenario,
    #[error("explanation is empty")]
    EmptyExplanation,
    #[error("expected 4 options, got {0}")]
    OptionCount(usize),
    #[error("an option has an empty id")]
    EmptyOptionId,
    #[error("option id `{0}` appears more than once")]
    DuplicateOptionId(String),
    #[error("correct option `{0}` is not one of the options")]
    UnknownCorrectOption(String),
}

impl Scenario {
    /// Parses provider output and checks it against the scenario schema.
    pub fn parse(text: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), SchemaViolation> {
        if self.scenario.trim().is_empty() {
            return Err(SchemaViolation::EmptyScenario);
        }
        if self.explanation.trim().is_empty() {
            return Err(SchemaViolation::EmptyExplanation);
        }
        if self.options.len() != EXPECTED_OPTIONS {
            return Err(SchemaViolation::OptionCount(self.options.len()));
        }
        for (idx, option) in self.options.iter().enumerate() {
            if option.id.trim().is_empty() {
                return Err(SchemaViolation::EmptyOptionId);
            }
            if self.options[..idx].iter().any(|o| o.id == option.id) {
                return Err(SchemaViolation::DuplicateOptionId(option.id.clone()));
            }
        }
        if !self.has_option(&self.correct_option_id) {
            return Err(SchemaViolation::UnknownCorrectOption(
                self.correct_option_id.clone(),
            ));
        }
        Ok(())
    }

    pub fn has_option(&self, id: &str) -> bool {
        self.options.iter().any(|o| o.id == id)
    }

    /// Mark for `option_id` given the learner's pick, if any.
    pub fn option_mark(&self, selected: Option<&str>, option_id: &str) -> OptionMark {
        match selected {
            None => OptionMark::Open,
            Some(_) if option_id == self.correct_option_id => OptionMark::Correct,
            Some(pick) if pick == option_id => OptionMark::Incorrect,
            Some(_) => OptionMark::Neutral,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "scenario": "S",
        "options": [
            {"id": "A", "text": "x"},
            {"id": "B", "text": "y"},
            {"id": "C", "text": "z"},
            {"id": "D", "text": "w"}
        ],
        "correctOptionId": "B",
        "explanation": "E"
    }"#;

    #[test]
    fn parses_well_formed_output() {
        let scenario = Scenario::parse(SAMPLE).unwrap();
        assert_eq!(scenario.scenario, "S");
        assert_eq!(scenario.options.len(), 4);
        assert_eq!(scenario.correct_option_id, "B");
        assert_eq!(scenario.explanation, "E");
    }

    #[test]
    fn marks_pick_and_correct_option() {
        let scenario = Scenario::parse(SAMPLE).unwrap();
        assert_eq!(scenario.option_mark(None, "B"), OptionMark::Open);
        assert_eq!(scenario.option_mark(Some("A"), "A"), OptionMark::Incorrect);
        assert_eq!(scenario.option_mark(Some("A"), "B"), OptionMark::Correct);
        assert_eq!(scenario.option_mark(Some("A"), "C"), OptionMark::Neutral);
    }

    #[test]
    fn non_json_is_malformed() {
        let err = Scenario::parse("Here is your scenario!").unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidJson(_)));
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = Scenario::parse(r#"{"scenario": "S", "options": []}"#).unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidJson(_)));
    }

    #[test]
    fn schema_violations_are_reported() {
        let base = Scenario::parse(SAMPLE).unwrap();

        let mut three = base.clone();
        three.options.pop();
        assert_eq!(three.validate(), Err(SchemaViolation::OptionCount(3)));

        let mut duplicate = base.clone();
        duplicate.options[3].id = "A".to_string();
        assert_eq!(
            duplicate.validate(),
            Err(SchemaViolation::DuplicateOptionId("A".to_string()))
        );

        let mut unknown = base.clone();
        unknown.correct_option_id = "E".to_string();
        assert_eq!(
            unknown.validate(),
            Err(SchemaViolation::UnknownCorrectOption("E".to_string()))
        );

        let mut blank = base;
        blank.scenario = "  ".to_string();
        assert_eq!(blank.validate(), Err(SchemaViolation::EmptyScenario));
    }
}
