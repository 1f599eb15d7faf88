use std::{collections::HashSet, path::Path};

use serde::Deserialize;

/// The IRHS Stores Management Foundation Course shipped with the binary.
static BUILTIN_COURSE: &str = include_str!("../content/course.json");

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
    pub sections: Vec<ModuleSection>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

impl Module {
    /// Title up to the first `:`, e.g. "Module 1" for "Module 1: Introduction".
    pub fn short_title(&self) -> &str {
        self.title
            .split_once(':')
            .map_or(self.title.as_str(), |(head, _)| head)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSection {
    pub title: String,
    pub content: String,
    pub key_points: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("could not read course content: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse course content: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("course content has no modules")]
    Empty,
    #[error("module id `{0}` is used more than once")]
    DuplicateModule(String),
    #[error("module `{0}` has no sections")]
    NoSections(String),
    #[error("module `{module}` uses question id `{question}` more than once")]
    DuplicateQuestion { module: String, question: String },
    #[error("question `{question}` in module `{module}` marks option {index} correct but offers {options}")]
    AnswerOutOfRange {
        module: String,
        question: String,
        index: usize,
        options: usize,
    },
}

/// Immutable, validated set of course modules in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    modules: Vec<Module>,
}

impl Catalog {
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(BUILTIN_COURSE)
    }

    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let modules: Vec<Module> = serde_json::from_str(json)?;
        Self::new(modules)
    }

    pub fn new(modules: Vec<Module>) -> Result<Self, ContentError> {
        validate(&modules)?;
        Ok(Self { modules })
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn get(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

fn validate(modules: &[Module]) -> Result<(), ContentError> {
    if modules.is_empty() {
        return Err(ContentError::Empty);
    }

    let mut module_ids = HashSet::new();
    for module in modules {
        if !module_ids.insert(module.id.as_str()) {
            return Err(ContentError::DuplicateModule(module.id.clone()));
        }
        if module.sections.is_empty() {
            return Err(ContentError::NoSections(module.id.clone()));
        }

        let mut question_ids = HashSet::new();
        for question in &module.quiz {
            if !question_ids.insert(question.id.as_str()) {
                return Err(ContentError::DuplicateQuestion {
                    module: module.id.clone(),
                    question: question.id.clone(),
                });
            }
            if question.correct_answer >= question.options.len() {
                return Err(ContentError::AnswerOutOfRange {
                    module: module.id.clone(),
                    question: question.id.clone(),
                    index: question.correct_answer,
                    options: question.options.len(),
                });
            }
        }
    }

    Ok(())
}
