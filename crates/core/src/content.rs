use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::random::RandomSource;

/// Answer pads shown per stage; options past this index are never displayed.
pub const MAX_DISPLAYED_OPTIONS: usize = 3;
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    pub fn new(prompt: &str, options: &[&str], correct_index: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|option| option.to_string()).collect(),
            correct_index,
        }
    }

    pub fn displayed_option_count(&self) -> usize {
        self.options.len().min(MAX_DISPLAYED_OPTIONS)
    }

    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_index
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::InvalidQuestion { index, reason });
        if self.prompt.trim().is_empty() {
            return invalid("prompt is empty".to_string());
        }
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&self.options.len()) {
            return invalid(format!(
                "expected {MIN_OPTIONS} to {MAX_OPTIONS} options, got {}",
                self.options.len()
            ));
        }
        if self.correct_index >= self.displayed_option_count() {
            return invalid(format!(
                "correct index {} is not among the {} displayed options",
                self.correct_index,
                self.displayed_option_count()
            ));
        }
        Ok(())
    }
}

/// Static, validated question catalog supplied at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Result<Self, ConfigError> {
        if questions.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for (index, question) in questions.iter().enumerate() {
            question.validate(index)?;
        }
        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Uniform pick; repeats across stages are allowed.
    pub fn pick<R: RandomSource>(&self, rng: &mut R) -> (usize, &Question) {
        let index = rng.index(self.questions.len());
        (index, &self.questions[index])
    }
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self {
            questions: vec![
                Question::new("2 + 3 = ?", &["4", "5", "6"], 1),
                Question::new("Capital of France?", &["Berlin", "Paris", "Rome", "Gujrat"], 1),
                Question::new("5 * 4 = ?", &["10", "20", "25"], 1),
                Question::new("Largest planet?", &["Jupiter", "Earth", "Mars"], 0),
                Question::new("Binary of 2?", &["10", "11", "01"], 0),
            ],
        }
    }
}
