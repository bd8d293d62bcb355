use serde::{Deserialize, Serialize};

pub const MISSING_EXPLANATION: &str = "해설이 등록되지 않았습니다.";

/// A multiple-choice question as stored in `questions.json`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub choices: Vec<String>,
    #[serde(rename = "answer")]
    pub correct_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Figure path, relative to the images directory or prefixed with it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Question {
    pub fn new(text: &str, choices: &[&str], correct_index: usize, explanation: Option<&str>) -> Self {
        Question {
            text: text.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct_index,
            explanation: explanation.map(str::to_string),
            image: None,
        }
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn explanation(&self) -> &str {
        self.explanation
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(MISSING_EXPLANATION)
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }

    /// At least two choices and the answer index points into them.
    pub fn is_well_formed(&self) -> bool {
        self.choices.len() >= 2 && self.correct_index < self.choices.len()
    }

    pub fn correct_choice(&self) -> Option<&str> {
        self.choices.get(self.correct_index).map(String::as_str)
    }
}
