use std::{collections::BTreeMap, collections::HashMap, fs, path::Path};

use serde::Serialize;
use thiserror::Error;

use crate::{
    constants::fallback_questions::FALLBACK_BANK,
    models::domain::{Question, Subject},
};

#[derive(Debug, Error)]
enum LoadError {
    #[error("source not found: {0}")]
    Missing(String),

    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse source: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed question {index} in '{subject}'")]
    Malformed { subject: Subject, index: usize },
}

/// Subject-partitioned questions. Every subject in [`Subject::ALL`] has an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionBank {
    questions: BTreeMap<Subject, Vec<Question>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BankSummary {
    pub subjects_with_questions: usize,
    pub total_questions: usize,
}

impl QuestionBank {
    /// Builds a bank from explicit entries, backfilling absent subjects with empty lists.
    pub fn from_entries(entries: impl IntoIterator<Item = (Subject, Vec<Question>)>) -> Self {
        let mut questions: BTreeMap<Subject, Vec<Question>> =
            Subject::ALL.into_iter().map(|s| (s, Vec::new())).collect();
        questions.extend(entries);
        Self { questions }
    }

    pub fn fallback() -> Self {
        FALLBACK_BANK.clone()
    }

    /// Reads the bank from a JSON file. Any failure yields `fallback` untouched.
    pub fn load(source: impl AsRef<Path>, fallback: QuestionBank) -> Self {
        let source = source.as_ref();
        match Self::try_load(source) {
            Ok(bank) => {
                let summary = bank.summary();
                log::info!(
                    "Loaded {} questions across {} subjects from {}",
                    summary.total_questions,
                    summary.subjects_with_questions,
                    source.display()
                );
                bank
            }
            Err(e) => {
                log::warn!("Using built-in question bank ({}): {}", source.display(), e);
                fallback
            }
        }
    }

    fn try_load(source: &Path) -> Result<Self, LoadError> {
        if !source.exists() {
            return Err(LoadError::Missing(source.display().to_string()));
        }

        let raw = fs::read_to_string(source)?;
        let parsed: HashMap<String, Option<Vec<Question>>> = serde_json::from_str(&raw)?;

        let mut entries = Vec::with_capacity(parsed.len());
        for (name, questions) in parsed {
            let Some(subject) = Subject::from_name(&name) else {
                log::warn!("Ignoring unknown subject '{}' in {}", name, source.display());
                continue;
            };
            let questions = questions.unwrap_or_default();
            if let Some(index) = questions.iter().position(|q| !q.is_well_formed()) {
                return Err(LoadError::Malformed { subject, index });
            }
            entries.push((subject, questions));
        }

        Ok(Self::from_entries(entries))
    }

    pub fn questions_for(&self, subject: Subject) -> &[Question] {
        self.questions.get(&subject).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn questions_for_name(&self, name: &str) -> &[Question] {
        Subject::from_name(name)
            .map(|s| self.questions_for(s))
            .unwrap_or(&[])
    }

    pub fn question(&self, subject: Subject, index: usize) -> Option<&Question> {
        self.questions_for(subject).get(index)
    }

    pub fn summary(&self) -> BankSummary {
        BankSummary {
            subjects_with_questions: self.questions.values().filter(|q| !q.is_empty()).count(),
            total_questions: self.questions.values().map(Vec::len).sum(),
        }
    }
}
