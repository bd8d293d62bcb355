use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Curriculum track a question belongs to. The order of [`Subject::ALL`] is the order
/// subjects are listed on the selection screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Subject {
    #[serde(rename = "수(상)")]
    MathUpper,
    #[serde(rename = "수(하)")]
    MathLower,
    #[serde(rename = "수1")]
    Math1,
    #[serde(rename = "수2")]
    Math2,
}

impl Subject {
    pub const ALL: [Subject; 4] = [
        Subject::MathUpper,
        Subject::MathLower,
        Subject::Math1,
        Subject::Math2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Subject::MathUpper => "수(상)",
            Subject::MathLower => "수(하)",
            Subject::Math1 => "수1",
            Subject::Math2 => "수2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name.trim())
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subject {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AppError::ValidationError(format!("Unknown subject '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_names_round_trip_through_from_name() {
        for subject in Subject::ALL {
            assert_eq!(Subject::from_name(subject.name()), Some(subject));
        }
    }

    #[test]
    fn subject_from_str_rejects_unknown_name() {
        let parsed = "미적분".parse::<Subject>();
        assert!(matches!(parsed, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn subject_serializes_as_korean_name() {
        let json = serde_json::to_string(&Subject::Math2).expect("subject should serialize");
        assert_eq!(json, "\"수2\"");
    }
}
