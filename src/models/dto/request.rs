use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SelectSubjectRequest {
    #[validate(length(min = 1, max = 20))]
    pub subject: String,
}

/// Any index is accepted here; the session ignores one the current question does not have.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub choice: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_subject_fails_validation() {
        let request = SelectSubjectRequest {
            subject: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn choice_parses_indices_past_ten() {
        let request: SubmitAnswerRequest =
            serde_json::from_str(r#"{"choice": 11}"#).expect("choice should parse");
        assert_eq!(request.choice, 11);
    }
}
