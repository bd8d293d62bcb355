use once_cell::sync::Lazy;

use crate::models::domain::{Question, QuestionBank, Subject};

/// Served when `questions.json` is missing or unusable. One sample question per subject.
pub static FALLBACK_BANK: Lazy<QuestionBank> = Lazy::new(|| {
    QuestionBank::from_entries([
        (
            Subject::MathUpper,
            vec![Question::new(
                "다항식 (x + 2)(x − 3)을 전개한 식의 상수항은?",
                &["-6", "-1", "1", "6"],
                0,
                Some("(x + 2)(x − 3) = x² − x − 6 이므로 상수항은 −6 입니다."),
            )],
        ),
        (
            Subject::MathLower,
            vec![Question::new(
                "집합 A = {1, 2, 3}의 부분집합의 개수는?",
                &["3", "6", "8", "9"],
                2,
                Some("원소가 n개인 집합의 부분집합은 2ⁿ개이므로 2³ = 8 입니다."),
            )],
        ),
        (
            Subject::Math1,
            vec![Question::new(
                "log₂ 8 의 값은?",
                &["2", "3", "4", "8"],
                1,
                Some("2³ = 8 이므로 log₂ 8 = 3 입니다."),
            )],
        ),
        (
            Subject::Math2,
            vec![Question::new(
                "함수 f(x) = x² + 3x 에 대하여 f'(1)의 값은?",
                &["2", "3", "4", "5"],
                3,
                Some("f'(x) = 2x + 3 이므로 f'(1) = 2 + 3 = 5 입니다."),
            )],
        ),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_has_one_well_formed_question_per_subject() {
        for subject in Subject::ALL {
            let questions = FALLBACK_BANK.questions_for(subject);
            assert_eq!(questions.len(), 1, "subject {}", subject);
            assert!(questions[0].is_well_formed());
        }
    }
}
