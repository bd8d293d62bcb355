use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::Config,
    models::domain::{Question, QuestionBank, Subject},
    repositories::InMemorySessionRepository,
    services::{clock::Clock, quiz_service::QuizService},
};

/// 수1 has three questions, 수2 none, the others one each.
pub fn test_bank() -> QuestionBank {
    QuestionBank::from_entries([
        (
            Subject::MathUpper,
            vec![Question::new("x² 의 차수는?", &["1", "2", "3", "4"], 1, None)],
        ),
        (
            Subject::MathLower,
            vec![Question::new("{1, 2} 의 원소 개수는?", &["1", "2", "3", "4"], 1, None)],
        ),
        (
            Subject::Math1,
            vec![
                Question::new("log₁₀ 100 = ?", &["1", "2", "10", "100"], 1, Some("10² = 100")),
                Question::new("2⁰ = ?", &["0", "1", "2", "4"], 1, Some("a⁰ = 1")),
                Question::new("sin 90° = ?", &["0", "1/2", "1", "-1"], 2, None),
            ],
        ),
        (Subject::Math2, Vec::new()),
    ])
}

pub fn test_service(clock: Arc<dyn Clock>) -> QuizService {
    QuizService::new(
        test_bank(),
        Config::test_config().questions_path,
        Arc::new(InMemorySessionRepository::new()),
        clock,
    )
    .with_rng(StdRng::seed_from_u64(2026))
}
