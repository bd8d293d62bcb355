pub mod question;
pub mod question_bank;
pub mod quiz_session;
pub mod subject;

pub use question::Question;
pub use question_bank::{BankSummary, QuestionBank};
pub use quiz_session::{format_remaining, Page, QuizSession, QUESTION_TIME_LIMIT_SECS};
pub use subject::Subject;
