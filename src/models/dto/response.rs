use serde::Serialize;

use crate::{
    models::domain::{format_remaining, BankSummary, Page, QuestionBank, QuizSession, Subject},
    services::image_store::{Figure, ImageStore},
};

#[derive(Debug, Clone, Serialize)]
pub struct SubjectOption {
    pub subject: Subject,
    pub question_count: usize,
}

/// The question as shown to the player. The answer and explanation stay hidden until the
/// question is answered or the time runs out.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub text: String,
    pub choices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure: Option<Figure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub page: Page,
    pub subjects: Vec<SubjectOption>,
    pub summary: BankSummary,
    pub subject: Option<Subject>,
    pub question: Option<QuestionView>,
    pub remaining_seconds: u64,
    pub remaining_label: String,
    pub answered: bool,
    pub is_correct: Option<bool>,
    pub timer_expired: bool,
    pub can_answer: bool,
}

impl SessionView {
    pub fn new(session: &QuizSession, bank: &QuestionBank, remaining_seconds: u64) -> Self {
        let revealed = session.answered() || session.timer_expired();
        let question = session
            .current_index()
            .zip(session.current_question(bank))
            .map(|(index, q)| QuestionView {
                index,
                text: q.text.clone(),
                choices: q.choices.clone(),
                correct_index: revealed.then_some(q.correct_index),
                explanation: revealed.then(|| q.explanation().to_string()),
                figure: None,
            });

        let can_answer = session.page() == Page::Quiz && question.is_some() && !revealed;

        SessionView {
            page: session.page(),
            subjects: Subject::ALL
                .into_iter()
                .map(|subject| SubjectOption {
                    subject,
                    question_count: bank.questions_for(subject).len(),
                })
                .collect(),
            summary: bank.summary(),
            subject: session.subject(),
            question,
            remaining_seconds,
            remaining_label: format_remaining(remaining_seconds),
            answered: session.answered(),
            is_correct: session.is_correct(),
            timer_expired: session.timer_expired(),
            can_answer,
        }
    }

    /// Resolves the current question's figure, if it names one.
    pub fn with_figure(mut self, bank: &QuestionBank, images: &ImageStore) -> Self {
        if let (Some(subject), Some(question)) = (self.subject, self.question.as_mut()) {
            question.figure = bank
                .question(subject, question.index)
                .and_then(|q| q.image.as_deref())
                .map(|image| images.locate(image));
        }
        self
    }
}
