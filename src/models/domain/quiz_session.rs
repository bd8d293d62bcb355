use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::{seq::SliceRandom, Rng};
use serde::Serialize;

use crate::models::domain::{Question, QuestionBank, Subject};

/// Time allowed per question.
pub const QUESTION_TIME_LIMIT_SECS: u64 = 300;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Page {
    #[default]
    Home,
    SelectSubject,
    Quiz,
}

/// Per-browser quiz state. Reads the bank, never changes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizSession {
    page: Page,
    subject: Option<Subject>,
    current_index: Option<usize>,
    last_index_per_subject: HashMap<Subject, usize>,
    started_at: Option<DateTime<Utc>>,
    answered: bool,
    is_correct: Option<bool>,
    timer_expired: bool,
    bank_generation: u64,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn subject(&self) -> Option<Subject> {
        self.subject
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn last_index(&self, subject: Subject) -> Option<usize> {
        self.last_index_per_subject.get(&subject).copied()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn answered(&self) -> bool {
        self.answered
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.is_correct
    }

    pub fn timer_expired(&self) -> bool {
        self.timer_expired
    }

    pub fn bank_generation(&self) -> u64 {
        self.bank_generation
    }

    /// Binds the session to bank `generation`. Question indices from an older bank mean
    /// nothing in the new one, so the question pointer, answer state and timer are dropped and
    /// the quiz screen falls back to subject selection. Returns `true` when state was dropped.
    pub fn follow_bank(&mut self, generation: u64) -> bool {
        if self.bank_generation == generation {
            return false;
        }
        let stale = self.page == Page::Quiz || self.current_index.is_some();

        self.bank_generation = generation;
        self.current_index = None;
        self.last_index_per_subject.clear();
        self.started_at = None;
        self.answered = false;
        self.is_correct = None;
        self.timer_expired = false;
        if self.page == Page::Quiz {
            self.page = Page::SelectSubject;
        }
        stale
    }

    pub fn current_question<'a>(&self, bank: &'a QuestionBank) -> Option<&'a Question> {
        bank.question(self.subject?, self.current_index?)
    }

    pub fn go_home(&mut self) {
        self.page = Page::Home;
    }

    pub fn go_to_select(&mut self) {
        self.page = Page::SelectSubject;
    }

    /// Enters the quiz screen with a freshly picked question and a fresh timer.
    pub fn go_to_quiz<R: Rng + ?Sized>(
        &mut self,
        subject: Subject,
        bank: &QuestionBank,
        rng: &mut R,
        now: DateTime<Utc>,
    ) {
        self.page = Page::Quiz;
        self.subject = Some(subject);
        self.pick_question(subject, bank, rng);
        self.start_timer(now);
    }

    /// Picks a random question for `subject`, avoiding the one shown last when there is
    /// more than one to choose from. Leaves timer and answer state alone.
    pub fn pick_question<R: Rng + ?Sized>(
        &mut self,
        subject: Subject,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Option<usize> {
        let count = bank.questions_for(subject).len();
        if count == 0 {
            self.current_index = None;
            return None;
        }

        let last = self.last_index(subject).filter(|&i| i < count && count > 1);
        let candidates: Vec<usize> = (0..count).filter(|&i| Some(i) != last).collect();

        let picked = candidates.choose(rng).copied();
        self.current_index = picked;
        if let Some(index) = picked {
            self.last_index_per_subject.insert(subject, index);
        }
        picked
    }

    /// Restarts the clock and clears the answer state for the current question.
    pub fn start_timer(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
        self.timer_expired = false;
        self.answered = false;
        self.is_correct = None;
    }

    /// Seconds left at `now`, without touching the expiry latch.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> u64 {
        match self.started_at {
            None => QUESTION_TIME_LIMIT_SECS,
            Some(start) => {
                let elapsed = (now - start).num_seconds().max(0) as u64;
                QUESTION_TIME_LIMIT_SECS.saturating_sub(elapsed)
            }
        }
    }

    /// Seconds left at `now`. Reaching zero latches `timer_expired` until the next
    /// [`start_timer`](Self::start_timer).
    pub fn remaining_seconds(&mut self, now: DateTime<Utc>) -> u64 {
        let remaining = self.remaining_at(now);
        if remaining == 0 && self.started_at.is_some() {
            self.timer_expired = true;
        }
        remaining
    }

    /// Evaluates `choice` against the current question. Returns `false` and changes
    /// nothing when the question is missing, already answered, out of time, or `choice`
    /// is not one of its choices.
    pub fn submit_answer(&mut self, choice: usize, bank: &QuestionBank) -> bool {
        if self.page != Page::Quiz || self.answered || self.timer_expired {
            return false;
        }
        let Some(question) = self.current_question(bank) else {
            return false;
        };
        if choice >= question.choices.len() {
            return false;
        }

        self.is_correct = Some(question.is_correct(choice));
        self.answered = true;
        true
    }

    /// Same question, new attempt.
    pub fn retry(&mut self, now: DateTime<Utc>) {
        if self.page == Page::Quiz && self.current_index.is_some() {
            self.start_timer(now);
        }
    }

    /// Moves to another question of the active subject.
    pub fn next_question<R: Rng + ?Sized>(
        &mut self,
        bank: &QuestionBank,
        rng: &mut R,
        now: DateTime<Utc>,
    ) {
        if self.page != Page::Quiz {
            return;
        }
        if let Some(subject) = self.subject {
            self.pick_question(subject, bank, rng);
            self.start_timer(now);
        }
    }
}

/// Renders seconds as `MM:SS`.
pub fn format_remaining(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
