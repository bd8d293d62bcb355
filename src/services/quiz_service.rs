use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, RwLock},
    time::SystemTime,
};

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, SeedableRng};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{BankSummary, QuestionBank, QuizSession, Subject},
        dto::response::SessionView,
    },
    repositories::SessionRepository,
    services::{clock::Clock, image_store::ImageStore},
};

pub const DEFAULT_IMAGES_DIR: &str = "data/images";

/// The bank currently served, the reload count it belongs to, and the source file's
/// modification time when it was read.
struct LoadedBank {
    bank: Arc<QuestionBank>,
    generation: u64,
    modified: Option<SystemTime>,
}

/// Drives every player's [`QuizSession`] against the shared question bank.
pub struct QuizService {
    bank: RwLock<LoadedBank>,
    questions_path: PathBuf,
    images: ImageStore,
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
    rng: Mutex<StdRng>,
}

fn source_modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

impl QuizService {
    pub fn new(
        bank: QuestionBank,
        questions_path: PathBuf,
        sessions: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let modified = source_modified(&questions_path);
        Self {
            bank: RwLock::new(LoadedBank {
                bank: Arc::new(bank),
                generation: 0,
                modified,
            }),
            questions_path,
            images: ImageStore::new(DEFAULT_IMAGES_DIR),
            sessions,
            clock,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the random source, e.g. with a seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn with_images(mut self, images: ImageStore) -> Self {
        self.images = images;
        self
    }

    pub fn bank(&self) -> Arc<QuestionBank> {
        self.current_bank().0
    }

    /// Bumped on every reload. Sessions bound to an older value are reset on their next request.
    pub fn bank_generation(&self) -> u64 {
        self.current_bank().1
    }

    fn current_bank(&self) -> (Arc<QuestionBank>, u64) {
        let loaded = self.bank.read().unwrap_or_else(|e| e.into_inner());
        (loaded.bank.clone(), loaded.generation)
    }

    /// Re-reads the question file. Falls back to the built-in bank like the initial load.
    pub fn reload_bank(&self) -> BankSummary {
        let modified = source_modified(&self.questions_path);
        let bank = QuestionBank::load(&self.questions_path, QuestionBank::fallback());
        let summary = bank.summary();

        let generation = {
            let mut loaded = self.bank.write().unwrap_or_else(|e| e.into_inner());
            loaded.bank = Arc::new(bank);
            loaded.generation += 1;
            loaded.modified = modified;
            loaded.generation
        };
        log::info!(
            "Question bank reloaded (generation {}): {} questions in {} subjects",
            generation,
            summary.total_questions,
            summary.subjects_with_questions
        );
        summary
    }

    /// Reloads when the question file's modification time moved, or the file appeared or
    /// disappeared, since it was last read.
    pub fn reload_if_changed(&self) -> Option<BankSummary> {
        let modified = source_modified(&self.questions_path);
        let known = self.bank.read().unwrap_or_else(|e| e.into_inner()).modified;
        if modified == known {
            return None;
        }
        log::info!("{} changed on disk", self.questions_path.display());
        Some(self.reload_bank())
    }

    /// Current state of the session, advancing the expiry latch.
    pub async fn view(&self, id: &Uuid) -> AppResult<SessionView> {
        self.apply(id, |_, _, _, _| {}).await
    }

    pub async fn go_home(&self, id: &Uuid) -> AppResult<SessionView> {
        self.apply(id, |session, _, _, _| session.go_home()).await
    }

    pub async fn go_to_select(&self, id: &Uuid) -> AppResult<SessionView> {
        self.apply(id, |session, _, _, _| session.go_to_select()).await
    }

    pub async fn start_quiz(&self, id: &Uuid, subject: Subject) -> AppResult<SessionView> {
        log::debug!("Session {} starting {}", id, subject);
        self.apply(id, |session, bank, rng, now| {
            session.go_to_quiz(subject, bank, rng, now)
        })
        .await
    }

    /// Late or repeated answers are dropped without error.
    pub async fn submit_answer(&self, id: &Uuid, choice: usize) -> AppResult<SessionView> {
        self.apply(id, |session, bank, _, now| {
            session.remaining_seconds(now);
            if !session.submit_answer(choice, bank) {
                log::debug!("Ignored answer {} for session {}", choice, id);
            }
        })
        .await
    }

    pub async fn retry(&self, id: &Uuid) -> AppResult<SessionView> {
        self.apply(id, |session, _, _, now| session.retry(now)).await
    }

    pub async fn next_question(&self, id: &Uuid) -> AppResult<SessionView> {
        self.apply(id, |session, bank, rng, now| {
            session.next_question(bank, rng, now)
        })
        .await
    }

    pub async fn active_sessions(&self) -> AppResult<usize> {
        self.sessions.count().await
    }

    pub async fn purge_idle_sessions(&self, idle: Duration) -> AppResult<usize> {
        let removed = self.sessions.purge_idle(self.clock.now() - idle).await?;
        if removed > 0 {
            log::info!("Purged {} idle sessions", removed);
        }
        Ok(removed)
    }

    async fn apply<F>(&self, id: &Uuid, action: F) -> AppResult<SessionView>
    where
        F: FnOnce(&mut QuizSession, &QuestionBank, &mut StdRng, DateTime<Utc>),
    {
        let mut session = self.sessions.find(id).await?.unwrap_or_default();
        let (bank, generation) = self.current_bank();
        let now = self.clock.now();

        if session.follow_bank(generation) {
            log::debug!("Session {} reset after question reload", id);
        }

        let view = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| AppError::InternalError("Random source unavailable".to_string()))?;
            action(&mut session, &*bank, &mut *rng, now);
            let remaining = session.remaining_seconds(now);
            SessionView::new(&session, &bank, remaining).with_figure(&bank, &self.images)
        };

        self.sessions.save(*id, session, now).await?;
        Ok(view)
    }
}
