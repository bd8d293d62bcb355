use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{errors::AppResult, models::domain::QuizSession};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find(&self, id: &Uuid) -> AppResult<Option<QuizSession>>;
    async fn save(&self, id: Uuid, session: QuizSession, seen_at: DateTime<Utc>) -> AppResult<()>;
    async fn count(&self) -> AppResult<usize>;
    /// Drops every session last saved before `cutoff`, returning how many were removed.
    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> AppResult<usize>;
}

struct StoredSession {
    session: QuizSession,
    seen_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, StoredSession>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find(&self, id: &Uuid) -> AppResult<Option<QuizSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).map(|s| s.session.clone()))
    }

    async fn save(&self, id: Uuid, session: QuizSession, seen_at: DateTime<Utc>) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, StoredSession { session, seen_at });
        Ok(())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.sessions.read().await.len())
    }

    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> AppResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.seen_at >= cutoff);
        Ok(before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn save_then_find_returns_copy() {
        let repo = InMemorySessionRepository::new();
        let id = Uuid::new_v4();
        let mut session = QuizSession::new();
        session.go_to_select();

        repo.save(id, session.clone(), t0()).await.unwrap();

        assert_eq!(repo.find(&id).await.unwrap(), Some(session));
        assert_eq!(repo.find(&Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn purge_idle_keeps_recent_sessions() {
        let repo = InMemorySessionRepository::new();
        let stale = Uuid::new_v4();
        let fresh = Uuid::new_v4();
        repo.save(stale, QuizSession::new(), t0()).await.unwrap();
        repo.save(fresh, QuizSession::new(), t0() + Duration::minutes(50)).await.unwrap();

        let removed = repo.purge_idle(t0() + Duration::minutes(30)).await.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.find(&fresh).await.unwrap().is_some());
    }
}
