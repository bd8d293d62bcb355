use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::{rngs::StdRng, SeedableRng};
use uuid::Uuid;

use suhak_quiz::{
    models::domain::{Page, QuestionBank, QuizSession, Subject},
    repositories::{InMemorySessionRepository, SessionRepository},
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap()
}

async fn assert_round_trips_state<R: SessionRepository>(repo: &R) {
    let id = Uuid::new_v4();
    let bank = QuestionBank::fallback();
    let mut session = QuizSession::new();
    session.go_to_quiz(Subject::Math1, &bank, &mut StdRng::seed_from_u64(1), t0());
    session.submit_answer(1, &bank);

    repo.save(id, session.clone(), t0()).await.unwrap();
    let found = repo.find(&id).await.unwrap().expect("session should exist");

    assert_eq!(found, session);
    assert_eq!(found.page(), Page::Quiz);
    assert!(found.answered());
}

async fn assert_save_overwrites<R: SessionRepository>(repo: &R) {
    let id = Uuid::new_v4();
    let mut session = QuizSession::new();
    repo.save(id, session.clone(), t0()).await.unwrap();

    session.go_to_select();
    repo.save(id, session, t0()).await.unwrap();

    let found = repo.find(&id).await.unwrap().expect("session should exist");
    assert_eq!(found.page(), Page::SelectSubject);
}

async fn assert_purge_uses_last_save<R: SessionRepository>(repo: &R) {
    let id = Uuid::new_v4();
    repo.save(id, QuizSession::new(), t0()).await.unwrap();
    repo.save(id, QuizSession::new(), t0() + Duration::hours(2)).await.unwrap();

    let removed = repo.purge_idle(t0() + Duration::hours(1)).await.unwrap();

    assert_eq!(removed, 0);
    assert!(repo.find(&id).await.unwrap().is_some());

    let removed = repo.purge_idle(t0() + Duration::hours(3)).await.unwrap();
    assert_eq!(removed, 1);
    assert!(repo.find(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn in_memory_repository_round_trips_state() {
    assert_round_trips_state(&InMemorySessionRepository::new()).await;
}

#[tokio::test]
async fn in_memory_repository_save_overwrites() {
    assert_save_overwrites(&InMemorySessionRepository::new()).await;
}

#[tokio::test]
async fn in_memory_repository_purge_uses_last_save() {
    assert_purge_uses_last_save(&InMemorySessionRepository::new()).await;
}

#[tokio::test]
async fn in_memory_repository_counts_sessions() {
    let repo = InMemorySessionRepository::new();
    for _ in 0..3 {
        repo.save(Uuid::new_v4(), QuizSession::new(), t0()).await.unwrap();
    }
    assert_eq!(repo.count().await.unwrap(), 3);
}
