use std::sync::Arc;

use crate::{
    config::Config,
    models::domain::QuestionBank,
    repositories::InMemorySessionRepository,
    services::{clock::SystemClock, image_store::ImageStore, quiz_service::QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let bank = QuestionBank::load(&config.questions_path, QuestionBank::fallback());

        let quiz_service = QuizService::new(
            bank,
            config.questions_path.clone(),
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(SystemClock),
        )
        .with_images(ImageStore::new(config.images_dir.clone()));

        Self::from_parts(quiz_service, config)
    }

    pub fn from_parts(quiz_service: QuizService, config: Config) -> Self {
        Self {
            quiz_service: Arc::new(quiz_service),
            config: Arc::new(config),
        }
    }
}
