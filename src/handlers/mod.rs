pub mod health_handler;
pub mod quiz_handler;

use std::path::Path;

use actix_files::Files;
use actix_web::web;

use crate::services::image_store::IMAGES_ROUTE;

pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_handler::{
    go_home, go_to_select, next_question, reload_questions, retry_question, session_view,
    show_page, start_quiz, submit_answer,
};

/// Registers every route of the quiz server.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(show_page)
        .service(go_home)
        .service(go_to_select)
        .service(start_quiz)
        .service(submit_answer)
        .service(retry_question)
        .service(next_question)
        .service(reload_questions)
        .service(session_view)
        .service(health_check)
        .service(health_check_live)
        .service(health_check_ready);
}

/// Serves question figures from `dir`.
pub fn images(dir: &Path) -> Files {
    Files::new(IMAGES_ROUTE, dir)
}
