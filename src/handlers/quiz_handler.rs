use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::SessionId,
    models::{
        domain::Subject,
        dto::request::{SelectSubjectRequest, SubmitAnswerRequest},
    },
    services::http_helpers::{html, see_other, success_json},
    views::render_page,
};

#[get("/")]
pub async fn show_page(state: web::Data<AppState>, session: SessionId) -> Result<HttpResponse, AppError> {
    let view = state.quiz_service.view(&session.0).await?;
    Ok(html(render_page(&view)))
}

#[post("/home")]
pub async fn go_home(state: web::Data<AppState>, session: SessionId) -> Result<HttpResponse, AppError> {
    state.quiz_service.go_home(&session.0).await?;
    Ok(see_other("/"))
}

#[post("/select")]
pub async fn go_to_select(
    state: web::Data<AppState>,
    session: SessionId,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.go_to_select(&session.0).await?;
    Ok(see_other("/"))
}

#[post("/quiz")]
pub async fn start_quiz(
    state: web::Data<AppState>,
    session: SessionId,
    form: web::Form<SelectSubjectRequest>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    form.validate()?;
    let subject: Subject = form.subject.parse()?;

    state.quiz_service.start_quiz(&session.0, subject).await?;
    Ok(see_other("/"))
}

#[post("/quiz/answer")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    session: SessionId,
    form: web::Form<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.submit_answer(&session.0, form.choice).await?;
    Ok(see_other("/"))
}

#[post("/quiz/retry")]
pub async fn retry_question(
    state: web::Data<AppState>,
    session: SessionId,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.retry(&session.0).await?;
    Ok(see_other("/"))
}

#[post("/quiz/next")]
pub async fn next_question(
    state: web::Data<AppState>,
    session: SessionId,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.next_question(&session.0).await?;
    Ok(see_other("/"))
}

#[post("/reload")]
pub async fn reload_questions(state: web::Data<AppState>) -> HttpResponse {
    state.quiz_service.reload_bank();
    see_other("/")
}

#[get("/api/session")]
pub async fn session_view(
    state: web::Data<AppState>,
    session: SessionId,
) -> Result<HttpResponse, AppError> {
    let view = state.quiz_service.view(&session.0).await?;
    Ok(success_json(view))
}
