use std::time::Duration as StdDuration;

use actix_web::{middleware::Logger, web, App, HttpServer};
use suhak_quiz::{
    app_state::AppState, config::Config, handlers, middleware::SessionMiddleware,
};

const PURGE_INTERVAL: StdDuration = StdDuration::from_secs(60);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let state = AppState::new(Config::from_env());
    let config = state.config.clone();

    let service = state.quiz_service.clone();
    let idle = chrono::Duration::minutes(config.session_idle_minutes);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(e) = service.purge_idle_sessions(idle).await {
                log::error!("Failed to purge idle sessions: {}", e);
            }
        }
    });

    let service = state.quiz_service.clone();
    let poll = StdDuration::from_secs(config.reload_poll_seconds);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll);
        loop {
            ticker.tick().await;
            service.reload_if_changed();
        }
    });

    log::info!(
        "starting HTTP server on http://{}:{}",
        config.web_server_host,
        config.web_server_port
    );

    let app_state = state.clone();
    HttpServer::new(move || {
        let config = &app_state.config;
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(SessionMiddleware::new(
                &config.session_cookie_name,
                config.session_cookie_secure,
            ))
            .wrap(Logger::default())
            .configure(handlers::routes)
            .service(handlers::images(&config.images_dir))
    })
    .bind((config.web_server_host.as_str(), config.web_server_port))?
    .run()
    .await
}
