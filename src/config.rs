use std::{env, path::PathBuf};

use crate::services::quiz_service::DEFAULT_IMAGES_DIR;

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub questions_path: PathBuf,
    pub images_dir: PathBuf,
    pub reload_poll_seconds: u64,
    pub session_cookie_name: String,
    pub session_cookie_secure: bool,
    pub session_idle_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            questions_path: env::var("QUESTIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/questions.json")),
            images_dir: env::var("IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_IMAGES_DIR)),
            reload_poll_seconds: env::var("QUESTIONS_POLL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|s: &u64| *s > 0)
                .unwrap_or(2),
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "quiz_sid".to_string()),
            session_cookie_secure: env::var("SESSION_COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            session_idle_minutes: env::var("SESSION_IDLE_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .filter(|m: &i64| *m > 0)
                .unwrap_or(120),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            questions_path: PathBuf::from("does-not-exist/questions.json"),
            images_dir: PathBuf::from("does-not-exist/images"),
            reload_poll_seconds: 2,
            session_cookie_name: "quiz_sid".to_string(),
            session_cookie_secure: false,
            session_idle_minutes: 30,
        }
    }
}
