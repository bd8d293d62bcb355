pub mod fallback_questions;
