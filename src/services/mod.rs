pub mod clock;
pub mod http_helpers;
pub mod image_store;
pub mod quiz_service;
