use actix_web::web;

pub mod handlers;
pub mod models;

/// Register every route of the chat API
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health::health)
        .service(handlers::chat::chat);
}
