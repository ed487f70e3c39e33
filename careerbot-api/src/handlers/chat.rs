use crate::models::{ChatRequest, ChatResponse, ErrorResponse};
use actix_web::{post, web, HttpResponse, Responder};
use careerbot_agent::ChatOrchestrator;
use std::sync::Arc;
use tracing::{error, info};

#[post("/chat")]
pub async fn chat(
    req: web::Json<ChatRequest>,
    orchestrator: web::Data<Arc<ChatOrchestrator>>,
) -> impl Responder {
    if let Err(error) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse { error });
    }
    let ChatRequest { message, history } = req.into_inner();

    info!(history_len = history.len(), "Chat turn requested");

    match orchestrator.respond(&message, &history).await {
        Ok((reply, history)) => HttpResponse::Ok().json(ChatResponse { reply, history }),
        Err(e) => {
            error!(error = %e, "Chat turn failed");
            HttpResponse::BadGateway().json(ErrorResponse {
                error: format!("Chat turn failed: {}", e),
            })
        }
    }
}
