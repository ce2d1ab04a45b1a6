use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use log::{debug, error, info};
use serde_json::json;
use tera::Context;
use uuid::Uuid;

use crate::catalog::AI_MODELS;
use crate::upstream::UpstreamReply;
use crate::web::error::RelayError;
use crate::web::models::{ChatRequest, CompletionRequest};
use crate::web::AppState;

// Index page handler
pub async fn index(data: web::Data<AppState>) -> impl Responder {
    let mut context = Context::new();
    context.insert("models", AI_MODELS);
    match data.tera.render("index.html", &context) {
        Ok(html) => HttpResponse::Ok().content_type("text/html").body(html),
        Err(e) => {
            error!("Template error: {}", e);
            HttpResponse::InternalServerError().body("Template error")
        }
    }
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn models() -> impl Responder {
    HttpResponse::Ok().json(AI_MODELS)
}

/// Relays a chat request upstream and pipes the event stream back untouched.
pub async fn chat(
    data: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> Result<HttpResponse, RelayError> {
    let request_id = Uuid::new_v4();
    let ChatRequest {
        messages,
        model,
        api_key,
    } = req.into_inner();

    let Some(api_key) = api_key.filter(|key| !key.is_empty()) else {
        info!("Relay request {} rejected: no API key", request_id);
        return Err(RelayError::MissingCredential);
    };

    info!(
        "Relay request {}: {} messages, model {}",
        request_id,
        messages.len(),
        model.as_deref().unwrap_or("<unset>")
    );

    let request = CompletionRequest::streaming(model, messages);
    match data.upstream.complete(&request, &api_key).await {
        Ok(UpstreamReply::Stream(body)) => {
            debug!("Relay request {}: streaming upstream body", request_id);
            Ok(HttpResponse::Ok()
                .content_type("text/event-stream")
                .insert_header((header::CACHE_CONTROL, "no-cache"))
                .streaming(body))
        }
        Ok(UpstreamReply::Rejected { status, body }) => {
            error!(
                "Relay request {}: upstream returned {}: {}",
                request_id, status, body
            );
            Err(RelayError::rejected(status, body))
        }
        Err(e) => {
            error!("Relay request {}: upstream call failed: {}", request_id, e);
            Err(RelayError::Transport)
        }
    }
}
