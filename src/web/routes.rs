use actix_web::web;
use log::debug;

use crate::web::error::RelayError;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        debug!("Rejected chat request body: {}", err);
        RelayError::InvalidBody.into()
    });

    cfg.service(
        web::scope("/api")
            .app_data(json_config)
            .route("/chat", web::post().to(handlers::chat))
            .route("/models", web::get().to(handlers::models))
    )
    .route("/", web::get().to(handlers::index))
    .route("/health", web::get().to(handlers::health_check));
}
