use std::sync::Arc;

use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use ai_multitool::config::RelayConfig;
use ai_multitool::upstream::{OpenRouterClient, Upstream};
use ai_multitool::web::{routes, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = RelayConfig::from_env();
    info!("Starting AI MultiTool relay on {}:{}", config.bind_addr, config.port);

    let upstream: Arc<dyn Upstream> = Arc::new(OpenRouterClient::new(&config));
    let app_state = match AppState::new(upstream) {
        Ok(state) => Data::new(state),
        Err(e) => {
            error!("Template parsing error: {}", e);
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
