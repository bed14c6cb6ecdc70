use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizgen_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config).await.map_err(|e| {
        log::error!("Failed to initialise application state: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    if state.config.seed_texts {
        if let Err(e) = state.text_service.seed_samples().await {
            log::warn!("Failed to seed text library: {}", e);
        }
    }

    // Warm the model up front; requests still load it lazily if this fails.
    if let Err(e) = state.completion_service.load().await {
        log::warn!("Inference engine not ready at startup: {}", e);
    }

    log::info!("Starting HTTP server on {}:{}", host, port);

    let completion_service = state.completion_service.clone();
    let result = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(handlers::json_config())
            .wrap(Cors::permissive())
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await;

    if let Err(e) = completion_service.unload().await {
        log::warn!("Failed to release inference engine: {}", e);
    }

    result
}
