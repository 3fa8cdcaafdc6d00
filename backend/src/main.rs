mod config;
mod routes;
mod upstream;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use config::GatewayConfig;
use routes::configure_routes;
use upstream::AiEngineClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = GatewayConfig::from_env().map_err(|e| {
        log::error!("Invalid gateway configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let engine = AiEngineClient::new(&config.ai_engine_url);
    log::info!("Relaying to AI engine at {}", engine.base_url());

    match &config.frontend_dir {
        Some(dir) => log::info!("Serving client from {}", dir.display()),
        None => log::info!("FRONTEND_DIR not set, serving API only"),
    }

    let bind_address = config.bind_address();
    log::info!("Starting gateway on {}", bind_address);

    let frontend_dir = config.frontend_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::Data::new(engine.clone()))
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
