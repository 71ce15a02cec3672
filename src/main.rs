use actix_web::{middleware, web, App, HttpServer};
use garden_designer::{
    api::{openapi::ApiDoc, routes},
    config::{AppConfig, ZoneProvider},
};
use log::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to read .env: {e}");
        }
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    let zone_lookup = config
        .zone_lookup()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    if config.rapidapi_key.is_none() && config.zone_provider == ZoneProvider::RapidApi {
        warn!("RAPIDAPI_KEY is not set; zone lookups will fail");
    }

    let bind_addr = config.bind_addr.clone();
    info!("🌱 Garden designer API started at http://{bind_addr}");
    info!("   POST /api/save-plot");
    info!("   GET  /api/zones/{{zipcode}} ({:?} provider)", config.zone_provider);
    info!("   📖 Swagger UI → http://{bind_addr}/swagger-ui/");

    let zone_data = web::Data::from(zone_lookup);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(zone_data.clone())
            .app_data(routes::json_config())
            .configure(routes::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
