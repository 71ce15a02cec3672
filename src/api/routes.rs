use actix_web::{web, HttpResponse};

use crate::api::handlers::{get_zone, save_plot};
use crate::models::request::ErrorResponse;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").service(save_plot).service(get_zone));
}

/// JSON extractor config that answers malformed bodies with a 400 `{ "error": ... }`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("JSON deserialization error: {err}");
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse::new(message)),
        )
        .into()
    })
}
