use actix_web::{get, web, HttpResponse, Responder};
use log::error;

use crate::{
    logic::zone::{ZoneError, ZoneLookup},
    models::request::{ErrorResponse, ZoneResponse},
};

/// GET /api/zones/{zipcode}
/// Resolves a US zipcode to its USDA hardiness zone with the configured provider.
#[utoipa::path(
    get,
    path = "/api/zones/{zipcode}",
    tag = "zones",
    params(("zipcode" = String, Path, description = "5-digit US zipcode")),
    responses(
        (status = 200, description = "Zone found", body = ZoneResponse),
        (status = 400, description = "Malformed zipcode", body = ErrorResponse),
        (status = 502, description = "Zone provider failed", body = ErrorResponse),
    )
)]
#[get("/zones/{zipcode}")]
pub async fn get_zone(path: web::Path<String>, lookup: web::Data<dyn ZoneLookup>) -> impl Responder {
    let zipcode = path.into_inner();

    match lookup.lookup(&zipcode).await {
        Ok(growing_zone) => HttpResponse::Ok().json(ZoneResponse {
            zipcode,
            growing_zone,
        }),
        Err(e @ ZoneError::InvalidZipcode) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
        }
        Err(e) => {
            error!("Zone lookup for {zipcode} failed: {e}");
            HttpResponse::BadGateway().json(ErrorResponse::new(
                "Failed to fetch growing zone. Please try again.",
            ))
        }
    }
}
