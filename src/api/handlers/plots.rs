use actix_web::{post, web, HttpResponse, Responder};
use chrono::Utc;
use log::{info, warn};
use serde_json::Value;

use crate::models::{
    plot::iso_timestamp,
    request::{has_required_fields, ErrorResponse, SavePlotRequest, SavePlotResponse},
};

/// POST /api/save-plot
/// Acknowledges a plot save. Only checks that `name` and `image` are present;
/// nothing is stored.
#[utoipa::path(
    post,
    path = "/api/save-plot",
    tag = "plots",
    request_body = SavePlotRequest,
    responses(
        (status = 200, description = "Plot accepted", body = SavePlotResponse),
        (status = 400, description = "Missing name or image", body = ErrorResponse),
    )
)]
#[post("/save-plot")]
pub async fn save_plot(body: web::Json<Value>) -> impl Responder {
    let body = body.into_inner();

    if !has_required_fields(&body) {
        warn!("Rejected plot save: missing name or image");
        return HttpResponse::BadRequest().json(ErrorResponse::new("Missing required fields"));
    }

    let field = |key: &str| body.get(key).map_or_else(|| "-".to_owned(), Value::to_string);
    info!(
        "Plot {} received (width {}, height {}, grid {})",
        field("name"),
        field("width"),
        field("height"),
        field("gridSize"),
    );
    HttpResponse::Ok().json(SavePlotResponse {
        success: true,
        message: "Plot saved successfully".into(),
        timestamp: iso_timestamp(Utc::now()),
    })
}
