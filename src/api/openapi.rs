use utoipa::OpenApi;

use crate::models::request::{ErrorResponse, SavePlotRequest, SavePlotResponse, ZoneResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garden Designer API",
        description = "Companion service for the garden plot designer: acknowledges plot saves and resolves zipcodes to USDA hardiness zones.",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    paths(
        crate::api::handlers::plots::save_plot,
        crate::api::handlers::zones::get_zone,
    ),
    components(
        schemas(SavePlotRequest, SavePlotResponse, ZoneResponse, ErrorResponse)
    ),
    tags(
        (name = "plots", description = "Plot designer persistence"),
        (name = "zones", description = "Hardiness zone lookup"),
    )
)]
pub struct ApiDoc;
