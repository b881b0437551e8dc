use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{CurrentWeather, ForecastWeather};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::current,
        handlers::forecast,
    ),
    components(schemas(
        CurrentWeather,
        ForecastWeather,
        common::models::ForecastItem,
        common::models::ForecastCity,
        common::models::Condition,
        common::models::MainReadings,
        common::models::Wind,
        common::models::Clouds,
        common::models::Precipitation,
        common::models::SystemInfo,
        common::models::Coord,
    )),
    tags(
        (name = "weather", description = "Cached current conditions and forecast"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
