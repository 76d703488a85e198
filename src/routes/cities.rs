use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::Engine;
use crate::models::{City, ErrorResponse, FindCityRequest, FindCityResponse, HealthResponse};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub cities: Arc<Vec<City>>,
}

/// Configure all city-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/cities/ideal", web::post().to(find_ideal_city));
}

/// Health check endpoint
///
/// Reports "degraded" when the dataset failed to load, since every request
/// would then get the fallback city.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let cities_loaded = state.cities.len();
    let status = if cities_loaded > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cities_loaded,
    })
}

/// Find ideal city endpoint
///
/// POST /api/v1/cities/ideal
///
/// Request body:
/// ```json
/// {
///   "responses": [1500000, 1.0, -1.0, -0.5, 1.0, -1.0]
/// }
/// ```
async fn find_ideal_city(
    state: web::Data<AppState>,
    req: web::Json<FindCityRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_ideal_city request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!(
        "Finding ideal city for population preference {} among {} cities",
        req.responses[0],
        state.cities.len()
    );

    let result: FindCityResponse = state.engine.run(&req.responses, &state.cities).await;

    HttpResponse::Ok().json(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::IndexClient;
    use actix_web::{http::StatusCode, test, App};
    use std::time::Duration;

    fn state(cities: Vec<City>) -> AppState {
        let client = IndexClient::new(
            "http://127.0.0.1:1/api/indices".to_string(),
            None,
            Duration::from_secs(1),
        )
        .unwrap();

        AppState {
            engine: Engine::new(client, 1),
            cities: Arc::new(cities),
        }
    }

    #[actix_web::test]
    async fn test_health_reports_degraded_without_cities() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(vec![])))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.status, "degraded");
        assert_eq!(resp.cities_loaded, 0);
    }

    #[actix_web::test]
    async fn test_wrong_survey_length_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(vec![City::new("Lyon", "France", 513_275)])))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/cities/ideal")
            .set_json(serde_json::json!({ "responses": [1.0, 2.0] }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_empty_dataset_returns_fallback() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(vec![])))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/cities/ideal")
            .set_json(serde_json::json!({ "responses": [1000000, 1, 1, 1, 1, 1] }))
            .to_request();
        let resp: FindCityResponse = test::call_and_read_body_json(&app, req).await;

        assert!(resp.fallback);
        assert_eq!(resp.city.name, "Chicago");
    }
}
