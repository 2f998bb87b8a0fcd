//! Responses for unsupported methods and unknown paths

use actix_web::http::{Method, StatusCode};
use actix_web::{HttpRequest, HttpResponse};

use crate::models::ErrorResponse;

/// Default service of the API resources: anything but POST.
///
/// OPTIONS still gets an empty 204 so preflights succeed when the CORS
/// middleware is disabled.
pub async fn api_method_fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return HttpResponse::NoContent().finish();
    }
    log::warn!("Method {} not allowed on {}", req.method(), req.path());
    HttpResponse::build(StatusCode::METHOD_NOT_ALLOWED)
        .insert_header(("Allow", "POST, OPTIONS"))
        .json(ErrorResponse::new(
            "Method not allowed - use POST",
            format!("{} is not supported on {}", req.method(), req.path()),
        ))
}

pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    log::warn!("Route not found: {} {}", req.method(), req.path());
    HttpResponse::NotFound().json(ErrorResponse::new(
        "Route not found",
        format!("No route for {} {}", req.method(), req.path()),
    ))
}

#[cfg(test)]
mod tests {
    use crate::routes::configure_routes;
    use crate::test_support::TestComponents;
    use actix_web::{test, App};
    use serde_json::Value as JsonValue;

    #[actix_web::test]
    async fn test_get_on_api_path_is_405() {
        let components = TestComponents::new();
        let app = test::init_service(
            App::new()
                .configure(|cfg| components.register(cfg))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/oracle/convert").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 405);
        let body: JsonValue = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Method not allowed - use POST");
    }

    #[actix_web::test]
    async fn test_options_on_api_path_is_204() {
        let components = TestComponents::new();
        let app = test::init_service(
            App::new()
                .configure(|cfg| components.register(cfg))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/oracle/procedure")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 204);
    }

    #[actix_web::test]
    async fn test_unknown_path_is_404() {
        let components = TestComponents::new();
        let app = test::init_service(
            App::new()
                .configure(|cfg| components.register(cfg))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/oracle/unknown").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: JsonValue = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Route not found");
        assert!(body["timestamp"].is_string());
    }
}
