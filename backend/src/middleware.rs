//! Server-wide middleware configuration helpers.
//!
//! Keeps the Actix application setup focused by providing reusable
//! constructors for the CORS, error-rendering and request-logging layers.

use actix_cors::Cors;
use actix_web::dev::ServiceResponse;
use actix_web::http::{header::HeaderName, Method, StatusCode};
use actix_web::middleware::{self, Condition, ErrorHandlerResponse, ErrorHandlers};
use ganproxy_api::models::ApiError;
use ganproxy_configs::CorsSettings;
use log::debug;

/// Build CORS middleware from the `[cors]` settings using actix-cors.
pub fn build_cors_from_config(cors_config: &CorsSettings) -> Cors {
    let mut cors = Cors::default();

    if cors_config.allowed_origins.is_empty() || cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin().send_wildcard();
        debug!("CORS: Allowing any origin");
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        debug!("CORS: Allowed origins: {:?}", cors_config.allowed_origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    if cors_config.allowed_headers.iter().any(|h| h == "*") {
        cors = cors.allow_any_header();
    } else {
        let headers: Vec<HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        if !headers.is_empty() {
            cors = cors.allowed_headers(headers);
        }
    }

    cors.max_age(cors_config.max_age as usize)
}

/// CORS layer that is a no-op when `[cors] enabled = false`.
pub fn cors_layer(cors_config: &CorsSettings) -> Condition<Cors> {
    Condition::new(cors_config.enabled, build_cors_from_config(cors_config))
}

/// Render 500s raised as `actix_web::Error` with the JSON error envelope.
///
/// 500 responses built by a handler (a relayed downstream status) carry no
/// error and are left untouched.
pub fn internal_error_renderer<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, render_internal_error)
}

fn render_internal_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let message = match res.response().error() {
        Some(err) => err.to_string(),
        None => return Ok(ErrorHandlerResponse::Response(res.map_into_left_body())),
    };
    let (req, _) = res.into_parts();
    log::error!("Internal error on {} {}: {}", req.method(), req.path(), message);

    let response = ApiError::Internal(message).to_http_response();
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

/// Build the request logger middleware.
pub fn request_logger() -> middleware::Logger {
    middleware::Logger::new("%a \"%r\" %s %b %Dms")
}
