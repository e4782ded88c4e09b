//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

#[cfg(feature = "metrics")]
pub(crate) use metrics::build_prometheus;
#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};

use complaints::Trace;
#[cfg(debug_assertions)]
use complaints::doc::ApiDoc;
use complaints::domain::TRACE_ID_HEADER;
use complaints::inbound::http::complaints::configure as configure_complaints;
use complaints::inbound::http::error::json_error_handler;
use complaints::inbound::http::health::{HealthState, live, ready};
use complaints::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

const CORS_MAX_AGE_SECS: usize = 3600;

const ANY_ORIGIN: &str = "*";

/// CORS policy for the single-page client.
///
/// `None` and `"*"` both allow any origin; actix-cors rejects `"*"` as a
/// literal origin.
fn build_cors(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allowed_header(header::CONTENT_TYPE)
        .expose_headers([TRACE_ID_HEADER])
        .max_age(CORS_MAX_AGE_SECS);
    match allowed_origin {
        Some(origin) if origin != ANY_ORIGIN => cors.allowed_origin(origin),
        _ => cors.allow_any_origin(),
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    allowed_origin: Option<String>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        allowed_origin,
    } = deps;

    let api = web::scope("/api").configure(configure_complaints);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(build_cors(allowed_origin.as_deref()))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The returned [`Server`] must be awaited to drive the listener. Readiness is
/// flagged once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        allowed_origin,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            allowed_origin: allowed_origin.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
