//! HTTP routes.

pub mod account;
pub mod stat;

use std::sync::Arc;

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::{Next, from_fn},
    response::Response,
    routing::{get, post},
};

use http::{HeaderValue, Method, header};

use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app::{AppState, error::AppErrorKind, handle_panic};

/// Plain-text body of the liveness endpoint.
pub const LIVENESS: &str = "Account board API is running";

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::<AppState>::new()
        .route("/accounts", get(account::list).post(stat::submit))
        .route("/accounts/{username}", get(account::show))
        .route("/update", post(account::update))
        .layer(from_fn(security_headers));

    let router = Router::new()
        .route("/", get(live))
        .nest("/api", api_routes)
        .with_state(state);

    with_service_layers(router)
}

/// Wraps `router` in the layers every route shares: panic recovery, CORS,
/// request tracing and internal error logging.
fn with_service_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any)
                .allow_origin(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    let method = req.method();
                    let uri = req.uri();

                    // axum automatically adds this extension.
                    let matched_path = req
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::debug_span!("request", %method, %uri, matched_path)
                })
                // errors are logged by `log_app_errors`
                .on_failure(()),
        )
        .layer(from_fn(log_app_errors))
}

/// Liveness check.
pub async fn live() -> &'static str {
    LIVENESS
}

async fn security_headers(request: Request, next: Next) -> Response {
    let mut res = next.run(request).await;

    res.headers_mut().extend([
        (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
    ]);

    res
}

async fn log_app_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    // If the response contains an internal error, log it.
    if let Some(err) = response.extensions().get::<Arc<AppErrorKind>>() {
        tracing::error!(?err, "an unexpected error occurred inside a handler");
    }
    response
}
