//! Per-request tracing spans and access logging.

use axum::body::Body;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request<Body>) -> Span,
    DefaultOnRequest,
    DefaultOnResponse,
>;

/// Wraps every request in an `http` span and logs its status and latency.
///
/// The span carries the method and path only, so query strings stay out of
/// logs. `token` is filled in by the auth middleware on protected routes.
///
/// ```text
/// INFO http{method=POST path=/api/events/4/generate-transport-from-flights token=planner}: finished processing request latency=38 ms status=200
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(request_span as fn(&Request<Body>) -> Span)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn request_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "http",
        method = %req.method(),
        path = %req.uri().path(),
        token = tracing::field::Empty,
    )
}
