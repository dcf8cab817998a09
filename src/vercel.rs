//! Adapter between Vercel serverless functions and the gateway.

use vercel_runtime::{Body, Error, Request, Response, StatusCode};

use crate::client::GenerationClient;
use crate::config::Config;
use crate::envelope::{InboundEvent, ResponseEnvelope};
use crate::gateway::{Gateway, UseCase};

pub fn event_from_request(req: &Request) -> InboundEvent {
    let body = match req.body() {
        Body::Empty => None,
        Body::Text(text) => Some(text.clone()),
        Body::Binary(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
    };
    InboundEvent::new(req.method().as_str(), body)
}

pub fn into_response(envelope: ResponseEnvelope) -> Result<Response<Body>, Error> {
    let status = StatusCode::from_u16(envelope.status_code)?;
    let mut builder = Response::builder().status(status);
    for (name, value) in &envelope.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let body = if envelope.body.is_empty() {
        Body::Empty
    } else {
        Body::Text(envelope.body)
    };
    Ok(builder.body(body)?)
}

pub async fn handle<C: GenerationClient>(
    gateway: &Gateway<C>,
    use_case: UseCase,
    req: Request,
) -> Result<Response<Body>, Error> {
    let event = event_from_request(&req);
    let envelope = gateway.handle(use_case, &event).await;
    into_response(envelope)
}

/// Health check against `config`. Never fails on an invalid configuration.
pub fn health_response(config: &Config, req: &Request) -> Result<Response<Body>, Error> {
    into_response(crate::server::health(req.method().as_str(), config))
}

/// Entry point of `api/health.rs`.
pub async fn serve_health() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = std::sync::Arc::new(Config::default().with_env_overrides());

    vercel_runtime::run(move |req: Request| {
        let config = config.clone();
        async move { health_response(&config, &req) }
    })
    .await
}

/// Entry point shared by every function under `api/`.
pub async fn serve(use_case: UseCase) -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let gateway = std::sync::Arc::new(Gateway::from_config(config)?);

    vercel_runtime::run(move |req: Request| {
        let gateway = gateway.clone();
        async move { handle(&gateway, use_case, req).await }
    })
    .await
}
