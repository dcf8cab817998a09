use serde::Serialize;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::info;
use warp::http::header::{HeaderName, HeaderValue};
use warp::http::{Method, StatusCode};
use warp::hyper::body::Bytes;
use warp::{Filter, Rejection, Reply};

use crate::client::GenerationClient;
use crate::config::Config;
use crate::envelope::{InboundEvent, ResponseEnvelope};
use crate::gateway::{Gateway, UseCase};
use crate::GatewayError;

const HEALTH_METHODS: &str = "GET, OPTIONS";

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Health payload shared by the dev server and the `health` function.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: i64,
    pub credential_configured: bool,
    pub config_valid: bool,
    pub endpoints: Vec<&'static str>,
}

impl HealthReport {
    /// Reports on `config` without requiring it to be valid.
    pub fn new(config: &Config) -> Self {
        Self {
            status: "healthy",
            timestamp: chrono::Utc::now().timestamp(),
            credential_configured: config.api_key().is_ok(),
            config_valid: config.validate().is_ok(),
            endpoints: UseCase::ALL.iter().map(|u| u.slug()).collect(),
        }
    }
}

/// Answer a request to the health endpoint.
pub fn health(method: &str, config: &Config) -> ResponseEnvelope {
    match method {
        "OPTIONS" => ResponseEnvelope::preflight_for(HEALTH_METHODS),
        "GET" => ResponseEnvelope::ok(&ApiResponse::success(HealthReport::new(config))),
        _ => ResponseEnvelope::method_not_allowed(),
    }
}

/// Local HTTP server exposing every use-case under `/api/<slug>`.
pub struct DevServer<C> {
    gateway: Arc<Gateway<C>>,
}

impl<C: GenerationClient + 'static> DevServer<C> {
    pub fn new(gateway: Arc<Gateway<C>>) -> Self {
        Self { gateway }
    }

    pub async fn run(self) -> crate::Result<()> {
        let server = &self.gateway.config().server;
        let ip: IpAddr = server.host.parse().map_err(|e| {
            GatewayError::Config(format!("Invalid server host {}: {}", server.host, e))
        })?;
        let addr = SocketAddr::new(ip, server.port);

        info!("Starting gateway dev server on {}", addr);
        warp::serve(routes(self.gateway.clone())).run(addr).await;

        Ok(())
    }
}

pub fn routes<C: GenerationClient + 'static>(
    gateway: Arc<Gateway<C>>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health_check = warp::path!("api" / "health")
        .and(warp::method())
        .and(with_gateway(gateway.clone()))
        .map(|method: Method, gateway: Arc<Gateway<C>>| {
            envelope_reply(health(method.as_str(), gateway.config()))
        });

    let invoke = warp::path!("api" / String)
        .and(warp::method())
        .and(warp::body::bytes())
        .and(with_gateway(gateway))
        .and_then(handle_invocation::<C>);

    health_check.or(invoke)
}

/// Helper function to pass the gateway to handlers
fn with_gateway<C: GenerationClient + 'static>(
    gateway: Arc<Gateway<C>>,
) -> impl Filter<Extract = (Arc<Gateway<C>>,), Error = Infallible> + Clone {
    warp::any().map(move || gateway.clone())
}

async fn handle_invocation<C: GenerationClient + 'static>(
    slug: String,
    method: Method,
    body: Bytes,
    gateway: Arc<Gateway<C>>,
) -> Result<warp::reply::Response, Infallible> {
    let use_case: UseCase = match slug.parse() {
        Ok(use_case) => use_case,
        Err(_) => return Ok(envelope_reply(ResponseEnvelope::not_found())),
    };

    let body = if body.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&body).into_owned())
    };
    let event = InboundEvent::new(method.as_str(), body);

    Ok(envelope_reply(gateway.handle(use_case, &event).await))
}

fn envelope_reply(envelope: ResponseEnvelope) -> warp::reply::Response {
    let mut response = warp::reply::Response::new(envelope.body.into());
    *response.status_mut() =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let headers = response.headers_mut();
    for (name, value) in &envelope.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }

    response
}
