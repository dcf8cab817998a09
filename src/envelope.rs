use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::GatewayError;

pub const CONTENT_TYPE_JSON: &str = "application/json";

const ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");
const GENERATION_METHODS: &str = "POST, OPTIONS";
const PREFLIGHT_HEADERS: [(&str, &str); 2] = [
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Max-Age", "86400"),
];

/// Inbound serverless event: the HTTP method and the raw body, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    #[serde(default = "default_method")]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "POST".to_string()
}

impl InboundEvent {
    pub fn new(method: &str, body: Option<String>) -> Self {
        Self {
            http_method: method.to_string(),
            body,
        }
    }

    pub fn post(body: &str) -> Self {
        Self::new("POST", Some(body.to_string()))
    }

    /// Raw body text; a missing body reads as an empty JSON object.
    pub fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or("{}")
    }
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&GatewayError> for ErrorEnvelope {
    fn from(err: &GatewayError) -> Self {
        Self {
            error: err.public_message(),
            details: err.details().map(String::from),
        }
    }
}

/// The `{statusCode, headers, body}` shape every handler returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseEnvelope {
    /// CORS preflight answer for a generation endpoint: 200, empty body.
    pub fn preflight() -> Self {
        Self::preflight_for(GENERATION_METHODS)
    }

    /// Preflight answer advertising `methods` as allowed.
    pub fn preflight_for(methods: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(ALLOW_ORIGIN.0.to_string(), ALLOW_ORIGIN.1.to_string());
        headers.insert("Access-Control-Allow-Methods".to_string(), methods.to_string());
        for (name, value) in PREFLIGHT_HEADERS {
            headers.insert(name.to_string(), value.to_string());
        }

        Self {
            status_code: 200,
            headers,
            body: String::new(),
        }
    }

    pub fn json<T: Serialize>(status_code: u16, payload: &T) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(ALLOW_ORIGIN.0.to_string(), ALLOW_ORIGIN.1.to_string());
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());

        // Only fails for payloads with non-string map keys
        let body = serde_json::to_string(payload)
            .unwrap_or_else(|_| r#"{"error":"Ошибка генерации"}"#.to_string());

        Self {
            status_code,
            headers,
            body,
        }
    }

    pub fn ok<T: Serialize>(payload: &T) -> Self {
        Self::json(200, payload)
    }

    pub fn error(status_code: u16, message: &str) -> Self {
        Self::json(
            status_code,
            &ErrorEnvelope {
                error: message.to_string(),
                details: None,
            },
        )
    }

    pub fn method_not_allowed() -> Self {
        Self::error(405, "Method not allowed")
    }

    pub fn not_found() -> Self {
        Self::error(404, "Not found")
    }

    pub fn from_error(err: &GatewayError) -> Self {
        Self::json(err.status_code(), &ErrorEnvelope::from(err))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
