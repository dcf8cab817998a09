use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Config(String),

    #[error("Invalid request body: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider call timed out after {0}s")]
    Timeout(u64),

    #[error("Gemini API error: {status}")]
    Provider { status: u16, body: String },

    #[error("{0}")]
    MalformedResponse(String),

    #[error("{0}")]
    EmptyResult(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status code reported to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Validation(_) => 400,
            _ => 500,
        }
    }

    /// Caller-facing `error` text of the envelope.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::InvalidRequest(e) => format!("Ошибка генерации: {}", e),
            GatewayError::Internal(msg) => format!("Ошибка генерации: {}", msg),
            other => other.to_string(),
        }
    }

    /// Diagnostic `details` of the envelope, only set for upstream HTTP failures.
    pub fn details(&self) -> Option<&str> {
        match self {
            GatewayError::Provider { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
