//! Request gateway: one entry point for every generation use-case.
//!
//! Each invocation runs strictly in sequence: method check, body parsing and
//! validation, prompt building, one provider call, response normalization.
//! Every outcome, including failures, becomes a [`ResponseEnvelope`].

use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::client::{GeminiClient, GenerationCall, GenerationClient};
use crate::config::Config;
use crate::envelope::{InboundEvent, ResponseEnvelope};
use crate::normalize;
use crate::prompts;
use crate::request::{
    DocWriterMode, DocWriterRequest, DocumentRequest, ImageRequest, PostRequest, StructureRequest,
};
use crate::GatewayError;

/// Deployed entry points, identified by their URL slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCase {
    DocumentTopics,
    DocumentWriter,
    DocWriter,
    GeneratePost,
    GenerateImage,
}

impl UseCase {
    pub const ALL: [UseCase; 5] = [
        UseCase::DocumentTopics,
        UseCase::DocumentWriter,
        UseCase::DocWriter,
        UseCase::GeneratePost,
        UseCase::GenerateImage,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            UseCase::DocumentTopics => "document-topics",
            UseCase::DocumentWriter => "document-writer",
            UseCase::DocWriter => "doc-writer",
            UseCase::GeneratePost => "generate-post",
            UseCase::GenerateImage => "generate-image",
        }
    }

    /// Parse the body into the task this entry point serves.
    pub fn parse_task(&self, body: &str) -> crate::Result<GenerationTask> {
        let task = match self {
            UseCase::DocumentTopics => GenerationTask::Topics(serde_json::from_str(body)?),
            UseCase::DocumentWriter => GenerationTask::Document(serde_json::from_str(body)?),
            UseCase::DocWriter => {
                let req: DocWriterRequest = serde_json::from_str(body)?;
                match req.mode() {
                    DocWriterMode::Topics => GenerationTask::Topics(req.document.into_structure()),
                    DocWriterMode::Document => GenerationTask::Document(req.document),
                }
            }
            UseCase::GeneratePost => GenerationTask::Post(serde_json::from_str(body)?),
            UseCase::GenerateImage => GenerationTask::Image(serde_json::from_str(body)?),
        };
        Ok(task)
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for UseCase {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UseCase::ALL
            .into_iter()
            .find(|u| u.slug() == s)
            .ok_or_else(|| GatewayError::Internal(format!("Unknown use-case: {}", s)))
    }
}

/// A parsed request, tagged by the kind of generation it asks for.
#[derive(Debug, Clone)]
pub enum GenerationTask {
    Topics(StructureRequest),
    Document(DocumentRequest),
    Post(PostRequest),
    Image(ImageRequest),
}

#[derive(Debug, Serialize)]
struct TopicsPayload {
    topics: Vec<crate::request::Section>,
}

impl GenerationTask {
    pub fn validate(&self) -> crate::Result<()> {
        match self {
            GenerationTask::Topics(req) => req.validate(),
            GenerationTask::Document(req) => req.validate(),
            GenerationTask::Post(req) => req.validate(),
            GenerationTask::Image(req) => req.validate(),
        }
    }

    pub fn prompt(&self, config: &Config, use_case: UseCase) -> String {
        match self {
            GenerationTask::Topics(req) => {
                let template = config.use_cases.policy(use_case).outline_template;
                prompts::structure_prompt(req, template)
            }
            GenerationTask::Document(req) => {
                let budget = config.use_cases.policy(use_case).length_budget;
                prompts::document_prompt(req, budget)
            }
            GenerationTask::Post(req) => prompts::post_prompt(req),
            GenerationTask::Image(req) => prompts::image_prompt(req),
        }
    }
}

pub struct Gateway<C = GeminiClient> {
    config: Arc<Config>,
    client: C,
}

impl Gateway<GeminiClient> {
    /// Gateway backed by the Gemini HTTP client.
    pub fn from_config(config: Config) -> crate::Result<Self> {
        config.validate()?;
        let client = GeminiClient::new(&config.provider)?;
        Ok(Self::new(Arc::new(config), client))
    }
}

impl<C: GenerationClient> Gateway<C> {
    pub fn new(config: Arc<Config>, client: C) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Turn one inbound event into a response envelope. Never fails.
    pub async fn handle(&self, use_case: UseCase, event: &InboundEvent) -> ResponseEnvelope {
        let request_id = Uuid::new_v4();
        info!("[{}] {} {}", request_id, event.http_method, use_case);

        match event.http_method.as_str() {
            "OPTIONS" => ResponseEnvelope::preflight(),
            "POST" => match self.process(use_case, event.body_or_empty()).await {
                Ok(envelope) => {
                    info!("[{}] {} completed", request_id, use_case);
                    envelope
                }
                Err(e) => {
                    if e.is_client_error() {
                        warn!("[{}] {} rejected: {}", request_id, use_case, e);
                    } else {
                        error!("[{}] {} failed: {}", request_id, use_case, e);
                    }
                    ResponseEnvelope::from_error(&e)
                }
            },
            other => {
                warn!("[{}] Method {} not allowed on {}", request_id, other, use_case);
                ResponseEnvelope::method_not_allowed()
            }
        }
    }

    async fn process(&self, use_case: UseCase, body: &str) -> crate::Result<ResponseEnvelope> {
        let task = use_case.parse_task(body)?;
        task.validate()?;

        let api_key = self.config.api_key()?;
        let policy = self.config.use_cases.policy(use_case);
        let prompt = task.prompt(&self.config, use_case);

        let call = GenerationCall {
            api_key,
            model: &policy.model,
            prompt: &prompt,
            timeout: policy.timeout(),
        };
        let response = self.client.generate(&call).await?;

        let envelope = match task {
            GenerationTask::Topics(_) => {
                let text = normalize::extract_text(&response)?;
                let topics = normalize::parse_sections(&text)?;
                ResponseEnvelope::ok(&TopicsPayload { topics })
            }
            GenerationTask::Document(_) => {
                let document = normalize::extract_text(&response)?;
                ResponseEnvelope::ok(&json!({ "document": document }))
            }
            GenerationTask::Post(_) => {
                let post = normalize::extract_text(&response)?;
                ResponseEnvelope::ok(&json!({ "post": post }))
            }
            GenerationTask::Image(_) => {
                let image = normalize::extract_image(&response, &prompt)?;
                ResponseEnvelope::ok(&image)
            }
        };

        Ok(envelope)
    }
}
