use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::gateway::UseCase;
use crate::GatewayError;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub use_cases: UseCasesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub proxy_url: Option<String>,
}

/// Policy applied to one entry point: which model answers it, how long
/// the provider may take, and how document length is budgeted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCasePolicy {
    pub model: String,
    pub timeout_seconds: u64,
    #[serde(default)]
    pub length_budget: LengthBudget,
    #[serde(default)]
    pub outline_template: OutlineTemplate,
}

/// Wording of the outline request. `compact` is the shorter prompt served
/// by the combined document endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlineTemplate {
    #[default]
    Detailed,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LengthBudget {
    Characters { per_page: u32 },
    Words { per_page: u32, max_total: u32 },
}

impl Default for LengthBudget {
    fn default() -> Self {
        LengthBudget::Characters { per_page: 1800 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCasesConfig {
    pub document_topics: UseCasePolicy,
    pub document_writer: UseCasePolicy,
    pub doc_writer: UseCasePolicy,
    pub generate_post: UseCasePolicy,
    pub generate_image: UseCasePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: GEMINI_API_BASE.to_string(),
            api_key: None,
            proxy_url: None,
        }
    }
}

impl Default for UseCasesConfig {
    fn default() -> Self {
        Self {
            document_topics: UseCasePolicy::new("gemini-2.0-flash-exp", 30),
            document_writer: UseCasePolicy::new("gemini-2.0-flash-exp", 120),
            doc_writer: UseCasePolicy {
                outline_template: OutlineTemplate::Compact,
                ..UseCasePolicy::new("gemini-2.5-flash", 120)
            },
            generate_post: UseCasePolicy::new("gemini-2.0-flash-exp", 30),
            generate_image: UseCasePolicy::new("gemini-2.5-flash-image", 60),
        }
    }
}

impl UseCasePolicy {
    pub fn new(model: &str, timeout_seconds: u64) -> Self {
        Self {
            model: model.to_string(),
            timeout_seconds,
            length_budget: LengthBudget::default(),
            outline_template: OutlineTemplate::default(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl UseCasesConfig {
    pub fn policy(&self, use_case: UseCase) -> &UseCasePolicy {
        match use_case {
            UseCase::DocumentTopics => &self.document_topics,
            UseCase::DocumentWriter => &self.document_writer,
            UseCase::DocWriter => &self.doc_writer,
            UseCase::GeneratePost => &self.generate_post,
            UseCase::GenerateImage => &self.generate_image,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            provider: ProviderConfig::default(),
            use_cases: UseCasesConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Defaults plus environment overrides, for deployments without a config file.
    pub fn from_env() -> crate::Result<Self> {
        let config = Self::default().with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `GEMINI_API_KEY`, `PROXY_URL` and `GEMINI_API_BASE`. Empty values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = non_empty_var("GEMINI_API_KEY") {
            self.provider.api_key = Some(key);
        }
        if let Some(proxy) = non_empty_var("PROXY_URL") {
            self.provider.proxy_url = Some(proxy);
        }
        if let Some(base) = non_empty_var("GEMINI_API_BASE") {
            self.provider.base_url = base;
        }
        self
    }

    pub fn validate(&self) -> crate::Result<()> {
        Url::parse(&self.provider.base_url)
            .map_err(|e| GatewayError::Config(format!("Invalid provider base_url: {}", e)))?;

        if let Some(proxy) = &self.provider.proxy_url {
            Url::parse(proxy)
                .map_err(|e| GatewayError::Config(format!("Invalid proxy_url: {}", e)))?;
        }

        Ok(())
    }

    /// The provider credential, checked per invocation.
    pub fn api_key(&self) -> crate::Result<&str> {
        self.provider
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GatewayError::Config("GEMINI_API_KEY не настроен".to_string()))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
