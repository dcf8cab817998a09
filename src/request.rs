use serde::{Deserialize, Serialize};

use crate::GatewayError;

/// One section of a document outline. Order within a list is the order of
/// sections in the drafted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub description: String,
}

/// Request for a document outline.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default = "default_doc_type")]
    pub doc_type: String,
    #[serde(default = "default_pages")]
    pub pages: u32,
    #[serde(default)]
    pub additional_info: String,
}

/// Request for a full document drafted from an approved outline.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default = "default_doc_type")]
    pub doc_type: String,
    #[serde(default = "default_pages")]
    pub pages: u32,
    #[serde(default)]
    pub topics: Vec<Section>,
    #[serde(default)]
    pub additional_info: String,
}

/// Body of the combined document endpoint; `mode` picks outline or draft.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocWriterRequest {
    #[serde(default)]
    pub mode: String,
    #[serde(flatten)]
    pub document: DocumentRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocWriterMode {
    Topics,
    Document,
}

impl DocWriterRequest {
    /// Anything other than `"topics"` drafts the full document.
    pub fn mode(&self) -> DocWriterMode {
        if self.mode == "topics" {
            DocWriterMode::Topics
        } else {
            DocWriterMode::Document
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    #[serde(default)]
    pub task: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_goal")]
    pub goal: String,
    #[serde(default = "default_length")]
    pub length: String,
    #[serde(default = "default_emojis")]
    pub emojis: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    #[serde(default)]
    pub task: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
}

fn default_doc_type() -> String {
    "реферат".to_string()
}

fn default_pages() -> u32 {
    10
}

fn default_platform() -> String {
    "социальная сеть".to_string()
}

fn default_tone() -> String {
    "дружелюбный".to_string()
}

fn default_goal() -> String {
    "вовлечение".to_string()
}

fn default_length() -> String {
    "средний".to_string()
}

fn default_emojis() -> String {
    "баланс".to_string()
}

fn default_style() -> String {
    "фотореализм".to_string()
}

fn default_aspect_ratio() -> String {
    "квадрат".to_string()
}

impl StructureRequest {
    pub fn validate(&self) -> crate::Result<()> {
        require(&self.subject, "Не указана тема документа")
    }
}

impl DocumentRequest {
    pub fn validate(&self) -> crate::Result<()> {
        require(&self.subject, "Не указана тема документа")?;
        if self.topics.is_empty() {
            return Err(GatewayError::Validation("Не указана структура документа".to_string()));
        }
        Ok(())
    }

    pub fn into_structure(self) -> StructureRequest {
        StructureRequest {
            subject: self.subject,
            doc_type: self.doc_type,
            pages: self.pages,
            additional_info: self.additional_info,
        }
    }
}

impl PostRequest {
    pub fn validate(&self) -> crate::Result<()> {
        require(&self.task, "Задача поста не указана")
    }
}

impl ImageRequest {
    pub fn validate(&self) -> crate::Result<()> {
        require(&self.task, "Описание изображения не указано")
    }
}

fn require(value: &str, message: &str) -> crate::Result<()> {
    if value.is_empty() {
        Err(GatewayError::Validation(message.to_string()))
    } else {
        Ok(())
    }
}
