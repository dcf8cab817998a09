//! Extraction of the caller-facing payload from a provider response.

use serde::Serialize;

use crate::client::{Candidate, GenerateContentResponse};
use crate::request::Section;
use crate::GatewayError;

const FENCE: &str = "```";
const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Generated image ready to embed in a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub image_url: String,
    pub prompt: String,
}

const NO_TEXT: &str = "Не удалось получить ответ от Gemini";
const NO_IMAGE: &str = "Не удалось получить изображение от Gemini";

fn first_candidate<'a>(
    response: &'a GenerateContentResponse,
    empty_message: &str,
) -> crate::Result<&'a Candidate> {
    response
        .candidates
        .first()
        .ok_or_else(|| GatewayError::EmptyResult(empty_message.to_string()))
}

/// Text of the first candidate with surrounding whitespace removed.
pub fn extract_text(response: &GenerateContentResponse) -> crate::Result<String> {
    let candidate = first_candidate(response, NO_TEXT)?;

    let texts: Vec<&str> = candidate
        .content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();

    if texts.is_empty() {
        return Err(GatewayError::EmptyResult(NO_TEXT.to_string()));
    }

    Ok(texts.concat().trim().to_string())
}

/// Remove a markdown code fence around `text`.
///
/// Text that does not open with a fence is returned trimmed. Otherwise the
/// opening line is dropped, the last line is dropped when it is a closing
/// fence, and any fence markers left in the body are removed.
pub fn strip_code_fence(text: &str) -> String {
    let text = text.trim();
    if !text.starts_with(FENCE) {
        return text.to_string();
    }

    let mut lines: Vec<&str> = text.lines().collect();
    if lines.len() > 1 {
        lines.remove(0);
        if lines.last().map_or(false, |l| l.trim_start().starts_with(FENCE)) {
            lines.pop();
        }
    }

    lines
        .join("\n")
        .replace("```json", "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}

/// Parse a document outline out of provider text.
pub fn parse_sections(text: &str) -> crate::Result<Vec<Section>> {
    let cleaned = strip_code_fence(text);

    let value: serde_json::Value = serde_json::from_str(&cleaned)
        .map_err(|e| GatewayError::MalformedResponse(format!("Ошибка парсинга JSON: {}", e)))?;

    if !value.is_array() {
        return Err(GatewayError::MalformedResponse("Неверный формат ответа от AI".to_string()));
    }

    serde_json::from_value(value)
        .map_err(|e| GatewayError::MalformedResponse(format!("Ошибка парсинга JSON: {}", e)))
}

/// First inline image of the first candidate, as a data URI.
pub fn extract_image(
    response: &GenerateContentResponse,
    prompt: &str,
) -> crate::Result<GeneratedImage> {
    let candidate = first_candidate(response, NO_IMAGE)?;

    candidate
        .content
        .parts
        .iter()
        .filter_map(|part| part.inline_data.as_ref())
        .find_map(|inline| {
            inline.data.as_ref().map(|data| {
                let mime = inline.mime_type.as_deref().unwrap_or(DEFAULT_IMAGE_MIME);
                GeneratedImage {
                    image_url: format!("data:{};base64,{}", mime, data),
                    prompt: prompt.to_string(),
                }
            })
        })
        .ok_or_else(|| {
            GatewayError::MalformedResponse("Нет изображения в ответе от Gemini".to_string())
        })
}
