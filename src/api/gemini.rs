//! Gemini generateContent 报文
//!
//! 只负责请求构建和响应解析，不做网络调用

use crate::error::ChannelError;
use base64::{engine::general_purpose, Engine};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// 请求体
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            top_k: 32,
            top_p: 1.0,
            max_output_tokens: 4096,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

/// 响应体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// 根据提示词构建请求体
pub fn build_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(prompt.to_string()),
                inline_data: None,
            }],
        }],
        generation_config: GenerationConfig::default(),
    }
}

/// 从响应中提取图片二进制
///
/// 优先读取第一个候选的 `inlineData`；没有时再从文本中查找
/// base64 编码的图片（`data:image` 前缀或 PNG 的 `iVBOR` 开头）。
pub fn extract_image_bytes(response: &GenerateContentResponse) -> Result<Vec<u8>, ChannelError> {
    let parts = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|c| c.parts.as_slice())
        .unwrap_or_default();

    if let Some(data) = parts
        .iter()
        .filter_map(|p| p.inline_data.as_ref())
        .find_map(|d| d.data.as_deref())
    {
        return Ok(general_purpose::STANDARD.decode(data)?);
    }

    for text in parts.iter().filter_map(|p| p.text.as_deref()) {
        if let Some(bytes) = decode_embedded_image(text) {
            return Ok(bytes);
        }
    }

    Err(ChannelError::MissingPayload)
}

// ========== 辅助函数 ==========

fn base64_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:data:image/\w+;base64,)?([A-Za-z0-9+/]+=*)").expect("base64 pattern is valid")
    })
}

/// 从文本中解码最长的 base64 片段
fn decode_embedded_image(text: &str) -> Option<Vec<u8>> {
    if !text.contains("data:image") && !text.contains("iVBOR") {
        return None;
    }

    let longest = base64_pattern()
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .max_by_key(|s| s.len())?;

    general_purpose::STANDARD.decode(longest).ok()
}
