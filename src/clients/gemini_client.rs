/// Gemini 图片生成客户端
///
/// 封装所有与 generateContent 接口相关的调用逻辑
use crate::api::gemini::{build_request, extract_image_bytes, GenerateContentResponse};
use crate::clients::ImageChannel;
use crate::config::Config;
use crate::error::{ChannelError, ConfigError};
use crate::infrastructure::Channel;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Gemini 客户端
pub struct GeminiImageClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl GeminiImageClient {
    /// 创建新的 Gemini 客户端
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.image_api_base_url.trim_end_matches('/'),
                config.image_model_name
            ),
            timeout: config.request_timeout(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> ChannelError {
        if err.is_timeout() {
            ChannelError::Timeout(self.timeout)
        } else if let Some(status) = err.status() {
            ChannelError::Status {
                code: status.as_u16(),
            }
        } else {
            ChannelError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ImageChannel for GeminiImageClient {
    async fn generate(&self, channel: &Channel, prompt: &str) -> Result<Vec<u8>, ChannelError> {
        debug!("[{}] 正在调用图片生成 API: {}", channel.identifier, self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", channel.credential.expose())
            .json(&build_request(prompt))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("[{}] 图片生成 API 返回错误状态: {}", channel.identifier, status);
            return Err(ChannelError::Status {
                code: status.as_u16(),
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    self.transport_error(e)
                } else {
                    ChannelError::InvalidPayload(e.to_string())
                }
            })?;

        extract_image_bytes(&body)
    }
}
