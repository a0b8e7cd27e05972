//! 图片生成客户端
//!
//! `ImageChannel` 是调度器与外部服务之间的唯一接口：
//! 给定一个通道（凭据）和提示词，返回图片二进制或失败原因。

pub mod canned_client;
pub mod gemini_client;

pub use canned_client::{CannedImageClient, CannedResponse};
pub use gemini_client::GeminiImageClient;

use crate::error::ChannelError;
use crate::infrastructure::Channel;
use async_trait::async_trait;

/// 图片生成通道接口
#[async_trait]
pub trait ImageChannel: Send + Sync {
    /// 使用指定通道生成一张图片
    async fn generate(&self, channel: &Channel, prompt: &str) -> Result<Vec<u8>, ChannelError>;
}
