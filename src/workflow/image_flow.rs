//! 单张图片处理流程 - 流程层
//!
//! 流程顺序：
//! 1. 调用图片生成接口（带超时）
//! 2. 写入图片文件
//! 3. 生成结果记录
//!
//! 任何失败都只记录到该任务的结果中，不向上传播。

use crate::clients::ImageChannel;
use crate::error::ChannelError;
use crate::infrastructure::Channel;
use crate::models::{GenerationResult, ImageTask};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// 单张图片处理流程
#[derive(Clone)]
pub struct ImageFlow {
    client: Arc<dyn ImageChannel>,
    request_timeout: Duration,
}

impl ImageFlow {
    pub fn new(client: Arc<dyn ImageChannel>, request_timeout: Duration) -> Self {
        Self {
            client,
            request_timeout,
        }
    }

    pub async fn run(&self, channel: &Channel, task: &ImageTask) -> GenerationResult {
        let start = Instant::now();

        match self.generate_and_save(channel, task).await {
            Ok(()) => GenerationResult::succeeded(
                task.id,
                &task.title,
                &channel.identifier,
                task.output_path.clone(),
                start.elapsed(),
            ),
            Err(e) => GenerationResult::failed(
                task.id,
                &task.title,
                &channel.identifier,
                e.to_string(),
                start.elapsed(),
            ),
        }
    }

    async fn generate_and_save(&self, channel: &Channel, task: &ImageTask) -> Result<(), ChannelError> {
        let bytes = tokio::time::timeout(self.request_timeout, self.client.generate(channel, &task.prompt))
            .await
            .map_err(|_| ChannelError::Timeout(self.request_timeout))??;

        if bytes.is_empty() {
            return Err(ChannelError::MissingPayload);
        }

        debug!("{} 收到 {} 字节，写入 {}", task, bytes.len(), task.output_path.display());

        tokio::fs::write(&task.output_path, &bytes)
            .await
            .map_err(|e| ChannelError::WriteFailed {
                path: task.output_path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{CannedImageClient, CannedResponse};
    use crate::infrastructure::Credential;
    use crate::models::TaskStatus;
    use std::path::Path;

    fn task(dir: &Path, prompt: &str) -> ImageTask {
        ImageTask {
            id: 4,
            title: "section".to_string(),
            prompt: prompt.to_string(),
            filename: "ai_tech_business.png".to_string(),
            output_path: dir.join("ai_tech_business.png"),
            status: TaskStatus::Pending,
        }
    }

    fn channel() -> Channel {
        Channel::new("channel-1", Credential::new("key"))
    }

    #[tokio::test]
    async fn success_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let flow = ImageFlow::new(Arc::new(CannedImageClient::succeeding(b"png".to_vec())), Duration::from_secs(5));

        let result = flow.run(&channel(), &task(dir.path(), "ok")).await;

        assert!(result.success);
        assert_eq!(result.task_id, 4);
        assert_eq!(result.channel, "channel-1");
        assert_eq!(std::fs::read(dir.path().join("ai_tech_business.png")).unwrap(), b"png");
    }

    #[tokio::test]
    async fn status_failure_is_recorded_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let client = CannedImageClient::succeeding(b"png".to_vec())
            .respond_when("bad", CannedResponse::Fail(ChannelError::Status { code: 500 }));
        let flow = ImageFlow::new(Arc::new(client), Duration::from_secs(5));

        let result = flow.run(&channel(), &task(dir.path(), "bad prompt")).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Status: 500"));
        assert!(result.output_path.is_none());
        assert!(!dir.path().join("ai_tech_business.png").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_request_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let client = CannedImageClient::succeeding(b"png".to_vec())
            .respond_when("slow", CannedResponse::Delayed(Duration::from_secs(60), b"late".to_vec()));
        let flow = ImageFlow::new(Arc::new(client), Duration::from_secs(2));

        let result = flow.run(&channel(), &task(dir.path(), "slow")).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("请求超时 (2秒)"));
    }

    #[tokio::test]
    async fn missing_directory_is_a_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let flow = ImageFlow::new(Arc::new(CannedImageClient::succeeding(b"png".to_vec())), Duration::from_secs(5));

        let result = flow.run(&channel(), &task(&dir.path().join("missing"), "ok")).await;

        assert!(!result.success);
        assert!(result.error.unwrap().starts_with("写入文件失败"));
    }
}
