use crate::models::TaskStatus;
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// 单个任务的生成结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub task_id: usize,
    pub title: String,
    /// 执行该任务的通道标识
    pub channel: String,
    pub success: bool,
    #[serde(rename = "path")]
    pub output_path: Option<PathBuf>,
    pub error: Option<String>,
    #[serde(rename = "time", serialize_with = "serialize_secs")]
    pub duration: Duration,
}

impl GenerationResult {
    pub fn succeeded(
        task_id: usize,
        title: impl Into<String>,
        channel: impl Into<String>,
        output_path: PathBuf,
        duration: Duration,
    ) -> Self {
        Self {
            task_id,
            title: title.into(),
            channel: channel.into(),
            success: true,
            output_path: Some(output_path),
            error: None,
            duration,
        }
    }

    pub fn failed(
        task_id: usize,
        title: impl Into<String>,
        channel: impl Into<String>,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            task_id,
            title: title.into(),
            channel: channel.into(),
            success: false,
            output_path: None,
            error: Some(error.into()),
            duration,
        }
    }

    pub fn status(&self) -> TaskStatus {
        if self.success {
            TaskStatus::Success
        } else {
            TaskStatus::Failed
        }
    }
}

/// 一篇文章的图片生成报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub article_directory: PathBuf,
    pub images_directory: PathBuf,
    pub total_images: usize,
    pub successful_images: usize,
    /// 按任务序号排序
    pub results: Vec<GenerationResult>,
    #[serde(serialize_with = "serialize_secs")]
    pub total_time: Duration,
}

impl RunReport {
    pub fn failed_images(&self) -> usize {
        self.total_images - self.successful_images
    }

    pub fn all_succeeded(&self) -> bool {
        self.successful_images == self.total_images
    }

    pub fn failures(&self) -> impl Iterator<Item = &GenerationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}
