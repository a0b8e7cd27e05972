use std::fmt::Display;
use std::path::PathBuf;

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Success,
    Failed,
}

/// 单张图片的生成任务
///
/// 由 TaskPlanner 创建后不再修改，执行结果记录在
/// [`GenerationResult`](crate::models::GenerationResult) 中。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTask {
    /// 任务序号（从0开始，决定最终报告的顺序）
    pub id: usize,
    pub title: String,
    /// 发送给图片生成服务的提示词
    pub prompt: String,
    pub filename: String,
    pub output_path: PathBuf,
    pub status: TaskStatus,
}

impl Display for ImageTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[图片#{} {}]", self.id + 1, self.title)
    }
}

/// 一个批次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 批次编号（从1开始）
    pub ordinal: usize,
    pub tasks: Vec<ImageTask>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
