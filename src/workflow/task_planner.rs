//! 任务规划 - 流程层
//!
//! 把文章结构转换为有序的图片生成任务列表

use crate::models::{ArticleData, ImageTask, TaskStatus};
use crate::services::{build_image_prompt, FilenameService};
use std::path::Path;

/// 题图（アイキャッチ）任务标题
pub const FEATURED_IMAGE_TITLE: &str = "アイキャッチ";

/// 任务规划器
///
/// 输出顺序：有主题时第0个是题图，之后每个章节一张图，保持章节顺序。
#[derive(Debug, Clone, Default)]
pub struct TaskPlanner {
    filenames: FilenameService,
}

impl TaskPlanner {
    pub fn new(max_keywords: usize) -> Self {
        Self {
            filenames: FilenameService::new(max_keywords),
        }
    }

    pub fn plan(&self, article: &ArticleData, images_dir: &Path) -> Vec<ImageTask> {
        let mut tasks = Vec::with_capacity(article.sections.len() + 1);

        if let Some(theme) = article.theme() {
            let content = format!("{} - {}", article.title, theme);
            tasks.push(self.task(
                tasks.len(),
                FEATURED_IMAGE_TITLE,
                &content,
                build_image_prompt(&article.title, theme),
                images_dir,
            ));
        }

        for section in &article.sections {
            tasks.push(self.task(
                tasks.len(),
                &section.title,
                &section.content,
                build_image_prompt(&section.title, &section.content),
                images_dir,
            ));
        }

        tasks
    }

    fn task(&self, id: usize, title: &str, content: &str, prompt: String, images_dir: &Path) -> ImageTask {
        let filename = self.filenames.filename(title, content);
        ImageTask {
            id,
            title: title.to_string(),
            prompt,
            output_path: images_dir.join(&filename),
            filename,
            status: TaskStatus::Pending,
        }
    }
}
