//! 结果汇总
//!
//! 追加每批结果，统计成功数与总耗时（含冷却时间），生成最终报告

use crate::models::{GenerationResult, RunReport};
use std::path::PathBuf;
use tokio::time::Instant;

/// 结果汇总器
#[derive(Debug)]
pub struct ResultAggregator {
    article_directory: PathBuf,
    images_directory: PathBuf,
    started: Instant,
    results: Vec<GenerationResult>,
}

impl ResultAggregator {
    /// 创建汇总器并开始计时
    pub fn start(article_directory: PathBuf, images_directory: PathBuf) -> Self {
        Self {
            article_directory,
            images_directory,
            started: Instant::now(),
            results: Vec::new(),
        }
    }

    pub fn push_batch(&mut self, results: Vec<GenerationResult>) {
        self.results.extend(results);
    }

    pub fn finish(self) -> RunReport {
        let mut results = self.results;
        results.sort_by_key(|r| r.task_id);

        RunReport {
            article_directory: self.article_directory,
            images_directory: self.images_directory,
            total_images: results.len(),
            successful_images: results.iter().filter(|r| r.success).count(),
            results,
            total_time: self.started.elapsed(),
        }
    }
}
