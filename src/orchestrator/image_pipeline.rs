//! 文章图片生成管线 - 编排层
//!
//! ## 职责
//!
//! 本模块是图片生成的入口，负责资源持有和整体调度。
//!
//! ## 核心功能
//!
//! 1. **初始化**：校验配置、持有凭据池和图片客户端
//! 2. **目录准备**：`<article_root>/<YYYYMMDD>_<slug>/images`
//! 3. **任务规划**：委托 TaskPlanner 生成任务列表
//! 4. **分批执行**：委托 BatchScheduler / ParallelDispatcher
//! 5. **汇总报告**：委托 ResultAggregator 生成 RunReport

use crate::clients::ImageChannel;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::CredentialPool;
use crate::models::{ArticleData, RunReport};
use crate::orchestrator::batch_scheduler::BatchScheduler;
use crate::orchestrator::load_distributor::LoadDistributor;
use crate::orchestrator::parallel_dispatcher::ParallelDispatcher;
use crate::orchestrator::result_aggregator::ResultAggregator;
use crate::utils::{DispatchEvent, EventSink};
use crate::workflow::{ImageFlow, TaskPlanner};
use std::path::PathBuf;
use std::sync::Arc;

/// 文章的输出目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleLayout {
    pub article_directory: PathBuf,
    pub images_directory: PathBuf,
}

impl ArticleLayout {
    /// `<root>/<date>_<slug>/images`
    pub fn new(article_root: impl Into<PathBuf>, date: &str, slug: &str) -> Self {
        let article_directory = article_root.into().join(format!("{}_{}", date, slug));
        let images_directory = article_directory.join("images");
        Self {
            article_directory,
            images_directory,
        }
    }

    /// 使用当天日期
    pub fn for_today(article_root: impl Into<PathBuf>, slug: &str) -> Self {
        let date = chrono::Local::now().format("%Y%m%d").to_string();
        Self::new(article_root, &date, slug)
    }
}

/// 图片生成管线
pub struct ImagePipeline {
    config: Config,
    planner: TaskPlanner,
    scheduler: BatchScheduler,
    dispatcher: ParallelDispatcher,
    sink: Arc<dyn EventSink>,
    channel_count: usize,
}

impl ImagePipeline {
    /// 创建管线；配置不合法时在任何任务执行前返回错误
    pub fn new(
        config: Config,
        pool: CredentialPool,
        client: Arc<dyn ImageChannel>,
        sink: Arc<dyn EventSink>,
    ) -> AppResult<Self> {
        config.validate()?;

        let channel_count = pool.len();
        let flow = ImageFlow::new(client, config.request_timeout());
        let dispatcher = ParallelDispatcher::new(LoadDistributor::new(pool), flow, sink.clone());
        let scheduler = BatchScheduler::new(config.max_batch_size, config.batch_cooldown(), sink.clone());

        Ok(Self {
            planner: TaskPlanner::new(config.max_filename_keywords),
            scheduler,
            dispatcher,
            sink,
            channel_count,
            config,
        })
    }

    /// 生成文章的所有图片（输出到当天的文章目录）
    pub async fn generate(&self, article: &ArticleData) -> AppResult<RunReport> {
        let layout = ArticleLayout::for_today(&self.config.article_root, article.slug_or_default());
        self.generate_in(article, layout).await
    }

    /// 生成文章的所有图片到指定目录
    pub async fn generate_in(&self, article: &ArticleData, layout: ArticleLayout) -> AppResult<RunReport> {
        tokio::fs::create_dir_all(&layout.images_directory)
            .await
            .map_err(|e| AppError::file(&layout.images_directory, e))?;

        let tasks = self.planner.plan(article, &layout.images_directory);
        let mut aggregator = ResultAggregator::start(layout.article_directory, layout.images_directory.clone());

        self.sink.emit(DispatchEvent::RunStarted {
            images_directory: layout.images_directory,
            total_tasks: tasks.len(),
            channels: self.channel_count,
            total_batches: self.scheduler.batch_count(tasks.len()),
        });

        self.scheduler.run(tasks, &self.dispatcher, &mut aggregator).await;

        let report = aggregator.finish();

        self.sink.emit(DispatchEvent::RunFinished {
            successful: report.successful_images,
            total: report.total_images,
            elapsed: report.total_time,
        });

        Ok(report)
    }
}
