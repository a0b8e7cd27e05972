use anyhow::{Context, Result};
use article_image_dispatch::models::load_article;
use article_image_dispatch::utils::logging;
use article_image_dispatch::{Config, CredentialPool, GeminiImageClient, ImagePipeline, TracingEventSink};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    let article_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("用法: article_image_dispatch <article.toml|article.json>")?;

    let article = load_article(&article_path).await?;

    // 没有凭据时在这里直接退出，不会执行任何任务
    let pool = CredentialPool::from_config(&config)?;
    let client = GeminiImageClient::new(&config)?;

    let pipeline = ImagePipeline::new(config, pool, Arc::new(client), Arc::new(TracingEventSink))?;
    let report = pipeline.generate(&article).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
