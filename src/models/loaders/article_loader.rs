use crate::error::ArticleError;
use crate::models::article::ArticleData;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 文章文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleFormat {
    Toml,
    Json,
}

impl ArticleFormat {
    /// 根据扩展名判断格式
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            _ => None,
        }
    }
}

/// 解析文章内容
pub fn parse_article(content: &str, format: ArticleFormat) -> Result<ArticleData> {
    let article: ArticleData = match format {
        ArticleFormat::Toml => toml::from_str(content).context("无法解析TOML文章")?,
        ArticleFormat::Json => serde_json::from_str(content).context("无法解析JSON文章")?,
    };

    if article.title.trim().is_empty() {
        return Err(ArticleError::EmptyTitle.into());
    }

    Ok(article)
}

/// 从 TOML / JSON 文件加载文章数据
pub async fn load_article(path: &Path) -> Result<ArticleData> {
    let format = ArticleFormat::from_path(path).ok_or_else(|| ArticleError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取文章文件: {}", path.display()))?;

    let article = parse_article(&content, format)
        .with_context(|| format!("无法加载文章文件: {}", path.display()))?;

    tracing::info!(
        "成功加载文章: {} ({} 个章节)",
        article.title,
        article.sections.len()
    );

    Ok(article)
}
