use serde::{Deserialize, Serialize};

/// 默认文章 slug
pub const DEFAULT_SLUG: &str = "untitled";

/// 文章章节
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// 文章结构数据（图片生成的输入）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// 主题；存在时生成一张アイキャッチ（题图）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl ArticleData {
    /// 获取 slug，如果不存在则使用 "untitled"
    pub fn slug_or_default(&self) -> &str {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SLUG)
    }

    /// 获取非空主题
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref().filter(|t| !t.trim().is_empty())
    }
}
