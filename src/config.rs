use crate::error::ConfigError;
use std::time::Duration;

/// 凭据环境变量前缀（GEMINI_IMAGE_API_KEY_1 .. GEMINI_IMAGE_API_KEY_4）
pub const API_KEY_ENV_PREFIX: &str = "GEMINI_IMAGE_API_KEY_";
/// 从环境变量读取的凭据数量上限
pub const MAX_ENV_API_KEYS: usize = 4;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 图片生成 API 凭据（每个凭据对应一个通道）
    pub api_keys: Vec<String>,
    /// 图片生成 API 基础URL
    pub image_api_base_url: String,
    /// 图片生成模型名称
    pub image_model_name: String,
    /// 单个请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 每批最大图片数量
    pub max_batch_size: usize,
    /// 批次之间的冷却时间（秒）
    pub batch_cooldown_secs: u64,
    /// 文件名最多包含的关键词数量
    pub max_filename_keywords: usize,
    /// 文章存放根目录
    pub article_root: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            image_api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            image_model_name: "gemini-3-pro-image-preview".to_string(),
            request_timeout_secs: 30,
            max_batch_size: 8,
            batch_cooldown_secs: 3,
            max_filename_keywords: 3,
            article_root: "articles".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_keys: (1..=MAX_ENV_API_KEYS)
                .filter_map(|i| std::env::var(format!("{}{}", API_KEY_ENV_PREFIX, i)).ok())
                .collect(),
            image_api_base_url: std::env::var("IMAGE_API_BASE_URL").unwrap_or(default.image_api_base_url),
            image_model_name: std::env::var("IMAGE_MODEL_NAME").unwrap_or(default.image_model_name),
            request_timeout_secs: std::env::var("IMAGE_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            max_batch_size: std::env::var("MAX_BATCH_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_batch_size),
            batch_cooldown_secs: std::env::var("BATCH_COOLDOWN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.batch_cooldown_secs),
            max_filename_keywords: std::env::var("MAX_FILENAME_KEYWORDS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_filename_keywords),
            article_root: std::env::var("ARTICLE_ROOT").unwrap_or(default.article_root),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 使用给定凭据创建配置（其余字段取默认值）
    pub fn with_api_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            api_keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// 校验调度相关的数值配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_batch_size".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "request_timeout_secs".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        if self.max_filename_keywords == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_filename_keywords".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn batch_cooldown(&self) -> Duration {
        Duration::from_secs(self.batch_cooldown_secs)
    }
}
