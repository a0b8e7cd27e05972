use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// 应用程序错误类型
///
/// 只有配置错误和输入错误会中止一次运行，单张图片的失败
/// 由 [`ChannelError`] 表示并记录到结果中。
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文章输入错误
    #[error("文章错误: {0}")]
    Article(#[from] ArticleError),
    /// 文件操作错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 没有任何可用的 API 凭据
    #[error("没有找到可用的图片生成 API 凭据 (GEMINI_IMAGE_API_KEY_1..4)")]
    NoCredentials,
    /// 配置值不合法
    #[error("配置项 {name} 不合法: {reason}")]
    InvalidValue { name: String, reason: String },
    /// HTTP 客户端构建失败
    #[error("HTTP 客户端初始化失败: {0}")]
    HttpClient(String),
}

/// 文章输入错误
#[derive(Debug, Error)]
pub enum ArticleError {
    /// 不支持的文件格式
    #[error("不支持的文章文件格式: {path}")]
    UnsupportedFormat { path: PathBuf },
    /// 文章标题为空
    #[error("文章标题不能为空")]
    EmptyTitle,
}

/// 单个图片生成任务的错误
///
/// 这些错误只影响对应任务本身，不会中止批次。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// API 返回非成功状态码
    #[error("Status: {code}")]
    Status { code: u16 },
    /// 响应中没有图片数据
    #[error("No image data in response")]
    MissingPayload,
    /// 图片数据无法解码
    #[error("图片数据解码失败: {0}")]
    InvalidPayload(String),
    /// 请求超时
    #[error("请求超时 ({}秒)", .0.as_secs())]
    Timeout(Duration),
    /// 网络请求失败
    #[error("网络请求失败: {0}")]
    Transport(String),
    /// 写入图片文件失败
    #[error("写入文件失败 ({path}): {reason}")]
    WriteFailed { path: String, reason: String },
    /// 通道工作线程异常退出
    #[error("通道任务异常退出: {0}")]
    WorkerAborted(String),
}

impl From<base64::DecodeError> for ChannelError {
    fn from(err: base64::DecodeError) -> Self {
        ChannelError::InvalidPayload(err.to_string())
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件操作错误
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
