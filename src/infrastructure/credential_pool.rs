//! 凭据池 - 基础设施层
//!
//! 持有稀缺资源（API 凭据），每个凭据是一条独立限流的通道

use crate::config::Config;
use crate::error::ConfigError;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// 不透明的 API 凭据
///
/// Debug 输出会隐藏内容，避免凭据出现在日志中。
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// 图片生成通道
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// 通道标识（channel-1, channel-2 ...）
    pub identifier: String,
    pub credential: Credential,
    /// 当前批次分配到的任务数
    pub assigned_task_count: usize,
}

impl Channel {
    pub fn new(identifier: impl Into<String>, credential: Credential) -> Self {
        Self {
            identifier: identifier.into(),
            credential,
            assigned_task_count: 0,
        }
    }

    /// 返回带有本批次分配数量的副本
    pub fn with_assignment(&self, count: usize) -> Self {
        Self {
            assigned_task_count: count,
            ..self.clone()
        }
    }

    /// 日志显示用的 Worker 编号
    pub fn worker_label(&self) -> String {
        match self.identifier.strip_prefix("channel-") {
            Some(n) => format!("Worker-{}", n),
            None => self.identifier.clone(),
        }
    }
}

/// 凭据池
///
/// 职责：
/// - 在运行开始前确认至少有一个可用凭据
/// - 按配置顺序提供只读的通道列表
#[derive(Debug, Clone)]
pub struct CredentialPool {
    channels: Arc<[Channel]>,
}

impl CredentialPool {
    /// 从配置创建凭据池，空白凭据会被忽略
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::from_credentials(config.api_keys.iter().cloned())
    }

    pub fn from_credentials<I, S>(credentials: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let channels: Vec<Channel> = credentials
            .into_iter()
            .map(Into::into)
            .filter(|secret: &String| !secret.trim().is_empty())
            .enumerate()
            .map(|(i, secret)| Channel::new(format!("channel-{}", i + 1), Credential::new(secret)))
            .collect();

        if channels.is_empty() {
            return Err(ConfigError::NoCredentials);
        }

        info!("✅ 使用 {} 个API密钥并行处理", channels.len());

        Ok(Self {
            channels: channels.into(),
        })
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
