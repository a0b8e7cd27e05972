//! # Article Image Dispatch
//!
//! 为博客文章批量生成配图：多个 API 凭据并行、分批限速、部分失败隔离
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（API 凭据），只暴露只读通道
//! - `CredentialPool` - 运行前确认至少有一个凭据
//!
//! ### ② 业务能力层（Services / Clients）
//! - `services/` - 文件名关键词提取、提示词模板
//! - `clients/` - `ImageChannel` 接口，Gemini 实现和固定响应实现
//! - `api/` - generateContent 报文格式
//!
//! ### ③ 流程层（Workflow）
//! - `TaskPlanner` - 文章 → 有序任务列表
//! - `ImageFlow` - 单张图片：调用（带超时）→ 写文件 → 结果
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 分批、负载分配、批内并行、结果汇总
//!
//! ## 模块结构

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{CannedImageClient, GeminiImageClient, ImageChannel};
pub use config::Config;
pub use error::{AppError, AppResult, ChannelError, ConfigError};
pub use infrastructure::{Channel, CredentialPool};
pub use models::{ArticleData, GenerationResult, ImageTask, RunReport, Section};
pub use orchestrator::{ArticleLayout, ImagePipeline};
pub use utils::{DispatchEvent, EventSink, RecordingEventSink, TracingEventSink};
pub use workflow::{ImageFlow, TaskPlanner};
