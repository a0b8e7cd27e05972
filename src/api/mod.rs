//! API 模块
//!
//! 负责与外部图片生成服务的报文格式

pub mod gemini;

// 重新导出常用函数
pub use gemini::{build_request, extract_image_bytes, GenerateContentRequest, GenerateContentResponse};
