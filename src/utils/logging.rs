/// 日志工具模块
///
/// 提供日志初始化和调度事件的日志输出
use crate::utils::events::{DispatchEvent, EventSink};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则 verbose 时为 debug，默认 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试中可能重复初始化，忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 把调度事件写入 tracing 日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: DispatchEvent) {
        match event {
            DispatchEvent::RunStarted {
                images_directory,
                total_tasks,
                channels,
                total_batches,
            } => {
                info!("📁 保存目录: {}", images_directory.display());
                if total_batches > 1 {
                    info!("⚠️ {} 张图片较多，分 {} 批处理", total_tasks, total_batches);
                } else {
                    info!("🚀 开始生成 {} 张图片 ({} 个通道并行)", total_tasks, channels);
                }
            }
            DispatchEvent::BatchStarted {
                ordinal,
                total_batches,
                first_task,
                last_task,
                distribution,
            } => {
                info!("\n{}", "=".repeat(60));
                info!("📦 第 {}/{} 批: 第 {}-{} 张", ordinal, total_batches, first_task, last_task);
                info!("⚖️ 负载分配: {:?}", distribution);
                info!("{}", "=".repeat(60));
            }
            DispatchEvent::TaskStarted {
                task_id,
                channel,
                title,
            } => {
                info!("  🎨 {} [图片#{}]: {}...", channel, task_id + 1, truncate_text(&title, 30));
            }
            DispatchEvent::TaskFinished {
                task_id,
                channel,
                success,
                duration,
                error,
            } => {
                if success {
                    info!("    ✅ {} [图片#{}]: 完成 ({:.1}秒)", channel, task_id + 1, duration.as_secs_f64());
                } else {
                    warn!(
                        "    ❌ {} [图片#{}]: 失败 - {}",
                        channel,
                        task_id + 1,
                        error.as_deref().unwrap_or("未知错误")
                    );
                }
            }
            DispatchEvent::BatchFinished {
                ordinal,
                successful,
                total,
            } => {
                info!("{}", "─".repeat(60));
                info!("✓ 第 {} 批完成: 成功 {}/{}", ordinal, successful, total);
                info!("{}", "─".repeat(60));
            }
            DispatchEvent::Cooldown {
                after_batch,
                duration,
            } => {
                debug!("第 {} 批之后进入冷却", after_batch);
                info!("   ⏳ 等待 {} 秒后处理下一批...", duration.as_secs());
            }
            DispatchEvent::RunFinished {
                successful,
                total,
                elapsed,
            } => {
                info!("\n{}", "=".repeat(60));
                info!("⏱️ 总处理时间: {:.1}秒", elapsed.as_secs_f64());
                info!("📊 成功率: {}/{} 张", successful, total);
                if total > 0 && successful == total {
                    info!("🎉 全部图片生成成功！");
                }
                info!("{}", "=".repeat(60));
            }
        }
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
