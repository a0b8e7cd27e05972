//! 调度事件
//!
//! 调度器通过 [`EventSink`] 报告进度，生产环境写日志，测试中记录事件后断言。

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

/// 调度过程中发出的事件
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    /// 运行开始
    RunStarted {
        images_directory: PathBuf,
        total_tasks: usize,
        channels: usize,
        total_batches: usize,
    },
    /// 批次开始，`distribution` 为每个通道分配的任务数（含 0）
    BatchStarted {
        ordinal: usize,
        total_batches: usize,
        first_task: usize,
        last_task: usize,
        distribution: Vec<usize>,
    },
    /// 单个任务开始
    TaskStarted {
        task_id: usize,
        channel: String,
        title: String,
    },
    /// 单个任务结束
    TaskFinished {
        task_id: usize,
        channel: String,
        success: bool,
        duration: Duration,
        error: Option<String>,
    },
    /// 批次结束
    BatchFinished {
        ordinal: usize,
        successful: usize,
        total: usize,
    },
    /// 批次间冷却
    Cooldown { after_batch: usize, duration: Duration },
    /// 运行结束
    RunFinished {
        successful: usize,
        total: usize,
        elapsed: Duration,
    },
}

/// 事件接收器
pub trait EventSink: Send + Sync {
    fn emit(&self, event: DispatchEvent);
}

/// 记录所有事件的接收器
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<DispatchEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DispatchEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// 所有批次的负载分配
    pub fn distributions(&self) -> Vec<Vec<usize>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                DispatchEvent::BatchStarted { distribution, .. } => Some(distribution),
                _ => None,
            })
            .collect()
    }

    pub fn cooldowns(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, DispatchEvent::Cooldown { .. }))
            .count()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: DispatchEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
