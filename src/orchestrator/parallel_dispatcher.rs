//! 批内并行执行
//!
//! ## 执行模型
//!
//! - 每个分到任务的通道一个 tokio 任务，通道之间并行
//! - 同一通道内的任务串行执行，保证同一凭据不会被并发使用
//! - 同时进行的请求数不超过本批实际使用的通道数
//! - 每个任务完成后立即通过 channel 上报结果，单个任务失败不影响其它任务
//! - 通道任务 panic 时，只有尚未上报结果的任务记为失败

use crate::error::ChannelError;
use crate::models::{Batch, GenerationResult};
use crate::orchestrator::load_distributor::{ChannelAssignment, LoadDistributor};
use crate::utils::{DispatchEvent, EventSink};
use crate::workflow::ImageFlow;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::error;

/// 并行分发器
pub struct ParallelDispatcher {
    distributor: LoadDistributor,
    flow: ImageFlow,
    sink: Arc<dyn EventSink>,
}

impl ParallelDispatcher {
    pub fn new(distributor: LoadDistributor, flow: ImageFlow, sink: Arc<dyn EventSink>) -> Self {
        Self {
            distributor,
            flow,
            sink,
        }
    }

    /// 执行一个批次，返回按批内顺序排列的结果
    pub async fn dispatch(&self, batch: &Batch, total_batches: usize) -> Vec<GenerationResult> {
        self.sink.emit(DispatchEvent::BatchStarted {
            ordinal: batch.ordinal,
            total_batches,
            first_task: batch.tasks.first().map(|t| t.id + 1).unwrap_or(0),
            last_task: batch.tasks.last().map(|t| t.id + 1).unwrap_or(0),
            distribution: self.distributor.distribute(batch.len()),
        });

        let assignments = self.distributor.assign(&batch.tasks);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut fallbacks = Vec::with_capacity(assignments.len());
        let mut handles = Vec::with_capacity(assignments.len());

        for assignment in assignments {
            fallbacks.push(assignment.clone());

            let flow = self.flow.clone();
            let sink = self.sink.clone();
            let tx = tx.clone();

            handles.push(tokio::spawn(async move {
                run_channel(&flow, sink.as_ref(), assignment, tx).await
            }));
        }
        drop(tx);

        // 等待本批所有通道完成
        let outcomes = join_all(handles).await;

        let mut slots: Vec<Option<GenerationResult>> = vec![None; batch.len()];
        while let Ok((slot, result)) = rx.try_recv() {
            slots[slot] = Some(result);
        }

        for (outcome, assignment) in outcomes.into_iter().zip(fallbacks) {
            if let Err(e) = outcome {
                error!("[{}] 通道任务执行失败: {}", assignment.channel.identifier, e);
                let reason = ChannelError::WorkerAborted(e.to_string()).to_string();
                for (slot, task) in assignment.tasks {
                    if slots[slot].is_none() {
                        slots[slot] = Some(GenerationResult::failed(
                            task.id,
                            &task.title,
                            &assignment.channel.identifier,
                            reason.clone(),
                            Duration::ZERO,
                        ));
                    }
                }
            }
        }

        let results: Vec<GenerationResult> = slots.into_iter().flatten().collect();

        self.sink.emit(DispatchEvent::BatchFinished {
            ordinal: batch.ordinal,
            successful: results.iter().filter(|r| r.success).count(),
            total: results.len(),
        });

        results
    }
}

/// 单个通道串行处理分到的任务，每完成一个就上报 `(槽位, 结果)`
async fn run_channel(
    flow: &ImageFlow,
    sink: &dyn EventSink,
    assignment: ChannelAssignment,
    results: mpsc::UnboundedSender<(usize, GenerationResult)>,
) {
    let channel = assignment.channel;

    for (slot, task) in assignment.tasks {
        sink.emit(DispatchEvent::TaskStarted {
            task_id: task.id,
            channel: channel.identifier.clone(),
            title: task.title.clone(),
        });

        let result = flow.run(&channel, &task).await;

        sink.emit(DispatchEvent::TaskFinished {
            task_id: task.id,
            channel: channel.identifier.clone(),
            success: result.success,
            duration: result.duration,
            error: result.error.clone(),
        });

        // 接收端在所有通道结束前不会关闭
        let _ = results.send((slot, result));
    }
}
