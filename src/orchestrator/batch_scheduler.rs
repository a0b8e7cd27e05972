//! 批次调度
//!
//! 把任务按顺序切成不超过 `max_batch_size` 的批次，逐批执行，
//! 批次之间（最后一批之后除外）等待冷却时间，用来遵守整个凭据池的速率上限。

use crate::models::{Batch, ImageTask};
use crate::orchestrator::parallel_dispatcher::ParallelDispatcher;
use crate::orchestrator::result_aggregator::ResultAggregator;
use crate::utils::{DispatchEvent, EventSink};
use std::sync::Arc;
use std::time::Duration;

/// 切分批次，保持任务顺序
pub fn split_batches(tasks: Vec<ImageTask>, max_batch_size: usize) -> Vec<Batch> {
    let max_batch_size = max_batch_size.max(1);
    let mut batches = Vec::with_capacity(batch_count(tasks.len(), max_batch_size));
    let mut tasks = tasks.into_iter().peekable();

    while tasks.peek().is_some() {
        batches.push(Batch {
            ordinal: batches.len() + 1,
            tasks: tasks.by_ref().take(max_batch_size).collect(),
        });
    }

    batches
}

/// 批次数量（向上取整）
pub fn batch_count(task_count: usize, max_batch_size: usize) -> usize {
    task_count.div_ceil(max_batch_size.max(1))
}

/// 批次调度器
pub struct BatchScheduler {
    max_batch_size: usize,
    cooldown: Duration,
    sink: Arc<dyn EventSink>,
}

impl BatchScheduler {
    pub fn new(max_batch_size: usize, cooldown: Duration, sink: Arc<dyn EventSink>) -> Self {
        Self {
            max_batch_size,
            cooldown,
            sink,
        }
    }

    pub fn batch_count(&self, task_count: usize) -> usize {
        batch_count(task_count, self.max_batch_size)
    }

    /// 逐批执行；上一批结果全部收集后才开始下一批
    pub async fn run(
        &self,
        tasks: Vec<ImageTask>,
        dispatcher: &ParallelDispatcher,
        aggregator: &mut ResultAggregator,
    ) {
        let batches = split_batches(tasks, self.max_batch_size);
        let total_batches = batches.len();

        for batch in batches {
            let results = dispatcher.dispatch(&batch, total_batches).await;
            aggregator.push_batch(results);

            if batch.ordinal < total_batches {
                self.sink.emit(DispatchEvent::Cooldown {
                    after_batch: batch.ordinal,
                    duration: self.cooldown,
                });
                tokio::time::sleep(self.cooldown).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use std::path::PathBuf;

    fn tasks(n: usize) -> Vec<ImageTask> {
        (0..n)
            .map(|id| ImageTask {
                id,
                title: String::new(),
                prompt: String::new(),
                filename: String::new(),
                output_path: PathBuf::new(),
                status: TaskStatus::Pending,
            })
            .collect()
    }

    #[test]
    fn small_runs_are_a_single_batch() {
        let batches = split_batches(tasks(8), 8);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].ordinal, 1);
        assert_eq!(batches[0].len(), 8);
        assert!(split_batches(tasks(0), 8).is_empty());
    }

    #[test]
    fn batch_sizes_follow_ceiling_rule() {
        for m in 1..=9 {
            for n in 0..=50 {
                let batches = split_batches(tasks(n), m);
                assert_eq!(batches.len(), batch_count(n, m));
                if let Some((last, rest)) = batches.split_last() {
                    assert!(rest.iter().all(|b| b.len() == m));
                    let expected_last = if n % m == 0 { m } else { n % m };
                    assert_eq!(last.len(), expected_last);
                }
            }
        }
    }

    #[test]
    fn batches_preserve_task_order() {
        let ids: Vec<usize> = split_batches(tasks(10), 8)
            .into_iter()
            .flat_map(|b| b.tasks)
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }
}
