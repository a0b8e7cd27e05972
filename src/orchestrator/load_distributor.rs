//! 负载分配
//!
//! N 个任务分给 K 个通道：前 N mod K 个通道各多分一个，
//! 任意两个通道的差不超过 1。

use crate::infrastructure::{Channel, CredentialPool};
use crate::models::ImageTask;

/// 计算每个通道分配的任务数（长度为 K，包含 0）
///
/// `channel_count == 0` 时返回空列表；凭据池保证至少有一个通道。
pub fn distribute(task_count: usize, channel_count: usize) -> Vec<usize> {
    if channel_count == 0 {
        return Vec::new();
    }

    let base = task_count / channel_count;
    let remainder = task_count % channel_count;

    (0..channel_count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// 一个通道在本批次中的工作
#[derive(Debug, Clone)]
pub struct ChannelAssignment {
    pub channel: Channel,
    /// (批次内位置, 任务)
    pub tasks: Vec<(usize, ImageTask)>,
}

/// 负载分配器
#[derive(Debug, Clone)]
pub struct LoadDistributor {
    pool: CredentialPool,
}

impl LoadDistributor {
    pub fn new(pool: CredentialPool) -> Self {
        Self { pool }
    }

    pub fn channel_count(&self) -> usize {
        self.pool.len()
    }

    pub fn distribute(&self, task_count: usize) -> Vec<usize> {
        distribute(task_count, self.pool.len())
    }

    /// 按通道顺序把连续的任务分给各通道，未分到任务的通道不出现在结果中
    pub fn assign(&self, tasks: &[ImageTask]) -> Vec<ChannelAssignment> {
        let mut remaining = tasks.iter().cloned().enumerate();

        self.pool
            .channels()
            .iter()
            .zip(self.distribute(tasks.len()))
            .filter(|(_, count)| *count > 0)
            .map(|(channel, count)| ChannelAssignment {
                channel: channel.with_assignment(count),
                tasks: remaining.by_ref().take(count).collect(),
            })
            .collect()
    }
}
