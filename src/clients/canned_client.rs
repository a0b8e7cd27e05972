/// 固定响应的图片生成客户端
///
/// 不访问网络，按提示词返回预设结果，用于调度逻辑的测试和演练
use crate::clients::ImageChannel;
use crate::error::ChannelError;
use crate::infrastructure::Channel;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// 预设响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CannedResponse {
    /// 返回图片数据
    Image(Vec<u8>),
    /// 返回失败
    Fail(ChannelError),
    /// 等待一段时间后返回图片数据
    Delayed(Duration, Vec<u8>),
    /// 调用时直接 panic，模拟通道任务崩溃
    Panic,
}

/// 一次调用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedCall {
    pub channel: String,
    pub prompt: String,
}

pub struct CannedImageClient {
    default: CannedResponse,
    /// 提示词包含指定片段时使用的响应（按添加顺序匹配）
    rules: Vec<(String, CannedResponse)>,
    calls: Mutex<Vec<CannedCall>>,
    in_flight: Mutex<InFlight>,
}

/// 正在进行的调用数量及其峰值
#[derive(Debug, Default)]
struct InFlight {
    per_channel: HashMap<String, usize>,
    peak_per_channel: HashMap<String, usize>,
    total: usize,
    peak_total: usize,
}

/// 调用结束（包括被超时取消）时减少计数
struct InFlightGuard<'a> {
    client: &'a CannedImageClient,
    channel: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.client.in_flight.lock() {
            if let Some(n) = state.per_channel.get_mut(&self.channel) {
                *n = n.saturating_sub(1);
            }
            state.total = state.total.saturating_sub(1);
        }
    }
}

impl CannedImageClient {
    /// 所有请求都成功，返回固定的图片数据
    pub fn succeeding(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_default(CannedResponse::Image(bytes.into()))
    }

    /// 没有规则命中时使用 `default`
    pub fn with_default(default: CannedResponse) -> Self {
        Self {
            default,
            rules: Vec::new(),
            calls: Mutex::new(Vec::new()),
            in_flight: Mutex::new(InFlight::default()),
        }
    }

    /// 提示词包含 `needle` 时返回指定响应
    pub fn respond_when(mut self, needle: impl Into<String>, response: CannedResponse) -> Self {
        self.rules.push((needle.into(), response));
        self
    }

    /// 所有调用记录（按调用顺序）
    pub fn calls(&self) -> Vec<CannedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// 每个通道被调用的次数
    pub fn calls_per_channel(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for call in self.calls() {
            *counts.entry(call.channel).or_insert(0) += 1;
        }
        counts
    }

    /// 每个通道同时进行中的调用数峰值
    pub fn peak_in_flight_per_channel(&self) -> HashMap<String, usize> {
        self.in_flight
            .lock()
            .map(|state| state.peak_per_channel.clone())
            .unwrap_or_default()
    }

    /// 所有通道合计同时进行中的调用数峰值
    pub fn peak_in_flight(&self) -> usize {
        self.in_flight.lock().map(|state| state.peak_total).unwrap_or(0)
    }

    fn enter(&self, channel: &str) -> InFlightGuard<'_> {
        if let Ok(mut state) = self.in_flight.lock() {
            let state = &mut *state;
            let current = state.per_channel.entry(channel.to_string()).or_insert(0);
            *current += 1;
            let peak = state.peak_per_channel.entry(channel.to_string()).or_insert(0);
            *peak = (*peak).max(*current);
            state.total += 1;
            state.peak_total = state.peak_total.max(state.total);
        }
        InFlightGuard {
            client: self,
            channel: channel.to_string(),
        }
    }

    fn response_for(&self, prompt: &str) -> &CannedResponse {
        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, response)| response)
            .unwrap_or(&self.default)
    }
}

#[async_trait]
impl ImageChannel for CannedImageClient {
    async fn generate(&self, channel: &Channel, prompt: &str) -> Result<Vec<u8>, ChannelError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(CannedCall {
                channel: channel.identifier.clone(),
                prompt: prompt.to_string(),
            });
        }

        let _guard = self.enter(&channel.identifier);

        match self.response_for(prompt) {
            CannedResponse::Image(bytes) => Ok(bytes.clone()),
            CannedResponse::Fail(err) => Err(err.clone()),
            CannedResponse::Delayed(delay, bytes) => {
                tokio::time::sleep(*delay).await;
                Ok(bytes.clone())
            }
            CannedResponse::Panic => panic!("canned channel crashed on: {}", prompt),
        }
    }
}
