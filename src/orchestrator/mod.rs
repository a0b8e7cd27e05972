//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `image_pipeline` - 文章图片生成管线
//! - 持有凭据池、图片客户端和事件接收器
//! - 准备输出目录，串起下面的各个组件
//!
//! ### `batch_scheduler` - 批次调度
//! - 按 `max_batch_size` 切分批次，批次之间冷却
//!
//! ### `load_distributor` - 负载分配
//! - 每批重新计算各通道的任务数
//!
//! ### `parallel_dispatcher` - 批内并行执行
//! - 通道之间并行，通道内部串行
//!
//! ### `result_aggregator` - 结果汇总
//! - 按任务序号排序，统计成功数和总耗时
//!
//! ## 层次关系
//!
//! ```text
//! image_pipeline
//!     ↓
//! batch_scheduler (处理 Vec<Batch>)
//!     ↓
//! parallel_dispatcher + load_distributor (处理单个 Batch)
//!     ↓
//! workflow::ImageFlow (处理单个 ImageTask)
//!     ↓
//! clients (能力层：ImageChannel)
//!     ↓
//! infrastructure (基础设施：CredentialPool)
//! ```

pub mod batch_scheduler;
pub mod image_pipeline;
pub mod load_distributor;
pub mod parallel_dispatcher;
pub mod result_aggregator;

// 重新导出主要类型
pub use batch_scheduler::{batch_count, split_batches, BatchScheduler};
pub use image_pipeline::{ArticleLayout, ImagePipeline};
pub use load_distributor::{distribute, ChannelAssignment, LoadDistributor};
pub use parallel_dispatcher::ParallelDispatcher;
pub use result_aggregator::ResultAggregator;
