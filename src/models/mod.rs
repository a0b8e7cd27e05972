pub mod article;
pub mod loaders;
pub mod report;
pub mod task;

pub use article::{ArticleData, Section};
pub use loaders::load_article;
pub use report::{GenerationResult, RunReport};
pub use task::{Batch, ImageTask, TaskStatus};
