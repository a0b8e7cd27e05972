pub mod image_flow;
pub mod task_planner;

pub use image_flow::ImageFlow;
pub use task_planner::{TaskPlanner, FEATURED_IMAGE_TITLE};
