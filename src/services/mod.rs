pub mod filename_service;
pub mod prompt_builder;

pub use filename_service::{FilenameService, GENERIC_KEYWORDS, KEYWORD_TABLE};
pub use prompt_builder::build_image_prompt;
