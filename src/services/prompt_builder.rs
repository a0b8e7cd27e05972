/// 图片生成提示词
///
/// 统一的博客配图风格要求
pub fn build_image_prompt(title: &str, content: &str) -> String {
    format!(
        "Create a professional business image for a blog article.\n\
         Title: {title}\n\
         Content: {content}\n\
         \n\
         Requirements:\n\
         - Modern and professional design\n\
         - Business or technology theme\n\
         - High quality and engaging\n\
         - Suitable for a blog header or section image\n\
         - Include subtle elements related to AI, automation, or business\n"
    )
}
