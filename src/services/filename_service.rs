//! 文件名生成服务 - 业务能力层
//!
//! 从标题和正文中提取关键词，生成确定性的图片文件名。
//! 相同的输入永远得到相同的文件名，重复运行会覆盖同一文件。

/// 业务术语 → 英文短词
///
/// 按顺序匹配，顺序即优先级。已有图片目录中的文件名依赖这个顺序，不要调整。
pub const KEYWORD_TABLE: &[(&str, &str)] = &[
    ("AI", "ai"),
    ("人工知能", "ai"),
    ("ChatGPT", "chatgpt"),
    ("Excel", "excel"),
    ("失敗", "failure"),
    ("分析", "analysis"),
    ("自動化", "automation"),
    ("効率化", "efficiency"),
    ("改善", "improvement"),
    ("戦略", "strategy"),
    ("ビジネス", "business"),
    ("パターン", "pattern"),
    ("導入", "implementation"),
    ("期待", "expectation"),
    ("現場", "field"),
    ("トップダウン", "topdown"),
];

/// 关键词不足时的补充词（按顺序补充，不检查是否已存在）
pub const GENERIC_KEYWORDS: &[&str] = &["business", "tech", "innovation"];

/// 图片扩展名
pub const IMAGE_EXTENSION: &str = "png";

/// 文件名生成服务
#[derive(Debug, Clone)]
pub struct FilenameService {
    max_keywords: usize,
}

impl FilenameService {
    pub fn new(max_keywords: usize) -> Self {
        Self {
            max_keywords: max_keywords.max(1),
        }
    }

    /// 提取关键词（大小写不敏感）
    pub fn extract_keywords(&self, text: &str) -> Vec<&'static str> {
        let text_lower = text.to_lowercase();
        let mut keywords: Vec<&'static str> = Vec::with_capacity(self.max_keywords);

        for &(term, token) in KEYWORD_TABLE {
            if keywords.len() >= self.max_keywords {
                return keywords;
            }
            if text_lower.contains(&term.to_lowercase()) && !keywords.contains(&token) {
                keywords.push(token);
            }
        }

        for &token in GENERIC_KEYWORDS {
            if keywords.len() >= self.max_keywords {
                break;
            }
            keywords.push(token);
        }

        keywords
    }

    /// 根据标题和正文生成文件名
    pub fn filename(&self, title: &str, content: &str) -> String {
        let text = format!("{} {}", title, content);
        format!("{}.{}", self.extract_keywords(&text).join("_"), IMAGE_EXTENSION)
    }
}

impl Default for FilenameService {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_decides_priority() {
        let service = FilenameService::default();
        // 文本中出现顺序与表顺序相反
        let keywords = service.extract_keywords("戦略と分析でAIを活用");
        assert_eq!(keywords, ["ai", "analysis", "strategy"]);
    }

    #[test]
    fn match_is_case_insensitive() {
        let service = FilenameService::default();
        assert_eq!(service.extract_keywords("chatgpt と excel"), ["chatgpt", "excel", "business"]);
    }

    #[test]
    fn synonyms_are_not_repeated() {
        let service = FilenameService::default();
        assert_eq!(service.extract_keywords("AIと人工知能"), ["ai", "business", "tech"]);
    }

    #[test]
    fn generic_padding_repeats_tokens_already_found() {
        let service = FilenameService::default();
        assert_eq!(service.extract_keywords("ビジネス"), ["business", "business", "tech"]);
        assert_eq!(service.filename("ビジネス", ""), "business_business_tech.png");
    }

    #[test]
    fn terms_outside_the_table_fall_back_to_padding() {
        let service = FilenameService::default();
        assert_eq!(service.filename("中小企業のDX失敗", ""), "failure_business_tech.png");
    }

    #[test]
    fn padding_stops_when_generic_list_is_exhausted() {
        let service = FilenameService::new(5);
        assert_eq!(service.extract_keywords("テスト"), ["business", "tech", "innovation"]);
    }

    #[test]
    fn filename_is_deterministic() {
        let service = FilenameService::default();
        let a = service.filename("Excel自動化", "VBAマクロで作業時間を削減");
        let b = service.filename("Excel自動化", "VBAマクロで作業時間を削減");
        assert_eq!(a, "excel_automation_business.png");
        assert_eq!(a, b);
    }
}
