//! # 文本清洗
//!
//! 只保留以下字符，其余一律删除（不替换，保持原有顺序）：
//!
//! - 中文汉字 U+4E00–U+9FA5
//! - ASCII 数字与字母
//! - 短横线 `-`
//! - 全角标点 `、，。！？：；（）《》【】`

use std::sync::LazyLock;

use regex::Regex;

/// 保留的全角标点
pub const KEPT_PUNCTUATION: [char; 13] = [
    '、', '，', '。', '！', '？', '：', '；', '（', '）', '《', '》', '【', '】',
];

static DISCARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\x{4e00}-\x{9fa5}0-9a-zA-Z\-、，。！？：；（）《》【】]")
        .expect("清洗正则表达式无效")
});

/// 删除白名单以外的所有字符
pub fn clear_text(text: &str) -> String {
    DISCARD_RE.replace_all(text, "").into_owned()
}

/// 字符是否会被 [`clear_text`] 保留
pub fn is_kept_char(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
        || c.is_ascii_alphanumeric()
        || c == '-'
        || KEPT_PUNCTUATION.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_whitelisted() {
        assert_eq!(clear_text("马晓旭，意外受伤！Rooney-10"), "马晓旭，意外受伤！Rooney-10");
    }

    #[test]
    fn test_strips_everything_else() {
        assert_eq!(clear_text("马晓旭 意外\t受伤..."), "马晓旭意外受伤");
        assert_eq!(clear_text("“引号”&emoji😀"), "引号emoji");
        assert_eq!(clear_text(",!?:;[]()"), "");
        assert_eq!(clear_text("龦"), ""); // U+9FA6 超出范围
        assert_eq!(clear_text(""), "");
    }

    #[test]
    fn test_idempotent_and_whitelisted() {
        let samples = [
            "北京时间3月5日，NBA常规赛继续进行。",
            "  全角　空格\u{3000}与 ＡＢＣ 全角字母 ",
            "(半角括号) 【全角括号】 <html>&nbsp;</html>",
            "混合 text 123 —— 破折号 - 连字符",
        ];
        for s in samples {
            let once = clear_text(s);
            assert_eq!(clear_text(&once), once);
            assert!(once.chars().all(is_kept_char), "非法字符残留: {}", once);
        }
    }
}
