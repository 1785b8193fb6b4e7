// 中文清洗与分词测试

use dpcnn_data::{StopWords, Tokenizer, clear_text, is_kept_char};

const SAMPLE: &str = "马晓旭意外受伤让国奥警惕 无奈大雨格外青睐殷家军记者傅亚雨沈阳报道";

#[test]
fn test_clean_output_only_whitelisted_chars() {
    let inputs = [
        SAMPLE,
        "<p>新浪体育讯　北京时间3月5日…</p>",
        "Email: someone@example.com / ＵＲＬ：http://sina.com.cn",
        "「引号」『书名』〈尖括号〉",
        "\u{0}\u{7f}\u{200b}零宽字符",
    ];
    for input in inputs {
        let cleaned = clear_text(input);
        assert!(
            cleaned.chars().all(is_kept_char),
            "清洗结果含非法字符: {}",
            cleaned
        );
        assert_eq!(clear_text(&cleaned), cleaned, "清洗不是幂等的: {}", input);
    }
}

#[test]
fn test_tokens_never_short() {
    let tokenizer = Tokenizer::new(StopWords::default());
    let tokens = tokenizer.tokenize(SAMPLE);

    assert!(!tokens.is_empty());
    for token in &tokens {
        assert!(token.trim().chars().count() > 1, "单字词未被过滤: {}", token);
    }
}

#[test]
fn test_stopword_never_in_output() {
    let plain = Tokenizer::new(StopWords::default());
    assert!(plain.tokenize(SAMPLE).contains(&"意外".to_string()));

    let tokenizer = Tokenizer::new(StopWords::from_words(["意外", "报道"]));
    let tokens = tokenizer.tokenize(SAMPLE);
    assert!(!tokens.contains(&"意外".to_string()));
    assert!(!tokens.contains(&"报道".to_string()));
    assert!(tokens.iter().all(|t| !tokenizer.stopwords().contains(t)));
}

#[test]
fn test_tokenize_is_deterministic() {
    let tokenizer = Tokenizer::new(StopWords::default());
    assert_eq!(tokenizer.tokenize(SAMPLE), tokenizer.tokenize(SAMPLE));
}

#[test]
fn test_tokenize_all_keeps_document_order() {
    let tokenizer = Tokenizer::new(StopWords::default());
    let docs = vec![SAMPLE.to_string(), String::new(), "股市大涨".to_string()];
    let corpus = tokenizer.tokenize_all(&docs);

    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus[0], tokenizer.tokenize(SAMPLE));
    assert!(corpus[1].is_empty());
}
