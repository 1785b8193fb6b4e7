//! # 中文分词
//!
//! 处理顺序固定为：清洗 → 去首尾空白 → jieba 精确模式分词 → 过滤单字词 → 过滤停用词。
//!
//! 停用词表在构造时传入，分词器本身不读取任何全局状态。

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use jieba_rs::Jieba;

use crate::clean::clear_text;
use crate::error::{PrepError, Result};
use crate::stopwords::StopWords;

pub struct Tokenizer {
    jieba: Jieba,
    stopwords: StopWords,
}

impl Tokenizer {
    pub fn new(stopwords: StopWords) -> Self {
        Self {
            jieba: Jieba::new(),
            stopwords,
        }
    }

    /// 在默认词典之外额外加载一个 jieba 用户词典
    ///
    /// 词典格式与 jieba 相同：`词 [词频] [词性]`，每行一个词。
    pub fn with_user_dict<P: AsRef<Path>>(stopwords: StopWords, path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PrepError::io(path, e))?;
        let mut reader = BufReader::new(file);

        let mut jieba = Jieba::new();
        jieba
            .load_dict(&mut reader)
            .map_err(|e| PrepError::UserDict(format!("{}: {}", path.display(), e)))?;
        log::info!("📖 已加载用户词典: {}", path.display());

        Ok(Self { jieba, stopwords })
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    /// 对单篇文档分词
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = clear_text(text);
        // 精确模式，开启 HMM 以识别未登录词
        let segs = self.jieba.cut(cleaned.trim(), true);
        filter_tokens(segs, &self.stopwords)
    }

    /// 对整个语料分词，并显示进度条
    pub fn tokenize_all<S: AsRef<str>>(&self, docs: &[S]) -> Vec<Vec<String>> {
        let pb = ProgressBar::new(docs.len() as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} 分词")
        {
            pb.set_style(style.progress_chars("=>-"));
        }

        let mut corpus = Vec::with_capacity(docs.len());
        for doc in docs {
            corpus.push(self.tokenize(doc.as_ref()));
            pb.inc(1);
        }
        pb.finish_and_clear();

        corpus
    }
}

/// 去掉长度不超过 1 个字符的词和停用词
pub fn filter_tokens<'a, I>(segs: I, stopwords: &StopWords) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    segs.into_iter()
        .filter(|seg| seg.trim().chars().count() > 1)
        .filter(|seg| !stopwords.contains(seg))
        .map(str::to_string)
        .collect()
}
