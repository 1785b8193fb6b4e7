//! 停用词表
//!
//! 在初始化阶段加载一次，之后只读地交给 [`Tokenizer`](crate::tokenizer::Tokenizer) 使用。

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{PrepError, Result};

#[derive(Clone, Debug, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// 从文件加载停用词
    ///
    /// 文件为 UTF-8 单列文本，无表头，每行一个词。若一行中含制表符，
    /// 只取第一列；空行忽略。
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PrepError::io(path, e))?;
        let stopwords = Self::parse(&text);
        log::info!(
            "🛑 已加载停用词 {} 个: {}",
            stopwords.len(),
            path.display()
        );
        Ok(stopwords)
    }

    fn parse(text: &str) -> Self {
        let words = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter_map(|line| line.split('\t').next())
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect();
        Self { words }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
