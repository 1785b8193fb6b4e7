//! # 词表
//!
//! 词表由词频表构建：按词频降序排列，依次分配 ID 1, 2, 3, …，
//! ID 0 保留给未知词 `<unk>`（也用作填充）。词频相同的词按字符串升序排列，
//! 因此同一张词频表总是得到相同的 ID 分配。

use std::collections::{BTreeMap, HashMap};

/// 词 → 出现次数
pub type FreqTable = BTreeMap<String, u64>;

/// 未知词 / 低频词的 ID
pub const UNK_ID: usize = 0;
pub const UNK_TOKEN: &str = "<unk>";

/// 统计整个语料的词频
pub fn count_freqs<T: AsRef<[String]>>(corpus: &[T]) -> FreqTable {
    let mut freqs = FreqTable::new();
    for tokens in corpus {
        for token in tokens.as_ref() {
            *freqs.entry(token.clone()).or_insert(0) += 1;
        }
    }
    freqs
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocab {
    itos: Vec<String>,
    stoi: HashMap<String, usize>,
    freqs: FreqTable,
}

impl Vocab {
    /// 由词频表构建词表，最多收录 `max_size` 个词（不含 `<unk>`）
    ///
    /// 词表总长为 `max_size + 1`。与 [`filter_lowfreq_words`] 的上限 `total_words`
    /// 配合时传入 `total_words - 1`，否则 ID 为 `total_words` 的词永远会被置 0。
    pub fn from_freqs(freqs: FreqTable, max_size: usize) -> Self {
        // BTreeMap 迭代已按词升序，稳定排序后词频相同者保持该顺序
        let mut ranked: Vec<(&String, u64)> = freqs.iter().map(|(w, &c)| (w, c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let mut itos = Vec::with_capacity(ranked.len().min(max_size) + 1);
        itos.push(UNK_TOKEN.to_string());
        itos.extend(ranked.into_iter().take(max_size).map(|(w, _)| w.clone()));

        let stoi = itos
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();

        Self { itos, stoi, freqs }
    }

    /// 词 → ID；不在词表中时返回 None
    pub fn encode(&self, word: &str) -> Option<usize> {
        self.stoi.get(word).copied()
    }

    /// ID → 词
    pub fn decode(&self, id: usize) -> Option<&str> {
        self.itos.get(id).map(String::as_str)
    }

    /// 将词序列转换为 ID 序列，未知词映射为 [`UNK_ID`]
    pub fn numericalize<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<usize> {
        tokens
            .iter()
            .map(|t| self.encode(t.as_ref()).unwrap_or(UNK_ID))
            .collect()
    }

    pub fn unk_id(&self) -> usize {
        UNK_ID
    }

    /// 词表大小（含 `<unk>`）
    pub fn len(&self) -> usize {
        self.itos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itos.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.itos
    }

    /// 构建该词表所用的完整词频表（未截断）
    pub fn freqs(&self) -> &FreqTable {
        &self.freqs
    }
}

/// 过滤低频词
///
/// `batch` 中每个元素是一篇已数值化的文档。由于 ID 按词频降序分配，
/// ID >= `total_words` 的都是低频词，统一映射为 [`UNK_ID`]。
pub fn filter_lowfreq_words(batch: &[Vec<usize>], total_words: usize) -> Vec<Vec<usize>> {
    batch
        .iter()
        .map(|example| {
            example
                .iter()
                .map(|&id| if id < total_words { id } else { UNK_ID })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&[&str]]) -> Vec<Vec<String>> {
        docs.iter()
            .map(|d| d.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_ids_follow_frequency() {
        let c = corpus(&[&["体育", "比赛", "体育"], &["比赛", "体育", "球员"]]);
        let vocab = Vocab::from_freqs(count_freqs(&c), 10);

        assert_eq!(vocab.decode(0), Some(UNK_TOKEN));
        assert_eq!(vocab.encode("体育"), Some(1));
        assert_eq!(vocab.encode("比赛"), Some(2));
        assert_eq!(vocab.encode("球员"), Some(3));
        assert_eq!(vocab.len(), 4);
    }

    #[test]
    fn test_ties_broken_by_token_order() {
        let c = corpus(&[&["b", "a", "c", "a", "b", "c"]]);
        let vocab = Vocab::from_freqs(count_freqs(&c), 10);
        assert_eq!(vocab.words(), &["<unk>", "a", "b", "c"]);
    }

    #[test]
    fn test_max_size_caps_vocab() {
        let c = corpus(&[&["x", "x", "x", "y", "y", "z"]]);
        let vocab = Vocab::from_freqs(count_freqs(&c), 2);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.encode("z"), None);
        assert_eq!(vocab.numericalize(&["z", "x", "y"]), vec![0, 1, 2]);
        // 完整词频表仍然保留
        assert_eq!(vocab.freqs().get("z"), Some(&1));
    }

    #[test]
    fn test_filter_lowfreq_words() {
        let batch = vec![vec![0, 1, 4, 5, 9], vec![3, 2, 7]];
        let filtered = filter_lowfreq_words(&batch, 5);
        assert_eq!(filtered, vec![vec![0, 1, 4, 0, 0], vec![3, 2, 0]]);
        assert_eq!(filter_lowfreq_words(&filtered, 5), filtered);
        assert!(filtered.iter().flatten().all(|&id| id < 5));
    }
}
