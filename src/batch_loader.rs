//! # 批量数据加载器（Batch Loader）
//!
//! 把分词后的样本组织成定长批次：
//!
//! 1. **数值化**：词 → ID，未知词为 0
//! 2. **低频过滤**：ID >= `total_words` 的词映射为 0
//! 3. **填充 / 截断**：每条序列恰好 `fix_length` 个 ID，不足时在末尾补 0
//! 4. **分批**：按 `batch_size` 切分，可选地在每轮迭代前打乱顺序（不按长度排序）
//!
//! ## 输出（Batch）
//! ```text
//! text:  Array2<i64> shape (batch_size, fix_length)   // batch first
//! label: Array1<i64> shape (batch_size,)
//! ```
//!
//! 最后一个不满的批次默认保留，`drop_last = true` 时丢弃。

use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::dataset_loader::Example;
use crate::vocab::{UNK_ID, Vocab, filter_lowfreq_words};

/// **PAD token ID**，与未知词共用 0
pub const PAD_TOKEN_ID: usize = UNK_ID;

/// 截断或在末尾补 `pad_id`，返回长度恰好为 `fix_length` 的序列
pub fn pad_or_truncate(ids: &[usize], fix_length: usize, pad_id: usize) -> Vec<usize> {
    let mut out: Vec<usize> = ids.iter().copied().take(fix_length).collect();
    out.resize(fix_length, pad_id);
    out
}

/// **批次数据结构**
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// **Token IDs**: (batch_size, seq_len)
    pub text: Array2<i64>,
    /// **类别标签**: (batch_size,)
    pub label: Array1<i64>,
}

impl Batch {
    pub fn batch_size(&self) -> usize {
        self.text.nrows()
    }

    pub fn seq_len(&self) -> usize {
        self.text.ncols()
    }
}

#[derive(Clone, Debug)]
pub struct LoaderOptions {
    pub batch_size: usize,
    pub fix_length: usize,
    pub total_words: usize,
    pub shuffle: bool,
    pub drop_last: bool,
    /// 打乱顺序的随机种子
    pub seed: Option<u64>,
}

/// **批量数据加载器**
///
/// 构造时完成数值化、低频过滤与填充；迭代时按需拼装批次。
pub struct DataLoader {
    rows: Vec<Vec<usize>>,
    labels: Vec<usize>,
    order: Vec<usize>,
    options: LoaderOptions,
    rng: StdRng,
}

impl DataLoader {
    pub fn new(examples: &[Example], vocab: &Vocab, options: LoaderOptions) -> Self {
        let numericalized: Vec<Vec<usize>> = examples
            .iter()
            .map(|ex| vocab.numericalize(&ex.tokens))
            .collect();
        let capped = filter_lowfreq_words(&numericalized, options.total_words);
        let rows: Vec<Vec<usize>> = capped
            .iter()
            .map(|ids| pad_or_truncate(ids, options.fix_length, PAD_TOKEN_ID))
            .collect();
        let labels = examples.iter().map(|ex| ex.label).collect();

        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            order: (0..rows.len()).collect(),
            rows,
            labels,
            options,
            rng,
        }
    }

    /// 批次数
    pub fn len(&self) -> usize {
        let n = self.rows.len();
        let bs = self.options.batch_size.max(1);
        if self.options.drop_last {
            n / bs
        } else {
            n.div_ceil(bs)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn num_examples(&self) -> usize {
        self.rows.len()
    }

    /// 第 `index` 条样本（数值化并填充后的序列，标签）
    pub fn example(&self, index: usize) -> Option<(&[usize], usize)> {
        Some((self.rows.get(index)?.as_slice(), *self.labels.get(index)?))
    }

    /// 开始新一轮迭代；开启 shuffle 时每轮重新打乱
    pub fn iter(&mut self) -> BatchIter<'_> {
        if self.options.shuffle {
            self.order.shuffle(&mut self.rng);
        }
        BatchIter {
            loader: self,
            batch_index: 0,
        }
    }

    fn make_batch(&self, indices: &[usize]) -> Batch {
        let fix_length = self.options.fix_length;
        let mut text = Array2::<i64>::zeros((indices.len(), fix_length));
        for (i, &idx) in indices.iter().enumerate() {
            for (j, &id) in self.rows[idx].iter().enumerate() {
                text[[i, j]] = id as i64;
            }
        }
        let label = indices.iter().map(|&idx| self.labels[idx] as i64).collect();
        Batch { text, label }
    }
}

impl<'a> IntoIterator for &'a mut DataLoader {
    type Item = Batch;
    type IntoIter = BatchIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct BatchIter<'a> {
    loader: &'a DataLoader,
    batch_index: usize,
}

impl Iterator for BatchIter<'_> {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        if self.batch_index >= self.loader.len() {
            return None;
        }
        let bs = self.loader.options.batch_size.max(1);
        let start = self.batch_index * bs;
        let end = (start + bs).min(self.loader.order.len());
        self.batch_index += 1;
        Some(self.loader.make_batch(&self.loader.order[start..end]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.loader.len() - self.batch_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::count_freqs;

    fn examples(n: usize) -> Vec<Example> {
        (0..n)
            .map(|i| Example {
                tokens: vec!["比赛".to_string(); i + 1],
                label: i % 3,
            })
            .collect()
    }

    fn options(batch_size: usize, shuffle: bool, drop_last: bool) -> LoaderOptions {
        LoaderOptions {
            batch_size,
            fix_length: 4,
            total_words: 10,
            shuffle,
            drop_last,
            seed: Some(42),
        }
    }

    fn vocab_for(examples: &[Example]) -> Vocab {
        let corpus: Vec<Vec<String>> = examples.iter().map(|e| e.tokens.clone()).collect();
        Vocab::from_freqs(count_freqs(&corpus), 10)
    }

    #[test]
    fn test_pad_or_truncate() {
        assert_eq!(pad_or_truncate(&[1, 2], 4, 0), vec![1, 2, 0, 0]);
        assert_eq!(pad_or_truncate(&[1, 2, 3, 4, 5], 3, 0), vec![1, 2, 3]);
        assert_eq!(pad_or_truncate(&[], 2, 0), vec![0, 0]);
    }

    #[test]
    fn test_partial_batch_kept() {
        let ex = examples(5);
        let mut loader = DataLoader::new(&ex, &vocab_for(&ex), options(2, false, false));
        assert_eq!(loader.len(), 3);

        let batches: Vec<Batch> = loader.iter().collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].text.dim(), (2, 4));
        assert_eq!(batches[2].text.dim(), (1, 4));
        assert_eq!(batches[2].label.len(), 1);
        // 第 1 条样本只有一个词，其余补 0
        assert_eq!(batches[0].text.row(0).to_vec(), vec![1, 0, 0, 0]);
        assert_eq!(batches[0].label.to_vec(), vec![0, 1]);
    }

    #[test]
    fn test_drop_last() {
        let ex = examples(5);
        let mut loader = DataLoader::new(&ex, &vocab_for(&ex), options(2, false, true));
        assert_eq!(loader.len(), 2);
        assert!(loader.iter().all(|b| b.batch_size() == 2));
    }

    #[test]
    fn test_shuffle_keeps_all_examples() {
        let ex = examples(9);
        let mut loader = DataLoader::new(&ex, &vocab_for(&ex), options(4, true, false));

        let mut labels: Vec<i64> = loader.iter().flat_map(|b| b.label.to_vec()).collect();
        labels.sort();
        assert_eq!(labels, vec![0, 0, 0, 1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let ex = examples(20);
        let vocab = vocab_for(&ex);
        let mut a = DataLoader::new(&ex, &vocab, options(5, true, false));
        let mut b = DataLoader::new(&ex, &vocab, options(5, true, false));
        let first_a: Vec<Batch> = a.iter().collect();
        let first_b: Vec<Batch> = b.iter().collect();
        assert_eq!(first_a, first_b);
    }
}
