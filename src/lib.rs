//! # dpcnn-data - 中文文档分类数据预处理
//!
//! 为 DPCNN 等文本分类模型准备 cnews 数据：读取 `标签\t正文` 格式的 TSV，
//! 清洗并用 jieba 分词，按词频构建（并缓存）词表，最终产出 batch-first 的
//! 定长 ID 矩阵与标签向量。
//!
//! ## 处理流程
//!
//! ```text
//! TSV ──read──▶ (正文, 标签) ──clean + jieba──▶ 词序列
//!     ──vocab(缓存)──▶ ID 序列 ──低频过滤 + 填充──▶ Batch { text, label }
//! ```
//!
//! ## 模块组织
//!
//! - `config`: 路径、超参数与标签映射
//! - `stopwords`: 停用词表
//! - `clean`: 基于正则的字符白名单过滤
//! - `tokenizer`: jieba 精确模式分词 + 过滤
//! - `vocab`: 词频表、词表与低频词过滤
//! - `vocab_cache`: 词频表的 bincode 缓存
//! - `dataset_loader`: TSV 读取
//! - `batch_loader`: 数值化、填充与分批迭代
//! - `pipeline`: 串联以上步骤
//! - `performance_monitor`: 阶段计时

pub mod batch_loader; // 批处理：填充、分批、打乱
pub mod clean; // 文本清洗
pub mod config; // 配置
pub mod dataset_loader; // TSV 数据读取
pub mod error; // 错误类型
pub mod performance_monitor; // 阶段计时
pub mod pipeline; // 流水线
pub mod stopwords; // 停用词
pub mod tokenizer; // 分词
pub mod vocab; // 词表
pub mod vocab_cache; // 词频表缓存

pub use batch_loader::{Batch, BatchIter, DataLoader, LoaderOptions, pad_or_truncate};
pub use clean::{clear_text, is_kept_char};
pub use config::{CachePolicy, LabelMap, PrepConfig};
pub use dataset_loader::{Example, RawRecord, read_data, read_records};
pub use error::{PrepError, Result};
pub use performance_monitor::PerformanceMonitor;
pub use pipeline::{Pipeline, Prepared};
pub use stopwords::StopWords;
pub use tokenizer::Tokenizer;
pub use vocab::{FreqTable, UNK_ID, Vocab, count_freqs, filter_lowfreq_words};
pub use vocab_cache::{VocabCache, corpus_fingerprint};

/// **文档最大长度**
///
/// 每篇文档填充或截断到的 token 数。cnews 正文平均数百字，分词后 500 个词
/// 能覆盖大部分文档。
pub const DEFAULT_DOC_MAXLEN: usize = 500;

/// **词表上限**
///
/// 只有词频排名靠前的词才有独立 ID，其余映射为 0。
pub const DEFAULT_TOTAL_WORDS: usize = 20000;

/// cnews 训练集 50000 条，每批 50 条即 1000 个 step
pub const DEFAULT_BATCH_SIZE: usize = 50;
