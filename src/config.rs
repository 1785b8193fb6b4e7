//! # 预处理配置
//!
//! 所有路径与超参数集中在 [`PrepConfig`] 中，由调用方显式构造后传入流水线，
//! 不依赖任何进程级全局状态。
//!
//! 配置可以来自 JSON 文件（缺省字段取默认值），例如：
//!
//! ```json
//! {
//!   "data_dir": "data/cnews/",
//!   "doc_maxlen": 500,
//!   "total_words": 20000,
//!   "batch_size": 50
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};
use crate::{DEFAULT_BATCH_SIZE, DEFAULT_DOC_MAXLEN, DEFAULT_TOTAL_WORDS};

/// 标签字符串 → 类别 ID
pub type LabelMap = BTreeMap<String, usize>;

/// cnews 数据集的 10 个类别
pub const CNEWS_LABELS: [&str; 10] = [
    "体育", "财经", "房产", "家居", "教育", "科技", "时尚", "时政", "游戏", "娱乐",
];

/// **词表缓存校验策略**
///
/// 缓存文件中记录了构建它时训练语料的指纹。重新加载训练集时，
/// 若指纹与当前语料不一致，按此策略处理。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    /// 无条件信任缓存
    Trust,
    /// 记录警告后继续使用缓存
    #[default]
    Warn,
    /// 视为致命错误
    Strict,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    /// 数据目录
    pub data_dir: PathBuf,
    pub train_file: String,
    pub val_file: String,
    pub test_file: String,
    /// 停用词表路径（每行一个词）
    pub stopwords_file: PathBuf,
    /// 可选的 jieba 用户词典
    pub user_dict_file: Option<PathBuf>,
    /// 词频表缓存路径
    pub counter_path: PathBuf,
    /// 每篇文档填充/截断后的固定长度
    pub doc_maxlen: usize,
    /// 词表上限：ID >= total_words 的词映射为 0
    pub total_words: usize,
    pub batch_size: usize,
    /// 是否丢弃最后一个不满的批次
    pub drop_last: bool,
    /// 打乱顺序使用的随机种子；None 时每次运行不同
    pub shuffle_seed: Option<u64>,
    pub cache_policy: CachePolicy,
    pub label2id: LabelMap,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data/cnews/"),
            train_file: "cnews.train.txt".to_string(),
            val_file: "cnews.val.txt".to_string(),
            test_file: "cnews.test.txt".to_string(),
            stopwords_file: PathBuf::from("data/stopwords.txt"),
            user_dict_file: None,
            counter_path: PathBuf::from("data/cnews/counter.bin"),
            doc_maxlen: DEFAULT_DOC_MAXLEN,
            total_words: DEFAULT_TOTAL_WORDS,
            batch_size: DEFAULT_BATCH_SIZE,
            drop_last: false,
            shuffle_seed: None,
            cache_policy: CachePolicy::default(),
            label2id: default_label_map(),
        }
    }
}

impl PrepConfig {
    /// 从 JSON 文件读取配置，未给出的字段使用默认值
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PrepError::io(path, e))?;
        let config: PrepConfig = serde_json::from_str(&text)?;
        log::info!("📄 已加载配置文件: {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.doc_maxlen == 0 {
            return Err(PrepError::InvalidConfig("doc_maxlen 必须大于 0".into()));
        }
        if self.batch_size == 0 {
            return Err(PrepError::InvalidConfig("batch_size 必须大于 0".into()));
        }
        if self.total_words == 0 {
            return Err(PrepError::InvalidConfig("total_words 必须大于 0".into()));
        }
        if self.label2id.is_empty() {
            return Err(PrepError::InvalidConfig("label2id 不能为空".into()));
        }
        Ok(())
    }

    /// 数据目录下某个文件的完整路径
    pub fn data_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    pub fn train_path(&self) -> PathBuf {
        self.data_path(&self.train_file)
    }

    pub fn val_path(&self) -> PathBuf {
        self.data_path(&self.val_file)
    }

    pub fn test_path(&self) -> PathBuf {
        self.data_path(&self.test_file)
    }
}

pub fn default_label_map() -> LabelMap {
    CNEWS_LABELS
        .iter()
        .enumerate()
        .map(|(id, label)| (label.to_string(), id))
        .collect()
}
