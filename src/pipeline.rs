//! # 预处理流水线
//!
//! 原始文件 → 读取 → 清洗 + 分词 → 构建或加载词表 → 数值化 + 低频过滤 + 填充 → 分批
//!
//! ```no_run
//! use dpcnn_data::{Pipeline, PrepConfig};
//!
//! let pipeline = Pipeline::new(PrepConfig::default())?;
//! let mut train = pipeline.load_data(pipeline.config().train_path(), true, true)?;
//! for batch in &mut train {
//!     println!("{:?} {:?}", batch.text.dim(), batch.label.dim());
//! }
//! # Ok::<(), dpcnn_data::PrepError>(())
//! ```

use std::path::Path;

use crate::batch_loader::{DataLoader, LoaderOptions};
use crate::config::PrepConfig;
use crate::dataset_loader::{Example, build_examples, read_data};
use crate::error::Result;
use crate::stopwords::StopWords;
use crate::tokenizer::Tokenizer;
use crate::vocab::Vocab;
use crate::vocab_cache::VocabCache;

pub struct Pipeline {
    config: PrepConfig,
    tokenizer: Tokenizer,
    cache: VocabCache,
}

/// 训练集与验证集的加载器
pub struct Prepared {
    pub train: DataLoader,
    pub val: DataLoader,
}

impl Pipeline {
    /// 校验配置、加载停用词并初始化分词器
    pub fn new(config: PrepConfig) -> Result<Self> {
        config.validate()?;
        let stopwords = StopWords::load(&config.stopwords_file)?;
        let tokenizer = match &config.user_dict_file {
            Some(dict) => Tokenizer::with_user_dict(stopwords, dict)?,
            None => Tokenizer::new(stopwords),
        };
        Ok(Self::with_tokenizer(config, tokenizer))
    }

    /// 使用已构造好的分词器（配置已由调用方校验）
    pub fn with_tokenizer(config: PrepConfig, tokenizer: Tokenizer) -> Self {
        let cache = VocabCache::new(config.counter_path.clone(), config.cache_policy);
        Self {
            config,
            tokenizer,
            cache,
        }
    }

    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// 读取并分词，不涉及词表
    pub fn read_examples<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Example>> {
        let (contents, labels) = read_data(path.as_ref(), &self.config.label2id)?;
        Ok(build_examples(&self.tokenizer, &contents, &labels))
    }

    /// 从缓存读取词表，缓存不存在时由 `corpus` 统计并写入缓存
    ///
    /// 词表（含 `<unk>`）最多 `total_words` 项，收录的每个 ID 都不会被低频过滤置 0。
    pub fn build_vocab<T: AsRef<[String]>>(
        &self,
        corpus: &[T],
        is_train: bool,
    ) -> Result<Vocab> {
        // <unk> 占用 ID 0
        let max_size = self.config.total_words - 1;
        let vocab = self.cache.load_or_build(corpus, max_size, is_train)?;
        log::info!(
            "📖 词表大小: {} (缓存 {})",
            vocab.len(),
            self.cache.path().display()
        );
        let top: Vec<&str> = vocab
            .words()
            .iter()
            .skip(1)
            .take(10)
            .map(String::as_str)
            .collect();
        log::debug!("   高频词: {:?}", top);
        Ok(vocab)
    }

    /// 加载一个数据文件
    ///
    /// # 参数
    /// - `path`: TSV 数据文件
    /// - `traindata`: 是否为训练集（决定是否与缓存指纹比对）
    /// - `shuffle`: 每轮迭代前是否打乱样本顺序
    pub fn load_data<P: AsRef<Path>>(
        &self,
        path: P,
        traindata: bool,
        shuffle: bool,
    ) -> Result<DataLoader> {
        let path = path.as_ref();
        log::info!("🚀 加载数据: {}", path.display());

        let examples = self.read_examples(path)?;
        if let Some(first) = examples.first() {
            let preview: Vec<&str> = first.tokens.iter().take(5).map(String::as_str).collect();
            log::info!(
                "   首个样本: {} 个词 {:?}…, 标签 {}",
                first.tokens.len(),
                preview,
                first.label
            );
        }

        let vocab = self.build_vocab(&examples, traindata)?;

        let loader = DataLoader::new(&examples, &vocab, self.loader_options(shuffle));
        log::info!(
            "✅ {} 个样本，{} 个批次",
            loader.num_examples(),
            loader.len()
        );
        Ok(loader)
    }

    /// 加载训练集（打乱）与验证集（保持顺序）
    pub fn prepare(&self) -> Result<Prepared> {
        let train = self.load_data(self.config.train_path(), true, true)?;
        let val = self.load_data(self.config.val_path(), false, false)?;
        Ok(Prepared { train, val })
    }

    fn loader_options(&self, shuffle: bool) -> LoaderOptions {
        LoaderOptions {
            batch_size: self.config.batch_size,
            fix_length: self.config.doc_maxlen,
            total_words: self.config.total_words,
            shuffle,
            drop_last: self.config.drop_last,
            seed: self.config.shuffle_seed,
        }
    }
}
