//! # 词频表缓存
//!
//! 训练阶段计算出的词频表会持久化到磁盘，验证 / 推理阶段直接读取，
//! 保证两次运行得到完全相同的词 ID。
//!
//! 文件格式（bincode v2，standard 配置）：
//!
//! ```text
//! CounterFile {
//!     version: u32,        // 当前为 1
//!     fingerprint: String, // 构建时训练语料的 BLAKE3 指纹
//!     freqs: FreqTable,    // 词 → 词频
//! }
//! ```
//!
//! 缓存文件存在但无法解析时直接报错，不会回退到重新统计。

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use bincode::{Decode, Encode};

use crate::config::CachePolicy;
use crate::error::{PrepError, Result};
use crate::vocab::{FreqTable, Vocab, count_freqs};

pub const COUNTER_FILE_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct CounterFile {
    pub version: u32,
    pub fingerprint: String,
    pub freqs: FreqTable,
}

/// 缓存文件大小上限（1 GiB），解码时用作 bincode 的读取上限
pub const MAX_COUNTER_FILE_BYTES: usize = 1 << 30;

/// 语料指纹：对分词结果逐词做 BLAKE3
pub fn corpus_fingerprint<T: AsRef<[String]>>(corpus: &[T]) -> String {
    let mut hasher = blake3::Hasher::new();
    for tokens in corpus {
        for token in tokens.as_ref() {
            hasher.update(token.as_bytes());
            hasher.update(&[0x1f]);
        }
        hasher.update(&[0x1e]);
    }
    hasher.finalize().to_hex().to_string()
}

/// 编码并刷新缓冲，返回底层 writer；刷新失败同样视为写入失败
fn write_counter<W: Write>(inner: W, counter: &CounterFile, path: &Path) -> Result<W> {
    let mut writer = BufWriter::new(inner);
    bincode::encode_into_std_write(counter, &mut writer, bincode::config::standard())?;
    writer
        .into_inner()
        .map_err(|e| PrepError::io(path, e.into_error()))
}

/// 保存词频表
///
/// 先写入同目录下的临时文件并落盘，再重命名为目标文件，
/// 写入中途失败不会留下半截的缓存。
pub fn save_counter<P: AsRef<Path>>(path: P, counter: &CounterFile) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PrepError::io(parent, e))?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = (|| {
        let file = File::create(&tmp_path).map_err(|e| PrepError::io(&tmp_path, e))?;
        let file = write_counter(file, counter, &tmp_path)?;
        file.sync_all().map_err(|e| PrepError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, path).map_err(|e| PrepError::io(path, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

pub fn load_counter<P: AsRef<Path>>(path: P) -> Result<CounterFile> {
    let path = path.as_ref();
    let corrupt = |reason: String| PrepError::CorruptCache {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| PrepError::io(path, e))?;
    let file_len = file.metadata().map_err(|e| PrepError::io(path, e))?.len();
    if file_len > MAX_COUNTER_FILE_BYTES as u64 {
        return Err(corrupt(format!("文件过大 ({} 字节)", file_len)));
    }
    let mut reader = BufReader::new(file);

    // 限制长度前缀，损坏的文件不会触发超大内存分配
    let config = bincode::config::standard().with_limit::<MAX_COUNTER_FILE_BYTES>();
    let counter: CounterFile = bincode::decode_from_std_read(&mut reader, config)
        .map_err(|e| corrupt(e.to_string()))?;

    if counter.version != COUNTER_FILE_VERSION {
        return Err(corrupt(format!("不支持的版本 {}", counter.version)));
    }
    Ok(counter)
}

/// 词表缓存：存在则读取，不存在则统计并写入
pub struct VocabCache {
    path: PathBuf,
    policy: CachePolicy,
}

impl VocabCache {
    pub fn new<P: Into<PathBuf>>(path: P, policy: CachePolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// 获取词表
    ///
    /// # 参数
    /// - `corpus`: 当前数据集的分词结果
    /// - `max_size`: 词表最多收录的词数
    /// - `is_train`: `corpus` 是否为训练语料。只有训练语料才与缓存指纹比对，
    ///   验证集 / 测试集本来就应该复用训练集的词表
    pub fn load_or_build<T: AsRef<[String]>>(
        &self,
        corpus: &[T],
        max_size: usize,
        is_train: bool,
    ) -> Result<Vocab> {
        if self.exists() {
            log::info!("📂 词频表缓存存在: {}", self.path.display());
            let counter = load_counter(&self.path)?;
            if is_train {
                self.check_fingerprint(&counter, corpus)?;
            }
            return Ok(Vocab::from_freqs(counter.freqs, max_size));
        }

        log::info!("🧮 词频表缓存不存在，从语料统计: {}", self.path.display());
        if !is_train {
            log::warn!("⚠️ 正在用非训练数据构建词表，后续训练将复用该词表");
        }

        let counter = CounterFile {
            version: COUNTER_FILE_VERSION,
            fingerprint: corpus_fingerprint(corpus),
            freqs: count_freqs(corpus),
        };
        save_counter(&self.path, &counter)?;
        log::info!(
            "💾 词频表已保存 ({} 个词): {}",
            counter.freqs.len(),
            self.path.display()
        );

        Ok(Vocab::from_freqs(counter.freqs, max_size))
    }

    fn check_fingerprint<T: AsRef<[String]>>(
        &self,
        counter: &CounterFile,
        corpus: &[T],
    ) -> Result<()> {
        if self.policy == CachePolicy::Trust {
            return Ok(());
        }

        let current = corpus_fingerprint(corpus);
        if current == counter.fingerprint {
            return Ok(());
        }

        match self.policy {
            CachePolicy::Strict => Err(PrepError::StaleCache {
                path: self.path.clone(),
                cached: counter.fingerprint.clone(),
                current,
            }),
            _ => {
                log::warn!(
                    "⚠️ 词频表缓存与当前训练语料不一致，仍使用缓存 ({})。删除该文件可重新统计",
                    self.path.display()
                );
                Ok(())
            }
        }
    }
}
