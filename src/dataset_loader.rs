//! # 数据集加载器
//!
//! 读取 cnews 格式的 TSV 文件：两列 `标签\t正文`，无表头，UTF-8，每行一篇文档。
//!
//! ```text
//! 体育	马晓旭意外受伤让国奥警惕 无奈大雨格外青睐殷家军……
//! 财经	基金一季报显示……
//! ```
//!
//! 缺少任意一列（或该列为空）的行会被静默丢弃；标签不在 `label2id` 中则报错。

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use crate::config::LabelMap;
use crate::error::{PrepError, Result};
use crate::tokenizer::Tokenizer;

/// TSV 中的一行
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    pub label: String,
    pub content: String,
}

/// 分词后的样本
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Example {
    pub tokens: Vec<String>,
    pub label: usize,
}

impl AsRef<[String]> for Example {
    fn as_ref(&self) -> &[String] {
        &self.tokens
    }
}

/// 读取 TSV 的全部有效行
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PrepError::io(path, e))?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in reader.records() {
        let row = row?;
        match (row.get(0), row.get(1)) {
            (Some(label), Some(content)) if !label.is_empty() && !content.is_empty() => {
                records.push(RawRecord {
                    label: label.to_string(),
                    content: content.to_string(),
                });
            }
            _ => dropped += 1,
        }
    }

    log::debug!(
        "读取 {}: 有效 {} 行，丢弃 {} 行",
        path.display(),
        records.len(),
        dropped
    );
    Ok(records)
}

/// 读取数据并拆分为平行的正文列和标签 ID 列
pub fn read_data<P: AsRef<Path>>(
    path: P,
    label2id: &LabelMap,
) -> Result<(Vec<String>, Vec<usize>)> {
    let records = read_records(path)?;

    let mut contents = Vec::with_capacity(records.len());
    let mut labels = Vec::with_capacity(records.len());
    for record in records {
        let id = *label2id
            .get(&record.label)
            .ok_or_else(|| PrepError::UnknownLabel(record.label.clone()))?;
        labels.push(id);
        contents.push(record.content);
    }

    if let Some(first) = contents.first() {
        log::info!(
            "📚 共 {} 篇文档，首篇长度 {} 字",
            contents.len(),
            first.chars().count()
        );
    }

    Ok((contents, labels))
}

/// 对每篇文档分词，与标签配对
pub fn build_examples(tokenizer: &Tokenizer, contents: &[String], labels: &[usize]) -> Vec<Example> {
    let corpus = tokenizer.tokenize_all(contents);
    corpus
        .into_iter()
        .zip(labels.iter().copied())
        .map(|(tokens, label)| Example { tokens, label })
        .collect()
}
