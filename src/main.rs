use std::path::PathBuf;
use std::process::ExitCode;

use dpcnn_data::{CachePolicy, PerformanceMonitor, Pipeline, PrepConfig, Result};

// CLI 解析辅助函数
fn arg_has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn parse_str_arg<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    let prefix = format!("{}=", key);
    args.iter().find_map(|a| a.strip_prefix(&prefix))
}

fn parse_usize_arg(args: &[String], key: &str) -> Option<usize> {
    parse_str_arg(args, key).and_then(|v| v.parse::<usize>().ok())
}

fn parse_u64_arg(args: &[String], key: &str) -> Option<u64> {
    parse_str_arg(args, key).and_then(|v| v.parse::<u64>().ok())
}

fn print_usage() {
    println!("用法: dpcnn-data [选项]");
    println!("  --config=PATH        JSON 配置文件");
    println!("  --data-dir=DIR       数据目录");
    println!("  --stopwords=PATH     停用词表");
    println!("  --counter=PATH       词频表缓存");
    println!("  --doc-maxlen=N       文档固定长度");
    println!("  --total-words=N      词表上限");
    println!("  --batch-size=N       批大小");
    println!("  --seed=N             打乱顺序的随机种子");
    println!("  --drop-last          丢弃最后一个不满的批次");
    println!("  --strict-cache       缓存与训练语料不一致时报错");
    println!("  --trust-cache        不校验缓存");
    println!("测试集文件存在时一并加载");
}

/// 配置文件 + 命令行覆盖
fn build_config(args: &[String]) -> Result<PrepConfig> {
    let mut config = match parse_str_arg(args, "--config") {
        Some(path) => PrepConfig::from_json_file(path)?,
        None => PrepConfig::default(),
    };

    if let Some(dir) = parse_str_arg(args, "--data-dir") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(path) = parse_str_arg(args, "--stopwords") {
        config.stopwords_file = PathBuf::from(path);
    }
    if let Some(path) = parse_str_arg(args, "--counter") {
        config.counter_path = PathBuf::from(path);
    }
    if let Some(v) = parse_usize_arg(args, "--doc-maxlen") {
        config.doc_maxlen = v;
    }
    if let Some(v) = parse_usize_arg(args, "--total-words") {
        config.total_words = v;
    }
    if let Some(v) = parse_usize_arg(args, "--batch-size") {
        config.batch_size = v;
    }
    if let Some(seed) = parse_u64_arg(args, "--seed") {
        config.shuffle_seed = Some(seed);
    }
    if arg_has_flag(args, "--drop-last") {
        config.drop_last = true;
    }
    if arg_has_flag(args, "--strict-cache") {
        config.cache_policy = CachePolicy::Strict;
    } else if arg_has_flag(args, "--trust-cache") {
        config.cache_policy = CachePolicy::Trust;
    }

    Ok(config)
}

fn run(args: &[String], perf_monitor: &mut PerformanceMonitor) -> Result<()> {
    let config = build_config(args)?;

    perf_monitor.start("初始化");
    let pipeline = Pipeline::new(config)?;
    perf_monitor.stop("初始化");

    perf_monitor.start("加载训练集");
    let mut train_loader =
        pipeline.load_data(pipeline.config().train_path(), true, true)?;
    perf_monitor.stop("加载训练集");

    perf_monitor.start("加载验证集");
    let val_loader = pipeline.load_data(pipeline.config().val_path(), false, false)?;
    perf_monitor.stop("加载验证集");

    // 测试集可选
    let test_path = pipeline.config().test_path();
    let test_loader = if test_path.exists() {
        perf_monitor.start("加载测试集");
        let loader = pipeline.load_data(&test_path, false, false)?;
        perf_monitor.stop("加载测试集");
        Some(loader)
    } else {
        log::info!("⏭️ 测试集不存在，跳过: {}", test_path.display());
        None
    };

    println!("len(train_loader): {}", train_loader.len());
    println!("len(val_loader): {}", val_loader.len());
    if let Some(loader) = &test_loader {
        println!("len(test_loader): {}", loader.len());
    }

    if let Some(batch) = train_loader.iter().next() {
        println!(
            "text: ({}, {}), label: {:?}",
            batch.batch_size(),
            batch.seq_len(),
            batch.label.dim()
        );
        if let Some(label) = batch.label.first() {
            println!("label[0] = {} (i64)", label);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // 初始化日志系统
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
    {
        eprintln!("日志初始化失败: {}", e);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if arg_has_flag(&args, "--help") || arg_has_flag(&args, "-h") {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let mut perf_monitor = PerformanceMonitor::new();
    perf_monitor.start("总耗时");
    let result = run(&args, &mut perf_monitor);
    perf_monitor.stop("总耗时");
    perf_monitor.report();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("❌ 数据预处理失败: {}", e);
            ExitCode::FAILURE
        }
    }
}
