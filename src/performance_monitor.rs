use std::collections::HashMap;
use std::time::{Duration, Instant};

/// 阶段计时：记录流水线各阶段耗时
pub struct PerformanceMonitor {
    timers: HashMap<String, Vec<Duration>>,
    current_timers: HashMap<String, Instant>,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self {
            timers: HashMap::new(),
            current_timers: HashMap::new(),
        }
    }

    /// 开始计时
    pub fn start(&mut self, name: &str) {
        self.current_timers.insert(name.to_string(), Instant::now());
        log::debug!("⏱️  开始: {}", name);
    }

    /// 结束计时并记录；未开始的阶段忽略
    pub fn stop(&mut self, name: &str) -> Option<Duration> {
        let elapsed = self.current_timers.remove(name)?.elapsed();
        self.timers.entry(name.to_string()).or_default().push(elapsed);
        log::info!("✓ 完成: {} (耗时: {:.2}秒)", name, elapsed.as_secs_f32());
        Some(elapsed)
    }

    pub fn get_total(&self, name: &str) -> Option<Duration> {
        self.timers.get(name).map(|d| d.iter().sum())
    }

    /// 按阶段名排序输出汇总
    pub fn report(&self) {
        let mut items: Vec<_> = self.timers.iter().collect();
        items.sort_by_key(|(name, _)| *name);

        log::info!("📊 阶段耗时汇总");
        for (name, durations) in items {
            let total: Duration = durations.iter().sum();
            log::info!(
                "   {:24} 次数 {:3}  总耗时 {:8.2}秒",
                name,
                durations.len(),
                total.as_secs_f32()
            );
        }
    }
}
