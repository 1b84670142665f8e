#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct StageStats {
    pub stage: String,
    pub stage_time: Duration,
    pub memory_usage_mb: u64,
}

/// 記錄每個階段的耗時與記憶體用量
#[cfg(feature = "cli")]
pub struct StageMonitor {
    system: System,
    pid: Option<Pid>,
    run_start: Instant,
    stage_start: Instant,
    peak_memory_mb: u64,
    history: Vec<StageStats>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl StageMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            sysinfo::get_current_pid().ok()
        } else {
            None
        };

        Self {
            system: System::new(),
            pid,
            run_start: Instant::now(),
            stage_start: Instant::now(),
            peak_memory_mb: 0,
            history: Vec::new(),
            enabled,
        }
    }

    pub fn stage_started(&mut self) {
        self.stage_start = Instant::now();
    }

    fn current_memory_mb(&mut self) -> u64 {
        let Some(pid) = self.pid else {
            return 0;
        };
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        self.system
            .process(pid)
            .map(|p| p.memory() / 1024 / 1024)
            .unwrap_or(0)
    }

    pub fn stage_finished(&mut self, stage: &str) {
        if !self.enabled {
            return;
        }

        let memory_mb = self.current_memory_mb();
        self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);

        let stats = StageStats {
            stage: stage.to_string(),
            stage_time: self.stage_start.elapsed(),
            memory_usage_mb: memory_mb,
        };
        tracing::info!(
            "📊 {} - Time: {:?}, Memory: {}MB",
            stats.stage,
            stats.stage_time,
            stats.memory_usage_mb
        );
        self.history.push(stats);
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            "📊 Final Stats - Stages: {}, Total Time: {:?}, Peak Memory: {}MB",
            self.history.len(),
            self.run_start.elapsed(),
            self.peak_memory_mb
        );
    }

    pub fn history(&self) -> &[StageStats] {
        &self.history
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for StageMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 建置時沒有 sysinfo，提供空實現
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct StageMonitor;

#[cfg(not(feature = "cli"))]
impl StageMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn stage_started(&mut self) {}

    pub fn stage_finished(&mut self, _stage: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_records_nothing() {
        let mut monitor = StageMonitor::new(false);
        monitor.stage_started();
        monitor.stage_finished("fetch");
        assert!(!monitor.is_enabled());
        assert!(monitor.history().is_empty());
    }

    #[test]
    fn test_enabled_monitor_keeps_stage_order() {
        let mut monitor = StageMonitor::new(true);
        for stage in ["fetch", "aggregate", "notify"] {
            monitor.stage_started();
            monitor.stage_finished(stage);
        }
        let stages: Vec<&str> = monitor.history().iter().map(|s| s.stage.as_str()).collect();
        assert_eq!(stages, vec!["fetch", "aggregate", "notify"]);
    }
}
