//! 性能指标收集模块
//!
//! 提供计算与编辑操作的运行时指标收集和导出功能。
//! 指标只用于观测，引擎逻辑从不读取

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 计算统计
    compute_stats: ComputeStats,
    /// 工作区统计
    workspace_stats: WorkspaceStats,
    /// 启动时间
    start_time: Instant,
}

/// 计算统计
#[derive(Debug)]
struct ComputeStats {
    /// 总计算次数
    total_computations: AtomicU64,
    /// 成功计算次数
    success_computations: AtomicU64,
    /// 失败计算次数
    failed_computations: AtomicU64,
    /// 计算总耗时（微秒）
    total_duration_us: AtomicU64,
    /// 累计增广轮数
    augmentations: AtomicU64,
}

/// 工作区统计
#[derive(Debug)]
struct WorkspaceStats {
    /// 添加的节点数
    nodes_added: AtomicU64,
    /// 添加的边数
    edges_added: AtomicU64,
    /// 加载的会话数
    sessions_loaded: AtomicU64,
    /// 保存的会话数
    sessions_saved: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // 计算指标
    pub total_computations: u64,
    pub success_computations: u64,
    pub failed_computations: u64,
    pub avg_compute_duration_ms: f64,
    pub augmentations: u64,

    // 工作区指标
    pub nodes_added: u64,
    pub edges_added: u64,
    pub sessions_loaded: u64,
    pub sessions_saved: u64,

    // 系统指标
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            compute_stats: ComputeStats {
                total_computations: AtomicU64::new(0),
                success_computations: AtomicU64::new(0),
                failed_computations: AtomicU64::new(0),
                total_duration_us: AtomicU64::new(0),
                augmentations: AtomicU64::new(0),
            },
            workspace_stats: WorkspaceStats {
                nodes_added: AtomicU64::new(0),
                edges_added: AtomicU64::new(0),
                sessions_loaded: AtomicU64::new(0),
                sessions_saved: AtomicU64::new(0),
            },
            start_time: Instant::now(),
        }
    }

    /// 记录计算开始
    pub fn record_compute_start(&self) -> ComputeTimer {
        self.compute_stats
            .total_computations
            .fetch_add(1, Ordering::Relaxed);
        ComputeTimer::new()
    }

    /// 记录计算完成
    pub fn record_compute_complete(&self, timer: ComputeTimer, success: bool) {
        let duration = timer.elapsed();

        if success {
            self.compute_stats
                .success_computations
                .fetch_add(1, Ordering::Relaxed);
        } else {
            self.compute_stats
                .failed_computations
                .fetch_add(1, Ordering::Relaxed);
        }

        self.compute_stats
            .total_duration_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// 记录增广轮数
    pub fn record_augmentations(&self, count: u64) {
        self.compute_stats
            .augmentations
            .fetch_add(count, Ordering::Relaxed);
    }

    /// 记录节点添加
    pub fn record_node_added(&self) {
        self.workspace_stats
            .nodes_added
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录边添加
    pub fn record_edge_added(&self) {
        self.workspace_stats
            .edges_added
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录会话加载
    pub fn record_session_loaded(&self) {
        self.workspace_stats
            .sessions_loaded
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 记录会话保存
    pub fn record_session_saved(&self) {
        self.workspace_stats
            .sessions_saved
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_computations = self
            .compute_stats
            .total_computations
            .load(Ordering::Relaxed);
        let total_duration_us = self.compute_stats.total_duration_us.load(Ordering::Relaxed);

        let avg_compute_duration_ms = if total_computations > 0 {
            (total_duration_us as f64) / (total_computations as f64) / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            total_computations,
            success_computations: self
                .compute_stats
                .success_computations
                .load(Ordering::Relaxed),
            failed_computations: self
                .compute_stats
                .failed_computations
                .load(Ordering::Relaxed),
            avg_compute_duration_ms,
            augmentations: self.compute_stats.augmentations.load(Ordering::Relaxed),
            nodes_added: self.workspace_stats.nodes_added.load(Ordering::Relaxed),
            edges_added: self.workspace_stats.edges_added.load(Ordering::Relaxed),
            sessions_loaded: self
                .workspace_stats
                .sessions_loaded
                .load(Ordering::Relaxed),
            sessions_saved: self.workspace_stats.sessions_saved.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();

        let mut content = String::new();

        content.push_str("# HELP flowgraph_computations_total Total number of max-flow computations\n");
        content.push_str("# TYPE flowgraph_computations_total counter\n");
        content.push_str(&format!(
            "flowgraph_computations_total {}\n",
            snapshot.total_computations
        ));

        content.push_str("# HELP flowgraph_computations_success_total Number of successful computations\n");
        content.push_str("# TYPE flowgraph_computations_success_total counter\n");
        content.push_str(&format!(
            "flowgraph_computations_success_total {}\n",
            snapshot.success_computations
        ));

        content.push_str("# HELP flowgraph_computations_failed_total Number of failed computations\n");
        content.push_str("# TYPE flowgraph_computations_failed_total counter\n");
        content.push_str(&format!(
            "flowgraph_computations_failed_total {}\n",
            snapshot.failed_computations
        ));

        content.push_str("# HELP flowgraph_compute_duration_avg_ms Average computation duration in milliseconds\n");
        content.push_str("# TYPE flowgraph_compute_duration_avg_ms gauge\n");
        content.push_str(&format!(
            "flowgraph_compute_duration_avg_ms {:.2}\n",
            snapshot.avg_compute_duration_ms
        ));

        content.push_str("# HELP flowgraph_augmentations_total Total augmenting-path rounds applied\n");
        content.push_str("# TYPE flowgraph_augmentations_total counter\n");
        content.push_str(&format!(
            "flowgraph_augmentations_total {}\n",
            snapshot.augmentations
        ));

        content.push_str("# HELP flowgraph_nodes_added_total Nodes added in editor workspaces\n");
        content.push_str("# TYPE flowgraph_nodes_added_total counter\n");
        content.push_str(&format!(
            "flowgraph_nodes_added_total {}\n",
            snapshot.nodes_added
        ));

        content.push_str("# HELP flowgraph_edges_added_total Edges added in editor workspaces\n");
        content.push_str("# TYPE flowgraph_edges_added_total counter\n");
        content.push_str(&format!(
            "flowgraph_edges_added_total {}\n",
            snapshot.edges_added
        ));

        content.push_str("# HELP flowgraph_sessions_loaded_total Workspace sessions loaded from disk\n");
        content.push_str("# TYPE flowgraph_sessions_loaded_total counter\n");
        content.push_str(&format!(
            "flowgraph_sessions_loaded_total {}\n",
            snapshot.sessions_loaded
        ));

        content.push_str("# HELP flowgraph_sessions_saved_total Workspace sessions saved to disk\n");
        content.push_str("# TYPE flowgraph_sessions_saved_total counter\n");
        content.push_str(&format!(
            "flowgraph_sessions_saved_total {}\n",
            snapshot.sessions_saved
        ));

        content.push_str("# HELP flowgraph_uptime_seconds Process uptime in seconds\n");
        content.push_str("# TYPE flowgraph_uptime_seconds counter\n");
        content.push_str(&format!(
            "flowgraph_uptime_seconds {}\n",
            snapshot.uptime_seconds
        ));

        PrometheusMetrics { content }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        self.compute_stats
            .total_computations
            .store(0, Ordering::Relaxed);
        self.compute_stats
            .success_computations
            .store(0, Ordering::Relaxed);
        self.compute_stats
            .failed_computations
            .store(0, Ordering::Relaxed);
        self.compute_stats
            .total_duration_us
            .store(0, Ordering::Relaxed);
        self.compute_stats.augmentations.store(0, Ordering::Relaxed);

        self.workspace_stats.nodes_added.store(0, Ordering::Relaxed);
        self.workspace_stats.edges_added.store(0, Ordering::Relaxed);
        self.workspace_stats
            .sessions_loaded
            .store(0, Ordering::Relaxed);
        self.workspace_stats
            .sessions_saved
            .store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 计算计时器
pub struct ComputeTimer {
    start: Instant,
}

impl ComputeTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();

        let timer = metrics.record_compute_start();
        metrics.record_compute_complete(timer, true);
        metrics.record_augmentations(3);
        metrics.record_node_added();
        metrics.record_edge_added();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_computations, 1);
        assert_eq!(snapshot.success_computations, 1);
        assert_eq!(snapshot.failed_computations, 0);
        assert_eq!(snapshot.augmentations, 3);
        assert_eq!(snapshot.nodes_added, 1);
        assert_eq!(snapshot.edges_added, 1);
    }

    #[test]
    fn test_failed_compute_counted() {
        let metrics = Metrics::new();

        let timer = metrics.record_compute_start();
        metrics.record_compute_complete(timer, false);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_computations, 1);
        assert_eq!(snapshot.failed_computations, 1);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        let timer = metrics.record_compute_start();
        metrics.record_compute_complete(timer, true);

        let prom = metrics.to_prometheus();
        assert!(prom.content.contains("flowgraph_computations_total"));
        assert!(prom.content.contains("flowgraph_augmentations_total"));
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_node_added();
        metrics.reset();
        assert_eq!(metrics.snapshot().nodes_added, 0);
    }
}
