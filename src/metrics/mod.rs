//! Counters describing how much work draw passes did.

use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Per-pass tallies gathered while drawing, folded into [`RenderMetrics`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub computed: u64,
    pub laid_out: u64,
    pub skipped: u64,
}

#[derive(Debug, Default, Clone)]
pub struct RenderMetrics {
    passes: u64,
    nodes_computed: u64,
    nodes_laid_out: u64,
    subtrees_skipped: u64,
    resizes: u64,
    mounts: u64,
    unmounts: u64,
}

impl RenderMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&mut self, stats: PassStats) {
        self.passes = self.passes.saturating_add(1);
        self.nodes_computed = self.nodes_computed.saturating_add(stats.computed);
        self.nodes_laid_out = self.nodes_laid_out.saturating_add(stats.laid_out);
        self.subtrees_skipped = self.subtrees_skipped.saturating_add(stats.skipped);
    }

    pub fn record_resize(&mut self) {
        self.resizes = self.resizes.saturating_add(1);
    }

    pub fn record_mounts(&mut self, count: usize) {
        self.mounts = self.mounts.saturating_add(count as u64);
    }

    pub fn record_unmounts(&mut self, count: usize) {
        self.unmounts = self.unmounts.saturating_add(count as u64);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            passes: self.passes,
            nodes_computed: self.nodes_computed,
            nodes_laid_out: self.nodes_laid_out,
            subtrees_skipped: self.subtrees_skipped,
            resizes: self.resizes,
            mounts: self.mounts,
            unmounts: self.unmounts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub passes: u64,
    pub nodes_computed: u64,
    pub nodes_laid_out: u64,
    pub subtrees_skipped: u64,
    pub resizes: u64,
    pub mounts: u64,
    pub unmounts: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "render_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("passes".to_string(), json!(self.passes));
        map.insert("nodes_computed".to_string(), json!(self.nodes_computed));
        map.insert("nodes_laid_out".to_string(), json!(self.nodes_laid_out));
        map.insert("subtrees_skipped".to_string(), json!(self.subtrees_skipped));
        map.insert("resizes".to_string(), json!(self.resizes));
        map.insert("mounts".to_string(), json!(self.mounts));
        map.insert("unmounts".to_string(), json!(self.unmounts));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_accumulate() {
        let mut metrics = RenderMetrics::new();
        metrics.record_pass(PassStats {
            computed: 3,
            laid_out: 3,
            skipped: 0,
        });
        metrics.record_pass(PassStats {
            computed: 1,
            laid_out: 1,
            skipped: 2,
        });
        metrics.record_mounts(4);

        let snapshot = metrics.snapshot(Duration::from_millis(5));
        assert_eq!(snapshot.passes, 2);
        assert_eq!(snapshot.nodes_computed, 4);
        assert_eq!(snapshot.subtrees_skipped, 2);
        assert_eq!(snapshot.mounts, 4);
        assert_eq!(snapshot.uptime_ms, 5);
    }

    #[test]
    fn snapshot_becomes_event() {
        let snapshot = RenderMetrics::new().snapshot(Duration::ZERO);
        let event = snapshot.to_log_event("room::layout");
        assert_eq!(event.message, "render_metrics");
        assert_eq!(event.fields.get("passes"), Some(&json!(0)));
    }
}
