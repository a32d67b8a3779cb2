use std::sync::{Arc, Mutex};

use crate::logging::{LAYOUT_TARGET, LogLevel, Logger};
use crate::metrics::RenderMetrics;

/// Ambient settings of a [`LayoutTree`](super::LayoutTree).
#[derive(Clone)]
pub struct LayoutConfig {
    pub logger: Option<Logger>,
    /// Events below this level are dropped before reaching the logger.
    pub min_level: LogLevel,
    pub log_target: String,
    pub metrics: Option<Arc<Mutex<RenderMetrics>>>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            logger: None,
            min_level: LogLevel::Debug,
            log_target: LAYOUT_TARGET.to_string(),
            metrics: None,
        }
    }
}

impl LayoutConfig {
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn enable_metrics(&mut self) -> Arc<Mutex<RenderMetrics>> {
        self.metrics
            .get_or_insert_with(|| Arc::new(Mutex::new(RenderMetrics::new())))
            .clone()
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<RenderMetrics>>> {
        self.metrics.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_handle_is_shared() {
        let mut config = LayoutConfig::default();
        assert!(config.metrics_handle().is_none());

        let handle = config.enable_metrics();
        assert!(Arc::ptr_eq(&handle, &config.enable_metrics()));

        config.disable_metrics();
        assert!(config.metrics_handle().is_none());
    }
}
