use std::collections::HashMap;

use crate::core::ScalePoint;
use crate::error::WidgetError;

/// Bounds of a scale widget, taken from its first and last points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleBounds {
    pub min: ScalePoint,
    pub max: ScalePoint,
}

/// Batch-scoped context shared by the transformers of one aggregation run.
///
/// Holds lazily memoized per-widget metadata (keyed by widget key) and the
/// non-fatal notices raised while processing the current attribute. A fresh
/// state is created for every batch; it is never shared between batches.
#[derive(Debug, Default)]
pub struct ComprehensiveViewState {
    scale_bounds: HashMap<String, ScaleBounds>,
    notices: Vec<WidgetError>,
}

impl ComprehensiveViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds for a scale widget, computed from `points` on first access and
    /// reused afterwards. `None` when the widget has no points.
    pub fn scale_bounds(&mut self, widget_key: &str, points: &[ScalePoint]) -> Option<&ScaleBounds> {
        if !self.scale_bounds.contains_key(widget_key) {
            let bounds = ScaleBounds {
                min: points.first()?.clone(),
                max: points.last()?.clone(),
            };
            self.scale_bounds.insert(widget_key.to_string(), bounds);
        }
        self.scale_bounds.get(widget_key)
    }

    /// Record a non-fatal problem for the attribute being processed.
    pub fn notice(&mut self, notice: WidgetError) {
        self.notices.push(notice);
    }

    pub fn take_notices(&mut self) -> Vec<WidgetError> {
        std::mem::take(&mut self.notices)
    }

    pub fn cached_widgets(&self) -> usize {
        self.scale_bounds.len()
    }
}
