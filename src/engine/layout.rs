//! Lane layout — one horizontal strip per instance.

use log::debug;
use serde::{Deserialize, Serialize};

use super::instance::Instance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneParams {
    pub top_margin: f64,
    pub bottom_margin: f64,
    /// x every instance is reset to on relayout.
    pub start_x: f64,
}

impl Default for LaneParams {
    fn default() -> Self {
        LaneParams {
            top_margin: 60.0,
            bottom_margin: 60.0,
            start_x: 40.0,
        }
    }
}

impl LaneParams {
    /// Top and bottom margins for a canvas `canvas_height` tall. A canvas
    /// too short for the configured margins gives them half its height,
    /// split in the configured proportion.
    pub fn margins(&self, canvas_height: f64) -> (f64, f64) {
        let total = self.top_margin + self.bottom_margin;
        if canvas_height > total || total <= 0.0 {
            return (self.top_margin, self.bottom_margin);
        }
        let k = canvas_height.max(0.0) / 2.0 / total;
        (self.top_margin * k, self.bottom_margin * k)
    }

    /// Height of one lane for `count` instances, or `None` when there is
    /// nothing to lay out.
    pub fn lane_height(&self, count: usize, canvas_height: f64) -> Option<f64> {
        if count == 0 {
            return None;
        }
        let (top, bottom) = self.margins(canvas_height);
        let span = (canvas_height - top - bottom).max(0.0);
        Some(span / count as f64)
    }
}

/// Assign each instance, in order, the vertical center of its lane and move
/// it back to the start column. No-op for an empty slice.
pub fn layout(instances: &mut [Instance], canvas_height: f64, params: &LaneParams) {
    let Some(lane) = params.lane_height(instances.len(), canvas_height) else {
        return;
    };
    let (top, _) = params.margins(canvas_height);
    debug!("layout {} lanes of {lane:.1}px", instances.len());
    for (idx, inst) in instances.iter_mut().enumerate() {
        inst.y = top + lane * idx as f64 + lane / 2.0;
        inst.x = params.start_x;
    }
}
