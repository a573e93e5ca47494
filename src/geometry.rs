//! Placement geometry: absolute coordinates, overlap checks and edge snapping
//!
//! Everything in here is pure integer math over [`MonitorAttributes`] so the
//! picker can recompute the whole arrangement on every key press.

use crate::monitor::MonitorAttributes;

/// Where the new monitor attaches relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativePosition {
    Right,
    Left,
    Below,
    Above,
}

impl RelativePosition {
    /// True for placements along the horizontal axis (offset moves vertically).
    pub fn is_horizontal(self) -> bool {
        matches!(self, RelativePosition::Right | RelativePosition::Left)
    }

    pub fn label(self) -> &'static str {
        match self {
            RelativePosition::Right => "Right",
            RelativePosition::Left => "Left",
            RelativePosition::Below => "Below",
            RelativePosition::Above => "Above",
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            RelativePosition::Right => "\u{2192}",
            RelativePosition::Left => "\u{2190}",
            RelativePosition::Below => "\u{2193}",
            RelativePosition::Above => "\u{2191}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Strict axis-aligned intersection: touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        other.left() < self.right()
            && other.right() > self.left()
            && other.top() < self.bottom()
            && other.bottom() > self.top()
    }
}

/// Logical-space rectangle of a monitor placed at `at`.
pub fn monitor_rect(mon: &MonitorAttributes, at: (i32, i32)) -> Rect {
    let (width, height) = mon.logical_size();
    Rect {
        x: at.0,
        y: at.1,
        width,
        height,
    }
}

/// Absolute position for the new monitor.
///
/// The perpendicular offset shifts the placement orthogonally to the attach
/// direction: vertically for left/right, horizontally for above/below.
pub fn compute_position(
    position: RelativePosition,
    current: &MonitorAttributes,
    new: &MonitorAttributes,
    offset: i32,
) -> (i32, i32) {
    let (cur_w, cur_h) = current.logical_size();
    let (new_w, new_h) = new.logical_size();
    match position {
        RelativePosition::Right => (current.x + cur_w, current.y + offset),
        RelativePosition::Left => (current.x - new_w, current.y + offset),
        RelativePosition::Below => (current.x + offset, current.y + cur_h),
        RelativePosition::Above => (current.x + offset, current.y - new_h),
    }
}

/// Whether the new monitor at `new_pos` would share any area with the anchor.
/// Used as a warning signal only; overlapping placements are never blocked.
pub fn overlaps(current: &MonitorAttributes, new_pos: (i32, i32), new: &MonitorAttributes) -> bool {
    monitor_rect(current, (current.x, current.y)).intersects(&monitor_rect(new, new_pos))
}

/// Perpendicular offsets at which a rendered edge of the new monitor's box
/// lines up with an edge of the anchor's box.
///
/// The preview draws both boxes centered on the placement axis at sizes
/// proportional to their native resolutions, with the new box shifted by the
/// offset in the anchor's scale. Under that convention the aligned offsets
/// depend only on the native extents and the anchor scale: the difference
/// terms align same-side edges, the sum terms align opposite edges.
pub fn snap_candidates(
    position: RelativePosition,
    current: &MonitorAttributes,
    new: &MonitorAttributes,
) -> Vec<i32> {
    let (cur, new) = if position.is_horizontal() {
        (current.height, new.height)
    } else {
        (current.width, new.width)
    };
    let scale = current.scale.as_float();
    let at = |native: i32| (native as f64 / (2.0 * scale)).round() as i32;

    let mut candidates = vec![at(new - cur), at(cur - new), at(new + cur), at(-(new + cur))];
    candidates.sort_unstable();
    candidates.dedup();
    candidates
}

/// Apply one coarse offset step with snapping.
///
/// If any candidate lies strictly past `offset` and at or before the raw
/// stepped value, the result jumps to the nearest such candidate in the
/// direction of motion; otherwise the raw value is used. A candidate equal to
/// the starting offset is never crossed, so a step away from a snapped
/// position always moves.
pub fn step_offset(offset: i32, step: i32, candidates: &[i32]) -> i32 {
    let target = offset + step;
    let crossed = if step > 0 {
        candidates
            .iter()
            .copied()
            .filter(|&c| c > offset && c <= target)
            .min()
    } else if step < 0 {
        candidates
            .iter()
            .copied()
            .filter(|&c| c < offset && c >= target)
            .max()
    } else {
        None
    };
    crossed.unwrap_or(target)
}
