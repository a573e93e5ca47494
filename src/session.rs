//! Session state for one placement run
//!
//! Owns the anchor and target records plus the user-adjustable parameters.
//! All transitions are pure with respect to the outside world; the only side
//! effects (printing, persisting) happen after the session resolves into a
//! [`Decision`].

use crate::constants::steps;
use crate::directive;
use crate::geometry::{self, RelativePosition};
use crate::monitor::MonitorAttributes;

/// Everything needed to act on a confirmed placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Anchor directive, literal form: `<name>, <body>`
    pub current_line: String,
    /// New monitor directive, literal form
    pub new_line: String,
    /// (connector name, directive body) pairs for the config merge
    pub updates: Vec<(String, String)>,
    /// Single runnable shell line applying both directives, symbolic form
    pub command: String,
}

/// Mutable state driven by the key handler.
pub struct PlacementSession {
    current: MonitorAttributes,
    new_mon: MonitorAttributes,
    position: RelativePosition,
    offset: i32,
}

impl PlacementSession {
    pub fn new(current: MonitorAttributes, new_mon: MonitorAttributes) -> Self {
        Self {
            current,
            new_mon,
            position: RelativePosition::Below,
            offset: 0,
        }
    }

    pub fn current(&self) -> &MonitorAttributes {
        &self.current
    }

    pub fn new_monitor(&self) -> &MonitorAttributes {
        &self.new_mon
    }

    pub fn position(&self) -> RelativePosition {
        self.position
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Switch the attach direction. The offset axis flips meaning with the
    /// direction, so any accumulated offset is discarded.
    pub fn set_position(&mut self, position: RelativePosition) {
        if self.position != position {
            self.position = position;
            self.offset = 0;
        }
    }

    /// Nudge the perpendicular offset one step in `sign` direction. Coarse
    /// steps snap to edge-alignment candidates; fine steps never snap.
    pub fn nudge_offset(&mut self, sign: i32, fine: bool) {
        if fine {
            self.offset += sign * steps::FINE_OFFSET;
        } else {
            let candidates = geometry::snap_candidates(self.position, &self.current, &self.new_mon);
            self.offset =
                geometry::step_offset(self.offset, sign * steps::COARSE_OFFSET, &candidates);
        }
    }

    /// Adjust the new monitor's scale by `delta` tenths. The record's scale
    /// field tracks the adjustment so geometry always sees the chosen value.
    pub fn adjust_scale(&mut self, delta: i32) {
        self.new_mon.scale = self.new_mon.scale.step(delta);
    }

    /// Absolute logical position of the new monitor for the current state.
    pub fn placement(&self) -> (i32, i32) {
        geometry::compute_position(self.position, &self.current, &self.new_mon, self.offset)
    }

    /// Warning signal: would the chosen placement share area with the anchor?
    pub fn overlaps_anchor(&self) -> bool {
        geometry::overlaps(&self.current, self.placement(), &self.new_mon)
    }

    /// Freeze the current state into directives and the replayable command.
    pub fn decide(&self) -> Decision {
        let (x, y) = self.placement();
        let current_body = directive::literal_body(&self.current, self.current.x, self.current.y);
        let new_body = directive::literal_body(&self.new_mon, x, y);
        let symbolic_body =
            directive::symbolic_body(self.position, &self.current, &self.new_mon, self.offset);

        let command = format!(
            "{} && {}",
            directive::keyword_command(&self.current.name, &current_body),
            directive::keyword_command(&self.new_mon.name, &symbolic_body),
        );

        Decision {
            current_line: directive::directive_line(&self.current.name, &current_body),
            new_line: directive::directive_line(&self.new_mon.name, &new_body),
            updates: vec![
                (self.current.name.clone(), current_body),
                (self.new_mon.name.clone(), new_body),
            ],
            command,
        }
    }
}
