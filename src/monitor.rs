//! Monitor attribute records and snapshot lookups

use anyhow::{bail, Result};

use crate::scale::ScaleTenths;

/// One physical output, as reported by the compositor.
///
/// `x`/`y` are the current absolute logical position; they are only
/// meaningful for an enabled monitor. The record is immutable for the anchor;
/// the monitor being placed gets its `scale` swapped in step with the user's
/// adjustment so geometry always sees the chosen value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorAttributes {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub refresh_hz: i32,
    pub scale: ScaleTenths,
    pub x: i32,
    pub y: i32,
    pub enabled: bool,
}

impl MonitorAttributes {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        width: i32,
        height: i32,
        refresh_hz: i32,
        scale: ScaleTenths,
        x: i32,
        y: i32,
        enabled: bool,
    ) -> Result<Self> {
        let name = name.into();
        if width <= 0 || height <= 0 {
            bail!("monitor '{name}' reports invalid mode {width}x{height}");
        }
        if refresh_hz <= 0 {
            bail!("monitor '{name}' reports invalid refresh rate {refresh_hz}");
        }
        Ok(Self {
            name,
            width,
            height,
            refresh_hz,
            scale,
            x,
            y,
            enabled,
        })
    }

    /// Logical size: native resolution divided by scale, truncated toward
    /// zero. Computed as `native * 10 / tenths` so the integer truncation is
    /// exact and matches what the compositor itself does.
    pub fn logical_size(&self) -> (i32, i32) {
        let tenths = self.scale.tenths();
        (self.width * 10 / tenths, self.height * 10 / tenths)
    }

    pub fn logical_width(&self) -> i32 {
        self.logical_size().0
    }

    pub fn logical_height(&self) -> i32 {
        self.logical_size().1
    }
}

/// Look up an output by exact connector name.
pub fn find_monitor<'a>(
    monitors: &'a [MonitorAttributes],
    name: &str,
) -> Option<&'a MonitorAttributes> {
    monitors.iter().find(|m| m.name == name)
}

/// First enabled output other than `exclude` - the placement anchor.
pub fn find_anchor<'a>(
    monitors: &'a [MonitorAttributes],
    exclude: &str,
) -> Option<&'a MonitorAttributes> {
    monitors.iter().find(|m| m.enabled && m.name != exclude)
}
