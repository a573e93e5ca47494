//! Monitor snapshot from the running compositor
//!
//! Queries `hyprctl monitors all -j` once per session. The `all` variant
//! includes disabled outputs, which is where the monitor being placed
//! normally lives.

use std::process::Command;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::monitor::MonitorAttributes;
use crate::scale::ScaleTenths;

/// Subset of the hyprctl monitor record this tool needs.
#[derive(Debug, Deserialize)]
struct HyprMonitor {
    name: String,
    width: i32,
    height: i32,
    #[serde(rename = "refreshRate")]
    refresh_rate: f64,
    scale: f64,
    x: i32,
    y: i32,
    #[serde(default)]
    disabled: bool,
}

impl HyprMonitor {
    fn into_attributes(self) -> Result<MonitorAttributes> {
        let scale = ScaleTenths::from_float(self.scale).context(format!(
            "monitor '{}' reports unsupported scale {}",
            self.name, self.scale
        ))?;
        MonitorAttributes::new(
            self.name,
            self.width,
            self.height,
            self.refresh_rate.round() as i32,
            scale,
            self.x,
            self.y,
            !self.disabled,
        )
    }
}

/// One blocking query for all connected outputs.
pub fn query_monitors() -> Result<Vec<MonitorAttributes>> {
    let output = Command::new("hyprctl")
        .args(["monitors", "all", "-j"])
        .output()
        .context("Failed to run hyprctl - is Hyprland running?")?;

    if !output.status.success() {
        bail!(
            "hyprctl monitors failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let records: Vec<HyprMonitor> = serde_json::from_slice(&output.stdout)
        .context("Failed to parse hyprctl monitors output")?;
    debug!(count = records.len(), "Queried monitor snapshot");

    records
        .into_iter()
        .map(HyprMonitor::into_attributes)
        .collect()
}
