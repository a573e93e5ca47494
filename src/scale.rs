//! Display scale quantized to integer tenths
//!
//! Hyprland accepts fractional scales like 1.5 or 2.4. Carrying those around
//! as floats leaks representability noise (2.1999999) into generated config
//! text, so the scale is held as an integer count of tenths and only rendered
//! to a float for display math. The tenths value is authoritative everywhere.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::constants::scale::{MAX_TENTHS, MIN_TENTHS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaleTenths(i32);

impl ScaleTenths {
    /// Construct from a tenths count, rejecting values outside 0.5x-5.0x.
    pub fn new(tenths: i32) -> Result<Self> {
        if !(MIN_TENTHS..=MAX_TENTHS).contains(&tenths) {
            bail!(
                "scale {}.{} is outside the supported range {}-{}",
                tenths / 10,
                (tenths % 10).abs(),
                MIN_TENTHS as f64 / 10.0,
                MAX_TENTHS as f64 / 10.0,
            );
        }
        Ok(Self(tenths))
    }

    /// Quantize a reported float scale to the nearest tenth.
    pub fn from_float(scale: f64) -> Result<Self> {
        Self::new((scale * 10.0).round() as i32)
    }

    /// Step by `delta` tenths, saturating at the supported bounds.
    pub fn step(self, delta: i32) -> Self {
        Self((self.0 + delta).clamp(MIN_TENTHS, MAX_TENTHS))
    }

    pub fn tenths(self) -> i32 {
        self.0
    }

    /// Whether the scale is a whole multiple (1x, 2x, ...).
    pub fn is_whole(self) -> bool {
        self.0 % 10 == 0
    }

    /// Float view, for proportional drawing only. Never written to config.
    pub fn as_float(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl fmt::Display for ScaleTenths {
    /// Renders "2" for whole scales, "2.4" otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.0 / 10)
        } else {
            write!(f, "{}.{}", self.0 / 10, self.0 % 10)
        }
    }
}

impl FromStr for ScaleTenths {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let tenths = match s.split_once('.') {
            Some((whole, frac)) => {
                if frac.len() != 1 {
                    bail!("scale '{s}' has more than one decimal digit");
                }
                let whole: i32 = whole.parse().context(format!("invalid scale '{s}'"))?;
                let frac: i32 = frac.parse().context(format!("invalid scale '{s}'"))?;
                whole * 10 + frac
            }
            None => s.parse::<i32>().context(format!("invalid scale '{s}'"))? * 10,
        };
        Self::new(tenths)
    }
}
