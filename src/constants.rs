//! Application-wide constants
//!
//! Single source of truth for the magic numbers and string literals used
//! throughout the picker.

/// Scale quantization bounds (integer tenths of the display scale)
pub mod scale {
    /// Smallest supported scale: 0.5x
    pub const MIN_TENTHS: i32 = 5;

    /// Largest supported scale: 5.0x
    pub const MAX_TENTHS: i32 = 50;
}

/// Perpendicular-offset step sizes, in logical pixels
pub mod steps {
    /// Coarse step (Shift+arrow); subject to edge snapping
    pub const COARSE_OFFSET: i32 = 40;

    /// Fine step (Ctrl+arrow); never snaps
    pub const FINE_OFFSET: i32 = 5;
}

/// Persisted configuration file constants
pub mod config {
    /// Directory under the user config dir holding the compositor config
    pub const HYPR_DIR: &str = "hypr";

    /// File the chosen layout is merged into
    pub const MONITORS_FILE: &str = "monitors.conf";

    /// Keyword opening a monitor layout line
    pub const DIRECTIVE_KEYWORD: &str = "monitor";
}
