//! Display colours used by the core when emitting lines.
//!
//! Hex strings are handed to the terminal untouched; how they are drawn
//! is the terminal's business.

/// The agent's own voice.
pub const AGENT_VOICE: &str = "#00805A";
/// Location changes and other centered status lines.
pub const STATUS: &str = "#404040";
/// Rejected commands.
pub const ERROR: &str = "#ff3000";
/// Banner lines and the indicator before the first reading.
pub const NEUTRAL: &str = "#808080";

/// Life-support readings at or above the warning threshold.
pub const O2_NORMAL: &str = "#00c070";
/// Life-support readings in the warning band.
pub const O2_WARNING: &str = "#ffaa00";
/// Life-support readings in the critical band.
pub const O2_CRITICAL: &str = "#ff3000";
