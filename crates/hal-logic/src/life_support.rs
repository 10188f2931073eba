//! Life-support oxygen model.
//!
//! A single ship-wide oxygen level that only ever goes down. Each
//! life-support tick consumes a fixed amount; the level saturates at zero
//! and stays there. The level maps onto three severity bands, and every
//! change produces a fresh indicator line for the terminal.
//!
//! The model keeps no clock of its own. Something outside calls
//! [`LifeSupport::update`] on its own schedule.
//!
//! ```
//! use hal_logic::life_support::{LifeSupport, Severity};
//!
//! let mut ls = LifeSupport::new(41, 1);
//! assert_eq!(ls.consume_oxygen(2), (39, Severity::Warning));
//! assert_eq!(ls.indicator().text, "O2: 39%");
//! ```

use serde::{Deserialize, Serialize};

use crate::palette;

/// Thresholds and defaults for the oxygen model.
pub mod o2_constants {
    /// Full tanks.
    pub const MAX_LEVEL: u32 = 100;
    /// Level the ship starts at.
    pub const INITIAL_LEVEL: u32 = 91;
    /// Lowest level still reported as Normal.
    pub const WARNING_BELOW: u32 = 40;
    /// Lowest level still reported as Warning.
    pub const CRITICAL_BELOW: u32 = 20;
    /// Oxygen consumed per life-support tick.
    pub const CONSUMPTION_PER_TICK: u32 = 1;
}

/// Oxygen severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// 40% and above.
    Normal,
    /// 20% up to 39%.
    Warning,
    /// Below 20%, including empty tanks.
    Critical,
}

impl Severity {
    /// Band for an oxygen level. Each band includes its lower bound.
    pub fn from_level(level: u32) -> Self {
        use o2_constants::*;

        if level >= WARNING_BELOW {
            Severity::Normal
        } else if level >= CRITICAL_BELOW {
            Severity::Warning
        } else {
            Severity::Critical
        }
    }

    /// Display colour for the indicator.
    pub fn color(self) -> &'static str {
        match self {
            Severity::Normal => palette::O2_NORMAL,
            Severity::Warning => palette::O2_WARNING,
            Severity::Critical => palette::O2_CRITICAL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

/// Rendered life-support indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub text: String,
    pub color: &'static str,
}

/// Render the indicator for a reading. Pure; never cached.
pub fn render_indicator(level: u32, severity: Severity) -> Indicator {
    Indicator {
        text: format!("O2: {:02}%", level),
        color: severity.color(),
    }
}

/// Ship-wide oxygen supply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeSupport {
    level: u32,
    consumption_per_tick: u32,
}

impl Default for LifeSupport {
    fn default() -> Self {
        Self::new(
            o2_constants::INITIAL_LEVEL,
            o2_constants::CONSUMPTION_PER_TICK,
        )
    }
}

impl LifeSupport {
    /// Start at `level`, clamped to 100.
    pub fn new(level: u32, consumption_per_tick: u32) -> Self {
        Self {
            level: level.min(o2_constants::MAX_LEVEL),
            consumption_per_tick,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn severity(&self) -> Severity {
        Severity::from_level(self.level)
    }

    pub fn consumption_per_tick(&self) -> u32 {
        self.consumption_per_tick
    }

    /// Remove `amount` units, floored at zero. A no-op once empty.
    pub fn consume_oxygen(&mut self, amount: u32) -> (u32, Severity) {
        let before = self.severity();
        self.level = self.level.saturating_sub(amount);
        let after = self.severity();

        if after > before {
            log::warn!(
                "Life support now {} at {}% oxygen",
                after.label(),
                self.level
            );
        }
        (self.level, after)
    }

    /// One scheduled tick. Returns the new indicator when the level moved,
    /// `None` when the tanks were already empty.
    pub fn update(&mut self) -> Option<Indicator> {
        let before = self.level;
        let (level, severity) = self.consume_oxygen(self.consumption_per_tick);
        (level != before).then(|| render_indicator(level, severity))
    }

    /// Indicator for the current reading.
    pub fn indicator(&self) -> Indicator {
        render_indicator(self.level, self.severity())
    }
}
