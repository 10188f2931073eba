//! The terminal collaborator.
//!
//! The core never draws anything. It hands finished lines to a
//! [`Terminal`], together with how they should be aligned and coloured,
//! and pushes life-support readings to a separate indicator.

use serde::{Deserialize, Serialize};

/// Horizontal placement of a logged line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
    Center,
}

/// A finished line plus its display intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub align: Align,
    /// Hex colour, e.g. `"#00805A"`.
    pub color: &'static str,
}

impl Reply {
    pub fn new(text: impl Into<String>, align: Align, color: &'static str) -> Self {
        Self {
            text: text.into(),
            align,
            color,
        }
    }
}

/// Outbound calls the core makes on its host.
pub trait Terminal {
    fn log(&mut self, message: &str, align: Align, color: &str);

    fn update_life_support_indicator(&mut self, text: &str, color: &str);

    fn emit(&mut self, reply: &Reply) {
        self.log(&reply.text, reply.align, reply.color);
    }
}

/// Everything a [`Transcript`] saw, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    Line {
        text: String,
        align: Align,
        color: String,
    },
    Indicator {
        text: String,
        color: String,
    },
}

/// A terminal that just records. Handy for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every logged line, indicators excluded.
    pub fn lines(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                TranscriptEntry::Line { text, .. } => Some(text.as_str()),
                TranscriptEntry::Indicator { .. } => None,
            })
            .collect()
    }

    /// Text of every indicator update.
    pub fn indicators(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                TranscriptEntry::Indicator { text, .. } => Some(text.as_str()),
                TranscriptEntry::Line { .. } => None,
            })
            .collect()
    }
}

impl Terminal for Transcript {
    fn log(&mut self, message: &str, align: Align, color: &str) {
        self.entries.push(TranscriptEntry::Line {
            text: message.to_string(),
            align,
            color: color.to_string(),
        });
    }

    fn update_life_support_indicator(&mut self, text: &str, color: &str) {
        self.entries.push(TranscriptEntry::Indicator {
            text: text.to_string(),
            color: color.to_string(),
        });
    }
}
