//! Pure conversation logic for the HAL terminal.
//!
//! This crate contains everything the agent decides, independent of any
//! window, renderer, or clock. Functions take plain data (and an injected
//! random source where a choice is made) and return results, so the whole
//! conversation can be replayed deterministically in tests and driven by
//! any host that implements [`terminal::Terminal`].
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`agent`] | Agent state, input/command routing, greeting rotation |
//! | [`commands`] | Classifies command text (`quit`, `relocate ...`) |
//! | [`config`] | Agent configuration and validation |
//! | [`greetings`] | Cyclic greeting rotation |
//! | [`life_support`] | Oxygen depletion and severity banding |
//! | [`palette`] | Display colours used by the core |
//! | [`reflections`] | Pronoun substitution for captured text |
//! | [`responder`] | Ordered first-match response engine |
//! | [`rules`] | Rule set loading and load-time validation |
//! | [`session`] | Event routing and tick scheduling over a terminal |
//! | [`terminal`] | Terminal collaborator trait and reply types |

pub mod agent;
pub mod commands;
pub mod config;
pub mod greetings;
pub mod life_support;
pub mod palette;
pub mod reflections;
pub mod responder;
pub mod rules;
pub mod session;
pub mod terminal;
