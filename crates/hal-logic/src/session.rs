//! Event routing and tick scheduling over a terminal.
//!
//! A [`Session`] holds the [`Agent`] and the [`LifeSupport`] model side by
//! side. The host feeds it events in the order they arrive and tells it how
//! much time has passed; the session writes every resulting line to the
//! terminal it is given.
//!
//! Two independent cadences are kept:
//! - **Agent tick** (short interval): [`Agent::on_tick`]
//! - **Life-support tick** (longer interval): [`LifeSupport::update`]
//!
//! ```
//! use hal_logic::config::AgentConfig;
//! use hal_logic::responder::ResponseEngine;
//! use hal_logic::session::{Flow, Session, TerminalEvent};
//! use hal_logic::terminal::Transcript;
//!
//! let mut session = Session::new(&AgentConfig::default(), ResponseEngine::builtin().unwrap()).unwrap();
//! let mut terminal = Transcript::new();
//! session.start(&mut terminal);
//! let flow = session.handle(TerminalEvent::Command("quit".into()), &mut terminal);
//! assert_eq!(flow, Flow::Quit);
//! ```

use crate::agent::Agent;
use crate::commands::CommandOutcome;
use crate::config::{validate_config, AgentConfig, ConfigError};
use crate::life_support::LifeSupport;
use crate::palette;
use crate::responder::ResponseEngine;
use crate::terminal::{Align, Terminal};

/// Inbound events, already classified by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// Conversational text.
    Input(String),
    /// Command text, leading slash stripped.
    Command(String),
}

/// Whether the host should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Session {
    agent: Agent,
    life_support: LifeSupport,
    operator_name: String,
    greet_before_reply: bool,

    // Tick timing, seconds
    agent_interval: f64,
    life_support_interval: f64,
    since_agent_tick: f64,
    since_life_support_tick: f64,
}

impl Session {
    /// Validate `config` and build the agent and life-support model from it.
    pub fn new(config: &AgentConfig, engine: ResponseEngine) -> Result<Self, Vec<ConfigError>> {
        let errors = validate_config(config);
        if !errors.is_empty() {
            return Err(errors);
        }
        let agent = Agent::new(config, engine).map_err(|e| vec![e])?;

        Ok(Self {
            agent,
            life_support: LifeSupport::new(config.initial_oxygen, config.oxygen_per_tick),
            operator_name: config.operator_name.clone(),
            greet_before_reply: config.greet_before_reply,
            agent_interval: config.agent_tick_seconds,
            life_support_interval: config.life_support_tick_seconds,
            since_agent_tick: 0.0,
            since_life_support_tick: 0.0,
        })
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn life_support(&self) -> &LifeSupport {
        &self.life_support
    }

    /// Banner lines and the initial life-support reading.
    pub fn start(&mut self, terminal: &mut impl Terminal) {
        terminal.log(
            &format!("{} started the chat.", self.operator_name),
            Align::Left,
            palette::NEUTRAL,
        );
        terminal.log(
            &format!("{} joined.", self.agent.name()),
            Align::Right,
            palette::NEUTRAL,
        );
        let indicator = self.life_support.indicator();
        terminal.update_life_support_indicator(&indicator.text, palette::NEUTRAL);
    }

    /// Route one event and write its output.
    pub fn handle(&mut self, event: TerminalEvent, terminal: &mut impl Terminal) -> Flow {
        match event {
            TerminalEvent::Input(text) => {
                if self.greet_before_reply {
                    let greeting = self.agent.say_greeting();
                    terminal.emit(&greeting);
                }
                let reply = self.agent.on_input(&text);
                terminal.emit(&reply);
                Flow::Continue
            }
            TerminalEvent::Command(text) => {
                let outcome = self.agent.on_command(&text);
                for reply in self.agent.command_replies(&outcome) {
                    terminal.emit(&reply);
                }
                if outcome == CommandOutcome::Terminate {
                    Flow::Quit
                } else {
                    Flow::Continue
                }
            }
        }
    }

    /// Let `dt` seconds pass, firing every tick that fell due. Non-finite or
    /// negative `dt` is ignored.
    pub fn advance(&mut self, dt: f64, terminal: &mut impl Terminal) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        self.since_agent_tick += dt;
        for _ in 0..due_ticks(&mut self.since_agent_tick, self.agent_interval) {
            self.agent.on_tick();
        }

        self.since_life_support_tick += dt;
        for _ in 0..due_ticks(&mut self.since_life_support_tick, self.life_support_interval) {
            if let Some(indicator) = self.life_support.update() {
                terminal.update_life_support_indicator(&indicator.text, indicator.color);
            }
        }
    }

    /// Seconds until the next tick of either cadence.
    pub fn until_next_tick(&self) -> f64 {
        let agent = self.agent_interval - self.since_agent_tick;
        let life_support = self.life_support_interval - self.since_life_support_tick;
        agent.min(life_support).max(0.0)
    }
}

/// Upper bound on ticks fired by a single `advance` for one cadence.
pub const MAX_CATCH_UP_TICKS: u64 = 10_000;

/// Ticks that fell due in `*since`, leaving only the remainder behind.
/// Capped at [`MAX_CATCH_UP_TICKS`]; the excess is dropped.
pub fn due_ticks(since: &mut f64, interval: f64) -> u64 {
    if !interval.is_finite() || interval <= 0.0 || !since.is_finite() || *since < interval {
        return 0;
    }
    let due = (*since / interval).floor();
    *since %= interval;
    if due > MAX_CATCH_UP_TICKS as f64 {
        log::warn!("{} ticks overdue, firing only {}", due, MAX_CATCH_UP_TICKS);
        MAX_CATCH_UP_TICKS
    } else {
        due as u64
    }
}
