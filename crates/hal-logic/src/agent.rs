//! The agent: state holder and router.
//!
//! Owns the believed location, the greeting rotation, the response engine
//! and the random source used to pick templates. Utterances go to the
//! response engine unless they ask where the agent is; command text goes
//! through [`handle_command`] and its effect is applied here.
//!
//! ```
//! use hal_logic::agent::Agent;
//! use hal_logic::commands::CommandOutcome;
//! use hal_logic::config::AgentConfig;
//! use hal_logic::responder::ResponseEngine;
//!
//! let mut agent = Agent::new(&AgentConfig::default(), ResponseEngine::builtin().unwrap()).unwrap();
//! assert_eq!(agent.on_input("Where am I").text, "You are in the unknown.");
//! agent.on_command("relocate engine room");
//! assert_eq!(agent.on_input("Where am I").text, "You are in the engine room.");
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::commands::{handle_command, CommandOutcome};
use crate::config::{AgentConfig, ConfigError};
use crate::greetings::GreetingRotation;
use crate::palette;
use crate::responder::ResponseEngine;
use crate::terminal::{Align, Reply};

/// Exact, case-sensitive prefix that asks for the agent's location.
pub const WHERE_AM_I: &str = "Where am I";
/// Spoken after any command the agent does not know.
pub const REFUSAL: &str = "I'm afraid I can't do that.";

#[derive(Debug)]
pub struct Agent {
    name: String,
    location: String,
    greetings: GreetingRotation,
    engine: ResponseEngine,
    rng: StdRng,
}

impl Agent {
    pub fn new(config: &AgentConfig, engine: ResponseEngine) -> Result<Self, ConfigError> {
        let greetings =
            GreetingRotation::new(config.greetings.clone()).ok_or(ConfigError::NoGreetings)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            name: config.agent_name.clone(),
            location: config.location.clone(),
            greetings,
            engine,
            rng,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Index of the greeting [`next_greeting`](Self::next_greeting) returns next.
    pub fn greeting_index(&self) -> usize {
        self.greetings.index()
    }

    /// A line in the agent's voice.
    pub fn say(&self, message: impl Into<String>) -> Reply {
        Reply::new(message, Align::Right, palette::AGENT_VOICE)
    }

    pub fn next_greeting(&mut self) -> String {
        self.greetings.next_greeting()
    }

    /// The next greeting, ready to display.
    pub fn say_greeting(&mut self) -> Reply {
        let greeting = self.next_greeting();
        self.say(greeting)
    }

    /// Reply to conversational text.
    pub fn on_input(&mut self, text: &str) -> Reply {
        if text.starts_with(WHERE_AM_I) {
            return self.say(format!("You are in the {}.", self.location));
        }
        let reply = self.engine.respond(text, &mut self.rng);
        self.say(reply)
    }

    /// Classify command text and apply its effect on the agent.
    pub fn on_command(&mut self, text: &str) -> CommandOutcome {
        let outcome = handle_command(text);
        match &outcome {
            CommandOutcome::Terminate => {
                log::info!("Quit requested");
            }
            CommandOutcome::Relocated(location) => {
                log::info!("{} relocated from {:?} to {:?}", self.name, self.location, location);
                self.location = location.clone();
            }
            CommandOutcome::Unknown(command) => {
                log::debug!("Unknown command {:?}", command);
            }
        }
        outcome
    }

    /// Status lines that follow a command.
    pub fn command_replies(&self, outcome: &CommandOutcome) -> Vec<Reply> {
        match outcome {
            CommandOutcome::Terminate => Vec::new(),
            CommandOutcome::Relocated(location) => vec![
                Reply::new("", Align::Center, palette::STATUS),
                Reply::new(
                    format!("Now in the {}.", location),
                    Align::Center,
                    palette::STATUS,
                ),
            ],
            CommandOutcome::Unknown(command) => vec![
                Reply::new(
                    format!("Command `{}` unknown.", command),
                    Align::Left,
                    palette::ERROR,
                ),
                self.say(REFUSAL),
            ],
        }
    }

    /// Periodic agent-side behaviour. Nothing happens here yet.
    pub fn on_tick(&mut self) {}
}
