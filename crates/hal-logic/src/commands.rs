//! Command text classification.
//!
//! The terminal hands over command text with its leading slash already
//! stripped. Only two commands exist: `quit` and `relocate <place>`.
//! Everything else is reported back as unknown; that is an outcome, not an
//! error.

use serde::{Deserialize, Serialize};

/// Literal prefix of the relocate command, trailing space included.
pub const RELOCATE_PREFIX: &str = "relocate ";
pub const QUIT: &str = "quit";

/// What a line of command text asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    /// End the run loop. The core does nothing process-level itself.
    Terminate,
    /// Move the agent; the location is the text after the prefix, verbatim.
    Relocated(String),
    /// Not a command we know, kept for echoing.
    Unknown(String),
}

/// Classify `command_text`. Pure: no state is touched.
pub fn handle_command(command_text: &str) -> CommandOutcome {
    if command_text == QUIT {
        CommandOutcome::Terminate
    } else if let Some(location) = command_text.strip_prefix(RELOCATE_PREFIX) {
        CommandOutcome::Relocated(location.to_string())
    } else {
        CommandOutcome::Unknown(command_text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit() {
        assert_eq!(handle_command("quit"), CommandOutcome::Terminate);
    }

    #[test]
    fn test_quit_is_exact() {
        assert_eq!(
            handle_command("quit now"),
            CommandOutcome::Unknown("quit now".into())
        );
        assert_eq!(handle_command("QUIT"), CommandOutcome::Unknown("QUIT".into()));
        assert_eq!(handle_command(" quit"), CommandOutcome::Unknown(" quit".into()));
    }

    #[test]
    fn test_relocate() {
        assert_eq!(
            handle_command("relocate engine room"),
            CommandOutcome::Relocated("engine room".into())
        );
    }

    #[test]
    fn test_relocate_keeps_remainder_verbatim() {
        assert_eq!(
            handle_command("relocate  pod bay  "),
            CommandOutcome::Relocated(" pod bay  ".into())
        );
        assert_eq!(handle_command("relocate "), CommandOutcome::Relocated(String::new()));
    }

    #[test]
    fn test_relocate_needs_the_space() {
        assert_eq!(
            handle_command("relocate"),
            CommandOutcome::Unknown("relocate".into())
        );
        assert_eq!(
            handle_command("relocated bridge"),
            CommandOutcome::Unknown("relocated bridge".into())
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(handle_command("foobar"), CommandOutcome::Unknown("foobar".into()));
        assert_eq!(handle_command(""), CommandOutcome::Unknown(String::new()));
    }
}
