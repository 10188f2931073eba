//! Stdin reader feeding the event loop.
//!
//! Lines are read on their own thread and posted to a single-consumer
//! queue so the main loop can keep ticking while the operator types.

use std::io::BufRead;
use std::sync::mpsc::Sender;
use std::thread;

use hal_logic::session::TerminalEvent;

/// Messages from the reader thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    Event(TerminalEvent),
    /// Input closed; treated like `/quit`.
    Closed,
}

/// `/text` is a command, blank lines are dropped, anything else is
/// conversation.
pub fn classify_line(line: &str) -> Option<TerminalEvent> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        None
    } else if let Some(command) = line.strip_prefix('/') {
        Some(TerminalEvent::Command(command.to_string()))
    } else {
        Some(TerminalEvent::Input(line.to_string()))
    }
}

/// Spawn a thread that reads `reader` line by line until EOF or until the
/// receiving side hangs up.
pub fn spawn_reader<R>(reader: R, tx: Sender<InputMessage>) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::error!("Failed to read input: {}", e);
                    break;
                }
            };
            if let Some(event) = classify_line(&line) {
                if tx.send(InputMessage::Event(event)).is_err() {
                    return;
                }
            }
        }
        let _ = tx.send(InputMessage::Closed);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;

    #[test]
    fn test_classify_line() {
        assert_eq!(
            classify_line("/relocate bridge"),
            Some(TerminalEvent::Command("relocate bridge".into()))
        );
        assert_eq!(
            classify_line("Where am I\r"),
            Some(TerminalEvent::Input("Where am I".into()))
        );
        assert_eq!(classify_line("   "), None);
        assert_eq!(classify_line("/"), Some(TerminalEvent::Command(String::new())));
    }

    #[test]
    fn test_reader_posts_events_then_closes() {
        let (tx, rx) = mpsc::channel();
        let input = Cursor::new("hello\n\n/quit\n");
        spawn_reader(input, tx).join().unwrap();

        let messages: Vec<_> = rx.iter().collect();
        assert_eq!(
            messages,
            vec![
                InputMessage::Event(TerminalEvent::Input("hello".into())),
                InputMessage::Event(TerminalEvent::Command("quit".into())),
                InputMessage::Closed,
            ]
        );
    }
}
