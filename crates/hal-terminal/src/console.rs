//! ANSI line renderer implementing the terminal collaborator.

use std::io::{self, Write};

use hal_logic::terminal::{Align, Terminal};

/// Writes aligned, coloured lines to any `Write`.
pub struct Console<W: Write> {
    out: W,
    width: usize,
    color: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, width: usize, color: bool) -> Self {
        Self { out, width, color }
    }

    fn write_line(&mut self, text: &str, align: Align, color: &str) {
        let line = pad(text, align, self.width);
        let result = match (self.color, ansi_color(color)) {
            (true, Some(escape)) => writeln!(self.out, "{}{}\x1b[0m", escape, line),
            _ => writeln!(self.out, "{}", line),
        };
        if let Err(e) = result.and_then(|_| self.out.flush()) {
            log::error!("Failed to write to terminal: {}", e);
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Console<io::Stdout> {
    pub fn stdout(width: usize, color: bool) -> Self {
        Self::new(io::stdout(), width, color)
    }
}

impl<W: Write> Terminal for Console<W> {
    fn log(&mut self, message: &str, align: Align, color: &str) {
        self.write_line(message, align, color);
    }

    fn update_life_support_indicator(&mut self, text: &str, color: &str) {
        self.write_line(&format!("[ {} ]", text), Align::Left, color);
    }
}

/// Pad `text` to `width` columns. Lines wider than the terminal are left
/// as they are.
pub fn pad(text: &str, align: Align, width: usize) -> String {
    let len = text.chars().count();
    let spare = width.saturating_sub(len);
    match align {
        Align::Left => text.to_string(),
        Align::Right => format!("{}{}", " ".repeat(spare), text),
        Align::Center => format!("{}{}", " ".repeat(spare / 2), text),
    }
}

/// 24-bit foreground escape for a `#rrggbb` colour.
pub fn ansi_color(hex: &str) -> Option<String> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    Some(format!("\x1b[38;2;{};{};{}m", r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad() {
        assert_eq!(pad("abc", Align::Left, 10), "abc");
        assert_eq!(pad("abc", Align::Right, 10), "       abc");
        assert_eq!(pad("abcd", Align::Center, 10), "   abcd");
        assert_eq!(pad("too long", Align::Right, 4), "too long");
    }

    #[test]
    fn test_ansi_color() {
        assert_eq!(
            ansi_color("#00805A").as_deref(),
            Some("\x1b[38;2;0;128;90m")
        );
        assert_eq!(ansi_color("00805A"), None);
        assert_eq!(ansi_color("#fff"), None);
        assert_eq!(ansi_color("#gg0000"), None);
    }

    #[test]
    fn test_plain_output() {
        let mut console = Console::new(Vec::new(), 12, false);
        console.log("HAL", Align::Right, "#00805A");
        console.update_life_support_indicator("O2: 91%", "#808080");
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out, "         HAL\n[ O2: 91% ]\n");
    }

    #[test]
    fn test_colored_output() {
        let mut console = Console::new(Vec::new(), 3, true);
        console.log("ok", Align::Left, "#ff0000");
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out, "\x1b[38;2;255;0;0mok\x1b[0m\n");
    }
}
