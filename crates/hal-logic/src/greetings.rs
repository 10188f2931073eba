//! Cyclic greeting rotation.
//!
//! Each call hands out the current greeting and moves on to the next,
//! wrapping around at the end of the list.

/// Greetings the agent opens with.
pub const DEFAULT_GREETINGS: &[&str] = &[
    "Morning, buddy! This is HAL.",
    "Hi, I am HAL.",
    "Greetings. You can call me HAL.",
];

#[derive(Debug, Clone)]
pub struct GreetingRotation {
    greetings: Vec<String>,
    index: usize,
}

impl GreetingRotation {
    /// Returns `None` for an empty list; a rotation always has something
    /// to say.
    pub fn new(greetings: Vec<String>) -> Option<Self> {
        if greetings.is_empty() {
            return None;
        }
        Some(Self {
            greetings,
            index: 0,
        })
    }

    /// Current greeting; advances the index modulo the list length.
    pub fn next_greeting(&mut self) -> String {
        let greeting = self.greetings[self.index].clone();
        self.index = (self.index + 1) % self.greetings.len();
        greeting
    }

    /// Index of the greeting the next call will return.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.greetings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.greetings.is_empty()
    }
}

impl Default for GreetingRotation {
    fn default() -> Self {
        Self {
            greetings: DEFAULT_GREETINGS.iter().map(|g| g.to_string()).collect(),
            index: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_wraps() {
        let mut g = GreetingRotation::default();
        assert_eq!(g.next_greeting(), "Morning, buddy! This is HAL.");
        assert_eq!(g.next_greeting(), "Hi, I am HAL.");
        assert_eq!(g.next_greeting(), "Greetings. You can call me HAL.");
        assert_eq!(g.index(), 0);
        assert_eq!(g.next_greeting(), "Morning, buddy! This is HAL.");
    }

    #[test]
    fn test_single_greeting_repeats() {
        let mut g = GreetingRotation::new(vec!["Hello, Dave.".into()]).unwrap();
        for _ in 0..3 {
            assert_eq!(g.next_greeting(), "Hello, Dave.");
            assert_eq!(g.index(), 0);
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert!(GreetingRotation::new(Vec::new()).is_none());
    }
}
