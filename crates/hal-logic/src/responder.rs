//! Ordered first-match response engine.
//!
//! Given an utterance, the engine walks the [`RuleSet`] in declaration
//! order, takes the first rule whose pattern matches the whole utterance,
//! picks one of its templates uniformly at random and fills the `%N`
//! placeholders with the reflected capture groups.
//!
//! Template choice has no memory: the same template may come up twice in a
//! row.
//!
//! ```
//! use hal_logic::responder::ResponseEngine;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let engine = ResponseEngine::builtin().unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let reply = engine.respond("You are scary", &mut rng);
//! assert!(reply == "Yes, I am scary." || reply == "Oh, sooo scary.");
//! ```

use rand::Rng;
use regex::Captures;

use crate::reflections::Reflections;
use crate::rules::{Rule, RuleSet, RuleSetError, Segment, Template};

/// Which rule and template produced a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub rule_index: usize,
    pub template_index: usize,
    pub text: String,
}

/// Turns utterances into replies.
#[derive(Debug, Clone)]
pub struct ResponseEngine {
    rules: RuleSet,
    reflections: Reflections,
}

impl ResponseEngine {
    pub fn new(rules: RuleSet, reflections: Reflections) -> Self {
        if !rules.has_fallback() {
            log::warn!("Rule set has no fallback rule; unmatched input gets an empty reply");
        }
        Self { rules, reflections }
    }

    /// Built-in rules with the default reflection table.
    pub fn builtin() -> Result<Self, RuleSetError> {
        Ok(Self::new(RuleSet::builtin()?, Reflections::default()))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Reply to `utterance`. Empty only when no rule matches, which cannot
    /// happen while the set ends with a fallback rule.
    pub fn respond(&self, utterance: &str, rng: &mut impl Rng) -> String {
        self.respond_detailed(utterance, rng)
            .map(|r| r.text)
            .unwrap_or_default()
    }

    /// Like [`respond`](Self::respond), but reports which rule and template
    /// were used. `None` when nothing matched.
    pub fn respond_detailed(&self, utterance: &str, rng: &mut impl Rng) -> Option<Response> {
        let (rule_index, rule, captures) = self.first_match(utterance)?;

        let template_index = rng.gen_range(0..rule.templates.len());
        let template = &rule.templates[template_index];
        let text = tidy_punctuation(self.expand(template, &captures));

        log::debug!(
            "Utterance {:?} matched rule #{} ({:?}), template #{}",
            utterance,
            rule_index,
            rule.pattern,
            template_index
        );

        Some(Response {
            rule_index,
            template_index,
            text,
        })
    }

    fn first_match<'u>(&self, utterance: &'u str) -> Option<(usize, &Rule, Captures<'u>)> {
        self.rules
            .rules()
            .iter()
            .enumerate()
            .find_map(|(i, rule)| rule.regex.captures(utterance).map(|caps| (i, rule, caps)))
    }

    fn expand(&self, template: &Template, captures: &Captures<'_>) -> String {
        let mut out = String::with_capacity(template.source.len());
        for segment in &template.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Group(g) => {
                    // Optional groups that did not take part expand to nothing.
                    if let Some(m) = captures.get(*g) {
                        out.push_str(&self.reflections.reflect(m.as_str()));
                    }
                }
            }
        }
        out
    }
}

/// Collapse doubled terminal punctuation left by a capture that already
/// ended in punctuation.
pub fn tidy_punctuation(mut reply: String) -> String {
    if reply.ends_with("?.") || reply.ends_with("??") {
        let last = reply.pop();
        reply.pop();
        if let Some(c) = last {
            reply.push(c);
        }
    }
    reply
}
