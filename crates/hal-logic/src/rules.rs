//! Rule set loading and load-time validation.
//!
//! A rule pairs a regular expression with one or more response templates.
//! Rules are tried in declaration order and the first whose pattern matches
//! the *whole* utterance (case-insensitively) wins. A rule with an empty
//! pattern is the universal fallback: it matches anything and must come
//! last.
//!
//! Templates may reference capture groups as `%1`..`%9`. Every reference is
//! checked against the pattern's group count when the set is built, so a
//! malformed rule fails here and never at response time.
//!
//! ```
//! use hal_logic::rules::RuleSet;
//!
//! let rules = RuleSet::builtin().unwrap();
//! assert!(rules.has_fallback());
//! ```

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rules shipped with the agent.
pub const BUILTIN_RULES_JSON: &str = include_str!("../../../data/hal_rules.json");

/// Serialized form of a rule, as found in rule files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Regular expression over the whole utterance. Empty = fallback.
    pub pattern: String,
    /// Response templates with `%1`..`%9` placeholders.
    pub responses: Vec<String>,
}

impl RuleSpec {
    pub fn new(pattern: &str, responses: &[&str]) -> Self {
        Self {
            pattern: pattern.to_string(),
            responses: responses.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// A piece of a parsed response template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, copied as-is.
    Text(String),
    /// Capture group reference (1-based).
    Group(usize),
}

/// A response template split into literal text and group references.
#[derive(Debug, Clone)]
pub struct Template {
    pub source: String,
    pub segments: Vec<Segment>,
}

impl Template {
    /// Split `source` at every `%1`..`%9`. Any other `%` is literal.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '%' {
                let group = chars.peek().and_then(|d| d.to_digit(10)).filter(|&g| g > 0);
                if let Some(group) = group {
                    chars.next();
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Group(group as usize));
                    continue;
                }
            }
            text.push(c);
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    /// Highest group referenced, 0 when the template has no placeholders.
    pub fn max_group(&self) -> usize {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Group(g) => Some(*g),
                Segment::Text(_) => None,
            })
            .max()
            .unwrap_or(0)
    }
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Pattern as written in the rule file.
    pub pattern: String,
    pub regex: Regex,
    pub templates: Vec<Template>,
}

impl Rule {
    pub fn is_fallback(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Number of capture groups, excluding the implicit whole-match group.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }
}

/// Errors raised while building a rule set.
#[derive(Debug)]
pub enum RuleSetError {
    /// Rule file is not valid JSON or has the wrong shape.
    Parse(serde_json::Error),
    /// Pattern failed to compile.
    InvalidPattern {
        index: usize,
        pattern: String,
        source: regex::Error,
    },
    /// Template references a group the pattern does not have.
    PlaceholderOutOfRange {
        index: usize,
        template: String,
        placeholder: usize,
        groups: usize,
    },
    /// Rule has nothing to say.
    NoTemplates { index: usize },
    /// Fallback rule is followed by rules it would shadow.
    FallbackNotLast { index: usize },
}

impl From<serde_json::Error> for RuleSetError {
    fn from(e: serde_json::Error) -> Self {
        RuleSetError::Parse(e)
    }
}

impl fmt::Display for RuleSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSetError::Parse(e) => write!(f, "Rule file error: {}", e),
            RuleSetError::InvalidPattern {
                index,
                pattern,
                source,
            } => write!(f, "Rule #{} has invalid pattern `{}`: {}", index, pattern, source),
            RuleSetError::PlaceholderOutOfRange {
                index,
                template,
                placeholder,
                groups,
            } => write!(
                f,
                "Rule #{} template `{}` references %{} but the pattern has {} group(s)",
                index, template, placeholder, groups
            ),
            RuleSetError::NoTemplates { index } => {
                write!(f, "Rule #{} has no response templates", index)
            }
            RuleSetError::FallbackNotLast { index } => {
                write!(f, "Rule #{} is a fallback but is not the last rule", index)
            }
        }
    }
}

impl std::error::Error for RuleSetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuleSetError::Parse(e) => Some(e),
            RuleSetError::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Ordered, immutable list of compiled rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile and validate rules in declaration order.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self, RuleSetError> {
        let mut rules = Vec::with_capacity(specs.len());

        for (index, spec) in specs.iter().enumerate() {
            if spec.pattern.is_empty() && index + 1 != specs.len() {
                return Err(RuleSetError::FallbackNotLast { index });
            }
            if spec.responses.is_empty() {
                return Err(RuleSetError::NoTemplates { index });
            }

            let regex = compile_pattern(&spec.pattern).map_err(|source| {
                RuleSetError::InvalidPattern {
                    index,
                    pattern: spec.pattern.clone(),
                    source,
                }
            })?;
            let groups = regex.captures_len() - 1;

            let mut templates = Vec::with_capacity(spec.responses.len());
            for response in &spec.responses {
                let template = Template::parse(response);
                let highest = template.max_group();
                if highest > groups {
                    return Err(RuleSetError::PlaceholderOutOfRange {
                        index,
                        template: response.clone(),
                        placeholder: highest,
                        groups,
                    });
                }
                templates.push(template);
            }

            rules.push(Rule {
                pattern: spec.pattern.clone(),
                regex,
                templates,
            });
        }

        log::debug!("Loaded {} conversation rules", rules.len());
        Ok(Self { rules })
    }

    /// Parse a JSON array of [`RuleSpec`] and compile it.
    pub fn from_json(json: &str) -> Result<Self, RuleSetError> {
        let specs: Vec<RuleSpec> = serde_json::from_str(json)?;
        Self::from_specs(&specs)
    }

    /// The rules shipped in `data/hal_rules.json`.
    pub fn builtin() -> Result<Self, RuleSetError> {
        Self::from_json(BUILTIN_RULES_JSON)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether the last rule catches everything.
    pub fn has_fallback(&self) -> bool {
        self.rules.last().is_some_and(Rule::is_fallback)
    }
}

/// Anchor `pattern` to the whole utterance, case-insensitively.
/// An empty pattern matches any utterance, including multi-line text.
fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    let anchored = if pattern.is_empty() {
        r"^(?s:.*)$".to_string()
    } else {
        format!("^(?:{})$", pattern)
    };
    RegexBuilder::new(&anchored).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_load() {
        let rules = RuleSet::builtin().unwrap();
        assert_eq!(rules.len(), 3);
        assert!(rules.has_fallback());
        assert_eq!(rules.rules()[0].group_count(), 1);
        assert_eq!(rules.rules()[1].group_count(), 1);
        assert_eq!(rules.rules()[2].group_count(), 0);
    }

    #[test]
    fn test_template_parse_segments() {
        let t = Template::parse("Why would you think I am %1?");
        assert_eq!(
            t.segments,
            vec![
                Segment::Text("Why would you think I am ".into()),
                Segment::Group(1),
                Segment::Text("?".into()),
            ]
        );
        assert_eq!(t.max_group(), 1);
    }

    #[test]
    fn test_template_literal_percent() {
        let t = Template::parse("100% sure, %0 and %x");
        assert_eq!(t.segments, vec![Segment::Text("100% sure, %0 and %x".into())]);
        assert_eq!(t.max_group(), 0);
    }

    #[test]
    fn test_template_adjacent_groups() {
        let t = Template::parse("%2%1");
        assert_eq!(t.segments, vec![Segment::Group(2), Segment::Group(1)]);
        assert_eq!(t.max_group(), 2);
    }

    #[test]
    fn test_placeholder_out_of_range_rejected() {
        let specs = vec![RuleSpec::new("Open the (.*)", &["Opening %1 and %2."])];
        match RuleSet::from_specs(&specs) {
            Err(RuleSetError::PlaceholderOutOfRange {
                index,
                placeholder,
                groups,
                ..
            }) => {
                assert_eq!(index, 0);
                assert_eq!(placeholder, 2);
                assert_eq!(groups, 1);
            }
            other => panic!("expected placeholder error, got {:?}", other),
        }
    }

    #[test]
    fn test_placeholder_in_fallback_rejected() {
        let specs = vec![RuleSpec::new("", &["You said %1."])];
        assert!(matches!(
            RuleSet::from_specs(&specs),
            Err(RuleSetError::PlaceholderOutOfRange { groups: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let specs = vec![RuleSpec::new("Are you (", &["Hm."])];
        assert!(matches!(
            RuleSet::from_specs(&specs),
            Err(RuleSetError::InvalidPattern { index: 0, .. })
        ));
    }

    #[test]
    fn test_fallback_must_be_last() {
        let specs = vec![
            RuleSpec::new("", &["Is everything OK?"]),
            RuleSpec::new("Hello", &["Hello."]),
        ];
        assert!(matches!(
            RuleSet::from_specs(&specs),
            Err(RuleSetError::FallbackNotLast { index: 0 })
        ));
    }

    #[test]
    fn test_rule_without_templates_rejected() {
        let specs = vec![RuleSpec::new("Hello", &[])];
        assert!(matches!(
            RuleSet::from_specs(&specs),
            Err(RuleSetError::NoTemplates { index: 0 })
        ));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = RuleSet::from_json("{ not json").unwrap_err();
        assert!(matches!(err, RuleSetError::Parse(_)));
        assert!(err.to_string().starts_with("Rule file error"));
    }

    #[test]
    fn test_patterns_are_whole_match_and_case_insensitive() {
        let rules = RuleSet::from_specs(&[RuleSpec::new("hello", &["Hi."])]).unwrap();
        let re = &rules.rules()[0].regex;
        assert!(re.is_match("HELLO"));
        assert!(!re.is_match("hello there"));
        assert!(!re.is_match("oh hello"));
    }

    #[test]
    fn test_empty_rule_set_has_no_fallback() {
        let rules = RuleSet::from_specs(&[]).unwrap();
        assert!(rules.is_empty());
        assert!(!rules.has_fallback());
    }
}
