//! Match constraints for callsigns and aircraft types.
//!
//! Terminals and gates constrain flights through a [`Pattern`], which only
//! promises a `matches(&str) -> bool` capability. Configurations loaded from
//! JSON compile their patterns with `regex`; code building a configuration by
//! hand may plug in any [`Matcher`].

use crate::error::{ConfigError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Anything that can accept or reject a flight attribute.
pub trait Matcher: Send + Sync {
    fn matches(&self, text: &str) -> bool;
}

impl Matcher for Regex {
    fn matches(&self, text: &str) -> bool {
        self.is_match(text)
    }
}

impl<F> Matcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, text: &str) -> bool {
        self(text)
    }
}

/// A shareable match constraint together with the text it was built from.
///
/// Cloning is cheap; duplicated candidates produced by range expansion share
/// the same compiled matcher.
#[derive(Clone)]
pub struct Pattern {
    source: Arc<str>,
    matcher: Arc<dyn Matcher>,
}

impl Pattern {
    /// Wrap an arbitrary matcher. `label` is what gets printed and serialized.
    pub fn new(label: impl Into<String>, matcher: impl Matcher + 'static) -> Self {
        let label: String = label.into();
        Pattern { source: Arc::from(label), matcher: Arc::new(matcher) }
    }

    /// Compile a regular expression.
    pub fn regex(source: &str) -> Result<Self> {
        let re = Regex::new(source).map_err(|e| invalid(source, e))?;
        Ok(Pattern::new(source, re))
    }

    /// Parse a pattern as written in a configuration file.
    ///
    /// Plain strings are regular expressions. A `/body/flags` literal is also
    /// accepted: `i`, `m` and `s` map to the regex flags of the same name,
    /// `g`, `u` and `y` carry no meaning for a single test and are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let Some((body, flags)) = split_literal(text) else {
            return Pattern::regex(text);
        };

        let mut builder = RegexBuilder::new(body);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                _ => &mut builder,
            };
        }
        let re = builder.build().map_err(|e| invalid(text, e))?;
        Ok(Pattern::new(text, re))
    }

    pub fn matches(&self, text: &str) -> bool {
        self.matcher.matches(text)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn invalid(pattern: &str, source: regex::Error) -> ConfigError {
    ConfigError::InvalidPattern { pattern: pattern.to_string(), source }
}

/// Split `/body/flags` into its parts; `None` when `text` is not such a literal.
fn split_literal(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, flags) = (&rest[..close], &rest[close + 1..]);
    if body.is_empty() || !flags.chars().all(|c| "gimsuy".contains(c)) {
        return None;
    }
    Some((body, flags))
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&&*self.source).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Pattern::parse(&text).map_err(serde::de::Error::custom)
    }
}
