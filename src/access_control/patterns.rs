//! Prefix pattern matching for request paths
//!
//! Each configured pattern is a regular expression anchored at the start of
//! the path and left open at the end, so `/a` matches `/a`, `/a/b/c` and
//! `/a?x=true`.

use crate::error::{ConfigError, ConfigResult};
use regex::Regex;

/// Compiled prefix pattern matcher
#[derive(Debug)]
pub struct PrefixPatternMatcher {
    patterns: Vec<CompiledPattern>,
}

#[derive(Debug)]
struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl PrefixPatternMatcher {
    /// Compile a list of path patterns for the named group.
    ///
    /// Fails on the first pattern that is not a valid regular expression.
    pub fn new(group: &str, patterns: &[String]) -> ConfigResult<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let invalid = |e: regex::Error| ConfigError::InvalidPattern {
                group: group.to_string(),
                pattern: pattern.clone(),
                reason: e.to_string(),
            };

            // The raw pattern must stand on its own, otherwise a stray `)`
            // could close the anchoring group below.
            Regex::new(pattern).map_err(invalid)?;
            let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(invalid)?;

            compiled.push(CompiledPattern {
                source: pattern.clone(),
                regex,
            });
        }

        Ok(Self { patterns: compiled })
    }

    /// Check if a path starts with a match of any pattern
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.regex.is_match(path))
    }

    /// Like [`matches`](Self::matches), returning the first matching pattern
    pub fn find_match(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(path))
            .map(|p| p.source.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}
