//! Group and composite path validators
//!
//! A [`GroupPathValidator`] owns one group's members and allowed path
//! patterns. A [`CompositePathValidator`] ORs any number of validators
//! together with the global username whitelist. Both are immutable once
//! built and safe to share between request handlers.

use crate::access_control::decision::AccessDecision;
use crate::access_control::patterns::PrefixPatternMatcher;
use crate::access_control::whitelist::SharedWhitelist;
use crate::config::{GroupConfig, PathRulesConfig};
use crate::error::ConfigResult;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, trace, warn};

/// Something that can gate a user's request paths
pub trait PathValidator: Send + Sync + fmt::Debug {
    /// Whether the username is subject to this validator's path rules
    fn requires_validation(&self, username: &str) -> bool;

    /// Decide on a path, reporting what granted it
    fn check(&self, username: &str, path: &str) -> AccessDecision<'_>;

    /// Whether the username may request the path
    fn is_valid(&self, username: &str, path: &str) -> bool {
        self.check(username, path).is_allowed()
    }
}

/// Validator for a single group
pub struct GroupPathValidator {
    name: String,
    usernames: HashSet<String>,
    allowed_paths: PrefixPatternMatcher,
}

impl GroupPathValidator {
    /// Build a validator from a group's members and path patterns
    pub fn new(
        name: impl Into<String>,
        usernames: &[String],
        allowed_paths: &[String],
    ) -> ConfigResult<Self> {
        let name = name.into();
        let allowed_paths = PrefixPatternMatcher::new(&name, allowed_paths)?;

        Ok(Self {
            name,
            usernames: usernames.iter().cloned().collect(),
            allowed_paths,
        })
    }

    pub fn from_config(group: &GroupConfig) -> ConfigResult<Self> {
        Self::new(&group.name, &group.usernames, &group.paths)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member_count(&self) -> usize {
        self.usernames.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.allowed_paths.len()
    }
}

impl PathValidator for GroupPathValidator {
    fn requires_validation(&self, username: &str) -> bool {
        self.usernames.contains(username)
    }

    fn check(&self, username: &str, path: &str) -> AccessDecision<'_> {
        if !self.usernames.contains(username) {
            return AccessDecision::Denied;
        }

        match self.allowed_paths.find_match(path) {
            Some(pattern) => {
                trace!(group = %self.name, pattern, path, "Matched group path pattern");
                AccessDecision::Granted {
                    group: &self.name,
                    pattern,
                }
            }
            None => AccessDecision::Denied,
        }
    }

    fn is_valid(&self, username: &str, path: &str) -> bool {
        self.usernames.contains(username) && self.allowed_paths.matches(path)
    }
}

impl fmt::Debug for GroupPathValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupPathValidator")
            .field("name", &self.name)
            .field("members", &self.usernames.len())
            .field("allowed_paths", &self.allowed_paths)
            .finish()
    }
}

/// Validator combining the global whitelist with any number of validators
#[derive(Debug)]
pub struct CompositePathValidator {
    whitelist: SharedWhitelist,
    validators: Vec<Box<dyn PathValidator>>,
}

impl CompositePathValidator {
    pub fn new(whitelist: SharedWhitelist, validators: Vec<Box<dyn PathValidator>>) -> Self {
        Self {
            whitelist,
            validators,
        }
    }

    /// A validator with no groups, deferring entirely to the whitelist
    pub fn empty(whitelist: SharedWhitelist) -> Self {
        Self::new(whitelist, Vec::new())
    }

    /// Compile declared groups into a validator.
    ///
    /// A single bad pattern anywhere fails the whole build.
    pub fn from_config(
        config: &PathRulesConfig,
        whitelist: SharedWhitelist,
    ) -> ConfigResult<Self> {
        let mut validators: Vec<Box<dyn PathValidator>> = Vec::with_capacity(config.groups.len());
        let mut pattern_count = 0;

        for group in &config.groups {
            let validator = GroupPathValidator::from_config(group)?;
            if validator.allowed_paths.is_empty() {
                warn!(
                    group = %group.name,
                    "Group has no path patterns, its members are denied every path"
                );
            }
            pattern_count += validator.pattern_count();
            validators.push(Box::new(validator));
        }

        info!(
            groups = validators.len(),
            patterns = pattern_count,
            "Compiled path rules"
        );

        Ok(Self::new(whitelist, validators))
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn is_whitelisted(&self, username: &str) -> bool {
        self.whitelist.is_whitelisted(username)
    }
}

impl PathValidator for CompositePathValidator {
    // Group membership only, whitelist status has no bearing here
    fn requires_validation(&self, username: &str) -> bool {
        self.validators
            .iter()
            .any(|v| v.requires_validation(username))
    }

    fn check(&self, username: &str, path: &str) -> AccessDecision<'_> {
        let decision = if self.whitelist.is_whitelisted(username) {
            AccessDecision::Whitelisted
        } else {
            self.validators
                .iter()
                .map(|v| v.check(username, path))
                .find(|d| d.is_allowed())
                .unwrap_or(AccessDecision::Denied)
        };

        debug!(
            target: "pathgate::audit",
            username,
            path,
            matched = decision.matched(),
            allowed = decision.is_allowed(),
            "Path check"
        );

        decision
    }
}
