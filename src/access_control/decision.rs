//! Authorization decisions and the request-level authorizer

use crate::access_control::validator::{CompositePathValidator, PathValidator};
use crate::config::UnmatchedPolicy;
use std::fmt;
use tracing::debug;

/// Result of a path check, with what granted it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision<'a> {
    /// The username is on the global whitelist
    Whitelisted,
    /// A group the user belongs to has a matching pattern
    Granted { group: &'a str, pattern: &'a str },
    /// The user is in no group and unmatched users are let through
    Unrestricted,
    /// Access is denied
    Denied,
}

impl AccessDecision<'_> {
    pub fn is_allowed(&self) -> bool {
        !self.is_denied()
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AccessDecision::Denied)
    }

    /// Short label of what decided, for audit records
    pub fn matched(&self) -> &str {
        match self {
            AccessDecision::Whitelisted => "whitelist",
            AccessDecision::Granted { group, .. } => *group,
            AccessDecision::Unrestricted => "unmatched-policy",
            AccessDecision::Denied => "none",
        }
    }
}

impl fmt::Display for AccessDecision<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessDecision::Whitelisted => write!(f, "allowed by whitelist"),
            AccessDecision::Granted { group, pattern } => {
                write!(f, "allowed by group '{}' pattern '{}'", group, pattern)
            }
            AccessDecision::Unrestricted => write!(f, "allowed, user is in no group"),
            AccessDecision::Denied => write!(f, "denied"),
        }
    }
}

/// Request-level authorizer for the proxy layer
///
/// Adds an explicit policy for users that belong to no group on top of the
/// composite validator, which on its own denies them.
#[derive(Debug)]
pub struct PathAuthorizer {
    validator: CompositePathValidator,
    unmatched: UnmatchedPolicy,
}

impl PathAuthorizer {
    pub fn new(validator: CompositePathValidator, unmatched: UnmatchedPolicy) -> Self {
        Self {
            validator,
            unmatched,
        }
    }

    pub fn validator(&self) -> &CompositePathValidator {
        &self.validator
    }

    pub fn unmatched_policy(&self) -> UnmatchedPolicy {
        self.unmatched
    }

    pub fn requires_validation(&self, username: &str) -> bool {
        self.validator.requires_validation(username)
    }

    /// Decide whether the user may request the path
    pub fn authorize(&self, username: &str, path: &str) -> AccessDecision<'_> {
        let decision = self.validator.check(username, path);
        if decision.is_allowed() || self.validator.requires_validation(username) {
            return decision;
        }

        debug!(username, policy = ?self.unmatched, "User is in no group");
        match self.unmatched {
            UnmatchedPolicy::Deny => AccessDecision::Denied,
            UnmatchedPolicy::Allow => AccessDecision::Unrestricted,
        }
    }
}
