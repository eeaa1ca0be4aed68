//! Global username whitelist
//!
//! The whitelist is a capability handed to the composite validator. It only
//! answers whether a username is exempt from path restrictions; where the
//! answer comes from is up to the caller.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Answers "is this username globally exempt from path restrictions"
pub trait UsernameWhitelist: Send + Sync {
    fn is_whitelisted(&self, username: &str) -> bool;
}

impl<F> UsernameWhitelist for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_whitelisted(&self, username: &str) -> bool {
        self(username)
    }
}

/// Whitelist that never exempts anyone
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWhitelist;

impl UsernameWhitelist for NoWhitelist {
    fn is_whitelisted(&self, _username: &str) -> bool {
        false
    }
}

/// Fixed set of whitelisted usernames
#[derive(Debug, Clone, Default)]
pub struct StaticWhitelist {
    usernames: HashSet<String>,
}

impl StaticWhitelist {
    pub fn new<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            usernames: usernames.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.usernames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usernames.is_empty()
    }
}

impl UsernameWhitelist for StaticWhitelist {
    fn is_whitelisted(&self, username: &str) -> bool {
        self.usernames.contains(username)
    }
}

/// Shared handle to a whitelist
#[derive(Clone)]
pub struct SharedWhitelist(Arc<dyn UsernameWhitelist>);

impl SharedWhitelist {
    pub fn new(whitelist: impl UsernameWhitelist + 'static) -> Self {
        Self(Arc::new(whitelist))
    }

    pub fn none() -> Self {
        Self::new(NoWhitelist)
    }

    pub fn is_whitelisted(&self, username: &str) -> bool {
        self.0.is_whitelisted(username)
    }
}

impl Default for SharedWhitelist {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for SharedWhitelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedWhitelist(..)")
    }
}
