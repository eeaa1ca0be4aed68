//! Access control module
//!
//! Decides whether an authenticated user may reach a request path.
//!
//! ## Access Control Model
//!
//! Users are organised into groups. Each group lists its members and the
//! path patterns they may request. A request is allowed when:
//!
//! 1. the username is on the global whitelist (any path), or
//! 2. any group the user belongs to has a pattern matching the path.
//!
//! Groups are evaluated independently; membership in one group never
//! restricts what another group grants. Patterns are regular expressions
//! anchored at the start of the path and open at the end.
//!
//! ## Example Rules
//!
//! ```json
//! {"groups": [
//!     {"name": "docs", "paths": ["/docs", "/wiki"], "usernames": ["alice@example.com"]},
//!     {"name": "ops", "paths": ["/metrics"], "usernames": ["alice@example.com", "bob@example.com"]}
//! ]}
//! ```

pub mod decision;
pub mod patterns;
pub mod validator;
pub mod whitelist;

pub use decision::{AccessDecision, PathAuthorizer};
pub use patterns::PrefixPatternMatcher;
pub use validator::{CompositePathValidator, GroupPathValidator, PathValidator};
pub use whitelist::{NoWhitelist, SharedWhitelist, StaticWhitelist, UsernameWhitelist};
