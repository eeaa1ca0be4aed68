//! Path authorization for authenticating proxies
//!
//! Decides, per request, whether an already authenticated user may reach a
//! request path.
//!
//! ## Features
//!
//! - **Group rules** - users are grouped, each group lists the path patterns its members may request
//! - **Global whitelist** - an injected predicate exempting usernames from all path rules
//! - **Fail-fast compilation** - one bad pattern rejects the whole rule set
//! - **Lock-free queries** - validators are immutable and shared freely across threads
//!
//! ## Decision Model
//!
//! ```text
//! whitelist → any matching group → deny
//! ```
//!
//! - `requires_validation(user)` is true when the user belongs to any group
//! - `is_valid(user, path)` is true when the user is whitelisted, or any of
//!   their groups has a pattern matching the start of the path
//!
//! ## Example Rules
//!
//! ```json
//! {"groups": [
//!     {"name": "sample1", "paths": ["/a"], "usernames": ["user@sample.com", "user2@sample.com"]},
//!     {"name": "sample2", "paths": ["/b"], "usernames": ["user@sample.com"]}
//! ]}
//! ```

pub mod access_control;
pub mod config;
pub mod error;

// Re-export main types
pub use access_control::{
    AccessDecision, CompositePathValidator, GroupPathValidator, PathAuthorizer, PathValidator,
    SharedWhitelist, UsernameWhitelist,
};
pub use config::{AppConfig, load_config, load_path_validator};
pub use error::{ConfigError, ConfigResult};
