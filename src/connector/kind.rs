//! Built-in typed connector configurations.
//!
//! Field names follow the broker's own configuration schema so decoded payloads round-trip
//! into the rendered document unchanged. Secrets and callback URLs are plain strings: a
//! `{{OIDCIdentityCallbackURL}}` placeholder inside any of them is substituted at render time.

/// GitHub OAuth connector.
pub mod github;
/// GitLab OAuth connector.
pub mod gitlab;
/// Google OIDC connector.
pub mod google;
/// LDAP directory connector.
pub mod ldap;
/// Microsoft (Azure AD) connector.
pub mod microsoft;
/// Generic OpenID Connect connector.
pub mod oidc;

pub use github::*;
pub use gitlab::*;
pub use google::*;
pub use ldap::*;
pub use microsoft::*;
pub use oidc::*;

/// Type tag of [`GithubConfig`].
pub const GITHUB: &str = "github";
/// Type tag of [`GitlabConfig`].
pub const GITLAB: &str = "gitlab";
/// Type tag of [`GoogleConfig`].
pub const GOOGLE: &str = "google";
/// Type tag of [`LdapConfig`].
pub const LDAP: &str = "ldap";
/// Type tag of [`MicrosoftConfig`].
pub const MICROSOFT: &str = "microsoft";
/// Type tag of [`OidcConfig`].
pub const OIDC: &str = "oidc";
