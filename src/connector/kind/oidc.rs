// self
use crate::_prelude::*;

/// Generic OpenID Connect upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OidcConfig {
	/// Upstream issuer used for discovery.
	pub issuer: String,
	/// OAuth2 client identifier registered upstream.
	#[serde(rename = "clientID")]
	pub client_id: String,
	/// OAuth2 client secret registered upstream.
	pub client_secret: String,
	/// Callback URL registered upstream.
	#[serde(rename = "redirectURI")]
	pub redirect_uri: String,
	/// Forces client credentials into the request body instead of basic auth.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub basic_auth_unsupported: Option<bool>,
	/// Restricts logins to these hosted domains.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub hosted_domains: Vec<String>,
	/// Extra CA bundles trusted for the upstream.
	#[serde(rename = "rootCAs", skip_serializing_if = "Vec::is_empty")]
	pub root_cas: Vec<String>,
	/// Disables TLS verification for the upstream.
	pub insecure_skip_verify: bool,
	/// Requested scopes; the broker defaults to `profile` and `email` when empty.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub scopes: Vec<String>,
	/// Accepts unverified email claims.
	pub insecure_skip_email_verified: bool,
	/// Maps the upstream `groups` claim.
	pub insecure_enable_groups: bool,
	/// Queries the userinfo endpoint for additional claims.
	pub get_user_info: bool,
	/// Claim used as the user identifier.
	#[serde(rename = "userIDKey", skip_serializing_if = "Option::is_none")]
	pub user_id_key: Option<String>,
	/// Claim used as the user name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_name_key: Option<String>,
	/// OIDC `prompt` parameter sent upstream.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub prompt_type: Option<String>,
	/// Overrides for non-standard claim names.
	#[serde(skip_serializing_if = "ClaimMapping::is_empty")]
	pub claim_mapping: ClaimMapping,
}

/// Claim name overrides for upstreams that deviate from the standard claims.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimMapping {
	/// Claim holding the preferred user name.
	#[serde(rename = "preferred_username", skip_serializing_if = "Option::is_none")]
	pub preferred_username_key: Option<String>,
	/// Claim holding the email address.
	#[serde(rename = "email", skip_serializing_if = "Option::is_none")]
	pub email_key: Option<String>,
	/// Claim holding group memberships.
	#[serde(rename = "groups", skip_serializing_if = "Option::is_none")]
	pub groups_key: Option<String>,
}
impl ClaimMapping {
	/// Returns true when no claim is remapped.
	pub fn is_empty(&self) -> bool {
		self.preferred_username_key.is_none()
			&& self.email_key.is_none()
			&& self.groups_key.is_none()
	}
}
