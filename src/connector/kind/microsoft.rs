// self
use crate::_prelude::*;

/// Microsoft identity platform upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MicrosoftConfig {
	/// Application (client) identifier.
	#[serde(rename = "clientID")]
	pub client_id: String,
	/// Client secret.
	pub client_secret: String,
	/// Callback URL registered with the application.
	#[serde(rename = "redirectURI")]
	pub redirect_uri: String,
	/// Tenant restriction (`common`, `organizations`, `consumers`, or a tenant id).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tenant: Option<String>,
	/// Only emits security groups.
	pub only_security_groups: bool,
	/// Groups allowed to log in.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub groups: Vec<String>,
	/// Drops groups not listed in [`groups`](Self::groups) instead of rejecting the login.
	pub use_groups_as_whitelist: bool,
	/// Group naming (`name` or `id`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group_name_format: Option<String>,
	/// Lowercases the email claim.
	pub email_to_lowercase: bool,
}
