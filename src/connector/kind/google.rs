// self
use crate::_prelude::*;

/// Google upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoogleConfig {
	/// OAuth client identifier.
	#[serde(rename = "clientID")]
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: String,
	/// Callback URL registered with the OAuth client.
	#[serde(rename = "redirectURI")]
	pub redirect_uri: String,
	/// Requested scopes.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub scopes: Vec<String>,
	/// Workspace domains allowed to log in.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub hosted_domains: Vec<String>,
	/// Groups allowed to log in; requires directory access.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub groups: Vec<String>,
	/// Service account key used for group lookups.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub service_account_file_path: Option<String>,
	/// Workspace admin impersonated for group lookups.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub admin_email: Option<String>,
}
