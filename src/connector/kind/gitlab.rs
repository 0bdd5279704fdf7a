// self
use crate::_prelude::*;

/// GitLab upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitlabConfig {
	/// GitLab instance URL; the broker defaults to gitlab.com when empty.
	#[serde(rename = "baseURL", skip_serializing_if = "String::is_empty")]
	pub base_url: String,
	/// Application client identifier.
	#[serde(rename = "clientID")]
	pub client_id: String,
	/// Application secret.
	pub client_secret: String,
	/// Callback URL registered with the application.
	#[serde(rename = "redirectURI")]
	pub redirect_uri: String,
	/// Groups allowed to log in.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub groups: Vec<String>,
	/// Uses the username instead of the numeric id as the user identifier.
	#[serde(rename = "useLoginAsID")]
	pub use_login_as_id: bool,
}
