// self
use crate::_prelude::*;

/// GitHub or GitHub Enterprise upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GithubConfig {
	/// OAuth app client identifier.
	#[serde(rename = "clientID")]
	pub client_id: String,
	/// OAuth app client secret.
	pub client_secret: String,
	/// Callback URL registered with the OAuth app.
	#[serde(rename = "redirectURI")]
	pub redirect_uri: String,
	/// Organizations (and optionally teams) allowed to log in.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub orgs: Vec<GithubOrg>,
	/// Emits every org and team as a group instead of only the allowed ones.
	pub load_all_groups: bool,
	/// Team attribute used as the group name (`name`, `slug`, or `both`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub team_name_field: Option<String>,
	/// Uses the login name instead of the numeric id as the user identifier.
	#[serde(rename = "useLoginAsID")]
	pub use_login_as_id: bool,
	/// GitHub Enterprise host name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub host_name: Option<String>,
	/// CA bundle for GitHub Enterprise.
	#[serde(rename = "rootCA", skip_serializing_if = "Option::is_none")]
	pub root_ca: Option<String>,
}

/// Organization restriction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubOrg {
	/// Organization login.
	pub name: String,
	/// Teams within the organization; empty allows every member.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub teams: Vec<String>,
}
