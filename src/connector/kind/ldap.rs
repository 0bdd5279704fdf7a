// self
use crate::_prelude::*;

/// LDAP directory upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LdapConfig {
	/// Directory host with optional port.
	pub host: String,
	/// Connects without TLS.
	#[serde(rename = "insecureNoSSL")]
	pub insecure_no_ssl: bool,
	/// Disables TLS verification.
	pub insecure_skip_verify: bool,
	/// Upgrades a plain connection with StartTLS.
	#[serde(rename = "startTLS")]
	pub start_tls: bool,
	/// Path to a trusted CA bundle.
	#[serde(rename = "rootCA", skip_serializing_if = "Option::is_none")]
	pub root_ca: Option<String>,
	/// Inline base64 CA bundle.
	#[serde(rename = "rootCAData", skip_serializing_if = "Option::is_none")]
	pub root_ca_data: Option<String>,
	/// Service account DN used for searches.
	#[serde(rename = "bindDN", skip_serializing_if = "Option::is_none")]
	pub bind_dn: Option<String>,
	/// Service account password.
	#[serde(rename = "bindPW", skip_serializing_if = "Option::is_none")]
	pub bind_pw: Option<String>,
	/// Label shown for the username field.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username_prompt: Option<String>,
	/// How users are located.
	pub user_search: UserSearch,
	/// How group memberships are located.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group_search: Option<GroupSearch>,
}

/// User lookup settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserSearch {
	/// Search base.
	#[serde(rename = "baseDN")]
	pub base_dn: String,
	/// Additional LDAP filter.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub filter: String,
	/// Attribute matched against the entered username.
	pub username: String,
	/// Search scope (`sub` or `one`).
	#[serde(skip_serializing_if = "String::is_empty")]
	pub scope: String,
	/// Attribute used as the user identifier.
	pub id_attr: String,
	/// Attribute holding the email address.
	pub email_attr: String,
	/// Attribute holding the display name.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub name_attr: String,
	/// Attribute holding the preferred username.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub preferred_username_attr: String,
}

/// Group lookup settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupSearch {
	/// Search base.
	#[serde(rename = "baseDN")]
	pub base_dn: String,
	/// Additional LDAP filter.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub filter: String,
	/// Search scope (`sub` or `one`).
	#[serde(skip_serializing_if = "String::is_empty")]
	pub scope: String,
	/// Pairs of user and group attributes that express membership.
	pub user_matchers: Vec<UserMatcher>,
	/// Attribute holding the group name.
	pub name_attr: String,
}

/// Membership relation between a user and a group attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserMatcher {
	/// Attribute on the user entry.
	pub user_attr: String,
	/// Attribute on the group entry.
	pub group_attr: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::connector::ConnectorConfig;

	#[test]
	fn decodes_nested_searches() {
		let mut config = LdapConfig::default();

		config
			.decode(
				br#"{
					"host": "ldap.example.com:636",
					"bindDN": "cn=admin,dc=example,dc=com",
					"userSearch": {
						"baseDN": "ou=people,dc=example,dc=com",
						"username": "uid",
						"idAttr": "uid",
						"emailAttr": "mail"
					},
					"groupSearch": {
						"baseDN": "ou=groups,dc=example,dc=com",
						"userMatchers": [{"userAttr": "DN", "groupAttr": "member"}],
						"nameAttr": "cn"
					}
				}"#,
			)
			.expect("LDAP payload should decode.");

		let groups = config.group_search.expect("Group search should be present.");

		assert_eq!(config.user_search.id_attr, "uid");
		assert_eq!(
			groups.user_matchers,
			[UserMatcher { user_attr: "DN".into(), group_attr: "member".into() }]
		);
	}

	#[test]
	fn rejects_wrong_types_with_path() {
		let err = LdapConfig::default()
			.decode(br#"{"userSearch": {"baseDN": 42}}"#)
			.expect_err("Numeric baseDN must be rejected.");

		assert_eq!(err.path().to_string(), "userSearch.baseDN");
	}
}
