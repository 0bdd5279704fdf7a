//! Operator-facing identity resources consumed by the render pipeline.
//!
//! [`IdentitySpec`] captures the intent (which provider kinds are supported, OAuth2 UX flags,
//! expirations, redirect URIs) while [`IdentityConfigSpec`] carries deployment-specific
//! settings such as ingress and the declared connectors. Both deserialize from the custom
//! resource's camelCase representation.

pub mod address;

pub use address::*;

// crates.io
use serde::{Deserializer, Serializer};
// self
use crate::_prelude::*;

/// Operator-declared identity intent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdentitySpec {
	/// Issuer advertised to downstream applications; the broker's own issuer is derived from
	/// [`IdentityConfigSpec`].
	#[serde(rename = "identityIssuerURL", skip_serializing_if = "Option::is_none")]
	pub identity_issuer_url: Option<String>,
	/// Redirect URIs registered for the static client, used verbatim.
	pub oidc_redirect_uris: Vec<String>,
	/// Forces the login screen even when a single connector is available.
	#[serde(rename = "oauth2AlwaysShowLoginScreen")]
	pub oauth2_always_show_login_screen: bool,
	/// Signing key rotation period in the broker's duration syntax.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub signing_keys_expiration: Option<String>,
	/// ID token lifetime in the broker's duration syntax.
	#[serde(rename = "idTokensExpiration", skip_serializing_if = "Option::is_none")]
	pub id_tokens_expiration: Option<String>,
	/// Allow-list of connector types; empty means unrestricted.
	pub supported_providers: Vec<String>,
}

/// Deployment-specific identity settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdentityConfigSpec {
	/// Ingress settings used to derive the externally reachable address.
	pub ingress_config: IngressConfig,
	/// Explicit issuer override; takes precedence over the ingress-derived address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub identity_service_address: Option<String>,
	/// Connectors in declaration order.
	pub dex_connectors: Vec<DeclaredConnector>,
}
impl IdentityConfigSpec {
	/// Returns the override address when it is set to a non-empty value.
	pub fn service_address_override(&self) -> Option<&str> {
		self.identity_service_address.as_deref().filter(|address| !address.is_empty())
	}
}

/// Connector as declared on the resource, before its payload is decoded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclaredConnector {
	/// Connector type tag (e.g. `oidc`, `ldap`).
	#[serde(rename = "type")]
	pub kind: String,
	/// Human-readable name shown on the login screen.
	pub name: String,
	/// Stable identifier.
	pub id: String,
	/// Opaque payload whose schema depends on [`kind`](Self::kind).
	#[serde(skip_serializing_if = "RawConfig::is_empty")]
	pub config: RawConfig,
}
impl DeclaredConnector {
	/// Creates a connector without a payload.
	pub fn new(kind: impl Into<String>, name: impl Into<String>, id: impl Into<String>) -> Self {
		Self { kind: kind.into(), name: name.into(), id: id.into(), config: RawConfig::default() }
	}

	/// Attaches a raw payload.
	pub fn with_config(mut self, config: RawConfig) -> Self {
		self.config = config;

		self
	}
}

/// Undecoded JSON payload of a declared connector.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawConfig(Vec<u8>);
impl RawConfig {
	/// Wraps already-encoded JSON bytes.
	pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
		Self(bytes.into())
	}

	/// Encodes a JSON value; `null` yields an empty payload.
	pub fn from_json(value: &serde_json::Value) -> Self {
		if value.is_null() { Self::default() } else { Self(value.to_string().into_bytes()) }
	}

	/// Returns the encoded bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Returns true when no payload was supplied.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl Debug for RawConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		// Payloads routinely carry client secrets.
		f.debug_tuple("RawConfig").field(&format_args!("<{} bytes>", self.0.len())).finish()
	}
}
impl Serialize for RawConfig {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		use serde::ser::Error as _;

		if self.0.is_empty() {
			return serializer.serialize_none();
		}

		let value: serde_json::Value =
			serde_json::from_slice(&self.0).map_err(S::Error::custom)?;

		value.serialize(serializer)
	}
}
impl<'de> Deserialize<'de> for RawConfig {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = serde_json::Value::deserialize(deserializer)?;

		Ok(Self::from_json(&value))
	}
}
