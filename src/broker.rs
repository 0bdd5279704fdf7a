//! Broker configuration aggregate and its assembler.
//!
//! [`BrokerConfig`] mirrors the document the broker process reads at startup. [`assemble`]
//! maps the identity resources onto it deterministically; everything that is not derived
//! from the resources is fixed here.

pub mod duration;

mod validate;

// self
use crate::{
	_prelude::*,
	connector::TranslatedConnector,
	identity::{self, AddressResolver, IdentityConfigSpec, IdentitySpec},
	obs::{RenderSpan, RenderStage},
};

/// Storage backend type written into every config.
pub const STORAGE_TYPE: &str = "postgres";
/// Postgres TLS mode; connections stay on the cluster network.
pub const POSTGRES_SSL_MODE: &str = "disable";
/// Address the broker's HTTP listener binds to.
pub const WEB_HTTP_ADDRESS: &str = "0.0.0.0:5556";
/// Branding shown on the broker's login screens.
pub const FRONTEND_ISSUER: &str = "KOTS";
/// Identifier and name of the admin console's static client.
pub const STATIC_CLIENT_ID: &str = "kotsadm";
/// Environment variable the broker reads the static client secret from.
pub const STATIC_CLIENT_SECRET_ENV: &str = "DEX_CLIENT_SECRET";

/// Aggregate root of the rendered broker configuration.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerConfig {
	/// Externally reachable base URL identifying the broker.
	pub issuer: String,
	/// Persistence backend.
	pub storage: Storage,
	/// HTTP listener settings.
	pub web: Web,
	/// Login screen settings.
	pub frontend: Frontend,
	/// OAuth2 behavior flags.
	pub oauth2: OAuth2,
	/// Token and signing key lifetimes.
	pub expiry: Expiry,
	/// Pre-registered OAuth2 clients.
	pub static_clients: Vec<StaticClient>,
	/// Upstream identity providers in declaration order.
	pub connectors: Vec<TranslatedConnector>,
	/// Enables the broker's built-in password database.
	#[serde(rename = "enablePasswordDB")]
	pub enable_password_db: bool,
}

/// Storage backend descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Storage {
	/// Backend type.
	#[serde(rename = "type")]
	pub kind: String,
	/// Backend-specific settings.
	pub config: Postgres,
}
impl Default for Storage {
	fn default() -> Self {
		Self {
			kind: STORAGE_TYPE.into(),
			config: Postgres { ssl: Ssl { mode: POSTGRES_SSL_MODE.into() } },
		}
	}
}

/// Postgres settings; connection details come from the broker's environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Postgres {
	/// TLS settings.
	pub ssl: Ssl,
}

/// Postgres TLS settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ssl {
	/// libpq `sslmode`.
	pub mode: String,
}

/// HTTP listener settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Web {
	/// Plain HTTP bind address.
	pub http: String,
}
impl Default for Web {
	fn default() -> Self {
		Self { http: WEB_HTTP_ADDRESS.into() }
	}
}

/// Login screen settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Frontend {
	/// Product name shown on the login screen.
	pub issuer: String,
}
impl Default for Frontend {
	fn default() -> Self {
		Self { issuer: FRONTEND_ISSUER.into() }
	}
}

/// OAuth2 behavior flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2 {
	/// Skips the consent screen for the static client.
	pub skip_approval_screen: bool,
	/// Shows the connector picker even with a single connector.
	pub always_show_login_screen: bool,
}

/// Token and signing key lifetimes in the broker's duration syntax.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expiry {
	/// ID token lifetime.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id_tokens: Option<String>,
	/// Signing key rotation period.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub signing_keys: Option<String>,
}

/// Pre-registered OAuth2 client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticClient {
	/// Client identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Inline secret; never set by [`assemble`].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub secret: Option<String>,
	/// Environment variable holding the secret at broker startup.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub secret_env: Option<String>,
	/// Allowed redirect URIs.
	#[serde(rename = "redirectURIs")]
	pub redirect_uris: Vec<String>,
}

/// Builds the aggregate from the identity resources and translated connectors.
pub fn assemble(
	identity: &IdentitySpec,
	config: &IdentityConfigSpec,
	connectors: Vec<TranslatedConnector>,
	resolver: &dyn AddressResolver,
) -> BrokerConfig {
	let _span = RenderSpan::new(RenderStage::Assemble).entered();

	BrokerConfig {
		issuer: identity::issuer_url(config, resolver),
		storage: Storage::default(),
		web: Web::default(),
		frontend: Frontend::default(),
		oauth2: OAuth2 {
			skip_approval_screen: true,
			always_show_login_screen: identity.oauth2_always_show_login_screen,
		},
		expiry: Expiry {
			id_tokens: non_empty(identity.id_tokens_expiration.as_deref()),
			signing_keys: non_empty(identity.signing_keys_expiration.as_deref()),
		},
		static_clients: vec![StaticClient {
			id: STATIC_CLIENT_ID.into(),
			name: STATIC_CLIENT_ID.into(),
			secret: None,
			secret_env: Some(STATIC_CLIENT_SECRET_ENV.into()),
			redirect_uris: identity.oidc_redirect_uris.clone(),
		}],
		connectors,
		enable_password_db: false,
	}
}

fn non_empty(value: Option<&str>) -> Option<String> {
	value.filter(|value| !value.is_empty()).map(str::to_owned)
}
