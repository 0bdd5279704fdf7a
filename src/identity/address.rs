//! Address resolution hooks used to derive the broker's issuer.
//!
//! The externally reachable base URL depends on how the admin console is exposed. Callers
//! that already know it can plug their own [`AddressResolver`]; [`DefaultAddressResolver`]
//! derives it from the resource's [`IngressConfig`].

// self
use crate::{_prelude::*, identity::IdentityConfigSpec};

/// Path segment appended to the ingress address to form the issuer.
pub const ISSUER_PATH: &str = "/dex";
/// Path segment appended to the issuer to form the callback URL.
pub const CALLBACK_PATH: &str = "/callback";

/// How the admin console is exposed outside the cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngressType {
	/// Not exposed; no address can be derived.
	#[default]
	#[serde(rename = "")]
	None,
	/// Exposed through an ingress resource.
	Ingress,
	/// Exposed through a node port.
	NodePort,
}

/// Ingress settings carried by [`IdentityConfigSpec`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngressConfig {
	/// Selected exposure mechanism.
	pub ingress_type: IngressType,
	/// Ingress resource settings, used with [`IngressType::Ingress`].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ingress: Option<IngressResource>,
	/// Node port settings, used with [`IngressType::NodePort`].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node_port: Option<NodePort>,
}
impl IngressConfig {
	/// Exposes the console through an ingress resource.
	pub fn ingress(resource: IngressResource) -> Self {
		Self { ingress_type: IngressType::Ingress, ingress: Some(resource), node_port: None }
	}

	/// Exposes the console through a node port.
	pub fn node_port(port: u16) -> Self {
		Self {
			ingress_type: IngressType::NodePort,
			ingress: None,
			node_port: Some(NodePort { port }),
		}
	}
}

/// Ingress resource settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngressResource {
	/// Public host name.
	pub host: String,
	/// Path prefix the console is mounted under.
	pub path: String,
	/// TLS secret name; when set the address uses HTTPS.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub tls_secret_name: String,
}

/// Node port settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePort {
	/// Exposed node port.
	pub port: u16,
}

/// Resolves the externally reachable base URL for the broker.
///
/// Implementations must be pure: the same [`IngressConfig`] always yields the same address.
pub trait AddressResolver: Send + Sync {
	/// Returns the base URL without a trailing slash, or an empty string when unknown.
	fn address(&self, ingress: &IngressConfig) -> String;
}

/// Resolver that derives the address from the ingress settings alone.
#[derive(Debug, Default)]
pub struct DefaultAddressResolver;
impl Display for DefaultAddressResolver {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("default-address-resolver")
	}
}
impl AddressResolver for DefaultAddressResolver {
	fn address(&self, ingress: &IngressConfig) -> String {
		match (ingress.ingress_type, &ingress.ingress, &ingress.node_port) {
			(IngressType::Ingress, Some(resource), _) => ingress_address(resource),
			(IngressType::NodePort, _, Some(node_port)) =>
				format!("http://localhost:{}", node_port.port),
			_ => String::new(),
		}
	}
}

/// Returns the override address if set, otherwise `<address>/dex`.
pub fn issuer_url(config: &IdentityConfigSpec, resolver: &dyn AddressResolver) -> String {
	match config.service_address_override() {
		Some(address) => address.to_owned(),
		None => format!("{}{ISSUER_PATH}", resolver.address(&config.ingress_config)),
	}
}

/// Returns the URL the broker redirects to after an upstream exchange.
pub fn callback_url(config: &IdentityConfigSpec, resolver: &dyn AddressResolver) -> String {
	format!("{}{CALLBACK_PATH}", issuer_url(config, resolver))
}

fn ingress_address(resource: &IngressResource) -> String {
	let scheme = if resource.tls_secret_name.is_empty() { "http" } else { "https" };
	let path = resource.path.trim_end_matches('/');

	if path.is_empty() || path.starts_with('/') {
		format!("{scheme}://{}{path}", resource.host)
	} else {
		format!("{scheme}://{}/{path}", resource.host)
	}
}
