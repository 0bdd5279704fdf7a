//! Type-keyed registry of connector configuration factories.
//!
//! The registry maps a connector type tag to a zero-argument factory producing a fresh,
//! default-valued typed configuration. New connector kinds are added by registering another
//! factory; translation never branches on the tag itself.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	connector::kind::{
		GITHUB, GITLAB, GOOGLE, GithubConfig, GitlabConfig, GoogleConfig, LDAP, LdapConfig,
		MICROSOFT, MicrosoftConfig, OIDC, OidcConfig,
	},
};

/// Path-aware payload decoding failure.
pub type DecodeError = serde_path_to_error::Error<serde_json::Error>;

/// Zero-argument constructor for a connector's typed configuration.
pub type ConnectorFactory = fn() -> Box<dyn ConnectorConfig>;

/// Typed configuration of a single connector kind.
///
/// Every `Clone + Serialize + DeserializeOwned` type implements this trait, so a new kind
/// only needs a serde model and a [`ConnectorRegistry::with`] call.
pub trait ConnectorConfig: Debug + Send + Sync {
	/// Decodes a JSON payload into this instance. Fields absent from the payload take their
	/// default values.
	fn decode(&mut self, raw: &[u8]) -> Result<(), DecodeError>;

	/// Converts the configuration into a YAML node for the rendered document.
	fn to_yaml(&self) -> Result<serde_yaml::Value, serde_yaml::Error>;

	/// Exposes the concrete type for inspection.
	fn as_any(&self) -> &dyn Any;

	/// Clones the configuration behind a fresh box.
	fn clone_box(&self) -> Box<dyn ConnectorConfig>;
}
impl<T> ConnectorConfig for T
where
	T: 'static + Clone + Debug + Send + Sync + Serialize + DeserializeOwned,
{
	fn decode(&mut self, raw: &[u8]) -> Result<(), DecodeError> {
		let mut deserializer = serde_json::Deserializer::from_slice(raw);

		*self = serde_path_to_error::deserialize(&mut deserializer)?;

		Ok(())
	}

	fn to_yaml(&self) -> Result<serde_yaml::Value, serde_yaml::Error> {
		serde_yaml::to_value(self)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn clone_box(&self) -> Box<dyn ConnectorConfig> {
		Box::new(self.clone())
	}
}
impl dyn ConnectorConfig {
	/// Returns the configuration as `T` when it has that concrete type.
	pub fn downcast_ref<T>(&self) -> Option<&T>
	where
		T: 'static,
	{
		self.as_any().downcast_ref()
	}
}
impl Clone for Box<dyn ConnectorConfig> {
	fn clone(&self) -> Self {
		(**self).clone_box()
	}
}

/// Factory producing `T::default()`.
pub fn default_factory<T>() -> Box<dyn ConnectorConfig>
where
	T: 'static + ConnectorConfig + Default,
{
	Box::new(T::default())
}

/// Mapping from connector type tag to configuration factory.
#[derive(Clone)]
pub struct ConnectorRegistry {
	factories: BTreeMap<String, ConnectorFactory>,
}
impl ConnectorRegistry {
	/// Creates a registry without any connector kinds.
	pub fn empty() -> Self {
		Self { factories: BTreeMap::new() }
	}

	/// Creates a registry with every built-in connector kind.
	pub fn builtin() -> Self {
		Self::empty()
			.with::<OidcConfig>(OIDC)
			.with::<LdapConfig>(LDAP)
			.with::<GithubConfig>(GITHUB)
			.with::<GitlabConfig>(GITLAB)
			.with::<GoogleConfig>(GOOGLE)
			.with::<MicrosoftConfig>(MICROSOFT)
	}

	/// Registers `T` under `kind`, replacing any previous factory.
	pub fn with<T>(mut self, kind: impl Into<String>) -> Self
	where
		T: 'static + ConnectorConfig + Default,
	{
		self.register(kind, default_factory::<T>);

		self
	}

	/// Registers a factory under `kind`, returning the factory it replaced.
	pub fn register(
		&mut self,
		kind: impl Into<String>,
		factory: ConnectorFactory,
	) -> Option<ConnectorFactory> {
		self.factories.insert(kind.into(), factory)
	}

	/// Builds a fresh default configuration for `kind`.
	pub fn construct(&self, kind: &str) -> Option<Box<dyn ConnectorConfig>> {
		self.factories.get(kind).map(|factory| factory())
	}

	/// Returns true when `kind` has a factory.
	pub fn contains(&self, kind: &str) -> bool {
		self.factories.contains_key(kind)
	}

	/// Registered type tags in sorted order.
	pub fn kinds(&self) -> impl Iterator<Item = &str> {
		self.factories.keys().map(String::as_str)
	}

	/// Number of registered kinds.
	pub fn len(&self) -> usize {
		self.factories.len()
	}

	/// Returns true when no kind is registered.
	pub fn is_empty(&self) -> bool {
		self.factories.is_empty()
	}
}
impl Default for ConnectorRegistry {
	fn default() -> Self {
		Self::builtin()
	}
}
impl Debug for ConnectorRegistry {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_set().entries(self.kinds()).finish()
	}
}
