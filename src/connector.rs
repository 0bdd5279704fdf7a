//! Connector selection and translation.
//!
//! `filter_connectors` narrows the declared connectors to the supported provider kinds and
//! `translate_connectors` decodes each survivor's opaque payload into its typed configuration
//! through a [`ConnectorRegistry`]. Both preserve declaration order and fail fast.

pub mod kind;
pub mod registry;

pub use kind::*;
pub use registry::*;

// crates.io
use serde::{Serializer, ser::SerializeStruct};
// self
use crate::{
	_prelude::*,
	error::ConnectorError,
	identity::DeclaredConnector,
	obs::{self, RenderSpan, RenderStage},
};

/// Connector with a decoded, typed configuration.
#[derive(Clone, Debug)]
pub struct TranslatedConnector {
	/// Connector type tag.
	pub kind: String,
	/// Human-readable name.
	pub name: String,
	/// Stable identifier.
	pub id: String,
	/// Typed configuration matching [`kind`](Self::kind).
	pub config: Box<dyn ConnectorConfig>,
}
impl TranslatedConnector {
	/// Returns the configuration as `T` when it has that concrete type.
	pub fn config_as<T>(&self) -> Option<&T>
	where
		T: 'static,
	{
		self.config.downcast_ref()
	}
}
impl Serialize for TranslatedConnector {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		use serde::ser::Error as _;

		let config = self.config.to_yaml().map_err(S::Error::custom)?;
		let mut state = serializer.serialize_struct("TranslatedConnector", 4)?;

		state.serialize_field("type", &self.kind)?;
		state.serialize_field("name", &self.name)?;
		state.serialize_field("id", &self.id)?;
		state.serialize_field("config", &config)?;
		state.end()
	}
}

/// Selects the connectors whose type is in `supported`, or all of them when `supported` is
/// empty.
///
/// Fails with [`ConnectorError::NoConnectors`] when nothing is selected.
pub fn filter_connectors<'a>(
	connectors: &'a [DeclaredConnector],
	supported: &[String],
) -> Result<Vec<&'a DeclaredConnector>, ConnectorError> {
	let _span = RenderSpan::new(RenderStage::Filter).entered();
	let (selected, skipped): (Vec<_>, Vec<_>) = connectors
		.iter()
		.partition(|connector| supported.is_empty() || supported.contains(&connector.kind));

	for connector in skipped {
		obs::record_connector_skipped(&connector.kind);
	}

	if selected.is_empty() {
		return Err(ConnectorError::NoConnectors);
	}

	Ok(selected)
}

/// Translates every connector, aborting on the first unknown type or malformed payload.
pub fn translate_connectors<'a, I>(
	registry: &ConnectorRegistry,
	connectors: I,
) -> Result<Vec<TranslatedConnector>, ConnectorError>
where
	I: IntoIterator<Item = &'a DeclaredConnector>,
{
	let _span = RenderSpan::new(RenderStage::Translate).entered();

	connectors.into_iter().map(|connector| translate_connector(registry, connector)).collect()
}

/// Translates a single declared connector.
pub fn translate_connector(
	registry: &ConnectorRegistry,
	declared: &DeclaredConnector,
) -> Result<TranslatedConnector, ConnectorError> {
	let mut config = registry
		.construct(&declared.kind)
		.ok_or_else(|| ConnectorError::UnknownType { kind: declared.kind.clone() })?;

	if !declared.config.is_empty() {
		config.decode(declared.config.as_bytes()).map_err(|source| ConnectorError::Decode {
			kind: declared.kind.clone(),
			name: declared.name.clone(),
			source,
		})?;
	}

	Ok(TranslatedConnector {
		kind: declared.kind.clone(),
		name: declared.name.clone(),
		id: declared.id.clone(),
		config,
	})
}
