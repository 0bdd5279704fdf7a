//! Pipeline-level error types shared across connector translation, validation, and rendering.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error surfaced by [`Renderer::render`](crate::Renderer::render).
///
/// Every stage fails fast, so a single variant always identifies the stage that aborted the
/// pipeline. No partial document is ever produced alongside an error.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Declared connectors could not be selected or translated.
	#[error(transparent)]
	Connector(#[from] ConnectorError),
	/// Assembled broker config failed structural validation.
	#[error("Broker config failed validation: {0}")]
	Validation(#[from] ValidationError),
	/// Serialization or template rendering failed.
	#[error(transparent)]
	Render(#[from] RenderError),
}

/// Failures raised while selecting or translating declared connectors.
#[derive(Debug, ThisError)]
pub enum ConnectorError {
	/// No connector survived the supported-provider filter.
	#[error("At least one connector is required.")]
	NoConnectors,
	/// Declared connector type has no registered factory.
	#[error("Unknown connector type `{kind}`.")]
	UnknownType {
		/// Offending connector type tag.
		kind: String,
	},
	/// Connector payload does not match the schema of its type.
	#[error("Connector `{name}` of type `{kind}` has a malformed config.")]
	Decode {
		/// Connector type tag.
		kind: String,
		/// Human-readable connector name.
		name: String,
		/// Path-aware decoding failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Structural problems found in an assembled [`BrokerConfig`](crate::broker::BrokerConfig).
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// Issuer URL is empty.
	#[error("No issuer specified.")]
	MissingIssuer,
	/// Issuer URL is not an absolute URL.
	#[error("Issuer `{issuer}` is not a valid URL: {source}.")]
	InvalidIssuer {
		/// Issuer that failed to parse.
		issuer: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Storage backend type is empty.
	#[error("No storage backend specified.")]
	MissingStorage,
	/// Web bind address is empty.
	#[error("No HTTP address to listen on specified.")]
	MissingWebAddress,
	/// Connector list is empty.
	#[error("At least one connector is required.")]
	NoConnectors,
	/// A connector carries an empty required field.
	#[error("Connector at index {index} has an empty {field}.")]
	EmptyConnectorField {
		/// Position of the connector in the list.
		index: usize,
		/// Which field is empty.
		field: &'static str,
	},
	/// Two connectors share the same identifier.
	#[error("Connector id `{id}` is declared more than once.")]
	DuplicateConnectorId {
		/// Duplicated identifier.
		id: String,
	},
	/// Static client lacks an identifier.
	#[error("Static client has no id.")]
	MissingClientId,
	/// Static client has neither a secret nor a secret environment variable.
	#[error("Static client `{id}` has no secret source.")]
	MissingClientSecret {
		/// Static client identifier.
		id: String,
	},
	/// A redirect URI is not an absolute URL.
	#[error("Redirect URI `{uri}` is not a valid URL: {source}.")]
	InvalidRedirectUri {
		/// Redirect URI that failed to parse.
		uri: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// An expiration is not a positive duration.
	#[error("The {field} expiration `{value}` is invalid: {reason}.")]
	InvalidExpiry {
		/// Which expiration failed.
		field: &'static str,
		/// Raw configured value.
		value: String,
		/// Reason the value was rejected.
		reason: DurationError,
	},
}

/// Reasons a broker duration string is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum DurationError {
	/// Value is empty or lacks a number.
	#[error("expected a number")]
	MissingNumber,
	/// Number is not followed by a unit.
	#[error("missing unit")]
	MissingUnit,
	/// Unit is not one of ns, us, µs, ms, s, m, h.
	#[error("unknown unit")]
	UnknownUnit,
	/// Value does not fit the supported range.
	#[error("out of range")]
	OutOfRange,
	/// Value is zero or negative.
	#[error("must be positive")]
	NonPositive,
}

/// Failures raised while turning a validated config into bytes.
///
/// These indicate a defect rather than a user configuration problem: a well-formed aggregate
/// always serializes into valid template source.
#[derive(Debug, ThisError)]
pub enum RenderError {
	/// Aggregate could not be serialized to YAML.
	#[error("Broker config could not be serialized.")]
	Serialize(#[from] serde_yaml::Error),
	/// Serialized document is not valid template source.
	#[error("Broker config could not be parsed as a template.")]
	TemplateParse(#[source] Box<handlebars::TemplateError>),
	/// Serialized document escapes an expression with a backslash, which the template engine
	/// would strip from the output.
	#[error("Broker config contains an escaped template expression on line {line}.")]
	EscapedExpression {
		/// One-based line of the document holding the escape.
		line: usize,
	},
	/// Template execution failed.
	#[error("Broker config template could not be executed.")]
	TemplateExec(#[source] Box<handlebars::RenderError>),
}
impl From<handlebars::TemplateError> for RenderError {
	fn from(e: handlebars::TemplateError) -> Self {
		Self::TemplateParse(Box::new(e))
	}
}
impl From<handlebars::RenderError> for RenderError {
	fn from(e: handlebars::RenderError) -> Self {
		Self::TemplateExec(Box::new(e))
	}
}
