//! Template rendering and the end-to-end pipeline entry point.
//!
//! The aggregate is serialized to YAML first and the document is then executed as a template
//! whose only helper, `{{OIDCIdentityCallbackURL}}`, expands to the broker's callback URL.
//! Connector payloads are opaque until translation, so the placeholder can appear anywhere
//! inside them; substituting after serialization keeps the URL derivation in one place.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	broker::{self, BrokerConfig},
	connector::{self, ConnectorRegistry},
	error::RenderError,
	identity::{self, AddressResolver, DefaultAddressResolver, IdentityConfigSpec, IdentitySpec},
	obs::{self, RenderOutcome, RenderSpan, RenderStage},
};

/// Name of the template helper that expands to the callback URL.
pub const CALLBACK_URL_HELPER: &str = "OIDCIdentityCallbackURL";

const TEMPLATE_NAME: &str = "broker-config";

/// Rendered broker configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct RenderedConfig {
	document: String,
	/// Unpadded base64 SHA-256 digest of the document bytes.
	///
	/// Stable across renders of identical inputs, so callers can use it to trigger a broker
	/// rollout only when the document changes.
	pub checksum: String,
}
impl RenderedConfig {
	fn new(document: String) -> Self {
		let checksum = STANDARD_NO_PAD.encode(Sha256::digest(document.as_bytes()));

		Self { document, checksum }
	}

	/// Returns the document as UTF-8 text.
	pub fn as_str(&self) -> &str {
		&self.document
	}

	/// Returns the document bytes.
	pub fn as_bytes(&self) -> &[u8] {
		self.document.as_bytes()
	}

	/// Consumes the value, returning the document bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.document.into_bytes()
	}
}
impl Debug for RenderedConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RenderedConfig")
			.field("len", &self.document.len())
			.field("checksum", &self.checksum)
			.finish()
	}
}

/// Runs the filter → translate → assemble → validate → template pipeline.
///
/// Holds only immutable state, so one renderer can serve concurrent callers.
#[derive(Clone)]
pub struct Renderer {
	/// Connector kinds available to translation.
	pub registry: ConnectorRegistry,
	/// Resolver used to derive the issuer when no override is set.
	pub resolver: Arc<dyn AddressResolver>,
}
impl Renderer {
	/// Creates a renderer with the built-in connector kinds and the default resolver.
	pub fn new() -> Self {
		Self {
			registry: ConnectorRegistry::default(),
			resolver: Arc::new(DefaultAddressResolver),
		}
	}

	/// Replaces the connector registry.
	pub fn with_registry(mut self, registry: ConnectorRegistry) -> Self {
		self.registry = registry;

		self
	}

	/// Replaces the address resolver.
	pub fn with_resolver(mut self, resolver: impl 'static + AddressResolver) -> Self {
		self.resolver = Arc::new(resolver);

		self
	}

	/// Renders the broker configuration for the provided identity resources.
	pub fn render(
		&self,
		identity: &IdentitySpec,
		config: &IdentityConfigSpec,
	) -> Result<RenderedConfig> {
		let _span = RenderSpan::new(RenderStage::Pipeline).entered();

		obs::record_render_outcome(RenderOutcome::Attempt);

		let result = self.build(identity, config).and_then(|broker| {
			let callback = identity::callback_url(config, self.resolver.as_ref());

			Ok(render_document(&broker, &callback)?)
		});

		match &result {
			Ok(_) => obs::record_render_outcome(RenderOutcome::Success),
			Err(_) => obs::record_render_outcome(RenderOutcome::Failure),
		}

		result.map(RenderedConfig::new)
	}

	/// Runs every stage up to and including validation, returning the aggregate.
	pub fn build(
		&self,
		identity: &IdentitySpec,
		config: &IdentityConfigSpec,
	) -> Result<BrokerConfig> {
		let selected =
			connector::filter_connectors(&config.dex_connectors, &identity.supported_providers)?;
		let translated = connector::translate_connectors(&self.registry, selected)?;
		let broker = broker::assemble(identity, config, translated, self.resolver.as_ref());

		broker.validate()?;

		Ok(broker)
	}
}
impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}
impl Debug for Renderer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Renderer").field("registry", &self.registry).finish_non_exhaustive()
	}
}

/// Renders with the built-in connector kinds and the default address resolver.
pub fn render_broker_config(
	identity: &IdentitySpec,
	config: &IdentityConfigSpec,
) -> Result<RenderedConfig> {
	Renderer::default().render(identity, config)
}

/// Serializes a validated config and expands the callback URL helper.
pub fn render_template(config: &BrokerConfig, callback_url: &str) -> Result<Vec<u8>, RenderError> {
	Ok(render_document(config, callback_url)?.into_bytes())
}

fn render_document(config: &BrokerConfig, callback_url: &str) -> Result<String, RenderError> {
	let _span = RenderSpan::new(RenderStage::Template).entered();
	let document = serde_yaml::to_string(config)?;

	reject_escaped_expressions(&document)?;

	let mut registry = Handlebars::new();
	let callback_url = callback_url.to_owned();

	registry.set_strict_mode(true);
	registry.register_escape_fn(handlebars::no_escape);
	registry.register_helper(
		CALLBACK_URL_HELPER,
		Box::new(
			move |_: &Helper,
			      _: &Handlebars,
			      _: &Context,
			      _: &mut RenderContext,
			      out: &mut dyn Output|
			      -> HelperResult {
				out.write(&callback_url)?;

				Ok(())
			},
		),
	);
	registry.register_template_string(TEMPLATE_NAME, document)?;

	Ok(registry.render(TEMPLATE_NAME, &())?)
}

// The template engine would consume the backslash and emit the braces literally.
fn reject_escaped_expressions(document: &str) -> Result<(), RenderError> {
	match document.find("\\{{") {
		Some(index) => Err(RenderError::EscapedExpression {
			line: document[..index].matches('\n').count() + 1,
		}),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		error::{ConnectorError, Error},
		identity::{DeclaredConnector, IngressConfig, RawConfig},
	};

	fn identity() -> IdentitySpec {
		IdentitySpec {
			oidc_redirect_uris: vec!["https://kots.example.com/api/v1/oidc/login/callback".into()],
			..Default::default()
		}
	}

	fn config(connectors: Vec<DeclaredConnector>) -> IdentityConfigSpec {
		IdentityConfigSpec {
			ingress_config: IngressConfig::node_port(30880),
			identity_service_address: None,
			dex_connectors: connectors,
		}
	}

	fn oidc_connector() -> DeclaredConnector {
		DeclaredConnector::new("oidc", "Okta", "okta").with_config(RawConfig::from_json(
			&serde_json::json!({
				"issuer": "https://okta.example.com",
				"clientID": "kots",
				"clientSecret": "s3cr3t",
				"redirectURI": "{{OIDCIdentityCallbackURL}}"
			}),
		))
	}

	#[test]
	fn callback_placeholder_is_expanded() {
		let rendered = Renderer::default()
			.render(&identity(), &config(vec![oidc_connector()]))
			.expect("Valid inputs should render.");
		let text = rendered.as_str();

		assert!(text.contains("issuer: http://localhost:30880/dex\n"));
		assert!(text.contains("redirectURI: 'http://localhost:30880/dex/callback'"));
		assert!(!text.contains(CALLBACK_URL_HELPER));
	}

	#[test]
	fn rendering_is_deterministic() {
		let renderer = Renderer::default();
		let inputs = (identity(), config(vec![oidc_connector()]));
		let first = renderer.render(&inputs.0, &inputs.1).expect("First render should succeed.");
		let second = renderer.render(&inputs.0, &inputs.1).expect("Second render should succeed.");

		assert_eq!(first, second);
		assert_eq!(first.checksum.len(), 43);
	}

	#[test]
	fn unknown_template_reference_fails_execution() {
		let connector = DeclaredConnector::new("oidc", "Okta", "okta").with_config(
			RawConfig::from_json(&serde_json::json!({ "issuer": "{{UnknownHelper}}" })),
		);
		let broker = Renderer::default()
			.build(&identity(), &config(vec![connector]))
			.expect("Aggregate should build.");
		let err = render_template(&broker, "https://kots.example.com/dex/callback")
			.expect_err("Unknown references must fail in strict mode.");

		assert!(matches!(err, RenderError::TemplateExec(_)));
	}

	#[test]
	fn unbalanced_template_fails_parsing() {
		let connector = DeclaredConnector::new("oidc", "Okta", "okta").with_config(
			RawConfig::from_json(&serde_json::json!({ "clientSecret": "{{#if}}" })),
		);
		let broker = Renderer::default()
			.build(&identity(), &config(vec![connector]))
			.expect("Aggregate should build.");
		let err = render_template(&broker, "https://kots.example.com/dex/callback")
			.expect_err("Unclosed block must fail to parse.");

		assert!(matches!(err, RenderError::TemplateParse(_)));
	}

	#[test]
	fn escaped_expression_fails_instead_of_altering_payload() {
		let connector = DeclaredConnector::new("oidc", "Okta", "okta").with_config(
			RawConfig::from_json(&serde_json::json!({ "clientSecret": "a\\{{b" })),
		);
		let broker = Renderer::default()
			.build(&identity(), &config(vec![connector.clone()]))
			.expect("Aggregate should build.");
		let err = render_template(&broker, "https://kots.example.com/dex/callback")
			.expect_err("A backslash before an expression must not be dropped.");

		assert!(matches!(err, RenderError::EscapedExpression { line } if line > 1));
		assert!(matches!(
			Renderer::default().render(&identity(), &config(vec![connector])),
			Err(Error::Render(RenderError::EscapedExpression { .. }))
		));
	}

	#[test]
	fn failures_stop_before_rendering() {
		let err = render_broker_config(&identity(), &config(Vec::new()))
			.expect_err("No connectors must abort the pipeline.");

		assert!(matches!(err, Error::Connector(ConnectorError::NoConnectors)));
	}

	#[test]
	fn custom_resolver_feeds_issuer_and_callback() {
		struct Fixed;
		impl AddressResolver for Fixed {
			fn address(&self, _: &IngressConfig) -> String {
				"https://console.example.com".into()
			}
		}

		let rendered = Renderer::default()
			.with_resolver(Fixed)
			.render(&identity(), &config(vec![oidc_connector()]))
			.expect("Custom resolver should render.");

		assert!(rendered.as_str().contains("issuer: https://console.example.com/dex\n"));
		assert!(rendered.as_str().contains("'https://console.example.com/dex/callback'"));
	}
}
