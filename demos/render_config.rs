//! Renders a broker configuration for an ingress-exposed admin console with a single OIDC
//! connector and prints the document followed by its checksum.
//!
//! The connector payload references `{{OIDCIdentityCallbackURL}}`, which the renderer expands to
//! `https://kots.example.com/dex/callback`.

// crates.io
use color_eyre::Result;
// self
use identity_broker_config::{
	Renderer,
	identity::{
		DeclaredConnector, IdentityConfigSpec, IdentitySpec, IngressConfig, IngressResource,
		RawConfig,
	},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let identity = IdentitySpec {
		oidc_redirect_uris: vec!["https://kots.example.com/api/v1/oidc/login/callback".into()],
		id_tokens_expiration: Some("24h".into()),
		signing_keys_expiration: Some("6h".into()),
		supported_providers: vec!["oidc".into()],
		..Default::default()
	};
	let payload = serde_json::json!({
		"issuer": "https://okta.example.com",
		"clientID": "kots",
		"clientSecret": "s3cr3t",
		"redirectURI": "{{OIDCIdentityCallbackURL}}",
		"getUserInfo": true
	});
	let config = IdentityConfigSpec {
		ingress_config: IngressConfig::ingress(IngressResource {
			host: "kots.example.com".into(),
			path: "/".into(),
			tls_secret_name: "kotsadm-tls".into(),
		}),
		identity_service_address: None,
		dex_connectors: vec![
			DeclaredConnector::new("oidc", "Okta", "okta")
				.with_config(RawConfig::from_json(&payload)),
			// Dropped by `supported_providers`.
			DeclaredConnector::new("github", "GitHub", "github"),
		],
	};
	let rendered = Renderer::default().render(&identity, &config)?;

	println!("{}", rendered.as_str());
	println!("# checksum: {}", rendered.checksum);

	Ok(())
}
