// crates.io
use serde_yaml::Value;
// self
use identity_broker_config::{
	Renderer,
	connector::{ConnectorRegistry, OidcConfig},
	error::{ConnectorError, Error, ValidationError},
	identity::{DeclaredConnector, IdentityConfigSpec, IdentitySpec, IngressConfig, RawConfig},
	render_broker_config,
};

const RESOURCE: &str = r#"
identity:
  oidcRedirectUris:
    - https://kots.example.com/api/v1/oidc/login/callback
  oauth2AlwaysShowLoginScreen: false
  idTokensExpiration: 24h
  signingKeysExpiration: 6h
  supportedProviders:
    - oidc
config:
  ingressConfig:
    ingressType: Ingress
    ingress:
      host: kots.example.com
      path: /
      tlsSecretName: kotsadm-tls
  dexConnectors:
    - type: oidc
      name: Okta
      id: okta
      config:
        issuer: https://okta.example.com
        clientID: kots
        clientSecret: s3cr3t
        redirectURI: "{{OIDCIdentityCallbackURL}}"
        insecureEnableGroups: true
    - type: ldap
      name: Corporate LDAP
      id: corp
      config:
        host: ldap.example.com:636
"#;

#[derive(serde::Deserialize)]
struct Resource {
	identity: IdentitySpec,
	config: IdentityConfigSpec,
}

fn load_resource() -> Resource {
	serde_yaml::from_str(RESOURCE).expect("Resource fixture should deserialize.")
}

fn parse_document(bytes: &[u8]) -> Value {
	serde_yaml::from_slice(bytes).expect("Rendered document should be valid YAML.")
}

#[test]
fn supported_providers_drop_other_connectors() {
	let resource = load_resource();
	let rendered = render_broker_config(&resource.identity, &resource.config)
		.expect("Resource fixture should render.");
	let document = parse_document(rendered.as_bytes());
	let connectors =
		document["connectors"].as_sequence().expect("Document should list connectors.");

	assert_eq!(connectors.len(), 1);
	assert_eq!(connectors[0]["type"], "oidc");
	assert_eq!(connectors[0]["id"], "okta");
	assert_eq!(connectors[0]["config"]["redirectURI"], "https://kots.example.com/dex/callback");
	assert_eq!(connectors[0]["config"]["insecureEnableGroups"], true);
}

#[test]
fn document_carries_fixed_broker_settings() {
	let resource = load_resource();
	let rendered = render_broker_config(&resource.identity, &resource.config)
		.expect("Resource fixture should render.");
	let document = parse_document(rendered.as_bytes());
	let client = &document["staticClients"][0];

	assert_eq!(document["issuer"], "https://kots.example.com/dex");
	assert_eq!(document["storage"]["type"], "postgres");
	assert_eq!(document["storage"]["config"]["ssl"]["mode"], "disable");
	assert_eq!(document["web"]["http"], "0.0.0.0:5556");
	assert_eq!(document["frontend"]["issuer"], "KOTS");
	assert_eq!(document["oauth2"]["skipApprovalScreen"], true);
	assert_eq!(document["expiry"]["idTokens"], "24h");
	assert_eq!(document["expiry"]["signingKeys"], "6h");
	assert_eq!(document["enablePasswordDB"], false);
	assert_eq!(client["id"], "kotsadm");
	assert_eq!(client["secretEnv"], "DEX_CLIENT_SECRET");
	assert!(client.get("secret").is_none());
	assert_eq!(
		client["redirectURIs"],
		Value::Sequence(vec!["https://kots.example.com/api/v1/oidc/login/callback".into()])
	);
}

#[test]
fn override_address_replaces_ingress_issuer() {
	let mut resource = load_resource();

	resource.config.identity_service_address = Some("https://sso.example.com/idp".into());

	let rendered = render_broker_config(&resource.identity, &resource.config)
		.expect("Override fixture should render.");
	let document = parse_document(rendered.as_bytes());

	assert_eq!(document["issuer"], "https://sso.example.com/idp");
	assert_eq!(
		document["connectors"][0]["config"]["redirectURI"],
		"https://sso.example.com/idp/callback"
	);
}

#[test]
fn unrestricted_without_connectors_fails() {
	let identity = IdentitySpec::default();
	let config = IdentityConfigSpec {
		ingress_config: IngressConfig::node_port(30880),
		..Default::default()
	};
	let err = render_broker_config(&identity, &config)
		.expect_err("Zero connectors must not produce a document.");

	assert!(matches!(err, Error::Connector(ConnectorError::NoConnectors)));
}

#[test]
fn unregistered_type_is_reported() {
	let identity = IdentitySpec::default();
	let config = IdentityConfigSpec {
		ingress_config: IngressConfig::node_port(30880),
		dex_connectors: vec![
			DeclaredConnector::new("oidc", "Okta", "okta"),
			DeclaredConnector::new("saml", "Legacy SSO", "legacy"),
		],
		..Default::default()
	};
	let err = render_broker_config(&identity, &config)
		.expect_err("Unregistered connector types must fail.");

	assert!(matches!(
		err,
		Error::Connector(ConnectorError::UnknownType { ref kind }) if kind == "saml"
	));
	assert!(err.to_string().contains("saml"));
}

#[test]
fn missing_address_fails_validation() {
	let identity = IdentitySpec::default();
	let config = IdentityConfigSpec {
		dex_connectors: vec![DeclaredConnector::new("github", "GitHub", "github")],
		..Default::default()
	};
	let err = render_broker_config(&identity, &config)
		.expect_err("An issuer without a host must fail validation.");

	assert!(matches!(
		err,
		Error::Validation(ValidationError::InvalidIssuer { ref issuer, .. }) if issuer == "/dex"
	));
}

#[test]
fn extended_registry_accepts_custom_kind() {
	let identity = IdentitySpec::default();
	let config = IdentityConfigSpec {
		ingress_config: IngressConfig::node_port(30880),
		dex_connectors: vec![DeclaredConnector::new("keycloak", "Keycloak", "keycloak")
			.with_config(RawConfig::from_json(&serde_json::json!({
				"issuer": "https://keycloak.example.com/realms/kots"
			})))],
		..Default::default()
	};

	assert!(matches!(
		render_broker_config(&identity, &config),
		Err(Error::Connector(ConnectorError::UnknownType { .. }))
	));

	let renderer = Renderer::default()
		.with_registry(ConnectorRegistry::default().with::<OidcConfig>("keycloak"));
	let broker = renderer.build(&identity, &config).expect("Registered alias should build.");
	let rendered = renderer.render(&identity, &config).expect("Registered alias should render.");
	let document = parse_document(rendered.as_bytes());

	assert_eq!(
		broker.connectors[0].config_as::<OidcConfig>().map(|config| config.issuer.as_str()),
		Some("https://keycloak.example.com/realms/kots")
	);
	assert_eq!(document["connectors"][0]["type"], "keycloak");
}

#[test]
fn identical_inputs_render_identical_bytes() {
	let resource = load_resource();
	let renderer = Renderer::default();
	let first = renderer
		.render(&resource.identity, &resource.config)
		.expect("First render should succeed.");
	let second = renderer
		.render(&resource.identity, &resource.config)
		.expect("Second render should succeed.");

	assert_eq!(first.as_bytes(), second.as_bytes());
	assert_eq!(first.checksum, second.checksum);
}

#[test]
fn filter_runs_before_unknown_types_are_translated() {
	let identity = IdentitySpec { supported_providers: vec!["oidc".into()], ..Default::default() };
	let only_saml = IdentityConfigSpec {
		ingress_config: IngressConfig::node_port(30880),
		dex_connectors: vec![DeclaredConnector::new("saml", "Legacy SSO", "legacy")],
		..Default::default()
	};
	let err = render_broker_config(&identity, &only_saml)
		.expect_err("Filtering everything out must fail.");

	assert!(matches!(err, Error::Connector(ConnectorError::NoConnectors)));

	let mixed = IdentityConfigSpec {
		dex_connectors: vec![
			DeclaredConnector::new("saml", "Legacy SSO", "legacy"),
			DeclaredConnector::new("oidc", "Okta", "okta"),
		],
		..only_saml
	};
	let rendered = render_broker_config(&identity, &mixed)
		.expect("Unsupported connectors should be dropped before translation.");
	let document = parse_document(rendered.as_bytes());
	let connectors =
		document["connectors"].as_sequence().expect("Document should list connectors.");

	assert_eq!(connectors.len(), 1);
	assert_eq!(connectors[0]["type"], "oidc");
}
