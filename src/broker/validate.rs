// self
use crate::{
	_prelude::*,
	broker::{BrokerConfig, duration},
	error::{DurationError, ValidationError},
	obs::{RenderSpan, RenderStage},
};

impl BrokerConfig {
	/// Validates structural invariants, returning the first violation found.
	///
	/// Rendering must not proceed when this fails.
	pub fn validate(&self) -> Result<(), ValidationError> {
		let _span = RenderSpan::new(RenderStage::Validate).entered();

		validate_issuer(&self.issuer)?;

		if self.storage.kind.is_empty() {
			return Err(ValidationError::MissingStorage);
		}
		if self.web.http.is_empty() {
			return Err(ValidationError::MissingWebAddress);
		}

		self.validate_connectors()?;
		self.validate_static_clients()?;

		validate_expiry("idTokens", self.expiry.id_tokens.as_deref())?;
		validate_expiry("signingKeys", self.expiry.signing_keys.as_deref())?;

		Ok(())
	}

	fn validate_connectors(&self) -> Result<(), ValidationError> {
		if self.connectors.is_empty() {
			return Err(ValidationError::NoConnectors);
		}

		let mut seen = BTreeSet::new();

		for (index, connector) in self.connectors.iter().enumerate() {
			if connector.id.is_empty() {
				return Err(ValidationError::EmptyConnectorField { index, field: "id" });
			}
			if connector.name.is_empty() {
				return Err(ValidationError::EmptyConnectorField { index, field: "name" });
			}
			if !seen.insert(connector.id.as_str()) {
				return Err(ValidationError::DuplicateConnectorId { id: connector.id.clone() });
			}
		}

		Ok(())
	}

	fn validate_static_clients(&self) -> Result<(), ValidationError> {
		for client in &self.static_clients {
			if client.id.is_empty() {
				return Err(ValidationError::MissingClientId);
			}

			let has_secret = client.secret.as_deref().is_some_and(|secret| !secret.is_empty())
				|| client.secret_env.as_deref().is_some_and(|env| !env.is_empty());

			if !has_secret {
				return Err(ValidationError::MissingClientSecret { id: client.id.clone() });
			}

			for uri in &client.redirect_uris {
				Url::parse(uri).map_err(|source| ValidationError::InvalidRedirectUri {
					uri: uri.clone(),
					source,
				})?;
			}
		}

		Ok(())
	}
}

fn validate_issuer(issuer: &str) -> Result<(), ValidationError> {
	if issuer.is_empty() {
		return Err(ValidationError::MissingIssuer);
	}

	Url::parse(issuer)
		.map(|_| ())
		.map_err(|source| ValidationError::InvalidIssuer { issuer: issuer.to_owned(), source })
}

fn validate_expiry(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
	let Some(value) = value else { return Ok(()) };
	let invalid =
		|reason| ValidationError::InvalidExpiry { field, value: value.to_owned(), reason };
	let parsed = duration::parse(value).map_err(invalid)?;

	if !parsed.is_positive() {
		return Err(invalid(DurationError::NonPositive));
	}

	Ok(())
}
