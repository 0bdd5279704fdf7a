// self
use crate::obs::RenderOutcome;

/// Records a render outcome via the global metrics recorder (when enabled).
pub fn record_render_outcome(outcome: RenderOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("identity_broker_config_render_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records a connector dropped by the supported-provider filter.
pub fn record_connector_skipped(kind: &str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(kind, "Connector type is not in the supported providers; skipping.");

	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"identity_broker_config_connector_skipped_total",
			"kind" => kind.to_owned()
		)
		.increment(1);
	}

	#[cfg(not(any(feature = "tracing", feature = "metrics")))]
	{
		let _ = kind;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_features() {
		record_render_outcome(RenderOutcome::Failure);
		record_connector_skipped("ldap");
	}
}
