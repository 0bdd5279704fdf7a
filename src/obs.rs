//! Optional observability helpers for the render pipeline.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `identity_broker_config.render` with the
//!   `stage` field, plus a debug event for every connector dropped by the provider filter.
//! - Enable `metrics` to increment the `identity_broker_config_render_total` counter for every
//!   attempt/success/failure, labeled by `outcome`, and
//!   `identity_broker_config_connector_skipped_total`, labeled by `kind`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Pipeline stages observed by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderStage {
	/// Whole render invocation.
	Pipeline,
	/// Supported-provider filtering.
	Filter,
	/// Payload decoding into typed configs.
	Translate,
	/// Aggregate assembly.
	Assemble,
	/// Structural validation.
	Validate,
	/// Serialization and template execution.
	Template,
}
impl RenderStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RenderStage::Pipeline => "pipeline",
			RenderStage::Filter => "filter",
			RenderStage::Translate => "translate",
			RenderStage::Assemble => "assemble",
			RenderStage::Validate => "validate",
			RenderStage::Template => "template",
		}
	}
}
impl Display for RenderStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each render invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderOutcome {
	/// Entry to the renderer.
	Attempt,
	/// Document produced.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RenderOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RenderOutcome::Attempt => "attempt",
			RenderOutcome::Success => "success",
			RenderOutcome::Failure => "failure",
		}
	}
}
impl Display for RenderOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
