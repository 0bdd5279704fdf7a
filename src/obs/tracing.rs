// self
use crate::{_prelude::*, obs::RenderStage};

/// A span builder used by pipeline stages.
#[derive(Clone, Debug)]
pub struct RenderSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RenderSpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(stage: RenderStage) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::debug_span!("identity_broker_config.render", stage = stage.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self {}
		}
	}

	/// Enters the span until the returned guard drops.
	pub fn entered(self) -> RenderSpanGuard {
		#[cfg(feature = "tracing")]
		{
			RenderSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			RenderSpanGuard {}
		}
	}
}

/// RAII guard returned by [`RenderSpan::entered`].
pub struct RenderSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for RenderSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RenderSpanGuard(..)")
	}
}
