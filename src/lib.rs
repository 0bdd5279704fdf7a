//! Render deployable configuration for an embedded OpenID Connect identity broker from the
//! declarative identity resources managed by an operator.
//!
//! The pipeline runs strictly forward: [`connector::filter_connectors`] narrows the declared
//! connectors to the supported provider kinds, [`connector::translate_connectors`] decodes each
//! opaque payload into its typed schema through a [`connector::ConnectorRegistry`],
//! [`broker::assemble`] builds the [`broker::BrokerConfig`] aggregate, the aggregate validates
//! itself, and [`render::render_template`] emits the final document. [`render::Renderer`] wires
//! the stages together.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod broker;
pub mod connector;
pub mod error;
pub mod identity;
pub mod obs;
pub mod render;

pub use render::{RenderedConfig, Renderer, render_broker_config};

mod _prelude {
	pub use std::{
		any::Any,
		collections::{BTreeMap, BTreeSet},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::Result;
}

pub use url;
#[cfg(test)] use color_eyre as _;
