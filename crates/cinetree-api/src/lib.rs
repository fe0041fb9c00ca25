//! TMDB v3 client library for cinetree.
//!
//! Responses are kept as generic JSON trees behind [`TreeView`] and read
//! through small typed views. A [`Session`] binds one API key to the
//! remote configuration; [`SessionRegistry`] hands out one session per key.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cinetree_api::{HasName, HttpTransport, SessionRegistry};
//!
//! # fn main() -> cinetree_api::Result<()> {
//! let registry = SessionRegistry::new(Arc::new(HttpTransport::builder().build()?))?;
//! let session = registry.instance("")?;
//! for show in session.tv().popular("en-US", 1)?.items() {
//!     let _name = show.name()?;
//! }
//! # Ok(())
//! # }
//! ```

/// Merged remote configuration.
pub mod configuration;

/// TMDB v3 path segments and argument names.
pub mod endpoints;

/// Error types.
pub mod error;

/// Paged listings, search and lookups.
pub mod query;

/// Sessions and the per-key registry.
pub mod session;

/// Network collaborator.
pub mod transport;

/// Ownership-aware JSON tree wrapper.
pub mod tree;

/// Typed views over trees.
pub mod views;

#[cfg(test)]
mod stub;

pub use configuration::Configuration;
pub use error::{Error, Result, TransportError, ValidationError};
pub use query::{Get, ResultPage, Search, TvFilter};
pub use session::{Session, SessionRegistry, SessionRegistryBuilder};
pub use transport::{HttpTransport, HttpTransportBuilder, Transport};
pub use tree::{Tree, TreeView};
pub use views::{HasId, HasName, MediaSummary, Movie, TreeBacked, TvSeries, TvSummary};
