//! splunk-orm: Typed Entities over a Splunk-style Atom REST API
//!
//! Remote objects are exposed as [`Entity`] values that cache the server's
//! content, stage local writes until [`Entity::update`], and refresh lazily
//! when marked dirty. [`EntityCollection`] indexes an endpoint's members by
//! name with namespace-aware lookup, and [`InputCollection`] handles the
//! heterogeneous inputs tree whose kinds are discovered from the server.
//! HTTP goes through the [`Transport`] trait.

pub mod atom;
pub mod codec;
pub mod collection;
pub mod config;
pub mod entity;
pub mod error;
pub mod input;
pub mod logging;
pub mod namespace;
pub mod record;
pub mod resource;
pub mod service;
pub mod transport;

pub use collection::{CollectionArgs, EntityCollection};
pub use config::{ConfigLoader, ServiceConfig};
pub use entity::Entity;
pub use error::{ApiError, Result};
pub use input::{Input, InputCollection, InputKind, KindRegistry};
pub use namespace::{fullpath, Namespace, Sharing};
pub use record::{Record, Value};
pub use resource::{Refresh, Resource, ResourceState};
pub use service::Service;
pub use transport::{Args, HttpTransport, MemoryTransport, Transport};
