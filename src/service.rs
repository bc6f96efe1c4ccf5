//! Service handle
//!
//! A cheaply clonable handle that owns the transport and the ambient
//! namespace. Every resource keeps a clone; requests go through
//! [`Service::send`], which qualifies the path and turns error statuses into
//! [`ApiError::Http`].

use crate::atom::{error_message, AtomEntry};
use crate::collection::EntityCollection;
use crate::config::ServiceConfig;
use crate::entity::Entity;
use crate::error::{ApiError, Result};
use crate::input::InputCollection;
use crate::namespace::{fullpath, Namespace};
use crate::transport::{Args, HttpTransport, Method, Request, Response, Transport};
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

const SERVER_INFO_PATH: &str = "/services/server/info";

struct ServiceInner {
    transport: Arc<dyn Transport>,
    namespace: Namespace,
    version: RwLock<Option<String>>,
}

#[derive(Clone)]
pub struct Service {
    inner: Arc<ServiceInner>,
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("namespace", &self.inner.namespace)
            .finish_non_exhaustive()
    }
}

impl Service {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_namespace(transport, Namespace::default())
    }

    /// Service whose relative paths resolve against `namespace`.
    pub fn with_namespace(transport: Arc<dyn Transport>, namespace: Namespace) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                transport,
                namespace,
                version: RwLock::new(None),
            }),
        }
    }

    /// Build a service over the HTTP transport described by `config`.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate().map_err(ApiError::ConfigError)?;
        let transport = HttpTransport::from_config(&config.connection)?;
        Ok(Self::with_namespace(
            Arc::new(transport),
            config.namespace.clone(),
        ))
    }

    pub fn namespace(&self) -> &Namespace {
        &self.inner.namespace
    }

    /// Qualify `path` against `namespace` and this service's ambient namespace.
    pub fn fullpath(&self, path: &str, namespace: Option<&Namespace>) -> String {
        fullpath(path, namespace, &self.inner.namespace)
    }

    /// Send one request; statuses >= 400 become [`ApiError::Http`].
    pub fn send(&self, path: &str, request: &Request) -> Result<Response> {
        let path = self.fullpath(path, None);
        debug!(method = %request.method, path = %path, args = request.args.len(), "Sending request");
        let response = self.inner.transport.send(&path, request)?;
        if response.status >= 400 {
            let message = error_message(&response.body)
                .unwrap_or_else(|| String::from_utf8_lossy(&response.body).trim().to_string());
            warn!(method = %request.method, path = %path, status = response.status, "Request failed");
            return Err(ApiError::Http {
                status: response.status,
                message,
            });
        }
        Ok(response)
    }

    pub fn get(&self, path: &str, args: &Args) -> Result<Response> {
        self.send(path, &Request::new(Method::Get, args.clone()))
    }

    pub fn post(&self, path: &str, args: &Args) -> Result<Response> {
        self.send(path, &Request::new(Method::Post, args.clone()))
    }

    pub fn delete(&self, path: &str, args: &Args) -> Result<Response> {
        self.send(path, &Request::new(Method::Delete, args.clone()))
    }

    /// Entity at `path`, resolved against the ambient namespace.
    pub fn entity(&self, path: &str) -> Entity {
        Entity::new(self.clone(), path)
    }

    pub fn entity_in(&self, path: &str, namespace: &Namespace) -> Entity {
        Entity::new(self.clone(), &self.fullpath(path, Some(namespace)))
    }

    /// Homogeneous collection at `path`.
    pub fn collection(&self, path: &str) -> EntityCollection {
        EntityCollection::new(self.clone(), path)
    }

    pub fn collection_in(&self, path: &str, namespace: &Namespace) -> EntityCollection {
        EntityCollection::new_in(self.clone(), path, namespace)
    }

    /// Data inputs, whose kinds are discovered from the server.
    pub fn inputs(&self) -> InputCollection {
        InputCollection::new(self.clone(), "data/inputs")
    }

    /// Server version string, read from `server/info` once and cached.
    pub fn version(&self) -> Result<String> {
        let cached = self.inner.version.read().clone();
        if let Some(version) = cached {
            return Ok(version);
        }
        let response = self.get(SERVER_INFO_PATH, &Args::new())?;
        let entry = AtomEntry::parse(&response.body)?;
        let version = entry.content.get_string("version")?;
        *self.inner.version.write() = Some(version.clone());
        Ok(version)
    }

    /// True if the server version is at least `minimum`.
    pub fn version_is_at_least(&self, minimum: &str) -> Result<bool> {
        Ok(compare_versions(&self.version()?, minimum)? != Ordering::Less)
    }
}

/// Compare dotted version strings component by component.
///
/// Missing trailing components count as zero, so `6.0` equals `6.0.0`.
pub fn compare_versions(left: &str, right: &str) -> Result<Ordering> {
    let parse = |version: &str| -> Result<Vec<u64>> {
        version
            .split('.')
            .map(|part| {
                part.parse::<u64>().map_err(|_| {
                    ApiError::Format(format!("Invalid version component '{}' in '{}'", part, version))
                })
            })
            .collect()
    };
    let left = parse(left)?;
    let right = parse(right)?;
    let width = left.len().max(right.len());
    for i in 0..width {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return Ok(other),
        }
    }
    Ok(Ordering::Equal)
}
