//! Resource identity and the clean/dirty state machine.
//!
//! A resource is addressed by (service, path). It starts `Dirty`, becomes
//! `Clean` only through a successful refresh, and goes back to `Dirty` on any
//! action that may have changed server state. Readers call
//! [`Refresh::validate`] before touching cached data.

use crate::error::Result;
use crate::service::Service;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    Clean,
    Dirty,
}

#[derive(Debug, Clone)]
pub struct Resource {
    service: Service,
    path: String,
    state: ResourceState,
}

impl Resource {
    /// New resource at `path`, qualified against the service's ambient namespace.
    pub fn new(service: Service, path: &str) -> Self {
        let path = service.fullpath(path, None);
        Self {
            service,
            path,
            state: ResourceState::Dirty,
        }
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    /// Fully-qualified path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> ResourceState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == ResourceState::Dirty
    }

    pub fn invalidate(&mut self) {
        self.state = ResourceState::Dirty;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.state = ResourceState::Clean;
    }
}

/// Refresh protocol shared by entities and collections.
pub trait Refresh {
    fn resource(&self) -> &Resource;

    fn resource_mut(&mut self) -> &mut Resource;

    /// Re-read server state. Implementations mark the resource clean only on success.
    fn refresh(&mut self) -> Result<()>;

    fn path(&self) -> &str {
        self.resource().path()
    }

    fn is_dirty(&self) -> bool {
        self.resource().is_dirty()
    }

    fn invalidate(&mut self) {
        self.resource_mut().invalidate();
    }

    /// Refresh if dirty; the only transition back to clean.
    fn validate(&mut self) -> Result<&mut Self>
    where
        Self: Sized,
    {
        if self.is_dirty() {
            self.refresh()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::transport::MemoryTransport;
    use std::sync::Arc;

    struct Probe {
        resource: Resource,
        refreshes: usize,
        fail: bool,
    }

    impl Refresh for Probe {
        fn resource(&self) -> &Resource {
            &self.resource
        }

        fn resource_mut(&mut self) -> &mut Resource {
            &mut self.resource
        }

        fn refresh(&mut self) -> Result<()> {
            self.refreshes += 1;
            if self.fail {
                return Err(ApiError::Transport("connection refused".to_string()));
            }
            self.resource.mark_clean();
            Ok(())
        }
    }

    fn probe(fail: bool) -> Probe {
        let service = Service::new(Arc::new(MemoryTransport::new()));
        Probe {
            resource: Resource::new(service, "apps/local"),
            refreshes: 0,
            fail,
        }
    }

    #[test]
    fn validate_refreshes_only_when_dirty() {
        let mut p = probe(false);
        assert_eq!(p.resource.state(), ResourceState::Dirty);
        p.validate().unwrap();
        p.validate().unwrap();
        assert_eq!(p.refreshes, 1);
        assert_eq!(p.resource.state(), ResourceState::Clean);

        p.invalidate();
        p.validate().unwrap();
        assert_eq!(p.refreshes, 2);
    }

    #[test]
    fn failed_refresh_leaves_resource_dirty() {
        let mut p = probe(true);
        assert!(p.validate().is_err());
        assert!(p.is_dirty());
        assert!(p.validate().is_err());
        assert_eq!(p.refreshes, 2);
    }

    #[test]
    fn path_is_qualified() {
        assert_eq!(probe(false).path(), "/services/apps/local");
    }
}
