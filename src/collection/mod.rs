//! Entity Collections
//!
//! A collection lists the members of one endpoint and indexes them by name.
//! Because names are only unique within a namespace, each name maps to a
//! list of entities: a bare lookup that finds more than one is ambiguous,
//! and a namespaced lookup picks the member whose path has the namespace's
//! prefix. Every refresh rebuilds the index from scratch.

mod args;
mod index;

pub use args::{CollectionArgs, SortDirection, SortMode};
pub use index::{Located, NameIndex};

use crate::atom::{AtomEntry, AtomFeed};
use crate::entity::{ActionPaths, Entity, StandardActions};
use crate::error::{ApiError, Result};
use crate::namespace::Namespace;
use crate::resource::{Refresh, Resource};
use crate::service::Service;
use crate::transport::Args;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Pagination metadata from the last feed, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub items_per_page: Option<String>,
    pub start_index: Option<String>,
    pub total_results: Option<String>,
}

impl PageInfo {
    pub(crate) fn from_feed(feed: &AtomFeed) -> Self {
        Self {
            items_per_page: feed.items_per_page.clone(),
            start_index: feed.start_index.clone(),
            total_results: feed.total_results.clone(),
        }
    }
}

/// How a collection turns feed entries into members.
pub trait CollectionShape: fmt::Debug + Send + Sync {
    /// Name the member is indexed under.
    fn item_name(&self, entry: &AtomEntry) -> Result<String> {
        Ok(entry.title.clone())
    }

    /// Path the member lives at.
    fn item_path(&self, entry: &AtomEntry) -> Result<String> {
        entry
            .link("alternate")
            .map(str::to_string)
            .ok_or_else(|| {
                ApiError::Format(format!("Entry '{}' has no alternate link", entry.title))
            })
    }

    fn item_actions(&self, _entry: &AtomEntry) -> Arc<dyn ActionPaths> {
        Arc::new(StandardActions)
    }
}

/// Title-named members at their alternate link.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultShape;

impl CollectionShape for DefaultShape {}

/// Members named by a content field, e.g. `sid` for search jobs.
#[derive(Debug, Clone)]
pub struct ContentKeyedShape {
    key: String,
}

impl ContentKeyedShape {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl CollectionShape for ContentKeyedShape {
    fn item_name(&self, entry: &AtomEntry) -> Result<String> {
        entry.content.get_string(&self.key)
    }
}

impl Located for Entity {
    fn location(&self) -> &str {
        self.resource().path()
    }
}

#[derive(Debug, Clone)]
pub struct EntityCollection {
    resource: Resource,
    relpath: String,
    index: NameIndex<Entity>,
    shape: Arc<dyn CollectionShape>,
    refresh_args: Args,
    page: PageInfo,
}

impl EntityCollection {
    pub fn new(service: Service, path: &str) -> Self {
        Self {
            resource: Resource::new(service, path),
            relpath: path.to_string(),
            index: NameIndex::new(),
            shape: Arc::new(DefaultShape),
            refresh_args: CollectionArgs::new().count(-1).to_args(),
            page: PageInfo::default(),
        }
    }

    /// Collection at `path` inside an explicit namespace.
    pub fn new_in(service: Service, path: &str, namespace: &Namespace) -> Self {
        let qualified = service.fullpath(path, Some(namespace));
        let mut collection = Self::new(service, &qualified);
        collection.relpath = path.to_string();
        collection
    }

    pub fn with_shape(mut self, shape: Arc<dyn CollectionShape>) -> Self {
        self.shape = shape;
        self
    }

    /// Arguments sent with every refresh (default: `count=-1`).
    pub fn with_refresh_args(mut self, args: CollectionArgs) -> Self {
        self.refresh_args = args.to_args();
        self
    }

    pub fn service(&self) -> &Service {
        self.resource.service()
    }

    /// Pagination metadata of the last refresh.
    pub fn page_info(&self) -> &PageInfo {
        &self.page
    }

    /// Refresh once with `args` instead of the configured refresh arguments.
    pub fn refresh_with(&mut self, args: &CollectionArgs) -> Result<()> {
        self.load(&args.to_args())
    }

    fn load(&mut self, args: &Args) -> Result<()> {
        let response = self.service().get(self.resource.path(), args)?;
        let feed = AtomFeed::parse(&response.body)?;
        let page = PageInfo::from_feed(&feed);

        let mut index = NameIndex::new();
        for entry in feed.entries {
            let name = self.shape.item_name(&entry)?;
            let path = self.shape.item_path(&entry)?;
            let actions = self.shape.item_actions(&entry);
            let entity = Entity::from_entry(self.service().clone(), &path, entry, actions);
            index.insert(name, entity);
        }

        debug!(path = %self.resource.path(), names = index.len(), "Refreshed collection");
        self.index = index;
        self.page = page;
        self.resource.mark_clean();
        Ok(())
    }

    fn namespace_prefix(&self, namespace: &Namespace) -> String {
        self.service().fullpath("", Some(namespace))
    }

    /// The member called `name`, or an ambiguity error if several namespaces have one.
    pub fn get(&mut self, name: &str) -> Result<Option<&mut Entity>> {
        self.validate()?;
        self.index.get_mut(name)
    }

    /// The member called `name` inside `namespace`; absence is not an error.
    pub fn get_in(&mut self, name: &str, namespace: &Namespace) -> Result<Option<&mut Entity>> {
        self.validate()?;
        let prefix = self.namespace_prefix(namespace);
        Ok(self.index.get_in_mut(name, &prefix))
    }

    pub fn contains(&mut self, name: &str) -> Result<bool> {
        self.validate()?;
        Ok(self.index.contains(name))
    }

    /// Number of distinct names.
    pub fn len(&mut self) -> Result<usize> {
        self.validate()?;
        Ok(self.index.len())
    }

    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn names(&mut self) -> Result<Vec<String>> {
        self.validate()?;
        Ok(self.index.names().map(str::to_string).collect())
    }

    /// Every member in load order.
    pub fn values(&mut self) -> Result<Vec<&mut Entity>> {
        self.validate()?;
        Ok(self.index.values_mut().collect())
    }

    /// Create `name` with `args`, then fetch it from the refreshed listing.
    pub fn create(&mut self, name: &str, args: &Args) -> Result<Option<&mut Entity>> {
        let path = self.resource.path().to_string();
        self.post_create(&path, name, args)?;
        self.get(name)
    }

    /// Create `name` inside `namespace`.
    pub fn create_in(
        &mut self,
        name: &str,
        args: &Args,
        namespace: &Namespace,
    ) -> Result<Option<&mut Entity>> {
        let path = self.service().fullpath(&self.relpath, Some(namespace));
        self.post_create(&path, name, args)?;
        self.get_in(name, namespace)
    }

    fn post_create(&mut self, path: &str, name: &str, args: &Args) -> Result<()> {
        let mut create_args = Args::new().with("name", name);
        create_args.merge(args);
        debug!(path = %path, name, "Creating collection member");
        self.service().post(path, &create_args)?;
        self.invalidate();
        Ok(())
    }

    /// Delete the member called `name`; returns false if there is none.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        self.validate()?;
        let removed = self.index.take(name)?;
        self.remove_entity(removed)
    }

    pub fn remove_in(&mut self, name: &str, namespace: &Namespace) -> Result<bool> {
        self.validate()?;
        let prefix = self.namespace_prefix(namespace);
        let removed = self.index.take_in(name, &prefix);
        self.remove_entity(removed)
    }

    fn remove_entity(&mut self, entity: Option<Entity>) -> Result<bool> {
        match entity {
            Some(entity) => {
                self.invalidate();
                entity.remove()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Refresh for EntityCollection {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }

    fn refresh(&mut self) -> Result<()> {
        let args = self.refresh_args.clone();
        self.load(&args)
    }
}
