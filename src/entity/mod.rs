//! Entities
//!
//! A single remote object with a cached copy of its server content and a
//! map of staged writes. Reads consult staged writes first, then the cached
//! content (refreshing it if the entity is dirty). Staged writes are sent by
//! [`Entity::update`] and survive unrelated refreshes until then.

mod actions;

pub use actions::{default_action_path, ActionPaths, ReadOnlyActions, StandardActions};

use crate::atom::{AtomEntry, AtomFeed};
use crate::error::{ApiError, Result};
use crate::namespace::Namespace;
use crate::record::{convert, Record, Value};
use crate::resource::{Refresh, Resource};
use crate::service::Service;
use crate::transport::Args;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

macro_rules! entity_getters {
    ($($(#[$doc:meta])* $name:ident, $name_or:ident, $ty:ty, $conv:path;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self, key: &str) -> Result<$ty> {
                convert(self.lookup(key)?, key, $conv)?
                    .ok_or_else(|| ApiError::MissingKey(key.to_string()))
            }

            pub fn $name_or(&mut self, key: &str, default: $ty) -> Result<$ty> {
                Ok(convert(self.lookup(key)?, key, $conv)?.unwrap_or(default))
            }
        )*
    };
}

#[derive(Debug, Clone)]
pub struct Entity {
    resource: Resource,
    title: String,
    links: IndexMap<String, String>,
    content: Record,
    pending: Args,
    actions: Arc<dyn ActionPaths>,
}

impl Entity {
    /// Entity at `path`; its content is fetched on first read.
    pub fn new(service: Service, path: &str) -> Self {
        Self {
            resource: Resource::new(service, path),
            title: String::new(),
            links: IndexMap::new(),
            content: Record::new(),
            pending: Args::new(),
            actions: Arc::new(StandardActions),
        }
    }

    /// Entity already loaded from a feed entry; starts clean.
    pub fn from_entry(
        service: Service,
        path: &str,
        entry: AtomEntry,
        actions: Arc<dyn ActionPaths>,
    ) -> Self {
        let mut entity = Self::new(service, path).with_actions(actions);
        entity.load(entry);
        entity.resource.mark_clean();
        entity
    }

    pub fn with_actions(mut self, actions: Arc<dyn ActionPaths>) -> Self {
        self.actions = actions;
        self
    }

    fn load(&mut self, entry: AtomEntry) {
        self.title = entry.title;
        self.links = entry.links;
        self.content = entry.content;
    }

    pub fn service(&self) -> &Service {
        self.resource.service()
    }

    /// Title from the last load. Unlike [`Entity::name`] this never refreshes.
    pub fn cached_title(&self) -> &str {
        &self.title
    }

    /// Entity name (its Atom title).
    pub fn name(&mut self) -> Result<String> {
        self.validate()?;
        Ok(self.title.clone())
    }

    pub fn links(&mut self) -> Result<&IndexMap<String, String>> {
        self.validate()?;
        Ok(&self.links)
    }

    /// Last known server content.
    pub fn content(&mut self) -> Result<&Record> {
        self.validate()?;
        Ok(&self.content)
    }

    /// Namespace from the `eai:acl` block; empty when the server sent none.
    pub fn namespace(&mut self) -> Result<Namespace> {
        self.validate()?;
        match self.content.get_record("eai:acl") {
            Some(acl) => Namespace::from_acl(acl),
            None => Ok(Namespace::default()),
        }
    }

    pub fn is_disabled(&mut self) -> Result<bool> {
        self.get_boolean_or("disabled", false)
    }

    pub fn action_path(&self, action: &str) -> Result<String> {
        self.actions.action_path(self.resource.path(), action)
    }

    fn lookup(&mut self, key: &str) -> Result<Option<&Value>> {
        if self.pending.contains_key(key) {
            return Ok(self.pending.get(key));
        }
        self.validate()?;
        Ok(self.content.get(key))
    }

    pub fn get(&mut self, key: &str) -> Result<Value> {
        self.lookup(key)?
            .cloned()
            .ok_or_else(|| ApiError::MissingKey(key.to_string()))
    }

    pub fn get_or(&mut self, key: &str, default: Value) -> Result<Value> {
        Ok(self.lookup(key)?.cloned().unwrap_or(default))
    }

    pub fn get_string(&mut self, key: &str) -> Result<String> {
        convert(self.lookup(key)?, key, |s| Ok(s.to_string()))?
            .ok_or_else(|| ApiError::MissingKey(key.to_string()))
    }

    pub fn get_string_or(&mut self, key: &str, default: &str) -> Result<String> {
        Ok(convert(self.lookup(key)?, key, |s| Ok(s.to_string()))?
            .unwrap_or_else(|| default.to_string()))
    }

    entity_getters! {
        get_boolean, get_boolean_or, bool, crate::codec::to_boolean;
        get_integer, get_integer_or, i32, crate::codec::to_integer;
        get_long, get_long_or, i64, crate::codec::to_long;
        get_float, get_float_or, f64, crate::codec::to_float;
        /// Byte count with an optional KB/MB/GB suffix.
        get_byte_count, get_byte_count_or, i64, crate::codec::to_byte_count;
        get_date, get_date_or, DateTime<Utc>, crate::codec::to_date;
    }

    pub fn get_string_array(&mut self, key: &str) -> Result<Vec<String>> {
        self.lookup(key)?
            .ok_or_else(|| ApiError::MissingKey(key.to_string()))?
            .to_string_array(key)
    }

    pub fn get_string_array_or(&mut self, key: &str, default: Vec<String>) -> Result<Vec<String>> {
        match self.lookup(key)? {
            Some(value) => value.to_string_array(key),
            None => Ok(default),
        }
    }

    /// Stage a write locally. No request is made and the entity stays in its current state.
    pub fn set_cache_value(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.pending.insert(key, value);
    }

    pub fn pending_writes(&self) -> &Args {
        &self.pending
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drop staged writes without sending them.
    pub fn discard_pending(&mut self) {
        self.pending = Args::new();
    }

    /// Send staged writes.
    pub fn update(&mut self) -> Result<()> {
        self.update_with(&Args::new())
    }

    /// Send staged writes merged with `extra` (which wins on collisions).
    ///
    /// With nothing to send this makes no request.
    pub fn update_with(&mut self, extra: &Args) -> Result<()> {
        let mut args = self.pending.clone();
        args.merge(extra);
        if args.is_empty() {
            return Ok(());
        }

        let path = self.action_path("edit")?;
        debug!(path = %path, fields = args.len(), "Updating entity");
        self.service().post(&path, &args)?;
        self.pending = Args::new();
        self.invalidate();
        Ok(())
    }

    fn post_action(&mut self, action: &str) -> Result<()> {
        let path = self.action_path(action)?;
        debug!(path = %path, action, "Posting entity action");
        self.service().post(&path, &Args::new())?;
        self.invalidate();
        Ok(())
    }

    pub fn enable(&mut self) -> Result<()> {
        self.post_action("enable")
    }

    pub fn disable(&mut self) -> Result<()> {
        self.post_action("disable")
    }

    pub fn reload(&mut self) -> Result<()> {
        self.post_action("reload")
    }

    /// Delete the entity on the server.
    pub fn remove(self) -> Result<()> {
        let path = self.action_path("remove")?;
        debug!(path = %path, "Removing entity");
        self.service().delete(&path, &Args::new())?;
        Ok(())
    }
}

impl Refresh for Entity {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }

    /// GET the entity and replace the cached snapshot. An empty feed clears it.
    fn refresh(&mut self) -> Result<()> {
        let response = self.service().get(self.resource.path(), &Args::new())?;
        let feed = AtomFeed::parse(&response.body)?;
        match feed.entries.into_iter().next() {
            Some(entry) => self.load(entry),
            None => self.load(AtomEntry::default()),
        }
        debug!(path = %self.resource.path(), keys = self.content.len(), "Refreshed entity");
        self.resource.mark_clean();
        Ok(())
    }
}
