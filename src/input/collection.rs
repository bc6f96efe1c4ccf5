use super::kind::InputKind;
use super::registry::KindRegistry;
use crate::atom::AtomFeed;
use crate::collection::{CollectionArgs, Located, NameIndex};
use crate::entity::{Entity, StandardActions};
use crate::error::{ApiError, Result};
use crate::namespace::Namespace;
use crate::resource::{Refresh, Resource};
use crate::service::Service;
use crate::transport::Args;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::debug;

/// A data input: an entity tagged with the kind it was loaded from.
#[derive(Debug, Clone)]
pub struct Input {
    kind: InputKind,
    entity: Entity,
}

impl Input {
    pub fn kind(&self) -> &InputKind {
        &self.kind
    }

    pub fn into_entity(self) -> Entity {
        self.entity
    }
}

impl Deref for Input {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        &self.entity
    }
}

impl DerefMut for Input {
    fn deref_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl Located for Input {
    fn location(&self) -> &str {
        self.entity.location()
    }
}

/// Inputs of every kind the server reports, indexed by name.
///
/// A refresh first rediscovers the kinds, then loads each kind's feed.
/// Names may repeat across kinds (a TCP and a UDP input on the same port),
/// so bare lookups can be ambiguous exactly as in [`crate::EntityCollection`].
#[derive(Debug, Clone)]
pub struct InputCollection {
    resource: Resource,
    registry: KindRegistry,
    index: NameIndex<Input>,
}

impl InputCollection {
    pub fn new(service: Service, path: &str) -> Self {
        Self {
            resource: Resource::new(service, path),
            registry: KindRegistry::new(),
            index: NameIndex::new(),
        }
    }

    pub fn service(&self) -> &Service {
        self.resource.service()
    }

    fn kind_path(&self, kind: &InputKind) -> String {
        format!("{}/{}", self.resource.path(), kind.relpath())
    }

    /// Kinds found by the last refresh.
    pub fn kinds(&mut self) -> Result<&KindRegistry> {
        self.validate()?;
        Ok(&self.registry)
    }

    pub fn get(&mut self, name: &str) -> Result<Option<&mut Input>> {
        self.validate()?;
        self.index.get_mut(name)
    }

    pub fn get_in(&mut self, name: &str, namespace: &Namespace) -> Result<Option<&mut Input>> {
        self.validate()?;
        let prefix = self.service().fullpath("", Some(namespace));
        Ok(self.index.get_in_mut(name, &prefix))
    }

    /// The input called `name` of the given kind.
    pub fn get_kind(&mut self, name: &str, kind: &InputKind) -> Result<Option<&mut Input>> {
        self.validate()?;
        Ok(self.index.find_mut(name, |input| input.kind() == kind))
    }

    pub fn contains(&mut self, name: &str) -> Result<bool> {
        self.validate()?;
        Ok(self.index.contains(name))
    }

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

    pub fn values(&mut self) -> Result<Vec<&mut Input>> {
        self.validate()?;
        Ok(self.index.values_mut().collect())
    }

    /// Always fails: an input can only be created for a specific kind.
    pub fn create(&mut self, name: &str, _args: &Args) -> Result<Option<&mut Input>> {
        Err(ApiError::UnsupportedOperation(format!(
            "Input '{}' needs a kind; use create_kind",
            name
        )))
    }

    /// Create `name` under `kind`, then fetch it from the refreshed listing.
    pub fn create_kind(
        &mut self,
        name: &str,
        kind: &InputKind,
        args: &Args,
    ) -> Result<Option<&mut Input>> {
        let path = self.kind_path(kind);
        let mut create_args = Args::new().with("name", name);
        create_args.merge(args);
        debug!(path = %path, name, kind = %kind, "Creating input");
        self.service().post(&path, &create_args)?;
        self.invalidate();
        self.get_kind(name, kind)
    }

    /// Delete the input called `name`; returns false if there is none.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        self.validate()?;
        let removed = self.index.take(name)?;
        self.remove_input(removed)
    }

    pub fn remove_in(&mut self, name: &str, namespace: &Namespace) -> Result<bool> {
        self.validate()?;
        let prefix = self.service().fullpath("", Some(namespace));
        let removed = self.index.take_in(name, &prefix);
        self.remove_input(removed)
    }

    fn remove_input(&mut self, input: Option<Input>) -> Result<bool> {
        match input {
            Some(input) => {
                self.invalidate();
                input.into_entity().remove()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn load_kind(&self, kind: &InputKind, index: &mut NameIndex<Input>) -> Result<()> {
        let path = self.kind_path(kind);
        let response = self
            .service()
            .get(&path, &CollectionArgs::new().count(-1).to_args())?;
        let feed = AtomFeed::parse(&response.body)?;
        for entry in feed.entries {
            let item_path = entry.link("alternate").map(str::to_string).ok_or_else(|| {
                ApiError::Format(format!("Input '{}' has no alternate link", entry.title))
            })?;
            let name = entry.title.clone();
            let entity =
                Entity::from_entry(self.service().clone(), &item_path, entry, Arc::new(StandardActions));
            index.insert(
                name,
                Input {
                    kind: kind.clone(),
                    entity,
                },
            );
        }
        Ok(())
    }
}

impl Refresh for InputCollection {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }

    fn refresh(&mut self) -> Result<()> {
        let registry = KindRegistry::discover(self.service(), self.resource.path())?;
        let mut index = NameIndex::new();
        for kind in registry.iter() {
            self.load_kind(kind, &mut index)?;
        }
        debug!(path = %self.resource.path(), kinds = registry.len(), names = index.len(), "Refreshed inputs");
        self.registry = registry;
        self.index = index;
        self.resource.mark_clean();
        Ok(())
    }
}
