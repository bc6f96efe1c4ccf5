//! Kind discovery for heterogeneous collections.
//!
//! The server describes its own input taxonomy: every entry of the inputs
//! feed either carries a `create` link (a terminal kind that can hold inputs)
//! or is a grouping level to walk into. The walk is repeated on each refresh
//! since the set of kinds depends on server version and installed apps.

use super::kind::InputKind;
use crate::atom::AtomFeed;
use crate::collection::CollectionArgs;
use crate::error::Result;
use crate::service::Service;
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Relative paths that are never kinds of their own.
const SKIPPED_RELPATHS: &[&str] = &["all", "tcp/ssl"];

/// Deepest grouping level the walk descends into.
pub const MAX_KIND_DEPTH: usize = 4;

/// One discovered kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindEntry {
    pub relpath: String,
    pub kind: InputKind,
}

/// Relative path to kind, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: IndexMap<String, InputKind>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the feed tree below `root` and register every creatable kind.
    pub fn discover(service: &Service, root: &str) -> Result<Self> {
        let mut registry = Self::new();
        registry.walk(service, root, "", 1)?;
        debug!(root, kinds = registry.len(), "Discovered input kinds");
        Ok(registry)
    }

    fn walk(&mut self, service: &Service, root: &str, subpath: &str, depth: usize) -> Result<()> {
        let path = join(root, subpath);
        let response = service.get(&path, &CollectionArgs::new().count(-1).to_args())?;
        let feed = AtomFeed::parse(&response.body)?;

        for entry in feed.entries {
            let relpath = join(subpath, &entry.title);
            if SKIPPED_RELPATHS.contains(&relpath.as_str()) {
                continue;
            }
            if entry.link("create").is_some() {
                self.register(&relpath);
            } else if depth < MAX_KIND_DEPTH {
                self.walk(service, root, &relpath, depth + 1)?;
            } else {
                warn!(relpath = %relpath, "Input kind tree deeper than {}", MAX_KIND_DEPTH);
            }
        }
        Ok(())
    }

    /// Register `relpath`, binding it to a known kind where there is one.
    pub fn register(&mut self, relpath: &str) {
        self.kinds
            .insert(relpath.to_string(), InputKind::from_relpath(relpath));
    }

    pub fn get(&self, relpath: &str) -> Option<&InputKind> {
        self.kinds.get(relpath)
    }

    pub fn contains(&self, kind: &InputKind) -> bool {
        self.kinds.contains_key(kind.relpath())
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputKind> {
        self.kinds.values()
    }

    pub fn entries(&self) -> Vec<KindEntry> {
        self.kinds
            .iter()
            .map(|(relpath, kind)| KindEntry {
                relpath: relpath.clone(),
                kind: kind.clone(),
            })
            .collect()
    }
}

fn join(base: &str, tail: &str) -> String {
    match (base.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{}/{}", base.trim_end_matches('/'), tail),
    }
}
