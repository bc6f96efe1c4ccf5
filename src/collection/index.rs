use crate::error::{ApiError, Result};
use indexmap::IndexMap;

/// An item that knows its fully-qualified path.
pub trait Located {
    fn location(&self) -> &str;
}

/// Name to one-or-more items; names repeat across namespaces.
#[derive(Debug, Clone)]
pub struct NameIndex<T> {
    buckets: IndexMap<String, Vec<T>>,
}

impl<T> Default for NameIndex<T> {
    fn default() -> Self {
        Self {
            buckets: IndexMap::new(),
        }
    }
}

impl<T: Located> NameIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: String, item: T) {
        self.buckets.entry(name).or_default().push(item);
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.buckets.get(name).is_some_and(|bucket| !bucket.is_empty())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Every item, grouped by name in load order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.buckets.values().flatten()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.buckets.values_mut().flatten()
    }

    /// Items sharing `name`, one per namespace.
    pub fn variants(&self, name: &str) -> &[T] {
        self.buckets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn single(&self, name: &str) -> Result<Option<usize>> {
        match self.buckets.get(name).map(Vec::len).unwrap_or(0) {
            0 => Ok(None),
            1 => Ok(Some(0)),
            _ => Err(ApiError::AmbiguousKey(name.to_string())),
        }
    }

    fn position(&self, name: &str, predicate: impl Fn(&T) -> bool) -> Option<usize> {
        self.buckets.get(name)?.iter().position(predicate)
    }

    fn position_in(&self, name: &str, prefix: &str) -> Option<usize> {
        self.position(name, |item| item.location().starts_with(prefix))
    }

    /// The only item called `name`; more than one is ambiguous.
    pub fn get(&self, name: &str) -> Result<Option<&T>> {
        Ok(self.single(name)?.and_then(|i| self.buckets.get(name)?.get(i)))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<Option<&mut T>> {
        let index = self.single(name)?;
        Ok(index.and_then(|i| self.buckets.get_mut(name)?.get_mut(i)))
    }

    /// First item called `name` whose path starts with `prefix`.
    pub fn get_in(&self, name: &str, prefix: &str) -> Option<&T> {
        let index = self.position_in(name, prefix)?;
        self.buckets.get(name)?.get(index)
    }

    pub fn get_in_mut(&mut self, name: &str, prefix: &str) -> Option<&mut T> {
        let index = self.position_in(name, prefix)?;
        self.buckets.get_mut(name)?.get_mut(index)
    }

    /// First item called `name` matching `predicate`.
    pub fn find_mut(&mut self, name: &str, predicate: impl Fn(&T) -> bool) -> Option<&mut T> {
        let index = self.position(name, predicate)?;
        self.buckets.get_mut(name)?.get_mut(index)
    }

    /// Remove and return the only item called `name`.
    pub fn take(&mut self, name: &str) -> Result<Option<T>> {
        let index = self.single(name)?;
        Ok(index.and_then(|i| self.take_at(name, i)))
    }

    pub fn take_in(&mut self, name: &str, prefix: &str) -> Option<T> {
        let index = self.position_in(name, prefix)?;
        self.take_at(name, index)
    }

    fn take_at(&mut self, name: &str, index: usize) -> Option<T> {
        let bucket = self.buckets.get_mut(name)?;
        let item = bucket.remove(index);
        if bucket.is_empty() {
            self.buckets.shift_remove(name);
        }
        Some(item)
    }
}
