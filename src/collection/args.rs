use crate::transport::Args;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Auto,
    Alpha,
    AlphaCase,
    Num,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortMode::Auto => "auto",
            SortMode::Alpha => "alpha",
            SortMode::AlphaCase => "alpha_case",
            SortMode::Num => "num",
        })
    }
}

/// Pagination, sort and filter arguments for listing a collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionArgs {
    pub count: Option<i64>,
    pub offset: Option<i64>,
    pub search: Option<String>,
    pub sort_dir: Option<SortDirection>,
    pub sort_key: Option<String>,
    pub sort_mode: Option<SortMode>,
}

impl CollectionArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of items; `-1` lists everything.
    pub fn count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort_dir(mut self, dir: SortDirection) -> Self {
        self.sort_dir = Some(dir);
        self
    }

    pub fn sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    pub fn sort_mode(mut self, mode: SortMode) -> Self {
        self.sort_mode = Some(mode);
        self
    }

    pub fn to_args(&self) -> Args {
        let mut args = Args::new();
        if let Some(count) = self.count {
            args.insert("count", count);
        }
        if let Some(offset) = self.offset {
            args.insert("offset", offset);
        }
        if let Some(search) = &self.search {
            args.insert("search", search.as_str());
        }
        if let Some(dir) = self.sort_dir {
            args.insert("sort_dir", dir.to_string());
        }
        if let Some(key) = &self.sort_key {
            args.insert("sort_key", key.as_str());
        }
        if let Some(mode) = self.sort_mode {
            args.insert("sort_mode", mode.to_string());
        }
        args
    }
}

impl From<CollectionArgs> for Args {
    fn from(args: CollectionArgs) -> Self {
        args.to_args()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_set_fields_are_sent() {
        let args = CollectionArgs::new()
            .count(10)
            .offset(20)
            .sort_dir(SortDirection::Desc)
            .sort_mode(SortMode::AlphaCase)
            .to_args();
        assert_eq!(
            args.to_pairs().unwrap(),
            vec![
                ("count".to_string(), "10".to_string()),
                ("offset".to_string(), "20".to_string()),
                ("sort_dir".to_string(), "desc".to_string()),
                ("sort_mode".to_string(), "alpha_case".to_string()),
            ]
        );
        assert!(CollectionArgs::new().to_args().is_empty());
    }
}
