//! Namespaces and path qualification.
//!
//! Item names are unique only within an (owner, app, sharing) namespace.
//! The same triple determines the `/servicesNS/<owner>/<app>/` prefix of a
//! fully-qualified path.

use crate::error::{ApiError, Result};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sharing level of a knowledge object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sharing {
    User,
    App,
    Global,
    System,
}

impl Sharing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sharing::User => "user",
            Sharing::App => "app",
            Sharing::Global => "global",
            Sharing::System => "system",
        }
    }
}

impl fmt::Display for Sharing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sharing {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(Sharing::User),
            "app" => Ok(Sharing::App),
            "global" => Ok(Sharing::Global),
            "system" => Ok(Sharing::System),
            other => Err(ApiError::Format(format!("Unknown sharing level: {}", other))),
        }
    }
}

/// An (owner, app, sharing) triple; unset parts are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharing: Option<Sharing>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn app(mut self, app: impl Into<String>) -> Self {
        self.app = Some(app.into());
        self
    }

    pub fn sharing(mut self, sharing: Sharing) -> Self {
        self.sharing = Some(sharing);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_none() && self.app.is_none() && self.sharing.is_none()
    }

    /// Read the namespace from an `eai:acl` record.
    pub fn from_acl(acl: &Record) -> Result<Self> {
        let text = |key: &str| -> Result<Option<String>> {
            match acl.get(key) {
                Some(_) => acl.get_string(key).map(Some),
                None => Ok(None),
            }
        };
        let sharing = match text("sharing")? {
            Some(s) => Some(s.parse()?),
            None => None,
        };
        Ok(Self {
            owner: text("owner")?,
            app: text("app")?,
            sharing,
        })
    }

    /// Fields of `self` override those of `ambient`.
    fn over(&self, ambient: &Namespace) -> Namespace {
        Namespace {
            owner: self.owner.clone().or_else(|| ambient.owner.clone()),
            app: self.app.clone().or_else(|| ambient.app.clone()),
            sharing: self.sharing.or(ambient.sharing),
        }
    }
}

/// Qualify `path` against an explicit namespace and the ambient one.
///
/// Paths starting with `/` are already qualified and returned unchanged.
pub fn fullpath(path: &str, namespace: Option<&Namespace>, ambient: &Namespace) -> String {
    if path.starts_with('/') {
        return path.to_string();
    }

    let effective = match namespace {
        Some(ns) => ns.over(ambient),
        None if ambient.owner.is_none() && ambient.app.is_none() => {
            return format!("/services/{}", path);
        }
        None => ambient.clone(),
    };

    let mut owner = effective.owner;
    let mut app = effective.app;
    match effective.sharing {
        Some(Sharing::App) | Some(Sharing::Global) => owner = Some("nobody".to_string()),
        Some(Sharing::System) => {
            owner = Some("nobody".to_string());
            app = Some("system".to_string());
        }
        _ => {}
    }

    format!(
        "/servicesNS/{}/{}/{}",
        owner.as_deref().unwrap_or("-"),
        app.as_deref().unwrap_or("-"),
        path
    )
}
