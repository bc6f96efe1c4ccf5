use crate::error::{ApiError, Result};
use std::fmt;

/// Maps an action name to the path it is issued against.
///
/// The default mapping covers `disable`, `edit`, `enable`, `reload` and
/// `remove`; anything else is [`ApiError::InvalidAction`]. Implementors
/// override it for endpoints with a different action layout.
pub trait ActionPaths: fmt::Debug + Send + Sync {
    fn action_path(&self, path: &str, action: &str) -> Result<String> {
        default_action_path(path, action)
    }
}

pub fn default_action_path(path: &str, action: &str) -> Result<String> {
    match action {
        "disable" => Ok(format!("{}/disable", path)),
        "edit" => Ok(path.to_string()),
        "enable" => Ok(format!("{}/enable", path)),
        "reload" => Ok(format!("{}/_reload", path)),
        "remove" => Ok(path.to_string()),
        other => Err(ApiError::InvalidAction(other.to_string())),
    }
}

/// The default mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardActions;

impl ActionPaths for StandardActions {}

/// Endpoints that can only be read, such as server info or search results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnlyActions;

impl ActionPaths for ReadOnlyActions {
    fn action_path(&self, path: &str, action: &str) -> Result<String> {
        default_action_path(path, action)?;
        Err(ApiError::UnsupportedOperation(format!(
            "'{}' is not available for read-only resource {}",
            action, path
        )))
    }
}
