//! Read-only bootstrap context embedded by the server into every page.
//!
//! Parsed once at startup and handed explicitly to the parts of the shell that
//! need session or settings data.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::Post;

#[derive(Debug, Error)]
#[error("malformed bootstrap document: {0}")]
pub struct ContextError(#[from] serde_json::Error);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default, rename = "globalAssetsURL")]
    pub global_assets_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Visitor,
    Collaborator,
    Administrator,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrentUser {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
}

impl CurrentUser {
    pub fn is_collaborator(&self) -> bool {
        matches!(self.role, UserRole::Collaborator | UserRole::Administrator)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
struct BootstrapDocument {
    #[serde(default, rename = "__settings")]
    settings: SystemSettings,
    #[serde(default, rename = "__user")]
    user: Option<CurrentUser>,
    #[serde(default, rename = "__tenant")]
    tenant: Value,
    #[serde(default, rename = "__props")]
    props: Map<String, Value>,
    #[serde(default, rename = "__contextID")]
    context_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct ShellContext {
    settings: SystemSettings,
    user: Option<CurrentUser>,
    tenant: Value,
    props: Map<String, Value>,
    context_id: String,
}

impl ShellContext {
    pub fn from_json(raw: &str) -> Result<Self, ContextError> {
        let doc: BootstrapDocument = serde_json::from_str(raw)?;
        Ok(Self {
            settings: doc.settings,
            user: doc.user,
            tenant: doc.tenant,
            props: doc.props,
            context_id: doc.context_id,
        })
    }

    pub fn settings(&self) -> &SystemSettings {
        &self.settings
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// Tenant record, passed through untouched.
    pub fn tenant(&self) -> &Value {
        &self.tenant
    }

    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }

    pub fn context_id(&self) -> &str {
        &self.context_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_staff(&self) -> bool {
        self.user.as_ref().is_some_and(CurrentUser::is_collaborator)
    }

    pub fn is_production(&self) -> bool {
        self.settings.environment == "production"
    }

    pub fn is_single_host_mode(&self) -> bool {
        self.settings.mode == "single"
    }

    /// Classes applied to the document body.
    pub fn body_classes(&self) -> Vec<&'static str> {
        let mut classes = Vec::with_capacity(2);
        if self.is_authenticated() {
            classes.push("is-authenticated");
        }
        if self.is_staff() {
            classes.push("is-staff");
        }
        classes
    }

    /// Posts rendered by the server with the page; empty when absent or not a list.
    pub fn initial_posts(&self) -> Vec<Post> {
        match self.props.get("posts") {
            Some(Value::Array(items)) => items.iter().cloned().map(Post::from).collect(),
            _ => Vec::new(),
        }
    }
}
