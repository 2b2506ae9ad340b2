//! JSON manifest: component action lists, an optional route, and a script
//! of interactions to replay.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::{ActionDescriptor, DispatchMessage};
use crate::trigger::Trigger;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest validation failed: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
    #[serde(default)]
    pub route: Option<RouteSpec>,
    #[serde(default)]
    pub script: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub id: String,
    #[serde(default)]
    pub actions: Vec<ActionDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSpec {
    #[serde(default = "default_location")]
    pub initial: String,
    #[serde(default)]
    pub actions: Vec<ActionDescriptor>,
}

fn default_location() -> String {
    "/".to_string()
}

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    /// `{"component": "save", "dispatch": {...}, "then": "onchange"}`
    DispatchThen {
        component: String,
        dispatch: DispatchMessage,
        then: Trigger,
    },
    /// `{"component": "save", "trigger": "onclick"}`
    Event { component: String, trigger: Trigger },
    /// `{"navigate": "/reports"}`
    Navigate { navigate: String },
    /// `{"waitMs": 250}`
    Wait {
        #[serde(rename = "waitMs")]
        wait_ms: u64,
    },
}

impl Manifest {
    pub fn load_from(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| ManifestError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let manifest = Self::parse(&content).map_err(|e| ManifestError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        manifest.validate()?;
        Ok(manifest)
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Checks:
    /// - Component ids are unique
    /// - Script steps only reference declared components
    /// - Navigation steps have a route to act on
    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut ids = HashSet::new();
        for component in &self.components {
            if !ids.insert(component.id.as_str()) {
                return Err(ManifestError::ValidationError {
                    message: format!("Duplicate component id '{}'", component.id),
                });
            }
        }

        for (index, step) in self.script.iter().enumerate() {
            match step {
                Step::Event { component, .. } | Step::DispatchThen { component, .. } => {
                    if !ids.contains(component.as_str()) {
                        return Err(ManifestError::ValidationError {
                            message: format!(
                                "Script step {} references unknown component '{}'",
                                index, component
                            ),
                        });
                    }
                }
                Step::Navigate { .. } if self.route.is_none() => {
                    return Err(ManifestError::ValidationError {
                        message: format!("Script step {} navigates but no route is declared", index),
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }
}
