//! Replays a manifest's script against live bindings.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::dispatch::{ActionDispatcher, DispatchError};
use crate::manifest::{Manifest, Step};
use crate::ui::{ActionBinding, RouteWatcher, SyntheticEvent};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Unknown component '{0}'")]
    UnknownComponent(String),

    #[error("No route declared for navigation to '{0}'")]
    NoRoute(String),

    #[error("Dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Bindings for every component of a manifest plus its route watcher.
pub struct Session {
    components: Vec<(String, ActionBinding)>,
    route: Option<RouteWatcher>,
}

impl Session {
    pub fn new(dispatcher: &ActionDispatcher, manifest: &Manifest) -> Self {
        let components = manifest
            .components
            .iter()
            .map(|spec| {
                let actions: Arc<[_]> = spec.actions.clone().into();
                (spec.id.clone(), ActionBinding::new(dispatcher.clone(), actions))
            })
            .collect();

        let route = manifest.route.as_ref().map(|spec| {
            RouteWatcher::new(
                dispatcher.clone(),
                spec.actions.clone().into(),
                spec.initial.clone(),
            )
        });

        Self { components, route }
    }

    pub fn component(&self, id: &str) -> Option<&ActionBinding> {
        self.components
            .iter()
            .find(|(component_id, _)| component_id == id)
            .map(|(_, binding)| binding)
    }

    /// Mount every component in manifest order, firing `onload`.
    pub async fn mount_all(&mut self) -> Result<(), ScriptError> {
        for (id, binding) in self.components.iter_mut() {
            tracing::debug!(component = %id, "Mounting component");
            binding.mount().await?;
        }
        Ok(())
    }

    pub async fn run(&mut self, steps: &[Step]) -> Result<(), ScriptError> {
        for step in steps {
            self.run_step(step).await?;
        }
        Ok(())
    }

    pub async fn run_step(&mut self, step: &Step) -> Result<(), ScriptError> {
        match step {
            Step::Event { component, trigger } => {
                let binding = self
                    .component(component)
                    .ok_or_else(|| ScriptError::UnknownComponent(component.clone()))?;

                match trigger.event() {
                    Some(kind) => {
                        let mut event = SyntheticEvent::new(kind);
                        match binding.handle(&mut event) {
                            Some(completion) => completion.await?,
                            None => {
                                tracing::debug!(
                                    component = %component,
                                    event = %kind,
                                    "No handler bound for event"
                                );
                            }
                        }
                    }
                    // Lifecycle and custom triggers are fired directly.
                    None => binding.fire(trigger).await?,
                }
            }

            Step::DispatchThen {
                component,
                dispatch,
                then,
            } => {
                let binding = self
                    .component(component)
                    .ok_or_else(|| ScriptError::UnknownComponent(component.clone()))?;
                binding
                    .dispatch_then_fire(dispatch.clone(), then.clone())
                    .await?;
            }

            Step::Navigate { navigate } => {
                let route = self
                    .route
                    .as_mut()
                    .ok_or_else(|| ScriptError::NoRoute(navigate.clone()))?;
                route.navigate(navigate.clone()).await?;
            }

            Step::Wait { wait_ms } => {
                tokio::time::sleep(Duration::from_millis(*wait_ms)).await;
            }
        }
        Ok(())
    }
}
