#![forbid(unsafe_code)]

//! Property events from the remote model.
//!
//! The model producer sends JSON envelopes:
//!
//! ```json
//! { "target": "12", "type": "property", "properties": { "visible": false } }
//! ```
//!
//! An [`AdapterRegistry`] maps adapter ids to components. Visibility and
//! grid data are applied to the tree directly; any property in the
//! layout-affecting set invalidates the parent's layout tree.

use gridkit_core::{LayoutError, Result};
use gridkit_layout::GridData;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::tree::{ComponentId, LayoutTree};

/// Event type carrying property changes.
pub const PROPERTY_EVENT: &str = "property";

/// Properties that change a component's footprint by default.
pub const DEFAULT_LAYOUT_PROPERTIES: [&str; 7] = [
    "visible",
    "gridData",
    "label",
    "labelVisible",
    "labelPosition",
    "statusVisible",
    "statusPosition",
];

/// One event from the model producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEvent {
    /// Adapter id of the target component.
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl ModelEvent {
    /// Property event for `target`.
    pub fn property(target: impl Into<String>, properties: Map<String, Value>) -> Self {
        Self {
            target: target.into(),
            kind: PROPERTY_EVENT.to_owned(),
            properties,
        }
    }

    /// Decode one envelope.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| LayoutError::InvalidModelEvent(err.to_string()))
    }
}

/// What dispatching an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Unknown target or event type.
    Ignored,
    /// Properties applied; no layout affected.
    Applied,
    /// Properties applied and a layout tree invalidated.
    Invalidated,
}

/// Adapter ids and the properties that affect layout.
#[derive(Debug, Clone)]
pub struct AdapterRegistry {
    adapters: FxHashMap<String, ComponentId>,
    layout_properties: FxHashSet<String>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self {
            adapters: FxHashMap::default(),
            layout_properties: DEFAULT_LAYOUT_PROPERTIES.iter().map(|p| (*p).to_owned()).collect(),
        }
    }
}

impl AdapterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `adapter_id` to `component`, returning the previous binding.
    pub fn register(&mut self, adapter_id: impl Into<String>, component: ComponentId) -> Option<ComponentId> {
        self.adapters.insert(adapter_id.into(), component)
    }

    pub fn unregister(&mut self, adapter_id: &str) -> Option<ComponentId> {
        self.adapters.remove(adapter_id)
    }

    #[must_use]
    pub fn component(&self, adapter_id: &str) -> Option<ComponentId> {
        self.adapters.get(adapter_id).copied()
    }

    /// Treat `name` as layout-affecting too.
    pub fn add_layout_property(&mut self, name: impl Into<String>) {
        self.layout_properties.insert(name.into());
    }

    #[must_use]
    pub fn is_layout_property(&self, name: &str) -> bool {
        self.layout_properties.contains(name)
    }

    /// Decode and dispatch one JSON envelope.
    pub fn dispatch_json(&self, tree: &mut LayoutTree, json: &str) -> Result<EventOutcome> {
        let event = ModelEvent::from_json(json)?;
        self.dispatch(tree, &event)
    }

    /// Apply `event` to the tree.
    pub fn dispatch(&self, tree: &mut LayoutTree, event: &ModelEvent) -> Result<EventOutcome> {
        let Some(component) = self.component(&event.target) else {
            debug!(target_id = %event.target, "model event for unknown adapter ignored");
            return Ok(EventOutcome::Ignored);
        };
        if event.kind != PROPERTY_EVENT {
            debug!(kind = %event.kind, "unsupported model event ignored");
            return Ok(EventOutcome::Ignored);
        }

        let mut affects_layout = false;
        for (name, value) in &event.properties {
            match name.as_str() {
                "visible" => {
                    let visible = value.as_bool().ok_or_else(|| {
                        LayoutError::InvalidModelEvent(format!("visible must be a boolean, got {value}"))
                    })?;
                    tree.set_visible(component, visible)?;
                }
                "gridData" => {
                    let data = if value.is_null() {
                        None
                    } else {
                        let gd = GridData::deserialize(value)
                            .map_err(|err| LayoutError::InvalidModelEvent(format!("gridData: {err}")))?;
                        Some(gd)
                    };
                    tree.set_layout_data(component, data)?;
                }
                _ => {}
            }
            affects_layout |= self.is_layout_property(name);
        }
        if !affects_layout {
            trace!(component = component.index(), "model event applied");
            return Ok(EventOutcome::Applied);
        }

        let container = tree.parent(component)?.unwrap_or(component);
        debug!(
            component = component.index(),
            container = container.index(),
            "model event invalidates layout"
        );
        tree.invalidate_layout_tree(container, true)?;
        Ok(EventOutcome::Invalidated)
    }
}
